//! Content archivist: finished content in, archive records out.
//!
//! Archival is deterministic: every piece of approved content gets one
//! archive record pointing at its storage location.

use chrono::Utc;
use tracing::{info, instrument};

use crate::error::AgentError;
use crate::records::{ArchivedContent, ContentArchiveStatus, FinalContent, Validate};

/// Archivist configuration.
#[derive(Debug, Clone)]
pub struct ArchivistConfig {
    /// Base URL archived content lives under
    pub storage_base_url: String,
}

impl Default for ArchivistConfig {
    fn default() -> Self {
        Self {
            storage_base_url: "https://notion.so/content".to_string(),
        }
    }
}

/// Archive every approved content piece.
///
/// # Errors
///
/// Fails when a produced record is invalid, which only happens with an
/// empty `storage_base_url` or an untitled content piece.
#[instrument(skip_all, fields(contents = finals.len()))]
pub fn archive_content(
    config: &ArchivistConfig,
    finals: &[FinalContent],
) -> Result<Vec<ArchivedContent>, AgentError> {
    let now = Utc::now();
    let base = config.storage_base_url.trim_end_matches('/');

    let archived: Vec<ArchivedContent> = finals
        .iter()
        .map(|content| ArchivedContent {
            content_id: content.draft_id,
            title: content.title.clone(),
            status: ContentArchiveStatus::Archived,
            storage_location: format!("{base}/{}", content.draft_id),
            archived_at: now,
        })
        .collect();

    archived.validate()?;
    info!(archived = archived.len(), "Archived content");
    Ok(archived)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_archive_record_per_content() {
        let id = Uuid::new_v4();
        let finals = vec![FinalContent {
            draft_id: id,
            title: "Profiling async services".to_string(),
            body: "Body".to_string(),
            hook: "Hook".to_string(),
            call_to_action: "CTA".to_string(),
            sources: vec![],
            editor_comments: vec![],
            approved_at: Utc::now(),
        }];

        let archived = archive_content(&ArchivistConfig::default(), &finals).unwrap();

        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].content_id, id);
        assert_eq!(archived[0].status, ContentArchiveStatus::Archived);
        assert_eq!(
            archived[0].storage_location,
            format!("https://notion.so/content/{id}")
        );
    }
}
