//! Content editor: drafts in, approved final content out.

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use cadence_llm::{generate_object, LLMAdapter};

use crate::error::AgentError;
use crate::records::{ContentDraft, FinalContent, Validate};

/// Input to the editor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EditorBrief {
    /// Drafts to review, in order
    pub content_drafts: Vec<ContentDraft>,
    /// House style the finals must follow
    pub style_guidelines: String,
}

const SYSTEM: &str = "You are a content editor with a keen eye for detail. \
                      You review and refine content drafts, ensuring they \
                      meet quality standards and adhere to the style \
                      guidelines.";

/// Review drafts and produce approved final content.
///
/// The model must return exactly one final per draft, in input order; each
/// final's `draft_id` and `approved_at` are stamped here from the matching
/// draft.
///
/// # Errors
///
/// Fails on model errors, unparseable output, a final count that differs
/// from the draft count, or finals with empty titles or bodies.
#[instrument(skip_all, fields(drafts = brief.content_drafts.len()))]
pub async fn edit_drafts(
    adapter: &dyn LLMAdapter,
    brief: &EditorBrief,
) -> Result<Vec<FinalContent>, AgentError> {
    if brief.content_drafts.is_empty() {
        return Err(AgentError::InvalidInput(
            "content_drafts must not be empty".to_string(),
        ));
    }

    let drafts_json = serde_json::to_string(&brief.content_drafts)
        .map_err(|e| AgentError::InvalidInput(format!("content_drafts not serializable: {e}")))?;

    let prompt = format!(
        "Review and finalize these content drafts, in order.\n\n\
         Key objectives:\n\
         - Check for clarity and coherence.\n\
         - Ensure grammatical accuracy.\n\
         - Verify the effectiveness of hooks and calls to action.\n\
         - Provide constructive feedback in editor_comments.\n\n\
         Return exactly one finalized piece per draft, in the same order.\n\n\
         Content drafts: {}\n\
         Style guidelines: {}",
        drafts_json, brief.style_guidelines,
    );

    let mut finals: Vec<FinalContent> = generate_object(adapter, SYSTEM, &prompt).await?;

    if finals.len() != brief.content_drafts.len() {
        return Err(AgentError::CountMismatch {
            expected: brief.content_drafts.len(),
            actual: finals.len(),
        });
    }

    let now = Utc::now();
    for (content, draft) in finals.iter_mut().zip(&brief.content_drafts) {
        content.draft_id = draft.plan_item_id;
        content.approved_at = now;
    }

    finals.validate()?;
    info!(approved = finals.len(), "Approved final content");
    Ok(finals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubAdapter;
    use uuid::Uuid;

    fn draft(plan_item_id: Uuid) -> ContentDraft {
        ContentDraft {
            plan_item_id,
            title: "Profiling async services".to_string(),
            body: "Most latency hides between awaits.".to_string(),
            hook: "Your profiler is lying to you.".to_string(),
            call_to_action: "What does your flamegraph miss?".to_string(),
            sources: vec![],
            created_at: Utc::now(),
        }
    }

    fn final_json(count: usize) -> String {
        let item = r#"{"draft_id": "00000000-0000-0000-0000-000000000000",
            "title": "Profiling async services",
            "body": "Most latency hides between awaits, not inside them.",
            "hook": "Your profiler is lying to you.",
            "call_to_action": "What does your flamegraph miss?",
            "sources": [],
            "editor_comments": ["Tightened the body."],
            "approved_at": "2026-01-06T09:00:00Z"}"#;
        format!("[{}]", vec![item; count].join(","))
    }

    #[tokio::test]
    async fn test_finals_link_back_to_drafts() {
        let id = Uuid::new_v4();
        let adapter = StubAdapter::replying(final_json(1));
        let brief = EditorBrief {
            content_drafts: vec![draft(id)],
            style_guidelines: "Plain language.".to_string(),
        };

        let finals = edit_drafts(&adapter, &brief).await.unwrap();
        assert_eq!(finals[0].draft_id, id);
        assert_eq!(finals[0].editor_comments, vec!["Tightened the body."]);
    }

    #[tokio::test]
    async fn test_count_mismatch_rejected() {
        let adapter = StubAdapter::replying(final_json(2));
        let brief = EditorBrief {
            content_drafts: vec![draft(Uuid::new_v4())],
            style_guidelines: String::new(),
        };

        let result = edit_drafts(&adapter, &brief).await;
        assert!(matches!(
            result,
            Err(AgentError::CountMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }
}
