//! Pipeline records.
//!
//! Each stage communicates through one of these validated records. A record
//! is created by exactly one stage and consumed read-only downstream;
//! identifiers linking stages (`plan_item_id` back to `idea_id`, `draft_id`
//! back to `plan_item_id`) are preserved across the pipeline.

mod content;
mod engagement;
mod publishing;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

pub use content::{ContentDraft, ContentIdea, ContentPlanItem, FinalContent};
pub use engagement::{
    ArchivedContent, ContentArchiveStatus, EngagementActivity, Interaction, InteractionType,
    PerformanceMetrics, PerformanceReport,
};
pub use publishing::{AssetType, ScheduledPost, VisualAsset};

/// Social platform a content piece targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Platform {
    LinkedIn,
    Twitter,
    Facebook,
    Instagram,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LinkedIn => "LinkedIn",
            Self::Twitter => "Twitter",
            Self::Facebook => "Facebook",
            Self::Instagram => "Instagram",
        };
        f.write_str(name)
    }
}

/// Validation over a produced record.
///
/// Structural validation happens at deserialization; this trait carries the
/// value-level invariants (bounded scores and rates, non-empty links).
pub trait Validate {
    /// Check the record's invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    fn validate(&self) -> Result<(), ValidationError>;
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> Result<(), ValidationError> {
        self.iter().try_for_each(Validate::validate)
    }
}

/// Check a score or rate lies within the unit interval.
pub(crate) fn unit_interval(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, value })
    }
}

/// Check a string field is non-empty.
pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Empty { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_display_matches_serde() {
        let json = serde_json::to_string(&Platform::LinkedIn).unwrap();
        assert_eq!(json, "\"LinkedIn\"");
        assert_eq!(Platform::LinkedIn.to_string(), "LinkedIn");
    }

    #[test]
    fn test_unit_interval_bounds() {
        assert!(unit_interval("score", 0.0).is_ok());
        assert!(unit_interval("score", 1.0).is_ok());
        assert!(unit_interval("score", 1.01).is_err());
        assert!(unit_interval("score", -0.1).is_err());
    }
}
