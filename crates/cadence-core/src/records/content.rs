//! Records for the ideation and writing stages.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

use super::{non_empty, unit_interval, Platform, Validate};

/// A content idea produced by the researcher.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContentIdea {
    /// Unique id, referenced by the plan
    pub id: Uuid,
    /// Compelling headline for the idea
    pub title: String,
    /// Brief description
    pub description: String,
    /// Relevant keywords
    pub keywords: Vec<String>,
    /// Relevance to the campaign, within [0, 1]
    pub relevance_score: f64,
    /// When the idea was created
    pub created_at: DateTime<Utc>,
}

impl Validate for ContentIdea {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("title", &self.title)?;
        unit_interval("relevance_score", self.relevance_score)
    }
}

/// One item of the strategist's content plan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContentPlanItem {
    /// The idea this item refines
    pub idea_id: Uuid,
    /// Title of the content
    pub title: String,
    /// Objectives this content aims to achieve
    pub objectives: Vec<String>,
    /// Platforms best suited for this content
    pub platforms: Vec<Platform>,
    /// Key messages to convey
    pub key_messages: Vec<String>,
    /// Proposed publishing date
    pub scheduled_date: DateTime<Utc>,
}

impl Validate for ContentPlanItem {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("title", &self.title)?;
        if self.platforms.is_empty() {
            return Err(ValidationError::Empty { field: "platforms" });
        }
        Ok(())
    }
}

/// A draft produced by the writer for one plan item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContentDraft {
    /// The plan item this draft implements (equals the plan's `idea_id`)
    pub plan_item_id: Uuid,
    /// Title
    pub title: String,
    /// Body text
    pub body: String,
    /// Opening hook
    pub hook: String,
    /// Closing call to action
    pub call_to_action: String,
    /// Source URLs cited in the body
    #[serde(default)]
    pub sources: Vec<String>,
    /// When the draft was written
    pub created_at: DateTime<Utc>,
}

impl Validate for ContentDraft {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("title", &self.title)?;
        non_empty("body", &self.body)
    }
}

/// Approved content produced by the editor.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FinalContent {
    /// The draft this content finalizes (equals the draft's `plan_item_id`)
    pub draft_id: Uuid,
    /// Title
    pub title: String,
    /// Edited body text
    pub body: String,
    /// Opening hook
    pub hook: String,
    /// Closing call to action
    pub call_to_action: String,
    /// Source URLs cited in the body
    #[serde(default)]
    pub sources: Vec<String>,
    /// Constructive feedback left by the editor
    #[serde(default)]
    pub editor_comments: Vec<String>,
    /// When the content was approved
    pub approved_at: DateTime<Utc>,
}

impl Validate for FinalContent {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("title", &self.title)?;
        non_empty("body", &self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea(score: f64) -> ContentIdea {
        ContentIdea {
            id: Uuid::new_v4(),
            title: "Why hooks matter".to_string(),
            description: "Short post on hooks".to_string(),
            keywords: vec!["hooks".to_string()],
            relevance_score: score,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_idea_score_bounds() {
        assert!(idea(0.0).validate().is_ok());
        assert!(idea(1.0).validate().is_ok());
        assert!(matches!(
            idea(1.2).validate(),
            Err(ValidationError::OutOfRange { field: "relevance_score", .. })
        ));
    }

    #[test]
    fn test_idea_requires_title() {
        let mut idea = idea(0.5);
        idea.title = "  ".to_string();
        assert!(matches!(
            idea.validate(),
            Err(ValidationError::Empty { field: "title" })
        ));
    }

    #[test]
    fn test_plan_item_requires_platform() {
        let item = ContentPlanItem {
            idea_id: Uuid::new_v4(),
            title: "Post".to_string(),
            objectives: vec![],
            platforms: vec![],
            key_messages: vec![],
            scheduled_date: Utc::now(),
        };
        assert!(matches!(
            item.validate(),
            Err(ValidationError::Empty { field: "platforms" })
        ));
    }

    #[test]
    fn test_vec_validation_stops_at_first_failure() {
        let records = vec![idea(0.5), idea(2.0)];
        assert!(records.validate().is_err());
    }
}
