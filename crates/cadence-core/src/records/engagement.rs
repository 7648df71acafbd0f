//! Records for the engagement, reporting, and archival stages.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

use super::{non_empty, unit_interval, Platform, Validate};

/// Kind of audience interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum InteractionType {
    Comment,
    Message,
    Like,
    Share,
}

/// One interaction with an audience member.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Interaction {
    /// Audience member id
    pub user_id: String,
    /// Kind of interaction
    pub interaction_type: InteractionType,
    /// Text of the interaction, when there is one
    #[serde(default)]
    pub content: Option<String>,
}

/// A day of engagement on one platform.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EngagementActivity {
    /// Day of the activity
    pub date: DateTime<Utc>,
    /// Platform the activity happened on
    pub platform: Platform,
    /// Interactions handled
    pub interactions: Vec<Interaction>,
}

impl Validate for EngagementActivity {
    fn validate(&self) -> Result<(), ValidationError> {
        self.interactions
            .iter()
            .try_for_each(|i| non_empty("user_id", &i.user_id))
    }
}

/// Performance metrics for one content piece on one platform.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceMetrics {
    /// Content the metrics describe
    pub content_id: Uuid,
    /// Platform measured
    pub platform: Platform,
    /// Views
    pub views: u64,
    /// Likes
    pub likes: u64,
    /// Shares
    pub shares: u64,
    /// Comments
    pub comments: u64,
    /// Click-through rate, within [0, 1]
    pub click_through_rate: f64,
    /// Engagement rate, within [0, 1]
    pub engagement_rate: f64,
}

/// A performance report produced by the analyst.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceReport {
    /// The measured numbers
    pub metrics: PerformanceMetrics,
    /// What the numbers say
    pub insights: Vec<String>,
    /// What to do about it
    pub recommendations: Vec<String>,
    /// When the report was produced
    pub reported_at: DateTime<Utc>,
}

impl Validate for PerformanceReport {
    fn validate(&self) -> Result<(), ValidationError> {
        unit_interval("click_through_rate", self.metrics.click_through_rate)?;
        unit_interval("engagement_rate", self.metrics.engagement_rate)
    }
}

/// Lifecycle status of archived content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ContentArchiveStatus {
    Drafted,
    Published,
    Archived,
}

/// Terminal record produced by the archivist.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArchivedContent {
    /// The content archived
    pub content_id: Uuid,
    /// Title
    pub title: String,
    /// Status at archival
    pub status: ContentArchiveStatus,
    /// Where the archived content lives
    pub storage_location: String,
    /// When the content was archived
    pub archived_at: DateTime<Utc>,
}

impl Validate for ArchivedContent {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("title", &self.title)?;
        non_empty("storage_location", &self.storage_location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(engagement_rate: f64) -> PerformanceReport {
        PerformanceReport {
            metrics: PerformanceMetrics {
                content_id: Uuid::new_v4(),
                platform: Platform::LinkedIn,
                views: 1000,
                likes: 120,
                shares: 15,
                comments: 8,
                click_through_rate: 0.04,
                engagement_rate,
            },
            insights: vec!["Above average engagement".to_string()],
            recommendations: vec!["Post similar content".to_string()],
            reported_at: Utc::now(),
        }
    }

    #[test]
    fn test_report_rejects_engagement_rate_above_one() {
        assert!(matches!(
            report(1.5).validate(),
            Err(ValidationError::OutOfRange { field: "engagement_rate", value }) if value > 1.0
        ));
    }

    #[test]
    fn test_report_accepts_bounded_rates() {
        assert!(report(0.14).validate().is_ok());
    }

    #[test]
    fn test_activity_requires_user_ids() {
        let activity = EngagementActivity {
            date: Utc::now(),
            platform: Platform::Twitter,
            interactions: vec![Interaction {
                user_id: String::new(),
                interaction_type: InteractionType::Like,
                content: None,
            }],
        };
        assert!(activity.validate().is_err());
    }
}
