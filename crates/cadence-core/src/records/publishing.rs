//! Records for the design and scheduling stages.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

use super::{non_empty, Platform, Validate};

/// Kind of visual asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AssetType {
    Image,
    Video,
    Carousel,
}

/// A visual asset produced by the designer for one content piece.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VisualAsset {
    /// The content this asset illustrates (equals the final's `draft_id`)
    pub content_id: Uuid,
    /// Kind of asset
    pub asset_type: AssetType,
    /// Where the asset lives
    pub asset_url: String,
    /// Accessibility text
    pub alt_text: String,
    /// When the asset was created
    pub created_at: DateTime<Utc>,
}

impl Validate for VisualAsset {
    fn validate(&self) -> Result<(), ValidationError> {
        non_empty("asset_url", &self.asset_url)?;
        non_empty("alt_text", &self.alt_text)
    }
}

/// A post placed on the posting schedule.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScheduledPost {
    /// The content being posted
    pub content_id: Uuid,
    /// Target platform
    pub platform: Platform,
    /// When the post goes out
    pub scheduled_at: DateTime<Utc>,
    /// When the post actually went out, once known
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    /// Public URL of the post, once known
    #[serde(default)]
    pub post_url: Option<String>,
}

impl Validate for ScheduledPost {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.post_url {
            non_empty("post_url", url)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_requires_alt_text() {
        let asset = VisualAsset {
            content_id: Uuid::new_v4(),
            asset_type: AssetType::Image,
            asset_url: "https://assets.example.com/a.png".to_string(),
            alt_text: String::new(),
            created_at: Utc::now(),
        };
        assert!(matches!(
            asset.validate(),
            Err(ValidationError::Empty { field: "alt_text" })
        ));
    }

    #[test]
    fn test_scheduled_post_optional_fields_default() {
        let json = serde_json::json!({
            "content_id": Uuid::new_v4(),
            "platform": "Twitter",
            "scheduled_at": Utc::now(),
        });
        let post: ScheduledPost = serde_json::from_value(json).unwrap();
        assert!(post.posted_at.is_none());
        assert!(post.post_url.is_none());
        assert!(post.validate().is_ok());
    }
}
