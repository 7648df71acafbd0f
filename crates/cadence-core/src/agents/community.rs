//! Community manager: audience interactions in, engagement activities out.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use cadence_llm::{generate_object, LLMAdapter};

use crate::error::AgentError;
use crate::records::{EngagementActivity, ScheduledPost, Validate};

/// Kind of interaction an audience member had with the campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AudienceInteractionType {
    Comment,
    Like,
    ProfileView,
}

/// One audience member's interaction, as reported by a platform.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AudienceMember {
    /// Platform user id
    pub user_id: String,
    /// Display name
    pub user_name: String,
    /// What they did
    pub interaction_type: AudienceInteractionType,
}

/// Input to the community manager.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CommunityBrief {
    /// Posts currently live or scheduled
    pub scheduled_posts: Vec<ScheduledPost>,
    /// Audience interactions to respond to
    pub audience_data: Vec<AudienceMember>,
}

const SYSTEM: &str = "You are a community manager responsible for engaging \
                      with the audience. You respond to comments and \
                      messages, leave comments on other users' posts, and \
                      send appreciation messages.";

/// Plan engagement activities for the reported audience interactions.
///
/// # Errors
///
/// Fails on model errors, unparseable output, or activities with
/// interactions missing a user id.
#[instrument(skip_all, fields(audience = brief.audience_data.len()))]
pub async fn engage_audience(
    adapter: &dyn LLMAdapter,
    brief: &CommunityBrief,
) -> Result<Vec<EngagementActivity>, AgentError> {
    let audience_json = serde_json::to_string(&brief.audience_data)
        .map_err(|e| AgentError::InvalidInput(format!("audience_data not serializable: {e}")))?;
    let posts_json = serde_json::to_string(&brief.scheduled_posts)
        .map_err(|e| AgentError::InvalidInput(format!("scheduled_posts not serializable: {e}")))?;

    let prompt = format!(
        "Generate engagement activities for these audience interactions.\n\n\
         Key objectives:\n\
         - Respond to interactions promptly.\n\
         - Personalize responses to foster engagement.\n\
         - Keep track of all engagement activities.\n\n\
         Audience data: {audience_json}\n\
         Scheduled posts: {posts_json}"
    );

    let activities: Vec<EngagementActivity> = generate_object(adapter, SYSTEM, &prompt).await?;
    activities.validate()?;

    info!(activities = activities.len(), "Planned engagement");
    Ok(activities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubAdapter;

    fn brief() -> CommunityBrief {
        CommunityBrief {
            scheduled_posts: vec![],
            audience_data: vec![AudienceMember {
                user_id: "u-17".to_string(),
                user_name: "Nadia".to_string(),
                interaction_type: AudienceInteractionType::Comment,
            }],
        }
    }

    #[tokio::test]
    async fn test_activities_parsed_from_reply() {
        let adapter = StubAdapter::replying(
            r#"[{"date": "2026-02-02T12:00:00Z",
                "platform": "LinkedIn",
                "interactions": [{"user_id": "u-17",
                                  "interaction_type": "Comment",
                                  "content": "Thanks for the kind words, Nadia!"}]}]"#,
        );

        let activities = engage_audience(&adapter, &brief()).await.unwrap();

        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].interactions[0].user_id, "u-17");
        assert!(adapter.last_prompt().contains("Nadia"));
    }

    #[tokio::test]
    async fn test_missing_user_id_rejected() {
        let adapter = StubAdapter::replying(
            r#"[{"date": "2026-02-02T12:00:00Z",
                "platform": "LinkedIn",
                "interactions": [{"user_id": "", "interaction_type": "Like"}]}]"#,
        );

        let result = engage_audience(&adapter, &brief()).await;
        assert!(matches!(result, Err(AgentError::Validation(_))));
    }
}
