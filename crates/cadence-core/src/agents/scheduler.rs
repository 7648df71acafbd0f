//! Social media scheduler: approved content in, scheduled posts out.
//!
//! Scheduling is deterministic: one post per platform the plan item
//! targets, at the platform's optimal posting slot when one is known and
//! at the plan item's proposed date otherwise.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::error::AgentError;
use crate::records::{ContentPlanItem, FinalContent, Platform, ScheduledPost, Validate};

/// Optimal posting time for one platform.
#[derive(Debug, Clone)]
pub struct PostingSlot {
    /// Platform the slot applies to
    pub platform: Platform,
    /// When posts on this platform perform best
    pub posts_at: DateTime<Utc>,
}

/// Schedule one approved content piece across its plan item's platforms.
///
/// # Errors
///
/// Fails when the content does not belong to the plan item, or when the
/// plan item targets no platforms.
#[instrument(skip_all, fields(title = %plan_item.title))]
pub fn schedule_posts(
    slots: &[PostingSlot],
    plan_item: &ContentPlanItem,
    content: &FinalContent,
) -> Result<Vec<ScheduledPost>, AgentError> {
    if content.draft_id != plan_item.idea_id {
        return Err(AgentError::UnknownId(content.draft_id));
    }
    if plan_item.platforms.is_empty() {
        return Err(AgentError::InvalidInput(
            "plan item targets no platforms".to_string(),
        ));
    }

    let posts: Vec<ScheduledPost> = plan_item
        .platforms
        .iter()
        .map(|&platform| {
            let scheduled_at = slots
                .iter()
                .find(|slot| slot.platform == platform)
                .map_or(plan_item.scheduled_date, |slot| slot.posts_at);
            ScheduledPost {
                content_id: content.draft_id,
                platform,
                scheduled_at,
                posted_at: None,
                post_url: None,
            }
        })
        .collect();

    posts.validate()?;
    info!(posts = posts.len(), "Scheduled posts");
    Ok(posts)
}
