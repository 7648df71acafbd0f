//! Content strategist: content ideas in, strategic content plan out.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, instrument};

use cadence_llm::{generate_object, LLMAdapter};

use crate::error::AgentError;
use crate::records::{ContentIdea, ContentPlanItem, Platform, Validate};

/// Input to the strategist.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StrategistBrief {
    /// Ideas to refine into a plan
    pub content_ideas: Vec<ContentIdea>,
    /// What the campaign wants to achieve
    pub campaign_goals: Vec<String>,
    /// Platforms the campaign publishes to
    pub target_platforms: Vec<Platform>,
}

const SYSTEM: &str = "You are a content strategist. You refine content ideas \
                      into a strategic content plan that maximizes relevance \
                      and impact.";

/// Refine content ideas into a content plan.
///
/// Every plan item must reference one of the input ideas by id; items
/// pointing anywhere else are rejected.
///
/// # Errors
///
/// Fails on model errors, unparseable output, plan items without platforms,
/// or plan items referencing unknown idea ids.
#[instrument(skip_all, fields(ideas = brief.content_ideas.len()))]
pub async fn plan_content(
    adapter: &dyn LLMAdapter,
    brief: &StrategistBrief,
) -> Result<Vec<ContentPlanItem>, AgentError> {
    if brief.content_ideas.is_empty() {
        return Err(AgentError::InvalidInput(
            "content_ideas must not be empty".to_string(),
        ));
    }

    let ideas_json = serde_json::to_string(&brief.content_ideas)
        .map_err(|e| AgentError::InvalidInput(format!("content_ideas not serializable: {e}")))?;

    let platforms: Vec<String> = brief
        .target_platforms
        .iter()
        .map(ToString::to_string)
        .collect();

    let prompt = format!(
        "Refine the given content ideas and develop a strategic content plan.\n\
         Campaign goals: {}\n\
         Target platforms: {}\n\n\
         For each content idea, produce one plan item whose idea_id matches\n\
         the idea it refines, with objectives, the platforms best suited for\n\
         this content, key messages to convey, and a proposed publishing date.\n\n\
         Content ideas: {}",
        brief.campaign_goals.join(", "),
        platforms.join(", "),
        ideas_json,
    );

    let plan: Vec<ContentPlanItem> = generate_object(adapter, SYSTEM, &prompt).await?;
    plan.validate()?;

    let known: HashSet<_> = brief.content_ideas.iter().map(|i| i.id).collect();
    for item in &plan {
        if !known.contains(&item.idea_id) {
            return Err(AgentError::UnknownId(item.idea_id));
        }
    }

    info!(items = plan.len(), "Developed content plan");
    Ok(plan)
}
