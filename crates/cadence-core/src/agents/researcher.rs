//! Content researcher: campaign brief in, content ideas out.

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use cadence_llm::{generate_object, LLMAdapter};

use crate::error::AgentError;
use crate::records::{ContentIdea, Validate};

/// Campaign brief the researcher works from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResearchBrief {
    /// What the campaign wants to achieve
    pub campaign_goals: Vec<String>,
    /// Audience segments to write for
    pub target_audience: Vec<String>,
    /// Industry the campaign operates in
    pub industry: String,
    /// Titles of previously published content, to avoid repeats
    #[serde(default)]
    pub previous_content: Vec<String>,
}

const SYSTEM: &str = "You are a content researcher. You generate innovative, \
                      unique content ideas that align with campaign goals and \
                      the interests of the target audience.";

/// Generate content ideas for a campaign.
///
/// Ids and creation timestamps are assigned here, so each idea's `id` is
/// unique regardless of what the model emitted.
///
/// # Errors
///
/// Fails on model errors, unparseable output, or ideas with out-of-range
/// relevance scores.
#[instrument(skip_all, fields(industry = %brief.industry))]
pub async fn research_ideas(
    adapter: &dyn LLMAdapter,
    brief: &ResearchBrief,
) -> Result<Vec<ContentIdea>, AgentError> {
    if brief.campaign_goals.is_empty() {
        return Err(AgentError::InvalidInput(
            "campaign_goals must not be empty".to_string(),
        ));
    }

    let prompt = format!(
        "Generate a list of content ideas for a campaign in the {} industry.\n\
         Campaign goals: {}\n\
         Target audience: {}\n\
         Avoid repeating these previous topics: {}\n\n\
         Each idea needs a compelling title, a brief description, relevant\n\
         keywords, and a relevance score between 0 and 1. Ensure every idea\n\
         is unique, relevant, and valuable to the target audience.",
        brief.industry,
        brief.campaign_goals.join(", "),
        brief.target_audience.join(", "),
        if brief.previous_content.is_empty() {
            "none".to_string()
        } else {
            brief.previous_content.join(", ")
        },
    );

    let mut ideas: Vec<ContentIdea> = generate_object(adapter, SYSTEM, &prompt).await?;

    let now = Utc::now();
    for idea in &mut ideas {
        idea.id = Uuid::new_v4();
        idea.created_at = now;
    }

    ideas.validate()?;
    info!(count = ideas.len(), "Generated content ideas");
    Ok(ideas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingAdapter, StubAdapter};

    fn brief() -> ResearchBrief {
        ResearchBrief {
            campaign_goals: vec!["Grow newsletter signups".to_string()],
            target_audience: vec!["Backend engineers".to_string()],
            industry: "Developer tools".to_string(),
            previous_content: vec!["Why we rewrote our queue".to_string()],
        }
    }

    fn idea_json(score: f64) -> String {
        format!(
            r#"[{{"id": "00000000-0000-0000-0000-000000000000",
                 "title": "Profiling async services",
                 "description": "A walkthrough of profiling tools",
                 "keywords": ["profiling", "async"],
                 "relevance_score": {score},
                 "created_at": "2026-01-05T09:00:00Z"}}]"#
        )
    }

    #[tokio::test]
    async fn test_ideas_get_fresh_ids() {
        let adapter = StubAdapter::replying(idea_json(0.8));
        let ideas = research_ideas(&adapter, &brief()).await.unwrap();

        assert_eq!(ideas.len(), 1);
        assert_ne!(ideas[0].id, Uuid::nil());
        assert!(adapter.last_prompt().contains("Developer tools"));
        assert!(adapter.last_prompt().contains("Why we rewrote our queue"));
    }

    #[tokio::test]
    async fn test_out_of_range_score_rejected() {
        let adapter = StubAdapter::replying(idea_json(1.4));
        let result = research_ideas(&adapter, &brief()).await;
        assert!(matches!(result, Err(AgentError::Validation(_))));
    }

    #[tokio::test]
    async fn test_requires_campaign_goals() {
        let adapter = StubAdapter::replying(idea_json(0.5));
        let mut empty = brief();
        empty.campaign_goals.clear();
        let result = research_ideas(&adapter, &empty).await;
        assert!(matches!(result, Err(AgentError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let result = research_ideas(&FailingAdapter, &brief()).await;
        assert!(matches!(result, Err(AgentError::Llm(_))));
    }
}
