//! Content writer: one plan item in, one draft out.

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use cadence_llm::{generate_object, LLMAdapter};

use crate::error::AgentError;
use crate::records::{ContentDraft, ContentPlanItem, Validate};

/// Input to the writer for one plan item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WriterBrief {
    /// The plan item to write
    pub content_plan: ContentPlanItem,
    /// House style the draft must follow
    pub style_guidelines: String,
    /// Post templates available to the writer
    #[serde(default)]
    pub templates: Vec<String>,
    /// One-liner hooks available to the writer
    #[serde(default)]
    pub hooks: Vec<String>,
}

const SYSTEM: &str = "You are a content writer with excellent writing skills. \
                      You craft compelling content from a content plan, \
                      following the style guidelines and using the available \
                      templates and hooks.";

/// Write a draft for one plan item.
///
/// The draft's `plan_item_id` and `created_at` are stamped here from the
/// input plan item.
///
/// # Errors
///
/// Fails on model errors, unparseable output, or a draft with an empty
/// title or body.
#[instrument(skip_all, fields(title = %brief.content_plan.title))]
pub async fn write_draft(
    adapter: &dyn LLMAdapter,
    brief: &WriterBrief,
) -> Result<ContentDraft, AgentError> {
    let plan_json = serde_json::to_string(&brief.content_plan)
        .map_err(|e| AgentError::InvalidInput(format!("content_plan not serializable: {e}")))?;

    let prompt = format!(
        "Create a single content draft based on this content plan.\n\n\
         Key objectives:\n\
         - Use engaging one-liner hooks from the provided list.\n\
         - Write in a conversational tone, as if presenting on stage.\n\
         - Focus on one topic per post for clarity.\n\
         - End with a question to encourage engagement.\n\
         - Provide sources and citations where necessary.\n\n\
         Content plan: {}\n\
         Style guidelines: {}\n\
         Templates: {}\n\
         Hooks: {}",
        plan_json,
        brief.style_guidelines,
        brief.templates.join(", "),
        brief.hooks.join(", "),
    );

    let mut draft: ContentDraft = generate_object(adapter, SYSTEM, &prompt).await?;
    draft.plan_item_id = brief.content_plan.idea_id;
    draft.created_at = Utc::now();

    draft.validate()?;
    info!(chars = draft.body.len(), "Wrote content draft");
    Ok(draft)
}
