//! Strategy planner: project description in, high-level plan out.
//!
//! Unlike the pipeline agents, the planner never fails outright: model
//! errors come back as a [`StrategyPlan`] with an empty plan and the
//! `error` field populated, so callers can always inspect the outcome.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{instrument, warn};

use cadence_llm::{generate_object, LLMAdapter};

use crate::error::AgentError;

/// Input to the planner.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProjectBrief {
    /// A detailed description of the project or task to be planned
    pub project_description: String,
}

/// One task inside a plan section.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlanTask {
    /// What the task is
    pub description: String,
    /// Type of person or role best suited for this task
    pub assigned_to: String,
    /// Additional input the task needs
    #[serde(default)]
    pub task_input: Value,
    /// Output the task is expected to produce
    #[serde(default)]
    pub task_output: Value,
}

/// One high-level section of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlanSection {
    /// Name of the section
    pub section: String,
    /// Key objectives for this section
    pub objectives: Vec<String>,
    /// Tasks that realize the objectives
    pub tasks: Vec<PlanTask>,
}

/// A strategic plan, or an explanation of why none could be made.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StrategyPlan {
    /// High-level sections of the plan
    pub plan: Vec<PlanSection>,
    /// Why the plan is empty, when it is
    #[serde(default)]
    pub error: Option<String>,
}

const SYSTEM: &str = "You are an expert strategy planner. You break a \
                      project down into high-level sections, define key \
                      objectives for each section, and specify tasks with \
                      the type of person best suited to complete them.";

/// Plan a project.
///
/// Always returns a [`StrategyPlan`]: an empty `plan` carries an `error`
/// explaining why, whether that explanation came from the model or from a
/// failed call.
///
/// # Errors
///
/// Fails only when the brief itself is unusable (empty description).
#[instrument(skip_all)]
pub async fn plan_strategy(
    adapter: &dyn LLMAdapter,
    brief: &ProjectBrief,
) -> Result<StrategyPlan, AgentError> {
    if brief.project_description.trim().is_empty() {
        return Err(AgentError::InvalidInput(
            "project_description must not be empty".to_string(),
        ));
    }

    let prompt = format!(
        "Create a comprehensive plan for the following project:\n\n{}\n\n\
         Break the project into high-level sections, define key objectives\n\
         for each section, and specify tasks with the type of person best\n\
         suited to complete them. If the project is impossible to plan,\n\
         return an empty plan and explain why in the error field.",
        brief.project_description,
    );

    let mut plan: StrategyPlan = match generate_object(adapter, SYSTEM, &prompt).await {
        Ok(plan) => plan,
        Err(e) => {
            warn!(error = %e, "Strategy planning failed");
            return Ok(StrategyPlan {
                plan: Vec::new(),
                error: Some(format!("Failed to generate a strategy plan: {e}")),
            });
        }
    };

    if plan.plan.is_empty() && plan.error.is_none() {
        plan.error = Some("The model returned an empty plan without explanation.".to_string());
    }

    Ok(plan)
}
