//! Single agents of the content pipeline.
//!
//! Each agent is one async function taking an [`LLMAdapter`] (for the
//! LLM-backed ones) or plain configuration (for the deterministic ones)
//! plus a brief describing its input, and returning validated records.
//! Identifiers that link a stage to its predecessor are stamped from the
//! stage input after generation, never taken from model output.
//!
//! [`LLMAdapter`]: cadence_llm::LLMAdapter

mod analyst;
mod archivist;
mod community;
mod designer;
mod editor;
mod planner;
mod researcher;
mod scheduler;
mod strategist;
mod writer;

pub use analyst::{analyze_performance, AnalystBrief, KpiTargets};
pub use archivist::{archive_content, ArchivistConfig};
pub use community::{
    engage_audience, AudienceInteractionType, AudienceMember, CommunityBrief,
};
pub use designer::{design_assets, DesignerConfig};
pub use editor::{edit_drafts, EditorBrief};
pub use planner::{plan_strategy, PlanSection, PlanTask, ProjectBrief, StrategyPlan};
pub use researcher::{research_ideas, ResearchBrief};
pub use scheduler::{schedule_posts, PostingSlot};
pub use strategist::{plan_content, StrategistBrief};
pub use writer::{write_draft, WriterBrief};
