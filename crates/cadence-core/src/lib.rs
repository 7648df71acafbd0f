//! # cadence-core
//!
//! Record schemas and single agents for the Cadence content pipeline.
//!
//! This crate provides:
//! - [`records`] - the schema-validated records each stage produces
//! - [`agents`] - the nine single agents (researcher, strategist, writer,
//!   editor, designer, scheduler, community manager, analyst, archivist)
//!   plus the standalone strategy planner
//!
//! An agent converts structured input into structured output. LLM-backed
//! agents do it through one structured-generation call; the designer,
//! scheduler, and archivist construct their records deterministically.
//! Records are immutable once produced: every stage builds new records and
//! reads its predecessors' output untouched. Identifiers linking stages are
//! stamped from the stage input, never trusted from model output.

pub mod agents;
pub mod error;
pub mod records;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{AgentError, ValidationError};
pub use records::{
    ArchivedContent, AssetType, ContentArchiveStatus, ContentDraft, ContentIdea, ContentPlanItem,
    EngagementActivity, FinalContent, Interaction, InteractionType, PerformanceMetrics,
    PerformanceReport, Platform, ScheduledPost, Validate, VisualAsset,
};
