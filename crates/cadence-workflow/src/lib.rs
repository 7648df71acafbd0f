//! # cadence-workflow
//!
//! The end-to-end content campaign pipeline: agents from `cadence-core`
//! wired in a fixed order, persisting each content piece to a
//! [`ContentStore`] as it moves through its lifecycle.
//!
//! ```no_run
//! use cadence_llm::ModelRegistry;
//! use cadence_notion::NotionClient;
//! use cadence_workflow::{ContentPipeline, NotionContentStore, NotionSettings};
//!
//! # async fn run(input: cadence_workflow::CampaignInput) -> Result<(), Box<dyn std::error::Error>> {
//! let adapter = ModelRegistry::from_env().select(None)?;
//! let settings = NotionSettings::from_env()?;
//! let store = NotionContentStore::new(
//!     NotionClient::new(settings.api_key),
//!     settings.parent_page_id,
//! );
//!
//! let report = ContentPipeline::new(adapter, store).run(&input).await?;
//! println!("campaign database: {}", report.database_id);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod pipeline;
pub mod store;

pub use error::WorkflowError;
pub use pipeline::{CampaignInput, CampaignReport, ContentPipeline};
pub use store::{
    content_schema, page_properties, ContentPage, ContentStatus, ContentStore, NotionContentStore,
};

/// Notion connection settings.
#[derive(Debug, Clone)]
pub struct NotionSettings {
    /// Integration token
    pub api_key: String,
    /// Page the content database is created under
    pub parent_page_id: String,
}

impl NotionSettings {
    /// Read settings from `NOTION_API_KEY` and `NOTION_PARENT_PAGE_ID`.
    ///
    /// # Errors
    ///
    /// Fails when either variable is missing.
    pub fn from_env() -> Result<Self, WorkflowError> {
        let api_key = std::env::var("NOTION_API_KEY")
            .map_err(|_| WorkflowError::Config("NOTION_API_KEY is not set".to_string()))?;
        let parent_page_id = std::env::var("NOTION_PARENT_PAGE_ID")
            .map_err(|_| WorkflowError::Config("NOTION_PARENT_PAGE_ID is not set".to_string()))?;
        Ok(Self {
            api_key,
            parent_page_id,
        })
    }
}
