//! Run a full campaign against live providers.
//!
//! Requires model credentials (for example `OPENAI_API_KEY`) plus
//! `NOTION_API_KEY` and `NOTION_PARENT_PAGE_ID`.
//!
//! ```sh
//! cargo run --example campaign
//! ```

use cadence_core::agents::KpiTargets;
use cadence_core::Platform;
use cadence_llm::ModelRegistry;
use cadence_notion::NotionClient;
use cadence_workflow::{CampaignInput, ContentPipeline, NotionContentStore, NotionSettings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let adapter = ModelRegistry::from_env().select(None)?;
    let settings = NotionSettings::from_env()?;
    let store = NotionContentStore::new(
        NotionClient::new(settings.api_key),
        settings.parent_page_id,
    );

    let input = CampaignInput {
        database_title: "Q1 developer campaign".to_string(),
        campaign_goals: vec![
            "Grow newsletter signups".to_string(),
            "Establish the team as a voice on async Rust".to_string(),
        ],
        target_audience: vec!["Backend engineers".to_string(), "Platform teams".to_string()],
        industry: "Developer tools".to_string(),
        previous_content: vec!["Why we rewrote our queue".to_string()],
        target_platforms: vec![Platform::LinkedIn, Platform::Twitter],
        style_guidelines: "Plain language, short sentences, no buzzwords.".to_string(),
        templates: vec!["Problem / approach / result".to_string()],
        hooks: vec!["Your profiler is lying to you.".to_string()],
        posting_slots: vec![],
        audience_data: vec![],
        kpis: KpiTargets {
            views_target: 1000,
            engagement_rate_target: 0.05,
        },
    };

    let report = ContentPipeline::new(adapter, store).run(&input).await?;

    println!("campaign database: {}", report.database_id);
    println!("content pieces:    {}", report.finals.len());
    println!("scheduled posts:   {}", report.posts.len());
    for perf in &report.reports {
        println!(
            "  {} on {}: engagement rate {:.2}",
            perf.metrics.content_id, perf.metrics.platform, perf.metrics.engagement_rate
        );
    }

    Ok(())
}
