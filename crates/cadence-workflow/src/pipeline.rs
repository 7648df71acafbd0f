//! The end-to-end campaign pipeline.
//!
//! Stage order is fixed: research, strategy, then per plan item writing,
//! editing, design, and scheduling with a persisted row per content piece,
//! and finally community management, analysis, and archival over the whole
//! campaign. A stage only ever reads its predecessors' records.

use tracing::{info, instrument};

use cadence_core::agents::{
    analyze_performance, archive_content, design_assets, edit_drafts, engage_audience,
    plan_content, research_ideas, schedule_posts, write_draft, AnalystBrief, ArchivistConfig,
    AudienceMember, CommunityBrief, DesignerConfig, EditorBrief, KpiTargets, PostingSlot,
    ResearchBrief, StrategistBrief, WriterBrief,
};
use cadence_core::{
    AgentError, ArchivedContent, ContentIdea, ContentPlanItem, EngagementActivity, FinalContent,
    PerformanceReport, Platform, ScheduledPost, VisualAsset,
};
use cadence_llm::LLMAdapter;

use crate::error::WorkflowError;
use crate::store::{ContentPage, ContentStatus, ContentStore};

/// Everything a campaign run needs up front.
#[derive(Debug, Clone)]
pub struct CampaignInput {
    /// Name of the content database to create
    pub database_title: String,
    /// What the campaign wants to achieve
    pub campaign_goals: Vec<String>,
    /// Audience segments to write for
    pub target_audience: Vec<String>,
    /// Industry the campaign operates in
    pub industry: String,
    /// Titles of previously published content
    pub previous_content: Vec<String>,
    /// Platforms the campaign publishes to
    pub target_platforms: Vec<Platform>,
    /// House style for writing and editing
    pub style_guidelines: String,
    /// Post templates available to the writer
    pub templates: Vec<String>,
    /// One-liner hooks available to the writer
    pub hooks: Vec<String>,
    /// Optimal posting times per platform
    pub posting_slots: Vec<PostingSlot>,
    /// Audience interactions reported by the platforms
    pub audience_data: Vec<AudienceMember>,
    /// Targets the analyst measures against
    pub kpis: KpiTargets,
}

/// Everything a campaign run produced.
#[derive(Debug)]
pub struct CampaignReport {
    /// Id of the created content database
    pub database_id: String,
    /// Ideas from the researcher
    pub ideas: Vec<ContentIdea>,
    /// Plan from the strategist
    pub plan: Vec<ContentPlanItem>,
    /// Approved content from the editor
    pub finals: Vec<FinalContent>,
    /// Assets from the designer
    pub assets: Vec<VisualAsset>,
    /// Posts from the scheduler
    pub posts: Vec<ScheduledPost>,
    /// Engagement from the community manager
    pub engagement: Vec<EngagementActivity>,
    /// Reports from the analyst
    pub reports: Vec<PerformanceReport>,
    /// Archive records from the archivist
    pub archived: Vec<ArchivedContent>,
}

/// The campaign pipeline: one adapter, one store, fixed stage order.
pub struct ContentPipeline<S> {
    adapter: Box<dyn LLMAdapter>,
    store: S,
    designer: DesignerConfig,
    archivist: ArchivistConfig,
}

impl<S: ContentStore> ContentPipeline<S> {
    /// Build a pipeline over an adapter and a store.
    #[must_use]
    pub fn new(adapter: Box<dyn LLMAdapter>, store: S) -> Self {
        Self {
            adapter,
            store,
            designer: DesignerConfig::default(),
            archivist: ArchivistConfig::default(),
        }
    }

    /// Override the designer configuration.
    #[must_use]
    pub fn with_designer(mut self, designer: DesignerConfig) -> Self {
        self.designer = designer;
        self
    }

    /// Override the archivist configuration.
    #[must_use]
    pub fn with_archivist(mut self, archivist: ArchivistConfig) -> Self {
        self.archivist = archivist;
        self
    }

    /// Run a full campaign.
    ///
    /// # Errors
    ///
    /// Fails with the first stage or store error; nothing is retried.
    #[instrument(skip_all, fields(industry = %input.industry))]
    pub async fn run(&self, input: &CampaignInput) -> Result<CampaignReport, WorkflowError> {
        let adapter = self.adapter.as_ref();

        let ideas = research_ideas(
            adapter,
            &ResearchBrief {
                campaign_goals: input.campaign_goals.clone(),
                target_audience: input.target_audience.clone(),
                industry: input.industry.clone(),
                previous_content: input.previous_content.clone(),
            },
        )
        .await
        .map_err(WorkflowError::stage("researcher"))?;

        let plan = plan_content(
            adapter,
            &StrategistBrief {
                content_ideas: ideas.clone(),
                campaign_goals: input.campaign_goals.clone(),
                target_platforms: input.target_platforms.clone(),
            },
        )
        .await
        .map_err(WorkflowError::stage("strategist"))?;

        let database_id = self
            .store
            .create_content_database(&input.database_title)
            .await
            .map_err(WorkflowError::store("create_content_database"))?;

        let mut finals = Vec::with_capacity(plan.len());
        let mut assets = Vec::new();
        let mut posts = Vec::new();
        let mut page_ids = Vec::with_capacity(plan.len());

        for item in &plan {
            let draft = write_draft(
                adapter,
                &WriterBrief {
                    content_plan: item.clone(),
                    style_guidelines: input.style_guidelines.clone(),
                    templates: input.templates.clone(),
                    hooks: input.hooks.clone(),
                },
            )
            .await
            .map_err(WorkflowError::stage("writer"))?;

            let approved = edit_drafts(
                adapter,
                &EditorBrief {
                    content_drafts: vec![draft],
                    style_guidelines: input.style_guidelines.clone(),
                },
            )
            .await
            .map_err(WorkflowError::stage("editor"))?;
            let content = approved.into_iter().next().ok_or(WorkflowError::Agent {
                stage: "editor",
                source: AgentError::CountMismatch {
                    expected: 1,
                    actual: 0,
                },
            })?;

            let item_assets = design_assets(&self.designer, std::slice::from_ref(&content))
                .map_err(WorkflowError::stage("designer"))?;

            let item_posts = schedule_posts(&input.posting_slots, item, &content)
                .map_err(WorkflowError::stage("scheduler"))?;

            let page_id = self
                .store
                .add_content_page(
                    &database_id,
                    &ContentPage {
                        title: content.title.clone(),
                        status: ContentStatus::Scheduled,
                        created_at: content.approved_at,
                        scheduled_date: item_posts.first().map(|p| p.scheduled_at),
                        post: format!(
                            "{}\n\n{}\n\n{}",
                            content.hook, content.body, content.call_to_action
                        ),
                        platforms: item.platforms.clone(),
                    },
                )
                .await
                .map_err(WorkflowError::store("add_content_page"))?;

            info!(page_id = %page_id, title = %content.title, "Persisted content piece");
            finals.push(content);
            assets.extend(item_assets);
            posts.extend(item_posts);
            page_ids.push(page_id);
        }

        let engagement = engage_audience(
            adapter,
            &CommunityBrief {
                scheduled_posts: posts.clone(),
                audience_data: input.audience_data.clone(),
            },
        )
        .await
        .map_err(WorkflowError::stage("community_manager"))?;

        let reports = analyze_performance(
            adapter,
            &AnalystBrief {
                engagement_activities: engagement.clone(),
                scheduled_posts: posts.clone(),
                kpis: input.kpis.clone(),
            },
        )
        .await
        .map_err(WorkflowError::stage("analyst"))?;

        let archived = archive_content(&self.archivist, &finals)
            .map_err(WorkflowError::stage("archivist"))?;

        // Rows flip to Published once the campaign wraps up.
        for (page_id, (content, item)) in page_ids.iter().zip(finals.iter().zip(&plan)) {
            self.store
                .update_content_page(
                    page_id,
                    &ContentPage {
                        title: content.title.clone(),
                        status: ContentStatus::Published,
                        created_at: content.approved_at,
                        scheduled_date: posts
                            .iter()
                            .find(|p| p.content_id == content.draft_id)
                            .map(|p| p.scheduled_at),
                        post: format!(
                            "{}\n\n{}\n\n{}",
                            content.hook, content.body, content.call_to_action
                        ),
                        platforms: item.platforms.clone(),
                    },
                )
                .await
                .map_err(WorkflowError::store("update_content_page"))?;
        }

        info!(
            contents = finals.len(),
            posts = posts.len(),
            "Campaign run complete"
        );

        Ok(CampaignReport {
            database_id,
            ideas,
            plan,
            finals,
            assets,
            posts,
            engagement,
            reports,
            archived,
        })
    }
}
