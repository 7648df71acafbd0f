//! Data analyst: engagement and posting data in, performance reports out.

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use cadence_llm::{generate_object, LLMAdapter};

use crate::error::AgentError;
use crate::records::{EngagementActivity, PerformanceReport, ScheduledPost, Validate};

/// Campaign KPI targets the analyst measures against.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KpiTargets {
    /// Views each post should reach
    pub views_target: u64,
    /// Engagement rate each post should reach, within [0, 1]
    pub engagement_rate_target: f64,
}

/// Input to the analyst.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalystBrief {
    /// Engagement observed during the campaign
    pub engagement_activities: Vec<EngagementActivity>,
    /// Posts to report on
    pub scheduled_posts: Vec<ScheduledPost>,
    /// Targets to measure against
    pub kpis: KpiTargets,
}

const SYSTEM: &str = "You are a data analyst. You estimate performance \
                      metrics for published posts from the observed \
                      engagement, compare them against the campaign's KPI \
                      targets, and derive insights and recommendations.";

/// Produce one performance report per scheduled post.
///
/// The model must return exactly one report per post, in input order; each
/// report's `content_id`, `platform`, and `reported_at` are stamped here
/// from the matching post.
///
/// # Errors
///
/// Fails on model errors, unparseable output, a report count that differs
/// from the post count, or reports with rates outside [0, 1].
#[instrument(skip_all, fields(posts = brief.scheduled_posts.len()))]
pub async fn analyze_performance(
    adapter: &dyn LLMAdapter,
    brief: &AnalystBrief,
) -> Result<Vec<PerformanceReport>, AgentError> {
    if brief.scheduled_posts.is_empty() {
        return Err(AgentError::InvalidInput(
            "scheduled_posts must not be empty".to_string(),
        ));
    }

    let engagement_json = serde_json::to_string(&brief.engagement_activities).map_err(|e| {
        AgentError::InvalidInput(format!("engagement_activities not serializable: {e}"))
    })?;
    let posts_json = serde_json::to_string(&brief.scheduled_posts)
        .map_err(|e| AgentError::InvalidInput(format!("scheduled_posts not serializable: {e}")))?;

    let prompt = format!(
        "Estimate performance metrics for each scheduled post from the\n\
         observed engagement, and compare them against the KPI targets of\n\
         {} views and an engagement rate of {}. Rates are fractions within\n\
         [0, 1]. Return exactly one report per post, in the same order,\n\
         each with insights and recommendations.\n\n\
         Scheduled posts: {}\n\
         Engagement activities: {}",
        brief.kpis.views_target, brief.kpis.engagement_rate_target, posts_json, engagement_json,
    );

    let mut reports: Vec<PerformanceReport> = generate_object(adapter, SYSTEM, &prompt).await?;

    if reports.len() != brief.scheduled_posts.len() {
        return Err(AgentError::CountMismatch {
            expected: brief.scheduled_posts.len(),
            actual: reports.len(),
        });
    }

    let now = Utc::now();
    for (report, post) in reports.iter_mut().zip(&brief.scheduled_posts) {
        report.metrics.content_id = post.content_id;
        report.metrics.platform = post.platform;
        report.reported_at = now;
    }

    reports.validate()?;
    info!(reports = reports.len(), "Compiled performance reports");
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Platform;
    use crate::test_support::StubAdapter;
    use uuid::Uuid;

    fn brief() -> AnalystBrief {
        AnalystBrief {
            engagement_activities: vec![],
            scheduled_posts: vec![ScheduledPost {
                content_id: Uuid::new_v4(),
                platform: Platform::Twitter,
                scheduled_at: Utc::now(),
                posted_at: None,
                post_url: None,
            }],
            kpis: KpiTargets {
                views_target: 1000,
                engagement_rate_target: 0.05,
            },
        }
    }

    fn report_json(engagement_rate: f64) -> String {
        format!(
            r#"[{{"metrics": {{"content_id": "00000000-0000-0000-0000-000000000000",
                              "platform": "LinkedIn",
                              "views": 1200, "likes": 80, "shares": 12, "comments": 9,
                              "click_through_rate": 0.03,
                              "engagement_rate": {engagement_rate}}},
                 "insights": ["Above the views target."],
                 "recommendations": ["Post similar content."],
                 "reported_at": "2026-02-03T09:00:00Z"}}]"#
        )
    }

    #[tokio::test]
    async fn test_reports_stamped_from_posts() {
        let adapter = StubAdapter::replying(report_json(0.08));
        let brief = brief();

        let reports = analyze_performance(&adapter, &brief).await.unwrap();

        assert_eq!(
            reports[0].metrics.content_id,
            brief.scheduled_posts[0].content_id
        );
        // Platform comes from the post, not the model's claim.
        assert_eq!(reports[0].metrics.platform, Platform::Twitter);
    }

    #[tokio::test]
    async fn test_rate_above_one_rejected() {
        let adapter = StubAdapter::replying(report_json(1.7));
        let result = analyze_performance(&adapter, &brief()).await;
        assert!(matches!(result, Err(AgentError::Validation(_))));
    }

    #[tokio::test]
    async fn test_count_mismatch_rejected() {
        let adapter = StubAdapter::replying("[]".to_string());
        let result = analyze_performance(&adapter, &brief()).await;
        assert!(matches!(result, Err(AgentError::CountMismatch { .. })));
    }
}
