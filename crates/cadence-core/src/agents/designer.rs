//! Graphic designer: approved content in, visual assets out.
//!
//! Asset production is deterministic: one image per content piece, with a
//! URL derived from the configured asset base and the content id.

use chrono::Utc;
use tracing::{info, instrument};

use crate::error::AgentError;
use crate::records::{AssetType, FinalContent, Validate, VisualAsset};

/// Designer configuration.
#[derive(Debug, Clone)]
pub struct DesignerConfig {
    /// Base URL assets are served from
    pub asset_base_url: String,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            asset_base_url: "https://assets.example.com".to_string(),
        }
    }
}

/// Produce one visual asset per approved content piece.
///
/// # Errors
///
/// Fails when a produced asset is invalid, which only happens with an
/// empty `asset_base_url`.
#[instrument(skip_all, fields(contents = finals.len()))]
pub fn design_assets(
    config: &DesignerConfig,
    finals: &[FinalContent],
) -> Result<Vec<VisualAsset>, AgentError> {
    let now = Utc::now();
    let base = config.asset_base_url.trim_end_matches('/');

    let assets: Vec<VisualAsset> = finals
        .iter()
        .map(|content| VisualAsset {
            content_id: content.draft_id,
            asset_type: AssetType::Image,
            asset_url: format!("{base}/{}.png", content.draft_id),
            alt_text: format!("Visual representation of {}", content.title),
            created_at: now,
        })
        .collect();

    assets.validate()?;
    info!(assets = assets.len(), "Produced visual assets");
    Ok(assets)
}
