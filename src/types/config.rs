use serde::Deserialize;
use std::collections::HashMap;

/// Optional `sitegauge.toml` configuration. Every section may be absent;
/// the engine itself runs entirely on defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    pub site: Option<SiteSection>,
    pub summary: Option<SummaryConfig>,
    /// Category weight overrides for the overall site score.
    pub weights: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
    pub name: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    pub top_findings: Option<usize>,
}

pub const DEFAULT_TOP_FINDINGS: usize = 10;

impl SiteConfig {
    /// Weights for accessibility, content, security, agent_suitability.
    pub fn default_weights() -> [f64; 4] {
        [0.25, 0.25, 0.25, 0.25]
    }

    pub fn category_weights(&self) -> [f64; 4] {
        match &self.weights {
            Some(weights) => [
                *weights.get("accessibility").unwrap_or(&0.25),
                *weights.get("content").unwrap_or(&0.25),
                *weights.get("security").unwrap_or(&0.25),
                *weights.get("agent_suitability").unwrap_or(&0.25),
            ],
            None => Self::default_weights(),
        }
    }

    pub fn top_findings(&self) -> usize {
        self.summary
            .as_ref()
            .and_then(|summary| summary.top_findings)
            .unwrap_or(DEFAULT_TOP_FINDINGS)
    }
}
