use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Scoring categories. One `CategoryScore` per category per page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Accessibility,
    Content,
    Security,
    AgentSuitability,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Accessibility,
        Category::Content,
        Category::Security,
        Category::AgentSuitability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Accessibility => "accessibility",
            Category::Content => "content",
            Category::Security => "security",
            Category::AgentSuitability => "agent_suitability",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue severity. Variant order is ranking order: `Critical` sorts first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Serious,
    Moderate,
    Minor,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Serious,
        Severity::Moderate,
        Severity::Minor,
    ];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Serious => write!(f, "serious"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::Minor => write!(f, "minor"),
        }
    }
}

/// Remediation effort. Variant order is ranking order: `Low` sorts first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    Moderate,
    High,
}

/// Closed set of issue categories. Adding a variant forces every match in
/// the prioritizer to be revisited; there are no free-form importance tags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    SemanticStructure,
    FormFields,
    Metadata,
    AgentManifest,
    CrawlerDirectives,
    Accessibility,
    HeadingStructure,
    Freshness,
    Media,
    Transport,
    SecurityHeaders,
    Cookies,
    ContentSecurityPolicy,
    XssProtection,
    VulnerabilityPatterns,
}

impl IssueCategory {
    /// Essential issues block agent and assistive-technology use of the
    /// site; everything else is nice-to-have.
    pub fn is_essential(&self, severity: Severity) -> bool {
        match self {
            IssueCategory::SemanticStructure
            | IssueCategory::FormFields
            | IssueCategory::Metadata
            | IssueCategory::AgentManifest
            | IssueCategory::CrawlerDirectives => true,
            IssueCategory::Accessibility => {
                matches!(severity, Severity::Critical | Severity::Serious)
            }
            IssueCategory::HeadingStructure
            | IssueCategory::Freshness
            | IssueCategory::Media
            | IssueCategory::Transport
            | IssueCategory::SecurityHeaders
            | IssueCategory::Cookies
            | IssueCategory::ContentSecurityPolicy
            | IssueCategory::XssProtection
            | IssueCategory::VulnerabilityPatterns => false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: IssueCategory,
    pub message: String,
    pub recommendation: String,
    pub effort: Effort,
    /// Where the issue was observed (url, header name, audit rule code).
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    /// Always within [0, 100].
    pub score: f64,
    pub subscores: BTreeMap<String, f64>,
    pub issues: Vec<Issue>,
    /// Manual verification steps automated checks cannot close; only the
    /// accessibility scorer fills this in.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub manual_checks: Vec<String>,
}

/// One report per audited page, frozen after assembly.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub url: String,
    /// Measured page load time, carried through for aggregation and the
    /// per-page table.
    pub load_ms: Option<f64>,
    pub categories: BTreeMap<Category, CategoryScore>,
    /// Set when scoring this page failed unexpectedly; the categories that
    /// were produced before the failure are kept as best-effort output.
    pub error: Option<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
    Critical,
    NoData,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Excellent => write!(f, "Excellent"),
            Status::Good => write!(f, "Good"),
            Status::Fair => write!(f, "Fair"),
            Status::NeedsImprovement => write!(f, "Needs improvement"),
            Status::Critical => write!(f, "Critical"),
            Status::NoData => write!(f, "No data"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAggregate {
    pub score: f64,
    pub status: Status,
    /// Pages that contributed a score to this category.
    pub pages: usize,
    pub issues_by_severity: BTreeMap<Severity, usize>,
}

/// Site-level rollup, recomputed from the full PageReport set every run.
/// Serialized to disk by the CLI so a later run can use it as a baseline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteAggregate {
    pub pages: usize,
    pub overall_score: f64,
    pub avg_load_ms: Option<f64>,
    pub categories: BTreeMap<Category, CategoryAggregate>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrendDelta {
    pub metric: String,
    pub previous: f64,
    pub current: f64,
    pub delta: f64,
    pub percent_change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improved,
    Regressed,
    Flat,
}

#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub category: IssueCategory,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub category: IssueCategory,
    pub severity: Severity,
    pub effort: Effort,
    pub title: String,
    pub action: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub pages: usize,
    pub generated_at: DateTime<Utc>,
    pub overall_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub category: Category,
    pub status: Status,
    pub score: f64,
    pub trend: Option<TrendDirection>,
}

/// Final composed report handed to the writers; immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutiveSummary {
    pub overview: Overview,
    pub categories: Vec<CategorySummary>,
    pub key_findings: Vec<Finding>,
    pub recommendations: Vec<Recommendation>,
    pub comparison: Option<Vec<TrendDelta>>,
}
