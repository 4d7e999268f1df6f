use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Per-page signal record produced by the extraction collaborator.
///
/// Every field tolerates absence in the input JSON: a missing field means
/// "feature absent", never an error. Records are read-only once parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct SignalRecord {
    pub url: String,
    #[serde(default)]
    pub https: bool,
    #[serde(default)]
    pub semantics: SemanticSignals,
    #[serde(default)]
    pub forms: FormSignals,
    #[serde(default)]
    pub metadata: MetadataSignals,
    /// A well-known manifest file (e.g. llms.txt) is referenced from the page
    /// or present at the site root.
    #[serde(default)]
    pub agent_manifest: bool,
    /// Crawler directives disallow automated access to this page.
    #[serde(default)]
    pub restrictive_robots: bool,
    #[serde(default)]
    pub security: SecuritySignals,
    /// `None` means no accessibility audit ran for this page; `Some(vec![])`
    /// means it ran and found nothing.
    #[serde(default)]
    pub accessibility: Option<Vec<AuditIssue>>,
    #[serde(default)]
    pub timing: TimingSignals,
    #[serde(default)]
    pub content: ContentSignals,
    /// Post-render signals; absent when the page was not rendered.
    #[serde(default)]
    pub rendered: Option<RenderedSignals>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SemanticSignals {
    #[serde(default)]
    pub has_main: bool,
    #[serde(default)]
    pub has_nav: bool,
    #[serde(default)]
    pub has_header: bool,
    #[serde(default)]
    pub has_footer: bool,
    #[serde(default)]
    pub has_article: bool,
    #[serde(default)]
    pub has_section: bool,
    #[serde(default)]
    pub has_aside: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormSignals {
    #[serde(default)]
    pub field_count: u32,
    /// Fields whose `name` attribute matches a conventional value.
    #[serde(default)]
    pub standard_name_count: u32,
    #[serde(default)]
    pub labeled_count: u32,
    #[serde(default)]
    pub autocomplete_count: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataSignals {
    /// Structured-data blocks found in the served markup.
    #[serde(default)]
    pub structured_blocks: u32,
    /// At least one block declares a recognized vocabulary (e.g. schema.org).
    /// Blocks that failed to parse are skipped by the extractor and simply
    /// do not set this flag.
    #[serde(default)]
    pub recognized_vocabulary: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecuritySignals {
    /// Lowercased names of security response headers present on the page.
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub cookies: Vec<CookieSignals>,
    /// `None` when no Content-Security-Policy header was served.
    #[serde(default)]
    pub csp: Option<CspSignals>,
    #[serde(default)]
    pub xss_protection: XssProtection,
    /// Names of risky content pattern families matched on the page; each
    /// family counts once no matter how many times it matched.
    #[serde(default)]
    pub vulnerability_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CookieSignals {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub same_site: bool,
    #[serde(default)]
    pub has_expiry: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CspSignals {
    /// Lowercased directive names present in the policy.
    #[serde(default)]
    pub directives: Vec<String>,
    #[serde(default)]
    pub unsafe_inline: bool,
    #[serde(default)]
    pub unsafe_eval: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum XssProtection {
    #[default]
    Missing,
    /// Header present but set to "0".
    Disabled,
    Enabled,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuditIssue {
    /// Audit rule code, e.g. "WCAG2AA.Principle1.Guideline1_4.1_4_3.G18".
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimingSignals {
    #[serde(default)]
    pub load_ms: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentSignals {
    #[serde(default)]
    pub word_count: u32,
    #[serde(default)]
    pub h1_count: u32,
    #[serde(default)]
    pub h2_count: u32,
    #[serde(default)]
    pub h3_count: u32,
    #[serde(default)]
    pub h4_count: u32,
    #[serde(default)]
    pub image_count: u32,
    #[serde(default)]
    pub video_count: u32,
    #[serde(default)]
    pub interactive_count: u32,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    /// Supplied by an external comparison collaborator; full credit when absent.
    #[serde(default)]
    pub uniqueness: Option<f64>,
    /// Supplied by an external language collaborator; full credit when absent.
    #[serde(default)]
    pub grammar: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RenderedSignals {
    /// Explicit state markers (data-state attributes and similar).
    #[serde(default)]
    pub state_markers: bool,
    /// Validation-state markers on form controls.
    #[serde(default)]
    pub validation_markers: bool,
    /// Errors are surfaced in persistent containers rather than transients.
    #[serde(default)]
    pub persistent_errors: bool,
}
