//! Fixed scoring tables shared by the category scorers and the aggregator.

use crate::types::report::{Category, Status};

pub type Score = f64;

pub fn clamp_score(score: Score) -> Score {
    score.clamp(0.0, 100.0)
}

/// Penalty multiplier per accessibility issue severity; each issue deducts
/// `weight * 2` points.
pub fn severity_weight(severity: &str) -> f64 {
    match severity.to_ascii_lowercase().as_str() {
        "critical" => 5.0,
        "serious" => 3.0,
        "moderate" => 2.0,
        "minor" => 1.0,
        _ => 1.0,
    }
}

/// Security response headers and their point values. Sums to 100.
pub const SECURITY_HEADER_POINTS: [(&str, f64); 6] = [
    ("strict-transport-security", 25.0),
    ("content-security-policy", 25.0),
    ("x-content-type-options", 15.0),
    ("x-frame-options", 15.0),
    ("referrer-policy", 10.0),
    ("permissions-policy", 10.0),
];

/// Directives a CSP is expected to declare; each missing one costs an even
/// share of 100 points.
pub const REQUIRED_CSP_DIRECTIVES: [&str; 8] = [
    "default-src",
    "script-src",
    "style-src",
    "img-src",
    "connect-src",
    "frame-ancestors",
    "base-uri",
    "form-action",
];

pub const CSP_UNSAFE_PENALTY: f64 = 20.0;

// Per-cookie penalties for missing attributes.
pub const COOKIE_SECURE_PENALTY: f64 = 15.0;
pub const COOKIE_HTTP_ONLY_PENALTY: f64 = 15.0;
pub const COOKIE_SAME_SITE_PENALTY: f64 = 10.0;
pub const COOKIE_EXPIRY_PENALTY: f64 = 5.0;

pub const XSS_MISSING_HEADER_PENALTY: f64 = 50.0;
pub const XSS_DISABLED_HEADER_PENALTY: f64 = 25.0;
pub const XSS_WEAK_CSP_PENALTY: f64 = 25.0;

pub const VULN_PATTERN_PENALTY: f64 = 10.0;

/// Security category weights: https, headers, cookies, csp, xss, vuln.
pub const SECURITY_WEIGHTS: [f64; 6] = [0.30, 0.20, 0.15, 0.15, 0.10, 0.10];

/// Content category weights: heading, freshness, uniqueness, grammar, media.
pub const CONTENT_WEIGHTS: [f64; 5] = [0.30, 0.25, 0.15, 0.15, 0.15];

/// Served-score point budget for the agent-suitability scorer. The semantic
/// element points sum to 35; with form ratios (12 + 10 + 8), vocabulary (20)
/// and the manifest (15) the positive budget sums to 100.
pub const SEMANTIC_POINTS: [(&str, f64); 7] = [
    ("main", 8.0),
    ("nav", 6.0),
    ("header", 5.0),
    ("footer", 5.0),
    ("article", 4.0),
    ("section", 4.0),
    ("aside", 3.0),
];

pub const STANDARD_NAME_POINTS: f64 = 12.0;
pub const LABEL_POINTS: f64 = 10.0;
pub const AUTOCOMPLETE_POINTS: f64 = 8.0;
pub const VOCABULARY_POINTS: f64 = 20.0;
pub const AGENT_MANIFEST_POINTS: f64 = 15.0;
pub const RESTRICTIVE_ROBOTS_PENALTY: f64 = 15.0;

/// Rendered-score bonus values, capped at 30 in total.
pub const RENDERED_BONUS_CAP: f64 = 30.0;
pub const STATE_MARKER_BONUS: f64 = 12.0;
pub const VALIDATION_MARKER_BONUS: f64 = 10.0;
pub const PERSISTENT_ERROR_BONUS: f64 = 8.0;

/// Status cut points `(excellent, good, fair, needs_improvement)`. Security
/// uses a stricter convention than the other categories.
pub fn status_thresholds(category: Category) -> [f64; 4] {
    match category {
        Category::Security => [90.0, 75.0, 55.0, 35.0],
        _ => [90.0, 70.0, 50.0, 30.0],
    }
}

pub fn status_for(category: Category, score: Score) -> Status {
    let [excellent, good, fair, needs_improvement] = status_thresholds(category);
    if score >= excellent {
        Status::Excellent
    } else if score >= good {
        Status::Good
    } else if score >= fair {
        Status::Fair
    } else if score >= needs_improvement {
        Status::NeedsImprovement
    } else {
        Status::Critical
    }
}

/// Manual verification checks suggested per WCAG guideline. Automated audits
/// cannot close these guidelines on their own.
pub const GUIDELINE_MANUAL_CHECKS: [(&str, &[&str]); 6] = [
    (
        "1.1",
        &["Verify text alternatives convey the same information as the image"],
    ),
    (
        "1.3",
        &["Verify reading order matches visual order with styles disabled"],
    ),
    (
        "1.4",
        &[
            "Check contrast of text over images and gradients",
            "Verify content reflows at 200% zoom",
        ],
    ),
    (
        "2.1",
        &["Tab through the page and confirm every control is reachable"],
    ),
    (
        "2.4",
        &["Confirm focus order follows the logical reading sequence"],
    ),
    (
        "4.1",
        &["Exercise custom widgets with a screen reader"],
    ),
];
