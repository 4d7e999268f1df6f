use crate::types::report::{Category, CategoryScore, Effort, Issue, IssueCategory, Severity};
use crate::types::scoring::{clamp_score, severity_weight, GUIDELINE_MANUAL_CHECKS};
use crate::types::signals::AuditIssue;
use std::collections::{BTreeMap, BTreeSet};

/// Deduction-based score over the page's accessibility audit findings.
///
/// Starts at 100 and subtracts `severity_weight * 2` per finding, tallying
/// WCAG conformance levels, guideline numbers, and ARIA/contrast/keyboard
/// counters along the way.
pub fn accessibility_score(audit: &[AuditIssue]) -> CategoryScore {
    let mut score = 100.0;
    let mut levels: BTreeMap<&'static str, f64> = BTreeMap::new();
    let mut guidelines: BTreeSet<String> = BTreeSet::new();
    let mut aria = 0u32;
    let mut contrast = 0u32;
    let mut keyboard = 0u32;
    let mut issues = Vec::new();

    for finding in audit {
        score -= severity_weight(&finding.severity) * 2.0;

        if let Some(level) = conformance_level(&finding.code) {
            *levels.entry(level).or_insert(0.0) += 1.0;
        }
        if let Some(guideline) = guideline_number(&finding.code) {
            guidelines.insert(guideline);
        }

        let code = finding.code.to_ascii_lowercase();
        if code.contains("aria") {
            aria += 1;
        }
        if code.contains("contrast") {
            contrast += 1;
        }
        if code.contains("keyboard") {
            keyboard += 1;
        }

        let severity = map_severity(&finding.severity);
        issues.push(Issue {
            severity,
            category: IssueCategory::Accessibility,
            message: finding.message.clone(),
            recommendation: recommendation_for(&finding.code, severity),
            effort: match severity {
                Severity::Critical | Severity::Serious => Effort::Moderate,
                Severity::Moderate | Severity::Minor => Effort::Low,
            },
            source: Some(finding.code.clone()),
        });
    }

    let mut subscores = BTreeMap::new();
    for (level, count) in &levels {
        subscores.insert(format!("level_{}", level.to_ascii_lowercase()), *count);
    }
    subscores.insert("aria_issues".to_string(), f64::from(aria));
    subscores.insert("contrast_issues".to_string(), f64::from(contrast));
    subscores.insert("keyboard_issues".to_string(), f64::from(keyboard));

    CategoryScore {
        category: Category::Accessibility,
        score: clamp_score(score),
        subscores,
        issues,
        manual_checks: manual_checks(&guidelines),
    }
}

fn map_severity(severity: &str) -> Severity {
    match severity.to_ascii_lowercase().as_str() {
        "critical" => Severity::Critical,
        "serious" => Severity::Serious,
        "moderate" => Severity::Moderate,
        _ => Severity::Minor,
    }
}

/// Extracts the conformance level from a `WCAG2A`/`WCAG2AA`/`WCAG2AAA`
/// token at the start of an audit rule code.
fn conformance_level(code: &str) -> Option<&'static str> {
    let rest = code.strip_prefix("WCAG2")?;
    let a_run = rest.chars().take_while(|c| *c == 'A').count();
    match a_run {
        1 => Some("A"),
        2 => Some("AA"),
        3 => Some("AAA"),
        _ => None,
    }
}

/// Extracts the guideline number from the `Guideline<p>_<g>` segment of an
/// audit rule code, e.g. "Guideline1_4" -> "1.4".
fn guideline_number(code: &str) -> Option<String> {
    let segment = code
        .split('.')
        .find_map(|part| part.strip_prefix("Guideline"))?;
    if segment.is_empty() || !segment.chars().all(|c| c.is_ascii_digit() || c == '_') {
        return None;
    }
    Some(segment.replace('_', "."))
}

fn manual_checks(guidelines: &BTreeSet<String>) -> Vec<String> {
    let mut checks = BTreeSet::new();
    for guideline in guidelines {
        for (prefix, suggested) in GUIDELINE_MANUAL_CHECKS {
            if guideline == prefix {
                for check in suggested {
                    checks.insert((*check).to_string());
                }
            }
        }
    }
    checks.into_iter().collect()
}

fn recommendation_for(code: &str, severity: Severity) -> String {
    let lowered = code.to_ascii_lowercase();
    if lowered.contains("contrast") {
        "Raise the contrast ratio of the flagged text to at least 4.5:1".to_string()
    } else if lowered.contains("aria") {
        "Correct the ARIA role or attribute so assistive technology can interpret it".to_string()
    } else if lowered.contains("keyboard") {
        "Make the flagged control operable from the keyboard alone".to_string()
    } else if matches!(severity, Severity::Critical | Severity::Serious) {
        "Resolve this audit failure; it blocks assistive-technology users".to_string()
    } else {
        "Review and resolve this accessibility audit finding".to_string()
    }
}
