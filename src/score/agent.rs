use crate::types::report::{Category, CategoryScore, Effort, Issue, IssueCategory, Severity};
use crate::types::scoring::{
    clamp_score, AGENT_MANIFEST_POINTS, AUTOCOMPLETE_POINTS, LABEL_POINTS,
    PERSISTENT_ERROR_BONUS, RENDERED_BONUS_CAP, RESTRICTIVE_ROBOTS_PENALTY, SEMANTIC_POINTS,
    STANDARD_NAME_POINTS, STATE_MARKER_BONUS, VALIDATION_MARKER_BONUS, VOCABULARY_POINTS,
};
use crate::types::signals::{FormSignals, SemanticSignals, SignalRecord};
use std::collections::BTreeMap;

/// Scores how usable the page is for automated agents. The served score is
/// computed from the delivered markup alone; the rendered score adds a
/// capped bonus for post-render state signals.
pub fn agent_score(record: &SignalRecord) -> CategoryScore {
    let mut issues = Vec::new();

    let semantic = semantic_points(&record.semantics, &mut issues);
    let forms = form_points(&record.forms, &mut issues);
    let vocabulary = vocabulary_points(record, &mut issues);
    let manifest = manifest_points(record, &mut issues);
    let robots = robots_penalty(record, &mut issues);

    let served = clamp_score(semantic + forms + vocabulary + manifest - robots);
    let rendered = clamp_score(served + rendered_bonus(record));

    let mut subscores = BTreeMap::new();
    subscores.insert("served".to_string(), served);
    subscores.insert("rendered".to_string(), rendered);
    subscores.insert("semantic".to_string(), semantic);
    subscores.insert("forms".to_string(), forms);

    CategoryScore {
        category: Category::AgentSuitability,
        score: served,
        subscores,
        issues,
        manual_checks: Vec::new(),
    }
}

fn semantic_points(semantics: &SemanticSignals, issues: &mut Vec<Issue>) -> f64 {
    let flags = [
        semantics.has_main,
        semantics.has_nav,
        semantics.has_header,
        semantics.has_footer,
        semantics.has_article,
        semantics.has_section,
        semantics.has_aside,
    ];

    let mut points = 0.0;
    let mut missing_landmarks = Vec::new();
    for ((element, value), present) in SEMANTIC_POINTS.iter().zip(flags) {
        if present {
            points += value;
        } else if matches!(*element, "main" | "nav") {
            missing_landmarks.push(*element);
        }
    }

    for element in missing_landmarks {
        issues.push(Issue {
            severity: Severity::Serious,
            category: IssueCategory::SemanticStructure,
            message: format!("Missing <{element}> landmark"),
            recommendation: format!("Wrap the page's {element} content in a <{element}> element"),
            effort: Effort::Low,
            source: None,
        });
    }

    points
}

fn form_points(forms: &FormSignals, issues: &mut Vec<Issue>) -> f64 {
    // A page without form fields had no opportunity to fail; all three
    // ratios default to full credit.
    if forms.field_count == 0 {
        return STANDARD_NAME_POINTS + LABEL_POINTS + AUTOCOMPLETE_POINTS;
    }

    let denominator = f64::from(forms.field_count);
    let standard = f64::from(forms.standard_name_count.min(forms.field_count)) / denominator;
    let labeled = f64::from(forms.labeled_count.min(forms.field_count)) / denominator;
    let autocomplete = f64::from(forms.autocomplete_count.min(forms.field_count)) / denominator;

    if standard < 0.5 {
        issues.push(Issue {
            severity: Severity::Serious,
            category: IssueCategory::FormFields,
            message: "Most form fields use non-standard names".to_string(),
            recommendation: "Rename fields to conventional names (email, name, address)"
                .to_string(),
            effort: Effort::Moderate,
            source: None,
        });
    }
    if labeled < 1.0 {
        issues.push(Issue {
            severity: Severity::Moderate,
            category: IssueCategory::FormFields,
            message: "Some form fields have no associated label".to_string(),
            recommendation: "Associate every field with a <label> element".to_string(),
            effort: Effort::Low,
            source: None,
        });
    }
    if autocomplete < 0.5 {
        issues.push(Issue {
            severity: Severity::Minor,
            category: IssueCategory::FormFields,
            message: "Form fields lack autocomplete attributes".to_string(),
            recommendation: "Add autocomplete hints so agents can fill fields".to_string(),
            effort: Effort::Low,
            source: None,
        });
    }

    standard * STANDARD_NAME_POINTS + labeled * LABEL_POINTS + autocomplete * AUTOCOMPLETE_POINTS
}

fn vocabulary_points(record: &SignalRecord, issues: &mut Vec<Issue>) -> f64 {
    if record.metadata.recognized_vocabulary {
        return VOCABULARY_POINTS;
    }
    issues.push(Issue {
        severity: Severity::Serious,
        category: IssueCategory::Metadata,
        message: "No machine-readable metadata with a recognized vocabulary".to_string(),
        recommendation: "Embed structured data declaring a schema.org vocabulary".to_string(),
        effort: Effort::Moderate,
        source: None,
    });
    0.0
}

fn manifest_points(record: &SignalRecord, issues: &mut Vec<Issue>) -> f64 {
    if record.agent_manifest {
        return AGENT_MANIFEST_POINTS;
    }
    issues.push(Issue {
        severity: Severity::Moderate,
        category: IssueCategory::AgentManifest,
        message: "No agent-discovery manifest found".to_string(),
        recommendation: "Publish a manifest file at the site root for autonomous agents"
            .to_string(),
        effort: Effort::Low,
        source: None,
    });
    0.0
}

fn robots_penalty(record: &SignalRecord, issues: &mut Vec<Issue>) -> f64 {
    if !record.restrictive_robots {
        return 0.0;
    }
    issues.push(Issue {
        severity: Severity::Serious,
        category: IssueCategory::CrawlerDirectives,
        message: "Crawler directives restrict automated access".to_string(),
        recommendation: "Relax the directives for well-behaved agents".to_string(),
        effort: Effort::Low,
        source: None,
    });
    RESTRICTIVE_ROBOTS_PENALTY
}

fn rendered_bonus(record: &SignalRecord) -> f64 {
    let Some(rendered) = &record.rendered else {
        return 0.0;
    };
    let mut bonus = 0.0;
    if rendered.state_markers {
        bonus += STATE_MARKER_BONUS;
    }
    if rendered.validation_markers {
        bonus += VALIDATION_MARKER_BONUS;
    }
    if rendered.persistent_errors {
        bonus += PERSISTENT_ERROR_BONUS;
    }
    bonus.min(RENDERED_BONUS_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> SignalRecord {
        serde_json::from_str(json).expect("record should parse")
    }

    #[test]
    fn landmark_rich_page_with_metadata_scores_ninety_three() {
        let record = record(
            r#"{
                "url": "https://example.com/",
                "semantics": {
                    "has_main": true, "has_nav": true, "has_header": true,
                    "has_footer": true, "has_section": true
                },
                "metadata": {"structured_blocks": 1, "recognized_vocabulary": true},
                "agent_manifest": true
            }"#,
        );
        let result = agent_score(&record);
        // semantics 28 + forms 30 (no fields) + vocabulary 20 + manifest 15
        assert_eq!(result.subscores["served"], 93.0);
    }

    #[test]
    fn full_semantic_set_earns_the_whole_budget() {
        let record = record(
            r#"{
                "url": "https://example.com/",
                "semantics": {
                    "has_main": true, "has_nav": true, "has_header": true,
                    "has_footer": true, "has_article": true, "has_section": true,
                    "has_aside": true
                },
                "metadata": {"recognized_vocabulary": true},
                "agent_manifest": true
            }"#,
        );
        let result = agent_score(&record);
        assert_eq!(result.subscores["served"], 100.0);
    }

    #[test]
    fn formless_page_gets_full_form_credit() {
        let record = record(r#"{"url": "https://example.com/"}"#);
        let result = agent_score(&record);
        assert_eq!(result.subscores["forms"], 30.0);
    }

    #[test]
    fn form_ratios_scale_the_point_budget() {
        let record = record(
            r#"{
                "url": "https://example.com/",
                "forms": {
                    "field_count": 4,
                    "standard_name_count": 2,
                    "labeled_count": 4,
                    "autocomplete_count": 0
                }
            }"#,
        );
        let result = agent_score(&record);
        // 0.5 * 12 + 1.0 * 10 + 0.0 * 8
        assert_eq!(result.subscores["forms"], 16.0);
        assert!(result
            .issues
            .iter()
            .any(|issue| issue.category == IssueCategory::FormFields
                && issue.severity == Severity::Minor));
    }

    #[test]
    fn restrictive_robots_deducts_and_flags() {
        let record = record(
            r#"{"url": "https://example.com/", "restrictive_robots": true}"#,
        );
        let result = agent_score(&record);
        assert!(result
            .issues
            .iter()
            .any(|issue| issue.category == IssueCategory::CrawlerDirectives));
        // forms 30 - robots 15
        assert_eq!(result.subscores["served"], 15.0);
    }

    #[test]
    fn rendered_bonus_is_capped_and_clamped() {
        let record = record(
            r#"{
                "url": "https://example.com/",
                "semantics": {
                    "has_main": true, "has_nav": true, "has_header": true,
                    "has_footer": true, "has_article": true, "has_section": true,
                    "has_aside": true
                },
                "metadata": {"recognized_vocabulary": true},
                "agent_manifest": true,
                "rendered": {
                    "state_markers": true,
                    "validation_markers": true,
                    "persistent_errors": true
                }
            }"#,
        );
        let result = agent_score(&record);
        assert_eq!(result.subscores["rendered"], 100.0);
    }

    #[test]
    fn missing_landmarks_emit_essential_issues() {
        let record = record(r#"{"url": "https://example.com/"}"#);
        let result = agent_score(&record);
        let landmark_issues = result
            .issues
            .iter()
            .filter(|issue| issue.category == IssueCategory::SemanticStructure)
            .count();
        assert_eq!(landmark_issues, 2);
    }

    #[test]
    fn served_score_never_goes_negative() {
        let record = record(
            r#"{
                "url": "https://example.com/",
                "restrictive_robots": true,
                "forms": {"field_count": 10}
            }"#,
        );
        let result = agent_score(&record);
        assert!(result.score >= 0.0);
    }
}
