use crate::types::report::{Issue, IssueCategory, PageReport, Recommendation};
use std::collections::HashSet;
use tracing::debug;

/// Issues of a run, deduplicated and ranked by `(severity, effort)`.
#[derive(Debug, Clone)]
pub struct Prioritized {
    ranked: Vec<Issue>,
}

/// Merges the issues emitted by every scorer for the run.
///
/// Deduplicates by message text within an issue category, then stable-sorts
/// on `(severity rank, effort rank)` ascending so ties keep first-seen
/// order. Running this twice on the same reports yields the same ordering.
pub fn prioritize(reports: &[PageReport]) -> Prioritized {
    let mut seen: HashSet<(IssueCategory, String)> = HashSet::new();
    let mut ranked: Vec<Issue> = Vec::new();

    for report in reports {
        for score in report.categories.values() {
            for issue in &score.issues {
                if seen.insert((issue.category, issue.message.clone())) {
                    ranked.push(issue.clone());
                }
            }
        }
    }

    ranked.sort_by_key(|issue| (issue.severity, issue.effort));
    debug!(total = ranked.len(), "prioritized run issues");

    Prioritized { ranked }
}

impl Prioritized {
    pub fn ranked(&self) -> &[Issue] {
        &self.ranked
    }

    /// Issues that block agent or assistive-technology use of the site.
    pub fn essential(&self) -> impl Iterator<Item = &Issue> {
        self.ranked
            .iter()
            .filter(|issue| issue.category.is_essential(issue.severity))
    }

    pub fn nice_to_have(&self) -> impl Iterator<Item = &Issue> {
        self.ranked
            .iter()
            .filter(|issue| !issue.category.is_essential(issue.severity))
    }

    /// The full ranked list as actionable recommendations.
    pub fn recommendations(&self) -> Vec<Recommendation> {
        self.ranked
            .iter()
            .map(|issue| Recommendation {
                category: issue.category,
                severity: issue.severity,
                effort: issue.effort,
                title: issue.message.clone(),
                action: issue.recommendation.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::score_pages;
    use crate::types::report::{Effort, Severity};
    use crate::types::signals::SignalRecord;
    use chrono::Utc;

    fn reports(json: &str) -> Vec<PageReport> {
        let records: Vec<SignalRecord> = serde_json::from_str(json).expect("records");
        score_pages(&records, Utc::now())
    }

    #[test]
    fn duplicate_messages_within_a_category_collapse() {
        // Two http pages both emit the same transport issue text.
        let reports = reports(
            r#"[
                {"url": "http://example.com/a"},
                {"url": "http://example.com/b"}
            ]"#,
        );
        let prioritized = prioritize(&reports);
        let transport = prioritized
            .ranked()
            .iter()
            .filter(|issue| issue.category == IssueCategory::Transport)
            .count();
        assert_eq!(transport, 1);
    }

    #[test]
    fn ranking_is_severity_then_effort() {
        let reports = reports(
            r#"[{"url": "http://example.com/", "restrictive_robots": true}]"#,
        );
        let prioritized = prioritize(&reports);
        for pair in prioritized.ranked().windows(2) {
            let key = |issue: &Issue| (issue.severity, issue.effort);
            assert!(
                key(&pair[0]) <= key(&pair[1]),
                "ordering violated between {:?} and {:?}",
                pair[0].message,
                pair[1].message
            );
        }
    }

    #[test]
    fn essential_split_follows_the_closed_category_set() {
        let reports = reports(
            r#"[{
                "url": "https://example.com/",
                "https": true,
                "restrictive_robots": true,
                "accessibility": [
                    {"code": "WCAG2AA.Principle1.Guideline1_4.1_4_3.G18",
                     "severity": "critical", "message": "contrast failure"},
                    {"code": "WCAG2A.Principle1.Guideline1_3.1_3_1.H42",
                     "severity": "minor", "message": "heading markup"}
                ]
            }]"#,
        );
        let prioritized = prioritize(&reports);

        assert!(prioritized
            .essential()
            .any(|issue| issue.category == IssueCategory::CrawlerDirectives));
        assert!(prioritized
            .essential()
            .any(|issue| issue.message == "contrast failure"));
        assert!(prioritized
            .nice_to_have()
            .any(|issue| issue.message == "heading markup"));
    }

    #[test]
    fn prioritization_is_deterministic() {
        let reports = reports(
            r#"[
                {"url": "http://example.com/a", "restrictive_robots": true},
                {"url": "http://example.com/b", "forms": {"field_count": 4}}
            ]"#,
        );
        let first = prioritize(&reports);
        let second = prioritize(&reports);

        fn messages(prioritized: &Prioritized) -> Vec<&str> {
            prioritized
                .ranked()
                .iter()
                .map(|issue| issue.message.as_str())
                .collect()
        }
        assert_eq!(messages(&first), messages(&second));
    }

    #[test]
    fn recommendations_mirror_the_ranked_order() {
        let reports = reports(
            r#"[{"url": "http://example.com/", "restrictive_robots": true}]"#,
        );
        let prioritized = prioritize(&reports);
        let recommendations = prioritized.recommendations();
        assert_eq!(recommendations.len(), prioritized.ranked().len());
        for (recommendation, issue) in recommendations.iter().zip(prioritized.ranked()) {
            assert_eq!(recommendation.title, issue.message);
            assert_eq!(recommendation.action, issue.recommendation);
        }
    }

    #[test]
    fn low_effort_wins_ties_within_a_severity() {
        let reports = reports(r#"[{"url": "http://example.com/"}]"#);
        let prioritized = prioritize(&reports);
        let serious: Vec<&Issue> = prioritized
            .ranked()
            .iter()
            .filter(|issue| issue.severity == Severity::Serious)
            .collect();
        for pair in serious.windows(2) {
            assert!(pair[0].effort <= pair[1].effort);
        }
    }

    #[test]
    fn empty_run_produces_no_feedback() {
        let prioritized = prioritize(&[]);
        assert!(prioritized.ranked().is_empty());
        assert!(prioritized.recommendations().is_empty());
    }

    #[test]
    fn effort_enum_orders_low_first() {
        assert!(Effort::Low < Effort::Moderate);
        assert!(Effort::Moderate < Effort::High);
    }
}
