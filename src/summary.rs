use crate::feedback::Prioritized;
use crate::types::report::{
    CategorySummary, ExecutiveSummary, Finding, Overview, SiteAggregate, TrendDelta,
    TrendDirection,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    HigherIsBetter,
    LowerIsBetter,
}

/// Per-metric polarity. The comparator returns signed deltas only; whether
/// a delta is an improvement is decided here.
fn polarity(metric: &str) -> Polarity {
    if metric.ends_with("_score") || metric == "overall_score" || metric == "pages" {
        Polarity::HigherIsBetter
    } else {
        // Issue counts and load time fall through here.
        Polarity::LowerIsBetter
    }
}

fn classify(metric: &str, delta: f64) -> TrendDirection {
    if delta.abs() < 1e-9 {
        return TrendDirection::Flat;
    }
    match (polarity(metric), delta > 0.0) {
        (Polarity::HigherIsBetter, true) | (Polarity::LowerIsBetter, false) => {
            TrendDirection::Improved
        }
        _ => TrendDirection::Regressed,
    }
}

/// Composes the final report object. Pure shape transformation: no scoring
/// happens here.
pub fn build_summary(
    aggregate: &SiteAggregate,
    prioritized: &Prioritized,
    comparison: Option<Vec<TrendDelta>>,
    generated_at: DateTime<Utc>,
    top_findings: usize,
) -> ExecutiveSummary {
    let categories = aggregate
        .categories
        .iter()
        .map(|(category, entry)| {
            let metric = format!("{category}_score");
            let trend = comparison.as_ref().and_then(|deltas| {
                deltas
                    .iter()
                    .find(|delta| delta.metric == metric)
                    .map(|delta| classify(&delta.metric, delta.delta))
            });
            CategorySummary {
                category: *category,
                status: entry.status,
                score: entry.score,
                trend,
            }
        })
        .collect();

    let key_findings = prioritized
        .essential()
        .take(top_findings)
        .map(|issue| Finding {
            category: issue.category,
            severity: issue.severity,
            message: issue.message.clone(),
        })
        .collect();

    ExecutiveSummary {
        overview: Overview {
            pages: aggregate.pages,
            generated_at,
            overall_score: aggregate.overall_score,
        },
        categories,
        key_findings,
        recommendations: prioritized.recommendations(),
        comparison,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::feedback::prioritize;
    use crate::score::score_pages;
    use crate::types::report::{Category, Status};
    use crate::types::signals::SignalRecord;

    fn run(json: &str) -> (Vec<crate::types::report::PageReport>, SiteAggregate) {
        let records: Vec<SignalRecord> = serde_json::from_str(json).expect("records");
        let reports = score_pages(&records, Utc::now());
        let site = aggregate(&reports, &[0.25, 0.25, 0.25, 0.25]);
        (reports, site)
    }

    #[test]
    fn summary_composes_all_blocks() {
        let (reports, site) = run(r#"[{"url": "http://example.com/"}]"#);
        let prioritized = prioritize(&reports);
        let summary = build_summary(&site, &prioritized, None, Utc::now(), 10);

        assert_eq!(summary.overview.pages, 1);
        assert_eq!(summary.categories.len(), site.categories.len());
        assert!(summary.comparison.is_none());
        assert!(!summary.recommendations.is_empty());
    }

    #[test]
    fn key_findings_are_capped_and_essential_only() {
        let (reports, site) = run(
            r#"[{
                "url": "http://example.com/",
                "restrictive_robots": true,
                "forms": {"field_count": 4}
            }]"#,
        );
        let prioritized = prioritize(&reports);
        let summary = build_summary(&site, &prioritized, None, Utc::now(), 2);
        assert!(summary.key_findings.len() <= 2);
        for finding in &summary.key_findings {
            assert!(finding.category.is_essential(finding.severity));
        }
    }

    #[test]
    fn score_deltas_classify_by_higher_is_better() {
        assert_eq!(classify("security_score", 4.0), TrendDirection::Improved);
        assert_eq!(classify("security_score", -4.0), TrendDirection::Regressed);
        assert_eq!(classify("security_score", 0.0), TrendDirection::Flat);
    }

    #[test]
    fn issue_counts_and_load_time_classify_by_lower_is_better() {
        assert_eq!(
            classify("accessibility_issues_critical", -2.0),
            TrendDirection::Improved
        );
        assert_eq!(classify("avg_load_ms", 250.0), TrendDirection::Regressed);
    }

    #[test]
    fn category_trend_comes_from_the_comparison_block() {
        let (reports, site) = run(r#"[{"url": "https://example.com/", "https": true}]"#);
        let (previous_reports, previous) = run(r#"[{"url": "http://example.com/"}]"#);
        let _ = previous_reports;
        let deltas = crate::trend::compare(&previous, &site);
        let prioritized = prioritize(&reports);
        let summary = build_summary(&site, &prioritized, Some(deltas), Utc::now(), 10);

        let security = summary
            .categories
            .iter()
            .find(|entry| entry.category == Category::Security)
            .expect("security summary");
        assert_eq!(security.trend, Some(TrendDirection::Improved));
    }

    #[test]
    fn no_data_category_surfaces_in_summary() {
        let (reports, site) = run(r#"[{"url": "https://example.com/"}]"#);
        let prioritized = prioritize(&reports);
        let summary = build_summary(&site, &prioritized, None, Utc::now(), 10);
        let accessibility = summary
            .categories
            .iter()
            .find(|entry| entry.category == Category::Accessibility)
            .expect("accessibility summary");
        assert_eq!(accessibility.status, Status::NoData);
        assert_eq!(accessibility.score, 0.0);
    }
}
