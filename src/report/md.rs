use super::format_score;
use crate::types::report::{ExecutiveSummary, PageReport, TrendDirection};

pub fn to_markdown(summary: &ExecutiveSummary) -> String {
    let mut output = String::new();
    output.push_str("# Site Audit Report\n\n");
    output.push_str(&format!(
        "Pages audited: {}\nGenerated: {}\nOverall score: {}\n\n",
        summary.overview.pages,
        summary.overview.generated_at.format("%Y-%m-%d %H:%M UTC"),
        format_score(summary.overview.overall_score)
    ));

    output.push_str("## Categories\n\n");
    output.push_str("| Category | Score | Status | Trend |\n");
    output.push_str("|---|---|---|---|\n");
    for entry in &summary.categories {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            entry.category,
            format_score(entry.score),
            entry.status,
            trend_label(entry.trend)
        ));
    }
    output.push('\n');

    output.push_str("## Key Findings\n\n");
    if summary.key_findings.is_empty() {
        output.push_str("- none\n\n");
    } else {
        for finding in &summary.key_findings {
            output.push_str(&format!("- [{}] {}\n", finding.severity, finding.message));
        }
        output.push('\n');
    }

    output.push_str("## Recommendations\n\n");
    if summary.recommendations.is_empty() {
        output.push_str("- none\n");
    } else {
        for recommendation in &summary.recommendations {
            output.push_str(&format!(
                "- {} ({:?} effort): {}\n",
                recommendation.title, recommendation.effort, recommendation.action
            ));
        }
    }

    if let Some(comparison) = &summary.comparison {
        output.push_str("\n## Comparison With Previous Run\n\n");
        output.push_str("| Metric | Previous | Current | Delta | Change |\n");
        output.push_str("|---|---|---|---|---|\n");
        for delta in comparison {
            output.push_str(&format!(
                "| {} | {} | {} | {:+.2} | {:+.1}% |\n",
                delta.metric,
                format_score(delta.previous),
                format_score(delta.current),
                delta.delta,
                delta.percent_change
            ));
        }
    }

    output
}

/// Per-page score listing for narrative output.
pub fn pages_markdown(pages: &[PageReport]) -> String {
    let mut output = String::new();
    output.push_str("| URL | Category | Score | Issues |\n");
    output.push_str("|---|---|---|---|\n");
    for page in pages {
        for score in page.categories.values() {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                page.url,
                score.category,
                format_score(score.score),
                score.issues.len()
            ));
        }
        if let Some(error) = &page.error {
            output.push_str(&format!("| {} | error | - | {} |\n", page.url, error));
        }
    }
    output
}

fn trend_label(trend: Option<TrendDirection>) -> &'static str {
    match trend {
        Some(TrendDirection::Improved) => "improved",
        Some(TrendDirection::Regressed) => "regressed",
        Some(TrendDirection::Flat) => "flat",
        None => "-",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::feedback::prioritize;
    use crate::score::score_pages;
    use crate::summary::build_summary;
    use crate::types::signals::SignalRecord;
    use chrono::Utc;

    fn fixture() -> (Vec<PageReport>, ExecutiveSummary) {
        let records: Vec<SignalRecord> =
            serde_json::from_str(r#"[{"url": "http://example.com/"}]"#).expect("records");
        let reports = score_pages(&records, Utc::now());
        let site = aggregate(&reports, &[0.25, 0.25, 0.25, 0.25]);
        let prioritized = prioritize(&reports);
        let summary = build_summary(&site, &prioritized, None, Utc::now(), 10);
        (reports, summary)
    }

    #[test]
    fn markdown_report_contains_sections() {
        let (_, summary) = fixture();
        let rendered = to_markdown(&summary);
        assert!(rendered.contains("# Site Audit Report"));
        assert!(rendered.contains("## Categories"));
        assert!(rendered.contains("## Key Findings"));
        assert!(rendered.contains("## Recommendations"));
        assert!(!rendered.contains("Comparison With Previous Run"));
    }

    #[test]
    fn scores_are_rendered_with_two_decimals() {
        let (_, summary) = fixture();
        let rendered = to_markdown(&summary);
        // The accessibility row reports NoData with a fixed 0.00 score.
        assert!(rendered.contains("| accessibility | 0.00 | No data | - |"));
    }

    #[test]
    fn pages_table_lists_each_scored_category() {
        let (reports, _) = fixture();
        let rendered = pages_markdown(&reports);
        assert!(rendered.contains("http://example.com/"));
        assert!(rendered.contains("security"));
        assert!(rendered.contains("agent_suitability"));
    }
}
