use crate::types::report::{ExecutiveSummary, PageReport};
use serde::Serialize;

#[derive(Serialize)]
struct FullReport<'a> {
    summary: &'a ExecutiveSummary,
    pages: &'a [PageReport],
}

pub fn to_json(
    summary: &ExecutiveSummary,
    pages: &[PageReport],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&FullReport { summary, pages })
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

    #[test]
    fn json_report_contains_summary_and_pages() {
        let records: Vec<SignalRecord> =
            serde_json::from_str(r#"[{"url": "https://example.com/", "https": true}]"#)
                .expect("records");
        let reports = score_pages(&records, Utc::now());
        let site = aggregate(&reports, &[0.25, 0.25, 0.25, 0.25]);
        let prioritized = prioritize(&reports);
        let summary = build_summary(&site, &prioritized, None, Utc::now(), 10);

        let rendered = to_json(&summary, &reports).expect("json should serialize");
        assert!(rendered.contains("\"summary\""));
        assert!(rendered.contains("\"pages\""));
        assert!(rendered.contains("\"overall_score\""));
        assert!(rendered.contains("https://example.com/"));
    }
}
