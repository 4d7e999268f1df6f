use crate::types::report::{
    Category, CategoryAggregate, PageReport, SiteAggregate, Status,
};
use crate::types::scoring::status_for;
use std::collections::BTreeMap;
use tracing::debug;

/// Folds the complete set of page reports into the site-level rollup.
///
/// Pages that did not contribute a score to a category are excluded from
/// that category's mean rather than counted as zero; a category with no
/// contributing pages at all reports `NoData` with score 0.
pub fn aggregate(reports: &[PageReport], weights: &[f64; 4]) -> SiteAggregate {
    let mut categories = BTreeMap::new();

    for category in Category::ALL {
        let scores: Vec<f64> = reports
            .iter()
            .filter_map(|report| report.categories.get(&category))
            .map(|score| score.score)
            .collect();

        let mut issues_by_severity = BTreeMap::new();
        for report in reports {
            if let Some(score) = report.categories.get(&category) {
                for issue in &score.issues {
                    *issues_by_severity.entry(issue.severity).or_insert(0) += 1;
                }
            }
        }

        let entry = if scores.is_empty() {
            CategoryAggregate {
                score: 0.0,
                status: Status::NoData,
                pages: 0,
                issues_by_severity,
            }
        } else {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            CategoryAggregate {
                score: mean,
                status: status_for(category, mean),
                pages: scores.len(),
                issues_by_severity,
            }
        };
        debug!(category = %category, status = ?entry.status, pages = entry.pages, "aggregated category");
        categories.insert(category, entry);
    }

    SiteAggregate {
        pages: reports.len(),
        overall_score: overall_score(&categories, weights),
        avg_load_ms: average_load(reports),
        categories,
    }
}

/// Weighted mean over the categories that have data; weights of `NoData`
/// categories are redistributed by renormalizing.
fn overall_score(
    categories: &BTreeMap<Category, CategoryAggregate>,
    weights: &[f64; 4],
) -> f64 {
    let mut total = 0.0;
    let mut weight_sum = 0.0;
    for (category, weight) in Category::ALL.iter().zip(weights) {
        if let Some(entry) = categories.get(category) {
            if entry.status != Status::NoData {
                total += entry.score * weight;
                weight_sum += weight;
            }
        }
    }
    if weight_sum == 0.0 {
        0.0
    } else {
        total / weight_sum
    }
}

fn average_load(reports: &[PageReport]) -> Option<f64> {
    let timings: Vec<f64> = reports.iter().filter_map(|report| report.load_ms).collect();
    if timings.is_empty() {
        None
    } else {
        Some(timings.iter().sum::<f64>() / timings.len() as f64)
    }
}
