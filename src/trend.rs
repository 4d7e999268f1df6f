use crate::types::report::{Severity, SiteAggregate, Status, TrendDelta};

/// Compares two site aggregates metric by metric.
///
/// Only metrics present in both aggregates are compared; a category with no
/// data on either side contributes nothing. Deltas are signed and
/// polarity-agnostic; classifying improvement versus regression happens in
/// the summary builder.
pub fn compare(previous: &SiteAggregate, current: &SiteAggregate) -> Vec<TrendDelta> {
    let previous_metrics = metrics(previous);
    let current_metrics = metrics(current);

    current_metrics
        .into_iter()
        .filter_map(|(metric, current_value)| {
            let previous_value = previous_metrics
                .iter()
                .find(|(name, _)| *name == metric)
                .map(|(_, value)| *value)?;
            let delta = current_value - previous_value;
            Some(TrendDelta {
                metric,
                previous: previous_value,
                current: current_value,
                delta,
                percent_change: percent_change(previous_value, current_value, delta),
            })
        })
        .collect()
}

fn percent_change(previous: f64, current: f64, delta: f64) -> f64 {
    if previous == 0.0 {
        if current == 0.0 {
            0.0
        } else {
            100.0
        }
    } else {
        (delta / previous) * 100.0
    }
}

/// Flattens an aggregate into named numeric metrics, in a stable order.
fn metrics(aggregate: &SiteAggregate) -> Vec<(String, f64)> {
    let mut out = vec![
        ("pages".to_string(), aggregate.pages as f64),
        ("overall_score".to_string(), aggregate.overall_score),
    ];
    if let Some(load) = aggregate.avg_load_ms {
        out.push(("avg_load_ms".to_string(), load));
    }
    for (category, entry) in &aggregate.categories {
        if entry.status == Status::NoData {
            continue;
        }
        out.push((format!("{category}_score"), entry.score));
        for severity in Severity::ALL {
            let count = entry.issues_by_severity.get(&severity).copied().unwrap_or(0);
            out.push((format!("{category}_issues_{severity}"), count as f64));
        }
    }
    out
}
