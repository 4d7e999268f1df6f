pub mod accessibility;
pub mod agent;
pub mod content;
pub mod security;

use crate::types::report::{Category, PageReport};
use crate::types::signals::SignalRecord;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// Scores one page. Pure: reads only the record, the run timestamp, and the
/// fixed tables in `types::scoring`.
pub fn score_page(record: &SignalRecord, now: DateTime<Utc>) -> PageReport {
    let mut categories = BTreeMap::new();

    // No audit data means the category is not applicable to this page, so
    // it must not drag site averages down.
    if let Some(audit) = &record.accessibility {
        categories.insert(
            Category::Accessibility,
            accessibility::accessibility_score(audit),
        );
    }
    categories.insert(Category::Content, content::content_score(&record.content, now));
    categories.insert(Category::Security, security::security_score(record));
    categories.insert(Category::AgentSuitability, agent::agent_score(record));

    debug!(url = %record.url, categories = categories.len(), "scored page");

    PageReport {
        url: record.url.clone(),
        load_ms: record.timing.load_ms,
        categories,
        error: None,
    }
}

/// Scores every record, isolating an unexpected failure on one page to that
/// page: the run continues and the failed page carries an error annotation.
pub fn score_pages(records: &[SignalRecord], now: DateTime<Utc>) -> Vec<PageReport> {
    records
        .iter()
        .map(|record| {
            match panic::catch_unwind(AssertUnwindSafe(|| score_page(record, now))) {
                Ok(report) => report,
                Err(payload) => {
                    let reason = describe_panic(&payload);
                    warn!(url = %record.url, reason = %reason, "scoring failed for page");
                    PageReport {
                        url: record.url.clone(),
                        load_ms: record.timing.load_ms,
                        categories: BTreeMap::new(),
                        error: Some(reason),
                    }
                }
            }
        })
        .collect()
}

fn describe_panic(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "scoring panicked".to_string()
    }
}
