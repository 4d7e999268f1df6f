use crate::types::report::{Category, CategoryScore, Effort, Issue, IssueCategory, Severity};
use crate::types::scoring::{clamp_score, CONTENT_WEIGHTS};
use crate::types::signals::ContentSignals;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Neutral freshness when the page carries no last-modified date: absence
/// is not staleness evidence, but it cannot outrank a provably fresh page.
const FRESHNESS_UNKNOWN: f64 = 50.0;

pub fn content_score(content: &ContentSignals, now: DateTime<Utc>) -> CategoryScore {
    let mut issues = Vec::new();

    let heading = heading_score(content, &mut issues);
    let freshness = freshness_score(content, now, &mut issues);
    let media = media_score(content, &mut issues);
    let uniqueness = clamp_score(content.uniqueness.unwrap_or(100.0));
    let grammar = clamp_score(content.grammar.unwrap_or(100.0));

    let [w_heading, w_freshness, w_uniqueness, w_grammar, w_media] = CONTENT_WEIGHTS;
    let score = heading * w_heading
        + freshness * w_freshness
        + uniqueness * w_uniqueness
        + grammar * w_grammar
        + media * w_media;

    let mut subscores = BTreeMap::new();
    subscores.insert("heading".to_string(), heading);
    subscores.insert("freshness".to_string(), freshness);
    subscores.insert("uniqueness".to_string(), uniqueness);
    subscores.insert("grammar".to_string(), grammar);
    subscores.insert("media".to_string(), media);

    CategoryScore {
        category: Category::Content,
        score: clamp_score(score),
        subscores,
        issues,
        manual_checks: Vec::new(),
    }
}

fn heading_score(content: &ContentSignals, issues: &mut Vec<Issue>) -> f64 {
    let mut score: f64 = 100.0;

    if content.h1_count == 0 {
        score -= 30.0;
        issues.push(Issue {
            severity: Severity::Serious,
            category: IssueCategory::HeadingStructure,
            message: "Page has no H1 heading".to_string(),
            recommendation: "Add exactly one H1 that states the page topic".to_string(),
            effort: Effort::Low,
            source: None,
        });
    } else if content.h1_count > 1 {
        score -= 15.0;
        issues.push(Issue {
            severity: Severity::Moderate,
            category: IssueCategory::HeadingStructure,
            message: "Page has multiple H1 headings".to_string(),
            recommendation: "Keep one H1 and demote the others to H2".to_string(),
            effort: Effort::Low,
            source: None,
        });
    }

    // Orphan tiers: a heading level used while its parent level is absent.
    if content.h2_count > 0 && content.h1_count == 0 {
        score -= 20.0;
    }
    if content.h3_count > 0 && content.h2_count == 0 {
        score -= 15.0;
    }
    if content.h4_count > 0 && content.h3_count == 0 {
        score -= 10.0;
    }
    if content.h2_count > 0 && content.h1_count == 0
        || content.h3_count > 0 && content.h2_count == 0
        || content.h4_count > 0 && content.h3_count == 0
    {
        issues.push(Issue {
            severity: Severity::Moderate,
            category: IssueCategory::HeadingStructure,
            message: "Heading levels skip their parent tier".to_string(),
            recommendation: "Nest headings sequentially without skipping levels".to_string(),
            effort: Effort::Moderate,
            source: None,
        });
    }

    if content.h2_count > 10 {
        score -= 10.0;
    }
    if content.h3_count > 15 {
        score -= 10.0;
    }

    score.max(0.0)
}

fn freshness_score(
    content: &ContentSignals,
    now: DateTime<Utc>,
    issues: &mut Vec<Issue>,
) -> f64 {
    let Some(last_modified) = content.last_modified else {
        return FRESHNESS_UNKNOWN;
    };
    let days = (now - last_modified).num_days().max(0);
    if days > 365 {
        issues.push(Issue {
            severity: Severity::Moderate,
            category: IssueCategory::Freshness,
            message: "Content has not been updated in over a year".to_string(),
            recommendation: "Review the page and refresh outdated sections".to_string(),
            effort: Effort::Moderate,
            source: None,
        });
    }
    match days {
        0..=7 => 100.0,
        8..=30 => 90.0,
        31..=90 => 75.0,
        91..=180 => 60.0,
        181..=365 => 40.0,
        _ => (30.0 - (days - 365) as f64 / 100.0).max(0.0),
    }
}

fn media_score(content: &ContentSignals, issues: &mut Vec<Issue>) -> f64 {
    let images = f64::from(content.image_count) * 5.0;
    let videos = f64::from(content.video_count) * 10.0;
    let interactive = f64::from(content.interactive_count) * 5.0;
    let score = images.min(30.0) + videos.min(40.0) + interactive.min(30.0);

    if score == 0.0 && content.word_count > 500 {
        issues.push(Issue {
            severity: Severity::Minor,
            category: IssueCategory::Media,
            message: "Long page contains no media elements".to_string(),
            recommendation: "Break up long text with images or diagrams".to_string(),
            effort: Effort::Moderate,
            source: None,
        });
    }

    score.min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn signals() -> ContentSignals {
        ContentSignals {
            word_count: 400,
            h1_count: 1,
            h2_count: 3,
            h3_count: 0,
            h4_count: 0,
            image_count: 2,
            video_count: 0,
            interactive_count: 0,
            last_modified: None,
            uniqueness: None,
            grammar: None,
        }
    }

    #[test]
    fn missing_h1_with_orphan_h2_scores_fifty() {
        let mut content = signals();
        content.h1_count = 0;
        let now = Utc::now();
        let result = content_score(&content, now);
        assert_eq!(result.subscores["heading"], 50.0);
    }

    #[test]
    fn ten_day_old_page_lands_in_thirty_day_bracket() {
        let now = Utc::now();
        let mut content = signals();
        content.last_modified = Some(now - Duration::days(10));
        let result = content_score(&content, now);
        assert_eq!(result.subscores["freshness"], 90.0);
    }

    #[test]
    fn week_old_page_gets_full_freshness() {
        let now = Utc::now();
        let mut content = signals();
        content.last_modified = Some(now - Duration::days(7));
        let result = content_score(&content, now);
        assert_eq!(result.subscores["freshness"], 100.0);
    }

    #[test]
    fn very_stale_page_decays_below_thirty() {
        let now = Utc::now();
        let mut content = signals();
        content.last_modified = Some(now - Duration::days(365 + 1000));
        let result = content_score(&content, now);
        assert_eq!(result.subscores["freshness"], 20.0);
        assert!(result
            .issues
            .iter()
            .any(|issue| issue.category == IssueCategory::Freshness));
    }

    #[test]
    fn missing_last_modified_is_neutral_not_zero() {
        let result = content_score(&signals(), Utc::now());
        assert_eq!(result.subscores["freshness"], FRESHNESS_UNKNOWN);
    }

    #[test]
    fn media_contributions_are_capped_per_kind() {
        let mut content = signals();
        content.image_count = 100;
        content.video_count = 100;
        content.interactive_count = 100;
        let result = content_score(&content, Utc::now());
        assert_eq!(result.subscores["media"], 100.0);
    }

    #[test]
    fn unsupplied_uniqueness_and_grammar_default_to_full_credit() {
        let result = content_score(&signals(), Utc::now());
        assert_eq!(result.subscores["uniqueness"], 100.0);
        assert_eq!(result.subscores["grammar"], 100.0);
    }

    #[test]
    fn overall_score_stays_in_range_for_empty_page() {
        let result = content_score(&ContentSignals::default(), Utc::now());
        assert!((0.0..=100.0).contains(&result.score));
        // No headings at all: only the missing-H1 deduction applies.
        assert_eq!(result.subscores["heading"], 70.0);
    }

    #[test]
    fn excessive_h2_and_h3_counts_are_penalized() {
        let mut content = signals();
        content.h2_count = 11;
        content.h3_count = 16;
        let result = content_score(&content, Utc::now());
        assert_eq!(result.subscores["heading"], 80.0);
    }
}
