use crate::models::{
    Analysis, Issue, IssueCode, IssueSeverity, TagRecord, TagStatus, TagSummaryEntry,
};
use std::collections::BTreeMap;

/// Open Graph properties a page needs for a complete social preview.
pub const ESSENTIAL_OG_TAGS: [&str; 5] = ["title", "description", "image", "url", "type"];

/// Twitter Card tags a page needs for a complete card.
pub const ESSENTIAL_TWITTER_TAGS: [&str; 4] = ["card", "title", "description", "image"];

const TITLE_MIN_LENGTH: usize = 10;
const TITLE_MAX_LENGTH: usize = 60;
const DESCRIPTION_MIN_LENGTH: usize = 50;
const DESCRIPTION_MAX_LENGTH: usize = 160;

struct Check {
    name: &'static str,
    eval: fn(&TagRecord) -> CheckOutcome,
}

struct CheckOutcome {
    status: TagStatus,
    finding: Option<Finding>,
}

struct Finding {
    severity: IssueSeverity,
    code: IssueCode,
    message: String,
    penalty: i32,
    recommendation: String,
}

impl CheckOutcome {
    fn clean(status: TagStatus) -> Self {
        Self {
            status,
            finding: None,
        }
    }

    fn flagged(status: TagStatus, finding: Finding) -> Self {
        Self {
            status,
            finding: Some(finding),
        }
    }
}

/// The fixed rule table. Evaluation order is also report order.
const CHECKS: [Check; 6] = [
    Check {
        name: "Title",
        eval: check_title,
    },
    Check {
        name: "Description",
        eval: check_description,
    },
    Check {
        name: "Open Graph",
        eval: check_open_graph,
    },
    Check {
        name: "Twitter Cards",
        eval: check_twitter_cards,
    },
    Check {
        name: "Canonical",
        eval: check_canonical,
    },
    Check {
        name: "Viewport",
        eval: check_viewport,
    },
];

/// Runs every rule against `record` and folds the outcomes into a scored
/// [`Analysis`].
///
/// The score starts at 100 and each finding subtracts its penalty; the
/// total is clamped to 0..=100 only after all checks ran. Each rule fires
/// at most once, so issues and recommendations stay paired and the summary
/// always holds one row per check, in table order.
pub fn analyze(record: TagRecord) -> Analysis {
    let mut score: i32 = 100;
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();
    let mut tag_summary = Vec::with_capacity(CHECKS.len());

    for check in &CHECKS {
        let outcome = (check.eval)(&record);
        if let Some(finding) = outcome.finding {
            score -= finding.penalty;
            issues.push(Issue {
                severity: finding.severity,
                message: finding.message,
                code: finding.code,
            });
            recommendations.push(finding.recommendation);
        }
        tag_summary.push(TagSummaryEntry {
            name: check.name.to_string(),
            status: outcome.status,
        });
    }

    debug_assert!(
        (0..=100).contains(&score),
        "penalties should never drive the raw score out of range, got {score}"
    );
    debug_assert_eq!(
        tag_summary.len(),
        CHECKS.len(),
        "every check should produce exactly one summary row"
    );
    debug_assert_eq!(
        issues.len(),
        recommendations.len(),
        "each issue should carry exactly one recommendation"
    );

    Analysis {
        url: record.url.clone(),
        score: score.clamp(0, 100) as u8,
        tag_record: record,
        issues,
        recommendations,
        tag_summary,
    }
}

/// An empty value counts as absent for rule evaluation.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Whether `map` carries a non-empty value for `key`.
pub(crate) fn has_tag(map: &BTreeMap<String, String>, key: &str) -> bool {
    map.get(key).is_some_and(|v| !v.is_empty())
}

fn check_title(record: &TagRecord) -> CheckOutcome {
    let Some(title) = present(&record.title) else {
        return CheckOutcome::flagged(
            TagStatus::Missing,
            Finding {
                severity: IssueSeverity::Error,
                code: IssueCode::MissingTitle,
                message: "Missing title tag".to_string(),
                penalty: 15,
                recommendation: "Add a descriptive title tag to your page.".to_string(),
            },
        );
    };

    let length = title.chars().count();
    if length < TITLE_MIN_LENGTH {
        CheckOutcome::flagged(
            TagStatus::Partial,
            Finding {
                severity: IssueSeverity::Warning,
                code: IssueCode::TitleTooShort,
                message: format!("Title tag is too short ({length} chars)"),
                penalty: 5,
                recommendation: format!(
                    "Make your title tag more descriptive (at least {TITLE_MIN_LENGTH} characters)."
                ),
            },
        )
    } else if length > TITLE_MAX_LENGTH {
        CheckOutcome::flagged(
            TagStatus::Partial,
            Finding {
                severity: IssueSeverity::Warning,
                code: IssueCode::TitleTooLong,
                message: format!(
                    "Title tag length ({length} chars) exceeds optimal {TITLE_MAX_LENGTH} character limit"
                ),
                penalty: 3,
                recommendation: format!(
                    "Shorten your title tag to {TITLE_MAX_LENGTH} characters or less for better display in search results."
                ),
            },
        )
    } else {
        CheckOutcome::clean(TagStatus::Optimal)
    }
}

fn check_description(record: &TagRecord) -> CheckOutcome {
    let Some(description) = present(&record.description) else {
        return CheckOutcome::flagged(
            TagStatus::Missing,
            Finding {
                severity: IssueSeverity::Error,
                code: IssueCode::MissingDescription,
                message: "Missing meta description".to_string(),
                penalty: 10,
                recommendation:
                    "Add a meta description to improve click-through rates from search results."
                        .to_string(),
            },
        );
    };

    let length = description.chars().count();
    if length < DESCRIPTION_MIN_LENGTH {
        CheckOutcome::flagged(
            TagStatus::Partial,
            Finding {
                severity: IssueSeverity::Warning,
                code: IssueCode::DescriptionTooShort,
                message: format!("Meta description is too short ({length} chars)"),
                penalty: 5,
                recommendation: format!(
                    "Make your meta description more descriptive (at least {DESCRIPTION_MIN_LENGTH} characters)."
                ),
            },
        )
    } else if length > DESCRIPTION_MAX_LENGTH {
        CheckOutcome::flagged(
            TagStatus::Partial,
            Finding {
                severity: IssueSeverity::Warning,
                code: IssueCode::DescriptionTooLong,
                message: format!(
                    "Meta description length ({length} chars) exceeds optimal {DESCRIPTION_MAX_LENGTH} character limit"
                ),
                penalty: 3,
                recommendation: format!(
                    "Shorten your meta description to {DESCRIPTION_MAX_LENGTH} characters or less for better display in search results."
                ),
            },
        )
    } else {
        CheckOutcome::clean(TagStatus::Optimal)
    }
}

fn check_open_graph(record: &TagRecord) -> CheckOutcome {
    let Some(og_tags) = record.open_graph_tags.as_ref().filter(|m| !m.is_empty()) else {
        return CheckOutcome::flagged(
            TagStatus::Missing,
            Finding {
                severity: IssueSeverity::Error,
                code: IssueCode::MissingOgTags,
                message: "Missing Open Graph meta tags for social sharing".to_string(),
                penalty: 10,
                recommendation:
                    "Add Open Graph meta tags to improve sharing on social media platforms like Facebook."
                        .to_string(),
            },
        );
    };

    let missing: Vec<&str> = ESSENTIAL_OG_TAGS
        .iter()
        .copied()
        .filter(|tag| !has_tag(og_tags, tag))
        .collect();

    if missing.is_empty() {
        CheckOutcome::clean(TagStatus::Optimal)
    } else {
        let missing = missing.join(", ");
        CheckOutcome::flagged(
            TagStatus::Partial,
            Finding {
                severity: IssueSeverity::Warning,
                code: IssueCode::IncompleteOgTags,
                message: format!("Missing essential Open Graph tags: {missing}"),
                penalty: 5,
                recommendation: format!("Add missing Open Graph tags: {missing}."),
            },
        )
    }
}

fn check_twitter_cards(record: &TagRecord) -> CheckOutcome {
    let Some(twitter_tags) = record.twitter_tags.as_ref().filter(|m| !m.is_empty()) else {
        return CheckOutcome::flagged(
            TagStatus::Missing,
            Finding {
                severity: IssueSeverity::Error,
                code: IssueCode::MissingTwitterTags,
                message: "Missing Twitter Card meta tags for social sharing".to_string(),
                penalty: 10,
                recommendation: "Add Twitter Card meta tags to improve sharing on Twitter."
                    .to_string(),
            },
        );
    };

    let missing: Vec<&str> = ESSENTIAL_TWITTER_TAGS
        .iter()
        .copied()
        .filter(|tag| !has_tag(twitter_tags, tag))
        .collect();

    if missing.is_empty() {
        CheckOutcome::clean(TagStatus::Optimal)
    } else {
        let missing = missing.join(", ");
        CheckOutcome::flagged(
            TagStatus::Partial,
            Finding {
                severity: IssueSeverity::Warning,
                code: IssueCode::IncompleteTwitterTags,
                message: format!("Missing essential Twitter Card tags: {missing}"),
                penalty: 5,
                recommendation: format!("Add missing Twitter Card tags: {missing}."),
            },
        )
    }
}

fn check_canonical(record: &TagRecord) -> CheckOutcome {
    if present(&record.canonical).is_some() {
        CheckOutcome::clean(TagStatus::Present)
    } else {
        CheckOutcome::flagged(
            TagStatus::Missing,
            Finding {
                severity: IssueSeverity::Warning,
                code: IssueCode::MissingCanonical,
                message: "Missing canonical URL".to_string(),
                penalty: 5,
                recommendation: "Add a canonical URL tag to prevent duplicate content issues."
                    .to_string(),
            },
        )
    }
}

fn check_viewport(record: &TagRecord) -> CheckOutcome {
    if present(&record.viewport).is_some() {
        CheckOutcome::clean(TagStatus::Present)
    } else {
        CheckOutcome::flagged(
            TagStatus::Missing,
            Finding {
                severity: IssueSeverity::Warning,
                code: IssueCode::MissingViewport,
                message: "Missing viewport meta tag for responsive design".to_string(),
                penalty: 5,
                recommendation: "Add a viewport meta tag for better mobile rendering.".to_string(),
            },
        )
    }
}
