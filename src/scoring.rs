use crate::analyzer::{ESSENTIAL_OG_TAGS, ESSENTIAL_TWITTER_TAGS, has_tag, present};
use crate::models::TagRecord;

/// Additive score over a raw tag record, for quick at-a-glance display.
///
/// Starts at zero and awards points per tag family. This is a separate
/// scale from [`crate::analyzer::analyze`]'s penalty score and the two do
/// not have to agree.
pub fn quick_score(record: &TagRecord) -> u8 {
    let mut score: i32 = 0;

    if let Some(title) = present(&record.title) {
        score += 15;
        let length = title.chars().count();
        if (10..=60).contains(&length) {
            score += 10;
        } else if (61..=70).contains(&length) {
            score += 5;
        }
    }

    if let Some(description) = present(&record.description) {
        score += 10;
        let length = description.chars().count();
        if (50..=160).contains(&length) {
            score += 10;
        } else if (161..=200).contains(&length) {
            score += 5;
        }
    }

    if let Some(og_tags) = &record.open_graph_tags {
        for tag in ESSENTIAL_OG_TAGS {
            if has_tag(og_tags, tag) {
                score += 4;
            }
        }
    }

    if let Some(twitter_tags) = &record.twitter_tags {
        for tag in ESSENTIAL_TWITTER_TAGS {
            if has_tag(twitter_tags, tag) {
                score += 5;
            }
        }
    }

    if present(&record.canonical).is_some() {
        score += 5;
    }
    if present(&record.viewport).is_some() {
        score += 5;
    }
    if present(&record.robots).is_some() {
        score += 5;
    }

    score.clamp(0, 100) as u8
}
