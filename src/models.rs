use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Metadata extracted from a single page's `<head>`.
///
/// Every field except `url` is optional: a tag that does not appear in the
/// document is simply absent here. Serialized names are camelCase to match
/// the JSON report shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRecord {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_graph_tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_tags: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_tags: Option<Vec<OtherTag>>,
}

/// A meta tag that carries content but belongs to no recognized family.
/// Kept in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherTag {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: IssueSeverity,
    pub message: String,
    pub code: IssueCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

/// Stable machine-readable identifier for each rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    MissingTitle,
    TitleTooShort,
    TitleTooLong,
    MissingDescription,
    DescriptionTooShort,
    DescriptionTooLong,
    MissingOgTags,
    IncompleteOgTags,
    MissingTwitterTags,
    IncompleteTwitterTags,
    MissingCanonical,
    MissingViewport,
}

/// Per-family verdict shown in the report summary.
///
/// Ordering follows quality: `Missing < Partial < Present < Optimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStatus {
    Missing,
    Partial,
    Present,
    Optimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSummaryEntry {
    pub name: String,
    pub status: TagStatus,
}

/// Complete result of auditing one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub url: String,
    pub tag_record: TagRecord,
    pub score: u8,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
    pub tag_summary: Vec<TagSummaryEntry>,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("Failed to fetch the website: {0}")]
    Fetch(String),
}
