//! Request and result types shared by the matcher, cache, and gateway.
//!
//! Field names on the wire follow the JSON the front-end already sends
//! (`download_url`, `file`), while the Rust names describe what the field holds.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An issue report used as the matching query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueQuery {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Issue title.
    pub title: String,
    /// Issue body.
    #[serde(default)]
    pub description: String,
    /// Issue labels (order-insensitive).
    #[serde(default)]
    pub labels: BTreeSet<String>,
}

impl IssueQuery {
    /// Creates a query with no labels.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            title: title.into(),
            description: description.into(),
            labels: BTreeSet::new(),
        }
    }

    /// Adds labels to the query.
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Text embedded for the issue: `title + " " + description`, not preprocessed.
    pub fn embedding_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// A repository file offered as a possible match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    /// File name (display only).
    #[serde(default)]
    pub name: String,
    /// Repository-relative path; the file's identity within a request.
    pub path: String,
    /// URI returning the raw file text.
    #[serde(rename = "download_url", default)]
    pub content_location: Option<String>,
}

impl CandidateFile {
    /// Creates a candidate with a content location.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        content_location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            content_location: Some(content_location.into()),
        }
    }

    /// Returns the content location if it is present and non-blank.
    pub fn location(&self) -> Option<&str> {
        self.content_location
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Raw text retrieved for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedContent {
    /// Candidate path.
    pub path: String,
    /// Body as returned by the content location.
    pub raw_text: String,
}

impl FetchedContent {
    /// Creates a fetched record.
    pub fn new(path: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// One ranked file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMatch {
    /// Candidate path.
    #[serde(rename = "file")]
    pub file_path: String,
    /// Cosine similarity rounded for reporting.
    pub similarity_score: f32,
}

/// Outcome of a match call.
///
/// Serialized with a `status` tag: `{"status":"success","matches":[..]}` or
/// `{"status":"error","message":".."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MatchResult {
    /// Matching ran; `matches` is sorted by descending similarity and may be empty.
    Success {
        /// Ranked files.
        matches: Vec<FileMatch>,
    },
    /// Matching could not produce a ranking.
    Error {
        /// Human-readable reason.
        message: String,
    },
}

impl MatchResult {
    /// Builds a success result.
    pub fn success(matches: Vec<FileMatch>) -> Self {
        MatchResult::Success { matches }
    }

    /// Builds an error result.
    pub fn error(message: impl Into<String>) -> Self {
        MatchResult::Error {
            message: message.into(),
        }
    }

    /// Returns `true` for the success shape.
    pub fn is_success(&self) -> bool {
        matches!(self, MatchResult::Success { .. })
    }

    /// Returns the ranked matches (empty for errors).
    pub fn matches(&self) -> &[FileMatch] {
        match self {
            MatchResult::Success { matches } => matches,
            MatchResult::Error { .. } => &[],
        }
    }

    /// Returns the error message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            MatchResult::Success { .. } => None,
            MatchResult::Error { message } => Some(message),
        }
    }

    /// Returns the wire status string.
    pub fn status(&self) -> &'static str {
        match self {
            MatchResult::Success { .. } => "success",
            MatchResult::Error { .. } => "error",
        }
    }
}
