use serde::{Deserialize, Serialize};

use crate::model::{CandidateFile, IssueQuery};

/// Body of `POST /analyse-issue`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeIssueRequest {
    pub owner: String,
    pub repo: String,
    #[serde(rename = "filteredFiles")]
    pub filtered_files: Vec<CandidateFile>,
    #[serde(rename = "issueDetails")]
    pub issue_details: IssueQuery,
}

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}
