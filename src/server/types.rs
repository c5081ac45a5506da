use crate::{
    analysis::{AnalysisOutcome, AnalysisStatus, Notice},
    error::FailureKind,
    report::SectionedReport,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub request_id: Uuid,
    pub status: AnalysisStatus,
    pub generated_at: DateTime<Utc>,
    pub notices: Vec<Notice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<SectionedReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl From<&AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: &AnalysisOutcome) -> Self {
        Self {
            request_id: outcome.request_id,
            status: outcome.status(),
            generated_at: outcome.generated_at,
            notices: outcome.notices.clone(),
            sections: outcome.sections().cloned(),
            raw_text: outcome.raw_text().map(str::to_string),
            failure: outcome.failure,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
