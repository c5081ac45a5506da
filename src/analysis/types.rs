use crate::{
    error::FailureKind,
    llm::ImageMime,
    report::{ParsedReport, SectionedReport},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A file as it arrived from the upload form.
#[derive(Debug, Clone, Default)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            ..Self::default()
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A status banner for the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    /// All four sections were found.
    Complete,
    /// Some sections were found; the rest are omitted.
    Partial,
    /// No markers found; the raw text is shown instead.
    Unstructured,
    Failed,
}

/// The uploaded image, kept for the preview next to the report.
#[derive(Debug, Clone)]
pub struct ImagePreview {
    pub mime: ImageMime,
    pub bytes: Vec<u8>,
}

/// Result of one submit. Failures are carried as notices, never as `Err`.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub notices: Vec<Notice>,
    pub report: Option<ParsedReport>,
    pub failure: Option<FailureKind>,
    pub preview: Option<ImagePreview>,
}

impl AnalysisOutcome {
    pub fn status(&self) -> AnalysisStatus {
        match &self.report {
            None => AnalysisStatus::Failed,
            Some(ParsedReport::Unstructured { .. }) => AnalysisStatus::Unstructured,
            Some(ParsedReport::Sectioned(report)) if report.is_complete() => {
                AnalysisStatus::Complete
            }
            Some(ParsedReport::Sectioned(_)) => AnalysisStatus::Partial,
        }
    }

    pub fn sections(&self) -> Option<&SectionedReport> {
        match &self.report {
            Some(ParsedReport::Sectioned(report)) => Some(report),
            _ => None,
        }
    }

    pub fn raw_text(&self) -> Option<&str> {
        match &self.report {
            Some(ParsedReport::Unstructured { raw_text }) => Some(raw_text),
            _ => None,
        }
    }
}
