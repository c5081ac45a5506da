use super::types::*;
use crate::{
    Error, Result,
    config::Config,
    error::FailureKind,
    llm::{GeminiClient, ImageMime, InferenceClient, InferenceRequest},
    report::{self, DelimitedSectionParser, ParsedReport, ReportParser},
};
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str = "Analysis generated successfully!";
pub const EMPTY_RESPONSE_MESSAGE: &str =
    "Failed to generate analysis. The response was empty or invalid.";
pub const NO_STRUCTURE_MESSAGE: &str =
    "Could not parse the sections of the response. Displaying full response instead.";

/// Runs one upload through validation, the model call and the section
/// parser. Holds no per-request state, so one instance serves every request.
pub struct Analyst {
    client: Box<dyn InferenceClient>,
    parser: Box<dyn ReportParser>,
    max_upload_bytes: usize,
}

impl Analyst {
    pub fn new(config: &Config) -> Result<Self> {
        info!(
            "Initializing analyst with model {} at {}",
            config.model.model, config.model.base_url
        );
        let client = GeminiClient::new(config.model.clone())?;
        Ok(Self::with_client(
            Box::new(client),
            Box::new(DelimitedSectionParser),
            config.server.max_upload_bytes,
        ))
    }

    pub fn with_client(
        client: Box<dyn InferenceClient>,
        parser: Box<dyn ReportParser>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            client,
            parser,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Checks the upload against the form's constraints and builds the
    /// model request.
    pub fn prepare(&self, upload: UploadedImage) -> Result<InferenceRequest> {
        if upload.bytes.is_empty() {
            return Err(Error::invalid_upload("the uploaded file is empty"));
        }
        if upload.bytes.len() > self.max_upload_bytes {
            return Err(Error::invalid_upload(format!(
                "the uploaded file is {} bytes, the limit is {} bytes",
                upload.bytes.len(),
                self.max_upload_bytes
            )));
        }

        let mime = upload
            .content_type
            .as_deref()
            .and_then(ImageMime::from_content_type)
            .or_else(|| upload.file_name.as_deref().and_then(ImageMime::from_file_name))
            .or_else(|| ImageMime::sniff(&upload.bytes))
            .ok_or_else(|| {
                Error::invalid_upload("only PNG, JPG and JPEG images are supported")
            })?;

        Ok(InferenceRequest::new(upload.bytes, mime))
    }

    async fn run(&self, request: &InferenceRequest) -> Result<ParsedReport> {
        let text = self.client.generate(request).await?;
        report::extract(self.parser.as_ref(), Some(text.as_str()))
    }

    pub async fn analyze(&self, upload: UploadedImage) -> AnalysisOutcome {
        let request_id = Uuid::new_v4();
        let mut outcome = AnalysisOutcome {
            request_id,
            generated_at: Utc::now(),
            notices: Vec::new(),
            report: None,
            failure: None,
            preview: None,
        };

        let request = match self.prepare(upload) {
            Ok(request) => request,
            Err(e) => {
                warn!(%request_id, "Rejected upload: {}", e);
                outcome.failure = Some(e.kind());
                outcome.notices.push(Notice::error(e.to_string()));
                return outcome;
            }
        };

        info!(
            %request_id,
            bytes = request.image().len(),
            mime = %request.mime(),
            "Analyzing image"
        );

        match self.run(&request).await {
            Ok(parsed) => {
                outcome.notices.push(Notice::success(SUCCESS_MESSAGE));
                if !parsed.is_structured() {
                    outcome.notices.push(Notice::warning(NO_STRUCTURE_MESSAGE));
                }
                outcome.report = Some(parsed);
                info!(%request_id, status = ?outcome.status(), "Analysis finished");
            }
            Err(e) => {
                error!(%request_id, "Analysis failed: {}", e);
                let kind = e.kind();
                let message = match kind {
                    FailureKind::EmptyResponse => EMPTY_RESPONSE_MESSAGE.to_string(),
                    _ => format!("An error occurred during generation: {}", e),
                };
                outcome.failure = Some(kind);
                outcome.notices.push(Notice::error(message));
            }
        }

        let mime = request.mime();
        outcome.generated_at = Utc::now();
        outcome.preview = Some(ImagePreview {
            mime,
            bytes: request.into_image(),
        });
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedClient(&'static str);

    #[async_trait]
    impl InferenceClient for FixedClient {
        async fn generate(&self, _request: &InferenceRequest) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn analyst() -> Analyst {
        Analyst::with_client(
            Box::new(FixedClient("text")),
            Box::new(DelimitedSectionParser),
            16,
        )
    }

    #[test]
    fn test_prepare_prefers_content_type() {
        let upload = UploadedImage::new(vec![1, 2, 3])
            .with_content_type("image/jpg")
            .with_file_name("scan.png");
        assert_eq!(analyst().prepare(upload).unwrap().mime(), ImageMime::Jpeg);
    }

    #[test]
    fn test_prepare_falls_back_to_extension_then_magic() {
        let upload = UploadedImage::new(vec![1, 2, 3])
            .with_content_type("application/octet-stream")
            .with_file_name("scan.png");
        assert_eq!(analyst().prepare(upload).unwrap().mime(), ImageMime::Png);

        let upload = UploadedImage::new(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(analyst().prepare(upload).unwrap().mime(), ImageMime::Jpeg);
    }

    #[test]
    fn test_prepare_rejects_bad_uploads() {
        let empty = analyst().prepare(UploadedImage::new(vec![]));
        assert!(matches!(empty, Err(Error::InvalidUpload(_))));

        let too_big = analyst().prepare(UploadedImage::new(vec![0; 17]).with_file_name("a.png"));
        assert!(matches!(too_big, Err(Error::InvalidUpload(_))));

        let gif = analyst().prepare(UploadedImage::new(b"GIF89a".to_vec()).with_file_name("a.gif"));
        assert!(matches!(gif, Err(Error::InvalidUpload(_))));
    }
}
