use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;
use visual_medical_assistant::{
    Result,
    analysis::Analyst,
    config::{Config, LogsConfig, ModelConfig, ServerConfig},
    report::DelimitedSectionParser,
};

use super::mocks::MockInferenceClient;

pub const MULTIPART_BOUNDARY: &str = "X-MEDASSIST-TEST-BOUNDARY";

/// Smallest byte string that sniffs as PNG.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13];

pub const FULL_REPORT: &str = "Here is the analysis.\n\
Detailed Analysis:\nA shadow in the lower left lobe.\n\n\
Analysis Report:\nPossible consolidation.\n\n\
Recommendations:\nFollow-up CT scan.\n\n\
Treatments:\nAntibiotics if infection is confirmed.\n\
Consult with a doctor before making medical decisions.";

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        model: ModelConfig {
            api_key: "test-api-key".to_string(),
            ..ModelConfig::default()
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
            max_upload_bytes: 1024,
        },
    }
}

pub fn create_test_analyst(client: MockInferenceClient, max_upload_bytes: usize) -> Arc<Analyst> {
    Arc::new(Analyst::with_client(
        Box::new(client),
        Box::new(DelimitedSectionParser),
        max_upload_bytes,
    ))
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Builds a multipart body with one file part.
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9090
  max_upload_bytes: 2048
  logs:
    level: "debug"

model:
  base_url: "http://localhost:9999/v1beta"
  api_key: "file-api-key"
  model: "gemini-1.5-pro"
  timeout_secs: 30
  max_retries: 2
  generation:
    temperature: 0.7
    topP: 0.8
    topK: 20
    maxOutputTokens: 512
  safety_settings:
    - category: HARM_CATEGORY_HARASSMENT
      threshold: BLOCK_ONLY_HIGH
"#;

/// Minimal configuration relying on defaults
pub const MINIMAL_CONFIG_YAML: &str = r#"
model:
  api_key: "minimal-key"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"
model:
  safety_settings:
    - category: HARM_CATEGORY_UNKNOWN
"#;
