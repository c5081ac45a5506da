use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use visual_medical_assistant::{
    Error, Result,
    llm::{ImageMime, InferenceClient, InferenceRequest},
};

/// What the mock answers with for one call.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Transport(String),
    Api { status: u16, message: String },
    Empty,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub mime: ImageMime,
    pub image: Vec<u8>,
    pub prompt: String,
}

/// Mock inference client for testing
#[derive(Debug, Clone, Default)]
pub struct MockInferenceClient {
    pub replies: Arc<Mutex<Vec<MockReply>>>,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.add_reply(MockReply::Text(text.into()));
        self
    }

    pub fn with_reply(self, reply: MockReply) -> Self {
        self.add_reply(reply);
        self
    }

    pub fn add_reply(&self, reply: MockReply) {
        self.replies.lock().unwrap().push(reply);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn generate(&self, request: &InferenceRequest) -> Result<String> {
        self.requests.lock().unwrap().push(RecordedRequest {
            mime: request.mime(),
            image: request.image().to_vec(),
            prompt: request.prompt().to_string(),
        });

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::transport("No more mock replies available"));
        }

        match replies.remove(0) {
            MockReply::Text(text) => Ok(text),
            MockReply::Transport(msg) => Err(Error::transport(msg)),
            MockReply::Api { status, message } => Err(Error::Api { status, message }),
            MockReply::Empty => Err(Error::empty_response("mock returned no text")),
        }
    }
}
