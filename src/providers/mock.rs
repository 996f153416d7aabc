/*!
 * Mock provider implementation for testing.
 *
 * The mock replays scripted responses in order and records every request it
 * receives, so tests can assert on prompts and sampling parameters:
 * - `MockProvider::scripted(...)` - replays the given texts
 * - `MockProvider::failing()` - always fails with an error
 * - `with_responder(...)` - computes a response once the script is exhausted
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::{ModelRequest, ModelResponse, Provider};

/// Behavior once the scripted responses are exhausted
#[derive(Debug, Clone, Copy)]
enum Fallback {
    /// Fail with a request error
    Exhausted,
    /// Always fail with an API error
    Failing,
    /// Compute the response from the request
    Responder(fn(&ModelRequest) -> String),
}

/// Mock provider for testing generation behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Scripted results, consumed front to back
    script: Arc<Mutex<VecDeque<Result<String, ProviderError>>>>,
    /// Every request received, in order
    requests: Arc<Mutex<Vec<ModelRequest>>>,
    /// What to do when the script is empty
    fallback: Fallback,
}

impl MockProvider {
    /// Create a mock with an empty script
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fallback: Fallback::Exhausted,
        }
    }

    /// Create a mock that replays the given texts in order
    pub fn scripted<S: Into<String>>(responses: impl IntoIterator<Item = S>) -> Self {
        let mock = Self::new();
        for response in responses {
            mock.push_response(response);
        }
        mock
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self {
            fallback: Fallback::Failing,
            ..Self::new()
        }
    }

    /// Compute responses with `responder` once the script is exhausted
    pub fn with_responder(mut self, responder: fn(&ModelRequest) -> String) -> Self {
        self.fallback = Fallback::Responder(responder);
        self
    }

    /// Queue a successful response
    pub fn push_response(&self, text: impl Into<String>) {
        self.script.lock().push_back(Ok(text.into()));
    }

    /// Queue a failed response
    pub fn push_error(&self, error: ProviderError) {
        self.script.lock().push_back(Err(error));
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn complete(&self, request: &ModelRequest) -> Result<ModelResponse, ProviderError> {
        self.requests.lock().push(request.clone());

        let scripted = self.script.lock().pop_front();
        let text = match scripted {
            Some(result) => result?,
            None => match self.fallback {
                Fallback::Responder(responder) => responder(request),
                Fallback::Failing => {
                    return Err(ProviderError::ApiError {
                        status_code: 500,
                        message: "Simulated provider failure".to_string(),
                    });
                }
                Fallback::Exhausted => {
                    return Err(ProviderError::RequestFailed(
                        "Mock provider has no scripted response left".to_string(),
                    ));
                }
            },
        };

        Ok(ModelResponse {
            prompt_tokens: Some(request.prompt.len() as u64),
            completion_tokens: Some(text.len() as u64),
            text,
        })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.fallback {
            Fallback::Failing => Err(ProviderError::ConnectionError("Simulated connection failure".to_string())),
            _ => Ok(()),
        }
    }
}
