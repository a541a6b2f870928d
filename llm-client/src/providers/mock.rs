//! Mock LLM provider for testing
//!
//! Provides a configurable mock provider that returns a canned reply or a
//! canned failure and remembers the last request it was given.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{LlmError, Result};
use crate::provider::{LlmProvider, LlmRequest, LlmResponse};

/// A mock provider for exercising callers without network access
pub struct MockProvider {
    /// Current call count
    call_count: AtomicUsize,
    /// Error to return (None = always succeed)
    fail_with: Option<LlmError>,
    /// Response content to return on success
    success_response: String,
    /// Most recent request seen by `complete`
    last_request: Mutex<Option<LlmRequest>>,
}

impl MockProvider {
    /// Create a provider that always fails with the given error
    pub fn always_fails(error: LlmError) -> Self {
        Self {
            call_count: AtomicUsize::new(0),
            fail_with: Some(error),
            success_response: String::new(),
            last_request: Mutex::new(None),
        }
    }

    /// Create a provider that always succeeds
    pub fn always_succeeds(response: &str) -> Self {
        Self {
            call_count: AtomicUsize::new(0),
            fail_with: None,
            success_response: response.to_string(),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of times complete() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The last request passed to complete(), if any
    pub fn last_request(&self) -> Option<LlmRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request);
        }

        if let Some(err) = self.fail_with.as_ref() {
            return Err(clone_error(err));
        }

        Ok(LlmResponse {
            content: self.success_response.clone(),
            model: "mock-model".to_string(),
            usage: None,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Clone an LlmError (needed because LlmError doesn't implement Clone)
fn clone_error(err: &LlmError) -> LlmError {
    match err {
        LlmError::MissingApiKey { provider, env_var } => LlmError::MissingApiKey {
            provider: provider.clone(),
            env_var: env_var.clone(),
        },
        LlmError::Timeout { seconds } => LlmError::Timeout { seconds: *seconds },
        LlmError::ApiError {
            message,
            status_code,
        } => LlmError::ApiError {
            message: message.clone(),
            status_code: *status_code,
        },
        LlmError::EmptyResponse(s) => LlmError::EmptyResponse(s.clone()),
        LlmError::ConfigError(s) => LlmError::ConfigError(s.clone()),
    }
}
