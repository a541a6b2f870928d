//! Scripted TTS backend for handler tests.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{TtsBackend, TtsError, TtsOptions};
use crate::voices::Language;

pub struct MockBackend {
    outcome: Result<Vec<u8>, TtsError>,
    calls: Mutex<Vec<(String, Language)>>,
}

impl MockBackend {
    pub fn always_succeeds(audio: &[u8]) -> Self {
        Self {
            outcome: Ok(audio.to_vec()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn always_fails(error: TtsError) -> Self {
        Self {
            outcome: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Text and language of every synthesize() call so far.
    pub fn calls(&self) -> Vec<(String, Language)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TtsBackend for MockBackend {
    async fn synthesize(&self, text: &str, options: &TtsOptions) -> Result<Vec<u8>, TtsError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((text.to_string(), options.language));
        }
        self.outcome.clone()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
