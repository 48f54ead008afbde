//! Test doubles: a stub chat model, stub provider factories and a log capture.
//!
//! Used by unit and integration tests to exercise resolution and chat sessions
//! without network calls.

use crate::config::Profile;
use crate::conversation::Message;
use crate::error::ProviderError;
use crate::provider::handle::{ChatModel, ModelHandle};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

pub const STUB_REPLY: &str = "Done.";
pub const STUB_FAILURE: &str = "Mock provider error for testing";

/// A chat model that records the profile it was built from and replies with
/// canned text.
#[derive(Debug, Clone)]
pub struct StubChatModel {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub settings: Option<Map<String, Value>>,
    reply: String,
    delay: Option<Duration>,
    fail: bool,
    calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl StubChatModel {
    pub fn new(reply: &str) -> Self {
        Self {
            provider: "stub".to_owned(),
            model: "stub-model".to_owned(),
            api_key: String::new(),
            base_url: None,
            settings: None,
            reply: reply.to_owned(),
            delay: None,
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Stub carrying the parameters of `profile`.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            provider: profile.provider.clone(),
            model: profile.model.clone(),
            api_key: profile.api_key.clone(),
            base_url: profile.base_url.clone(),
            settings: profile.settings.as_ref().and_then(|s| s.as_object().cloned()),
            ..Self::new(STUB_REPLY)
        }
    }

    /// Wait `delay` before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail every completion with a request error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// (instructions, history length) of every completion call so far.
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ChatModel for StubChatModel {
    fn provider_name(&self) -> &str {
        &self.provider
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn settings(&self) -> Option<&Map<String, Value>> {
        self.settings.as_ref()
    }

    async fn complete(
        &self,
        instructions: &str,
        history: &[Message],
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .push((instructions.to_owned(), history.len()));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(ProviderError::Request(STUB_FAILURE.to_owned()));
        }
        Ok(self.reply.clone())
    }
}

/// Factory that validates like a real provider and returns a [`StubChatModel`].
pub fn stub_factory(profile: &Profile) -> Result<ModelHandle, ProviderError> {
    if profile.api_key.is_empty() {
        return Err(ProviderError::InvalidCredential("API key is required".to_owned()));
    }
    if profile.model.is_empty() {
        return Err(ProviderError::InvalidModelName("Model name is required".to_owned()));
    }
    Ok(Box::new(StubChatModel::from_profile(profile)))
}

/// Factory that always fails.
pub fn failing_factory(_profile: &Profile) -> Result<ModelHandle, ProviderError> {
    Err(ProviderError::Other(STUB_FAILURE.to_owned()))
}

/// In-memory log sink for asserting on emitted log lines.
///
/// Install with `tracing::subscriber::with_default(capture.subscriber(), ..)`.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain-text subscriber writing every level into this capture.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .without_time()
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Captured lines at `level` (e.g. "ERROR", "DEBUG").
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.trim_start().starts_with(level))
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
