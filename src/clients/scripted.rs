//! Deterministic completion client for local runs and tests.
//!
//! Responses are chosen by the first rule whose needle occurs in the prompt;
//! prompts that match no rule get the default response.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::clients::traits::CompletionClient;
use crate::error::ProviderError;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug)]
pub struct ScriptedClient {
    rules: Vec<(String, Result<String, ProviderError>)>,
    default: Result<String, ProviderError>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedClient {
    /// Every call succeeds with `text`
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            default: Ok(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `err`
    pub fn failing(err: ProviderError) -> Self {
        Self {
            rules: Vec::new(),
            default: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a rule answering prompts that contain `needle`
    pub fn on(
        mut self,
        needle: impl Into<String>,
        response: Result<String, ProviderError>,
    ) -> Self {
        self.rules.push((needle.into(), response));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedCall {
                prompt: prompt.to_string(),
                max_tokens,
                temperature,
            });

        self.rules
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| self.default.clone())
    }
}
