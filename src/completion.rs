//! Language-model completion clients.
//! The generator only sees the [`CompletionModel`] trait; the concrete HTTP
//! clients below translate provider responses into the shapes understood by
//! [`crate::extract`].

use crate::config::ProjectRecord;
use crate::error::{Error, Result};
use log::debug;
use serde_json::json;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4";

const TEMPERATURE: f64 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 4096;

/// Opaque text-generation call.
pub trait CompletionModel {
    /// Sends `prompt` and returns the provider's message as JSON. The content
    /// is best effort; an unusable shape simply extracts to an empty string.
    fn invoke(&self, prompt: &str) -> Result<serde_json::Value>;
}

/// Google Gemini `generateContent` client.
pub struct GeminiModel {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiModel {
    pub fn new<S: Into<String>>(model: S, api_key: S) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: GEMINI_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl CompletionModel for GeminiModel {
    fn invoke(&self, prompt: &str) -> Result<serde_json::Value> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": TEMPERATURE,
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
                "topK": 40,
                "topP": 0.9,
            },
        });

        debug!("Requesting completion from Gemini model '{}'", self.model);
        let response: serde_json::Value = self
            .client
            .post(url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        // candidates[0].content is `{"role": .., "parts": [..]}`
        Ok(json!({ "content": response["candidates"][0]["content"] }))
    }
}

/// OpenAI-compatible chat completions client.
pub struct OpenAiModel {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenAiModel {
    pub fn new<S: Into<String>>(model: S, api_key: S) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: OPENAI_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl CompletionModel for OpenAiModel {
    fn invoke(&self, prompt: &str) -> Result<serde_json::Value> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_OUTPUT_TOKENS,
        });

        debug!("Requesting completion from OpenAI model '{}'", self.model);
        let response: serde_json::Value = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        Ok(response["choices"][0]["message"].clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAi,
}

impl Provider {
    /// `openai` and `gpt*` model names select OpenAI, everything else Gemini.
    pub fn from_model_name(model_name: &str) -> Self {
        let lowered = model_name.to_lowercase();
        if lowered == "openai" || lowered.starts_with("gpt") {
            Provider::OpenAi
        } else {
            Provider::Gemini
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => DEFAULT_GEMINI_MODEL,
            Provider::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }

    fn api_key_env(&self) -> &'static str {
        match self {
            Provider::Gemini => "GOOGLE_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
        }
    }

    fn base_url_env(&self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI_BASE_URL",
            Provider::OpenAi => "OPENAI_BASE_URL",
        }
    }

    fn selector(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }
}

/// Provider and concrete model id for a project.
pub fn model_id(project: &ProjectRecord) -> (Provider, String) {
    let provider = Provider::from_model_name(&project.model_name);
    let model = match &project.model {
        Some(model) if !model.is_empty() => model.clone(),
        _ if project.model_name.is_empty()
            || project.model_name.eq_ignore_ascii_case(provider.selector()) =>
        {
            provider.default_model().to_string()
        }
        _ => project.model_name.clone(),
    };
    (provider, model)
}

/// Builds the completion client configured for `project`.
///
/// `GEMINI_BASE_URL` / `OPENAI_BASE_URL` override the provider endpoint.
///
/// # Errors
/// * `Error::ConfigError` if neither the project nor the environment
///   provides an API key
pub fn model_from_project(project: &ProjectRecord) -> Result<Box<dyn CompletionModel>> {
    let (provider, model) = model_id(project);
    let api_key = if project.api_key.is_empty() {
        std::env::var(provider.api_key_env()).unwrap_or_default()
    } else {
        project.api_key.clone()
    };

    if api_key.is_empty() {
        return Err(Error::ConfigError(format!(
            "project '{}' has no API key; run 'testgen config' or set ${}",
            project.name,
            provider.api_key_env()
        )));
    }

    let base_url = std::env::var(provider.base_url_env()).ok().filter(|url| !url.is_empty());

    debug!("Using {:?} model '{}' for project '{}'", provider, model, project.name);
    Ok(match (provider, base_url) {
        (Provider::Gemini, Some(url)) => Box::new(GeminiModel::new(model, api_key).with_base_url(url)),
        (Provider::Gemini, None) => Box::new(GeminiModel::new(model, api_key)),
        (Provider::OpenAi, Some(url)) => Box::new(OpenAiModel::new(model, api_key).with_base_url(url)),
        (Provider::OpenAi, None) => Box::new(OpenAiModel::new(model, api_key)),
    })
}
