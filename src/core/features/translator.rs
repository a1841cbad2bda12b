//! Translator feature
//!
//! The remote translation collaborator. Every transport, status and payload
//! problem is folded into [`TranslationResult::Failure`] here so the popup
//! controller never sees raw responses.

use crate::config::TranslatorConfig;
use crate::shared::error::{AppError, AppResult};
use crate::shared::types::{TranslationRequest, TranslationResult};
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> TranslationResult;
}

/// Failures of the HTTP translator. `Display` is the text shown in the popup.
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("No translation text received")]
    Empty,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse translation response: {0}")]
    Parse(String),
}

/// Uses the unofficial Google Translate endpoint (`client=gtx`, free tier).
pub struct GoogleTranslator {
    http: reqwest::Client,
    config: TranslatorConfig,
}

impl GoogleTranslator {
    /// Fails only when the HTTP client cannot be built (TLS backend setup).
    pub fn new(config: TranslatorConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent("Mozilla/5.0")
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build translation client: {}", e)))?;
        Ok(Self { http, config })
    }

    fn request_url(&self, request: &TranslationRequest) -> String {
        format!(
            "{}?client=gtx&sl=auto&tl={}&dt=t&dj=1&q={}",
            self.config.endpoint,
            urlencoding::encode(&request.target_language),
            urlencoding::encode(&request.text)
        )
    }

    async fn fetch(&self, request: &TranslationRequest) -> Result<TranslationResult, TranslateError> {
        let url = self.request_url(request);
        debug!("Translation request URL: {}", url);

        let response = self.http.get(&url).send().await?;
        debug!("Translation response status: {}", response.status());

        if !response.status().is_success() {
            return Err(TranslateError::Status(response.status().as_u16()));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;
        let (translated_text, detected_language) = parse_response(&json)?;

        Ok(TranslationResult::Success {
            translated_text,
            detected_language,
            target_language: request.target_language.clone(),
        })
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, request: &TranslationRequest) -> TranslationResult {
        let preview: String = request.text.chars().take(50).collect();
        info!("Translating to {}: {}", request.target_language, preview);

        match self.fetch(request).await {
            Ok(result) => result,
            Err(e) => {
                error!("Translation error: {}", e);
                TranslationResult::Failure { error: e.to_string() }
            }
        }
    }
}

/// Extract `(translated text, detected language)` from either response form:
/// the `dj=1` object (`sentences[].trans`, `src`) or the nested array
/// (`[0][i][0]`, `[2]`).
pub fn parse_response(json: &Value) -> Result<(String, String), TranslateError> {
    let mut translated = String::new();
    let mut detected: Option<&str> = None;

    if let Some(sentences) = json.get("sentences").and_then(|v| v.as_array()) {
        for sentence in sentences {
            if let Some(text) = sentence.get("trans").and_then(|v| v.as_str()) {
                translated.push_str(text);
            }
        }
        detected = json.get("src").and_then(|v| v.as_str());
    } else if let Some(segments) = json.get(0).and_then(|v| v.as_array()) {
        for segment in segments {
            if let Some(text) = segment.get(0).and_then(|v| v.as_str()) {
                translated.push_str(text);
            }
        }
        detected = json.get(2).and_then(|v| v.as_str());
    } else if !json.is_object() && !json.is_array() {
        return Err(TranslateError::Parse(format!("unexpected payload: {}", json)));
    }

    if translated.is_empty() {
        return Err(TranslateError::Empty);
    }

    Ok((translated, detected.unwrap_or("unknown").to_string()))
}
