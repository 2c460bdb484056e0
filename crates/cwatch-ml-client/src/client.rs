//! Gemini API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{MlError, MlResult};
use crate::types::{Content, GeminiRequest, GeminiResponse, GenerationConfig, Part};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Fixed sampling parameters for reproducible verdicts.
const TEMPERATURE: f64 = 0.3;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Stateless multimodal text generation.
#[async_trait]
pub trait Inference: Send + Sync {
    /// Generate text from an ordered sequence of parts, with no prior
    /// conversation context.
    async fn generate(&self, parts: Vec<Part>) -> MlResult<String>;
}

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for the generative language endpoint
    pub api_key: String,
    /// Base URL, overridable for tests
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Request timeout; expiry surfaces as a branch failure upstream
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Create config from environment variables.
    ///
    /// A missing API key is a configuration error, fatal before any
    /// branch starts.
    pub fn from_env() -> MlResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| MlError::MissingApiKey)?;

        Ok(Self {
            api_key,
            base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(
                std::env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            ),
        })
    }
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: Client,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(config: GeminiConfig) -> MlResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(MlError::Network)?;

        Ok(Self { config, http })
    }

    /// Create from environment variables.
    pub fn from_env() -> MlResult<Self> {
        Self::new(GeminiConfig::from_env()?)
    }
}

#[async_trait]
impl Inference for GeminiClient {
    async fn generate(&self, parts: Vec<Part>) -> MlResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let request = GeminiRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        debug!(model = %self.config.model, "Calling Gemini API");

        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MlError::Api { status, body });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(MlError::EmptyResponse)
    }
}
