//! Gemini wire format.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// One part of a multimodal request: text or inline binary data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Text(String),
    InlineData(InlineData),
}

impl Part {
    /// Create a text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an inline PNG image part from raw bytes.
    pub fn png(bytes: &[u8]) -> Self {
        Self::InlineData(InlineData {
            mime_type: "image/png".to_string(),
            data: STANDARD.encode(bytes),
        })
    }
}

/// Base64-encoded inline payload.
#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// Gemini API request.
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f64,
    #[serde(rename = "topP")]
    pub top_p: f64,
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: u32,
}

/// Gemini API response.
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_serialization_shape() {
        let text = serde_json::to_value(Part::text("hello")).unwrap();
        assert_eq!(text["text"], "hello");

        let image = serde_json::to_value(Part::png(&[1, 2, 3])).unwrap();
        assert_eq!(image["inline_data"]["mime_type"], "image/png");
        assert_eq!(image["inline_data"]["data"], "AQID");
    }

    #[test]
    fn test_generation_config_uses_camel_case() {
        let config = GenerationConfig {
            temperature: 0.3,
            top_p: 0.95,
            max_output_tokens: 8192,
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["topP"], 0.95);
        assert_eq!(value["maxOutputTokens"], 8192);
        assert_eq!(value["temperature"], 0.3);
    }
}
