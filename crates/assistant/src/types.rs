//! Suggestion type plus the request/response shapes of the
//! `generateContent` endpoint.

use serde::{Deserialize, Deserializer, Serialize};

/// Copy proposed by the assistant
///
/// Every field defaults, so a partial or empty model answer still parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentSuggestions {
    #[serde(deserialize_with = "null_as_default")]
    pub headline: String,
    #[serde(deserialize_with = "null_as_default")]
    pub about_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub product_descriptions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub source_urls: Vec<String>,
}

/// Models answer `null` for fields they have nothing for
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ContentSuggestions {
    /// Parse the JSON text of a model answer
    ///
    /// Empty or malformed text yields the empty suggestion set.
    pub fn from_model_text(text: &str) -> Self {
        let text = strip_code_fence(text.trim());
        if text.is_empty() {
            tracing::warn!("assistant returned no content");
            return Self::default();
        }
        match serde_json::from_str(text) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                tracing::warn!(error = %e, "assistant returned malformed JSON");
                Self::default()
            }
        }
    }

    /// True when nothing usable came back
    pub fn is_empty(&self) -> bool {
        self.headline.trim().is_empty()
            && self.about_text.trim().is_empty()
            && self.product_descriptions.is_empty()
            && self
                .business_name
                .as_deref()
                .is_none_or(|name| name.trim().is_empty())
    }
}

/// Models sometimes wrap JSON in a markdown fence
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub(crate) enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Tool {
    pub google_search: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct GenerateResponse {
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct Candidate {
    pub content: Option<CandidateContent>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CandidateContent {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct GroundingMetadata {
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GroundingChunk {
    pub web: Option<WebSource>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct WebSource {
    pub uri: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Web pages the first candidate was grounded on, in order, without repeats
    pub fn source_urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        let chunks = self
            .candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.as_slice())
            .unwrap_or_default();
        for uri in chunks
            .iter()
            .filter_map(|chunk| chunk.web.as_ref()?.uri.as_deref())
            .filter(|uri| !uri.is_empty())
        {
            if !urls.iter().any(|u| u == uri) {
                urls.push(uri.to_string());
            }
        }
        urls
    }
}
