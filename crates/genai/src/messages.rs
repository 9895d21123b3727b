//! Wire types for `generateContent` and their conversion into
//! [`ContentPart`]s.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::api::GenAiError;

// ---------------------------------------------------------------------------
// Domain-facing part type
// ---------------------------------------------------------------------------

/// One part of a generation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    /// Descriptive text.
    Text(String),
    /// Decoded binary payload (an image for this service).
    InlineData { mime_type: String, data: Vec<u8> },
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<&'static str>,
}

impl GenerateContentRequest {
    /// A single-turn text prompt asking for both text and image output.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["TEXT", "IMAGE"],
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub data: String,
}

/// MIME type assumed when the response omits one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

impl GenerateContentResponse {
    /// Convert the first candidate into typed parts.
    ///
    /// Returns `Ok(None)` when there is no candidate, or the candidate has
    /// no content parts. Parts carrying neither text nor inline data are
    /// skipped; part order is preserved. Only the first inline-data part is
    /// decoded and kept, later ones are dropped unread.
    pub fn into_parts(self) -> Result<Option<Vec<ContentPart>>, GenAiError> {
        let Some(parts) = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
        else {
            return Ok(None);
        };

        let mut out = Vec::with_capacity(parts.len());
        let mut has_image = false;
        for part in parts {
            if let Some(inline) = part.inline_data {
                if has_image {
                    tracing::debug!("Ignoring additional inline data part");
                    continue;
                }
                has_image = true;
                let data = base64::engine::general_purpose::STANDARD
                    .decode(inline.data.as_bytes())
                    .map_err(|e| GenAiError::Decode(format!("Base64 decode error: {e}")))?;
                out.push(ContentPart::InlineData {
                    mime_type: inline
                        .mime_type
                        .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
                    data,
                });
            } else if let Some(text) = part.text {
                out.push(ContentPart::Text(text));
            }
        }
        Ok(Some(out))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn parse(json: &str) -> Result<Option<Vec<ContentPart>>, GenAiError> {
        serde_json::from_str::<GenerateContentResponse>(json)
            .unwrap()
            .into_parts()
    }

    #[test]
    fn request_serializes_camel_case() {
        let json = serde_json::to_value(GenerateContentRequest::from_prompt("hi")).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(
            json["generationConfig"]["responseModalities"],
            serde_json::json!(["TEXT", "IMAGE"])
        );
    }

    #[test]
    fn text_and_image_parts_in_order() {
        // "iVBORw==" decodes to the first four bytes of a PNG signature.
        let parts = parse(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"Pokemon Name: Zyrx"},
                {"inlineData":{"mimeType":"image/png","data":"iVBORw=="}}
            ]}}]}"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], ContentPart::Text("Pokemon Name: Zyrx".into()));
        assert_eq!(
            parts[1],
            ContentPart::InlineData {
                mime_type: "image/png".into(),
                data: vec![0x89, b'P', b'N', b'G'],
            }
        );
    }

    #[test]
    fn missing_mime_type_defaults_to_png() {
        let parts = parse(r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"AA=="}}]}}]}"#)
            .unwrap()
            .unwrap();
        assert_matches!(&parts[0], ContentPart::InlineData { mime_type, .. } if mime_type == DEFAULT_IMAGE_MIME);
    }

    #[test]
    fn no_candidates_is_none() {
        assert_matches!(parse(r#"{}"#), Ok(None));
        assert_matches!(parse(r#"{"candidates":[]}"#), Ok(None));
    }

    #[test]
    fn candidate_without_parts_is_none() {
        assert_matches!(parse(r#"{"candidates":[{"content":{}}]}"#), Ok(None));
        assert_matches!(parse(r#"{"candidates":[{}]}"#), Ok(None));
    }

    #[test]
    fn empty_parts_is_some_empty() {
        let parts = parse(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert_eq!(parts, Some(vec![]));
    }

    #[test]
    fn only_first_inline_part_is_decoded() {
        let parts = parse(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"Pokemon Name: Zyrx"},
                {"inlineData":{"mimeType":"image/png","data":"iVBORw=="}},
                {"inlineData":{"mimeType":"image/png","data":"!!!"}},
                {"text":"trailing"}
            ]}}]}"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            parts,
            vec![
                ContentPart::Text("Pokemon Name: Zyrx".into()),
                ContentPart::InlineData {
                    mime_type: "image/png".into(),
                    data: vec![0x89, b'P', b'N', b'G'],
                },
                ContentPart::Text("trailing".into()),
            ]
        );
    }

    #[test]
    fn invalid_base64_is_decode_error() {
        assert_matches!(
            parse(r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"!!!"}}]}}]}"#),
            Err(GenAiError::Decode(_))
        );
    }
}
