//! Document extraction collaborator.
//!
//! Sends a base64-encoded PDF to an OpenAI-compatible `/v1/responses`
//! endpoint and parses the model's answer into the ordinary
//! [`PropertyInput`] snapshot type. The output is untrusted client input: it
//! takes no shortcut past validation or reconciliation, the caller submits it
//! through the same create/update path as any hand-written payload.

use crate::error::ApiPropertiesError;
use crate::models::requests::PropertyInput;
use base64::prelude::{Engine, BASE64_STANDARD};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const EXTRACTION_MODEL: &str = "gpt-4o";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const EXTRACTION_PROMPT: &str = r#"
Extract comprehensive property information from the provided German Real Estate Document (Teilungserklaerung).

CRITICAL INSTRUCTIONS FOR NUMERIC VALUES:
- The source document uses German formatting:
  - Commas (,) are decimal separators (e.g., "75,50" means 75.5).
  - Dots (.) are thousand separators (e.g., "1.200" means 1200).
- CONVERT ALL NUMERIC VALUES TO STANDARD JSON NUMBERS (dot as decimal separator, no thousand separators).

FIELD DEFINITIONS:
- Property: name, managementType (WEG or MV).
- Building:
  - name: The name of the building, extracted from the field "Gebaeudezugehoerigkeit" if present.
  - street, houseNumber, postcode, additionalInfo.
- Unit:
  - unitNumber: The unique ID or number of the unit.
  - type: ONE OF [Apartment, Office, Garden, Parking].
  - floor: The floor level (e.g., "1. OG", "Ground").
  - entrance: The identifier if present.
  - sizeSqM: Area in square meters (Number).
  - coOwnershipShare: The share value (Number).
  - constructionYear: Year of construction (Integer).
  - rooms: Number of rooms (Number, can be X.5).

Return ONLY a JSON object of this shape, with no surrounding prose:
{
  "name": "...",
  "managementType": "...",
  "buildings": [
    {
      "name": "...",
      "street": "...",
      "houseNumber": "...",
      "postcode": "...",
      "additionalInfo": "...",
      "units": [
        {
          "unitNumber": "...",
          "type": "...",
          "floor": "...",
          "entrance": "...",
          "sizeSqM": 0,
          "coOwnershipShare": 0,
          "constructionYear": 0,
          "rooms": 0
        }
      ]
    }
  ]
}
"#;

/// Client for the document extraction endpoint.
pub struct ExtractionService {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl ExtractionService {
    /// Create an extraction service. With no API key the service stays
    /// constructible but answers every request with
    /// [`ApiPropertiesError::ExtractionUnavailable`].
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed; this runs once at
    /// startup.
    #[must_use]
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build extraction HTTP client");
        Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    /// Whether an API key is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Extract a property snapshot from raw PDF bytes.
    ///
    /// # Errors
    ///
    /// - [`ApiPropertiesError::ExtractionUnavailable`] when no API key is set.
    /// - [`ApiPropertiesError::Extraction`] when the endpoint fails or the
    ///   answer is not a parseable snapshot.
    pub async fn extract_property(&self, pdf: &[u8]) -> Result<PropertyInput, ApiPropertiesError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ApiPropertiesError::ExtractionUnavailable)?;

        let encoded = BASE64_STANDARD.encode(pdf);
        let body = serde_json::json!({
            "model": EXTRACTION_MODEL,
            "input": [{
                "role": "user",
                "content": [
                    {
                        "type": "input_file",
                        "filename": "document.pdf",
                        "file_data": format!("data:application/pdf;base64,{encoded}"),
                    },
                    {
                        "type": "input_text",
                        "text": EXTRACTION_PROMPT,
                    },
                ],
            }],
        });

        tracing::info!(bytes = pdf.len(), "Submitting document for extraction");

        let response = self
            .client
            .post(format!("{}/v1/responses", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiPropertiesError::Extraction(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiPropertiesError::Extraction(format!(
                "extraction endpoint returned {status}"
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiPropertiesError::Extraction(format!("unreadable response: {e}")))?;

        let text = output_text(&payload).ok_or_else(|| {
            ApiPropertiesError::Extraction("response carried no text output".to_string())
        })?;

        parse_snapshot(&text)
    }
}

/// Collect the text parts of a `/v1/responses` payload.
fn output_text(payload: &serde_json::Value) -> Option<String> {
    let outputs = payload.get("output")?.as_array()?;
    let mut text = String::new();
    for output in outputs {
        let Some(contents) = output.get("content").and_then(|c| c.as_array()) else {
            continue;
        };
        for content in contents {
            if content.get("type").and_then(|t| t.as_str()) == Some("output_text") {
                if let Some(part) = content.get("text").and_then(|t| t.as_str()) {
                    text.push_str(part);
                }
            }
        }
    }
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse the model's answer into a snapshot, tolerating a Markdown code fence
/// around the JSON.
fn parse_snapshot(text: &str) -> Result<PropertyInput, ApiPropertiesError> {
    let trimmed = text.trim();
    let stripped = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(stripped.trim())
        .map_err(|e| ApiPropertiesError::Extraction(format!("unparseable snapshot: {e}")))
}
