//! MyMemory translation API client.
//! Single GET per request (`/get?q=...&langpair=from|to`), no retry, no
//! client-side timeout; the layer above decides when to give up.

use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::Deserialize;
use tracing::debug;

use super::{TranslateError, TranslationBackend};

/// Fixed placeholder returned when the API answers without a usable
/// translation field.
pub const NO_TRANSLATION: &str = "(no translation)";

/// Thin reqwest wrapper over the MyMemory `/get` endpoint.
pub struct MyMemoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl MyMemoryClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TranslateError> {
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| TranslateError::Api(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    async fn fetch(&self, text: &str, from: &str, to: &str) -> Result<String, TranslateError> {
        let langpair = format!("{from}|{to}");
        let response = self
            .http
            .get(format!("{}/get", self.base_url))
            .query(&[("q", text), ("langpair", langpair.as_str())])
            .send()
            .await
            .map_err(|e| TranslateError::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Api(format!(
                "request failed with status {status}"
            )));
        }

        let body: MyMemoryResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::Api(format!("malformed response: {e}")))?;
        debug!(langpair = %langpair, "mymemory_response_parsed");
        Ok(extract_translation(body))
    }
}

impl TranslationBackend for MyMemoryClient {
    fn translate<'a>(
        &'a self,
        text: &'a str,
        from: &'a str,
        to: &'a str,
    ) -> BoxFuture<'a, Result<String, TranslateError>> {
        self.fetch(text, from, to).boxed()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: Option<String>,
}

/// Missing or empty `translatedText` maps to the placeholder; anything else,
/// whitespace-only included, passes through untouched.
fn extract_translation(body: MyMemoryResponse) -> String {
    body.response_data
        .and_then(|d| d.translated_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TRANSLATION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> MyMemoryResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_translated_text() {
        let body = parse(r#"{"responseData":{"translatedText":"привіт","match":1.0}}"#);
        assert_eq!(extract_translation(body), "привіт");
    }

    #[test]
    fn missing_response_data_yields_placeholder() {
        let body = parse(r#"{"responseStatus":403}"#);
        assert_eq!(extract_translation(body), NO_TRANSLATION);
    }

    #[test]
    fn missing_translation_field_yields_placeholder() {
        let body = parse(r#"{"responseData":{"match":0.5}}"#);
        assert_eq!(extract_translation(body), NO_TRANSLATION);
    }

    #[test]
    fn empty_translation_yields_placeholder() {
        let body = parse(r#"{"responseData":{"translatedText":""}}"#);
        assert_eq!(extract_translation(body), NO_TRANSLATION);
    }

    #[test]
    fn whitespace_translation_passes_through() {
        let body = parse(r#"{"responseData":{"translatedText":"  "}}"#);
        assert_eq!(extract_translation(body), "  ");
    }
}
