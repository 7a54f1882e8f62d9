//! Business insights from an external text-generation service.
//!
//! The client never fails from the caller's point of view: any transport, status or
//! decoding error is logged and replaced by [`FALLBACK_MESSAGE`]. There is one
//! attempt per request and no retry.

use crate::{
    config::insights::InsightsSettings,
    errors::{Error, Result},
    models::{Material, Transaction},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Shown when the service cannot be reached or answers with an error.
pub const FALLBACK_MESSAGE: &str = "Não foi possível conectar ao consultor de IA.";
/// Shown when the service answers without text.
pub const EMPTY_MESSAGE: &str = "Sem insights no momento.";

const RECENT_TRANSACTIONS: usize = 10;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the prompt sent to the model.
///
/// Materials are embedded as `{n, c, v}` (name, buy price, sell price) and the last
/// ten transactions as `{t, m, v}` (kind, material names, total).
#[must_use]
pub fn build_prompt(materials: &[Material], transactions: &[Transaction]) -> String {
    let price_list: Vec<_> = materials
        .iter()
        .map(|m| json!({ "n": m.name, "c": m.buy_price, "v": m.sell_price }))
        .collect();
    let recent: Vec<_> = transactions
        .iter()
        .skip(transactions.len().saturating_sub(RECENT_TRANSACTIONS))
        .map(|t| json!({ "t": t.kind, "m": t.material_names(), "v": t.total }))
        .collect();

    format!(
        "Analise os dados deste Ferro Velho e forneça 3 insights estratégicos curtos \
         (máximo 2 frases cada) em Português.\n\
         Materiais atuais e preços (Compra/Venda): {}\n\
         Últimas transações: {}\n\
         Foque em lucro, materiais mais rentáveis ou sugestões de ajuste de preço baseado na margem.\n\
         Retorne apenas os insights em formato de lista Markdown.",
        serde_json::Value::Array(price_list),
        serde_json::Value::Array(recent)
    )
}

/// Splits a response into display lines, dropping blanks and leading list markers
/// (`1.`, `-`, `*`).
#[must_use]
pub fn insight_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| strip_list_marker(line).to_string())
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let rest = if let Some(rest) = line.strip_prefix(['-', '*']) {
        rest
    } else {
        let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        match line[digits..].strip_prefix('.') {
            Some(rest) if digits > 0 => rest,
            _ => return line,
        }
    };

    // A marker only counts when followed by whitespace, as in Markdown
    if rest.starts_with(char::is_whitespace) {
        rest.trim_start()
    } else {
        line
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// HTTP client for the text-generation service
#[derive(Debug, Clone)]
pub struct InsightsClient {
    http: reqwest::Client,
    settings: InsightsSettings,
}

impl InsightsClient {
    /// Builds a client with a 30 second request timeout.
    ///
    /// # Errors
    /// Returns [`Error::Insights`] if the HTTP client cannot be created.
    pub fn new(settings: InsightsSettings) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, settings })
    }

    /// Settings the client was built with
    #[must_use]
    pub const fn settings(&self) -> &InsightsSettings {
        &self.settings
    }

    /// Asks the service for insights on the given data.
    ///
    /// Returns the response text, [`EMPTY_MESSAGE`] for an empty answer, or
    /// [`FALLBACK_MESSAGE`] on any failure.
    pub async fn fetch_insights(&self, materials: &[Material], transactions: &[Transaction]) -> String {
        let prompt = build_prompt(materials, transactions);
        match self.generate(&prompt).await {
            Ok(text) if text.trim().is_empty() => {
                debug!("Insights service returned no text");
                EMPTY_MESSAGE.to_string()
            }
            Ok(text) => {
                info!("Received {} bytes of insights", text.len());
                text
            }
            Err(e) => {
                warn!("Error fetching insights, using fallback: {e}");
                FALLBACK_MESSAGE.to_string()
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.settings.api_key.as_deref().ok_or_else(|| Error::Insights {
            message: "no API key configured".to_string(),
        })?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.settings.base_url, self.settings.model
        );
        debug!("Requesting insights from {url}");

        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };
        let response: GenerateResponse = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.text())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::TransactionKind;
    use crate::test_utils::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(server: &MockServer) -> InsightsSettings {
        InsightsSettings {
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
            base_url: server.uri(),
        }
    }

    fn sample_data() -> (Vec<Material>, Vec<Transaction>) {
        let materials = vec![sample_stored_material("Cobre Mel", 42.5, 48.0)];
        let transactions = vec![sample_stored_transaction(
            "t1",
            TransactionKind::Buy,
            "Fornecedor",
            "Cobre Mel",
        )];
        (materials, transactions)
    }

    #[test]
    fn test_build_prompt_embeds_data() {
        let (materials, transactions) = sample_data();
        let prompt = build_prompt(&materials, &transactions);

        assert!(prompt.contains("3 insights"));
        assert!(prompt.contains(r#""n":"Cobre Mel""#));
        assert!(prompt.contains(r#""c":42.5"#));
        assert!(prompt.contains(r#""v":48.0"#));
        assert!(prompt.contains(r#""t":"Compra""#));
        assert!(prompt.contains("lista Markdown"));
    }

    #[test]
    fn test_build_prompt_keeps_last_ten_transactions() {
        let transactions: Vec<Transaction> = (0..12)
            .map(|i| {
                sample_stored_transaction(
                    &i.to_string(),
                    TransactionKind::Sell,
                    "Cliente",
                    &format!("Material{i:02}"),
                )
            })
            .collect();
        let prompt = build_prompt(&[], &transactions);

        assert!(!prompt.contains("Material00"));
        assert!(!prompt.contains("Material01"));
        assert!(prompt.contains("Material02"));
        assert!(prompt.contains("Material11"));
    }

    #[test]
    fn test_insight_lines_strip_markers() {
        let text = "1. Cobre tem a melhor margem.\n\n- Suba o preço do ferro.\n* Compre mais PET.\n**Negrito** fica\n2.5 kg fica";
        assert_eq!(
            insight_lines(text),
            vec![
                "Cobre tem a melhor margem.",
                "Suba o preço do ferro.",
                "Compre mais PET.",
                "**Negrito** fica",
                "2.5 kg fica",
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_insights_success() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_string_contains("Ferro Velho"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "- Cobre rende mais." }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = InsightsClient::new(settings_for(&server))?;
        let (materials, transactions) = sample_data();
        let text = client.fetch_insights(&materials, &transactions).await;

        assert_eq!(text, "- Cobre rende mais.");
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_insights_empty_answer() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let client = InsightsClient::new(settings_for(&server))?;
        let (materials, transactions) = sample_data();
        assert_eq!(client.fetch_insights(&materials, &transactions).await, EMPTY_MESSAGE);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_insights_server_error_falls_back() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = InsightsClient::new(settings_for(&server))?;
        let (materials, transactions) = sample_data();
        assert_eq!(client.fetch_insights(&materials, &transactions).await, FALLBACK_MESSAGE);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_insights_without_key_falls_back() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut settings = settings_for(&server);
        settings.api_key = None;
        let client = InsightsClient::new(settings)?;
        assert_eq!(client.fetch_insights(&[], &[]).await, FALLBACK_MESSAGE);
        Ok(())
    }
}
