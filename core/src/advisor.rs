// quinta/src/advisor.rs

//! Advisory chat: free-text questions answered by a generative text service
//! with the in-stock catalog as context.

use crate::error::{QuintaError, QuintaResult};
use crate::models::Product;
use crate::money::format_kz;
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const TEMPERATURE: f32 = 0.7;

/// Shown when the service answered with no text.
pub const EMPTY_ANSWER_FALLBACK: &str =
  "Desculpe, tive um problema ao processar sua consulta. Como posso ajudar com sua criação hoje?";
/// Shown when the service could not be reached or returned an error.
pub const CONNECTION_FALLBACK: &str =
  "Estou com uma breve instabilidade na conexão. Por favor, tente novamente para que eu possa te ajudar com sua produção.";

#[async_trait]
pub trait Advisor: Send + Sync {
  /// Answers `message` given the current catalog. An empty string means the
  /// service had nothing to say.
  async fn advise(&self, message: &str, products: &[Product]) -> QuintaResult<String>;
}

/// Never fails: empty answers and errors become the fixed apology messages.
#[instrument(name = "advisor::advise_or_fallback", skip(advisor, message, products), fields(message_len = message.len()))]
pub async fn advise_or_fallback(advisor: &dyn Advisor, message: &str, products: &[Product]) -> String {
  match advisor.advise(message, products).await {
    Ok(answer) if answer.trim().is_empty() => EMPTY_ANSWER_FALLBACK.to_string(),
    Ok(answer) => answer,
    Err(e) => {
      warn!(error = %e, "Advisor request failed, answering with fallback.");
      CONNECTION_FALLBACK.to_string()
    }
  }
}

/// Instruction sent with every request. Lists only products with stock.
pub fn system_instruction(products: &[Product]) -> String {
  let listing = products
    .iter()
    .filter(|p| p.in_stock())
    .map(|p| {
      format!(
        "- {} ({}): {} [Categoria: {}]",
        p.name,
        format_kz(p.price_cents),
        p.description,
        p.category
      )
    })
    .collect::<Vec<_>>()
    .join("\n");

  format!(
    "Você é um especialista em avicultura da Quinta dos Ovos.\n\
     Sua missão é ajudar criadores, de pequenos amadores a grandes produtores, a encontrar as melhores soluções para a sua produção.\n\n\
     Produtos disponíveis em estoque:\n{}\n\n\
     Diretrizes:\n\
     1. Responda em Português com tom profissional e amigável.\n\
     2. Se o cliente perguntar sobre incubação, recomende chocadeiras e termômetros.\n\
     3. Para produtores de ovos, foque em Rações de Postura e Ninhos.\n\
     4. Dê dicas de manejo (ex: temperatura ideal para pintinhos) integrando nossos produtos.\n\
     5. Recomende APENAS o que está na lista acima. Se não tivermos algo, sugira a alternativa mais próxima ou diga que não temos no momento.\n\
     6. Use Markdown para facilitar a leitura.",
    listing
  )
}

#[derive(Debug, Clone)]
pub struct AdvisorSettings {
  pub api_key: String,
  pub model: String,
  pub endpoint: String,
  pub timeout: Duration,
}

impl AdvisorSettings {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key: api_key.into(),
      model: DEFAULT_MODEL.to_string(),
      endpoint: DEFAULT_ENDPOINT.to_string(),
      timeout: Duration::from_secs(15),
    }
  }
}

/// Client for a Gemini-compatible `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GenerativeAdvisor {
  client: reqwest::Client,
  settings: AdvisorSettings,
}

impl GenerativeAdvisor {
  pub fn new(settings: AdvisorSettings) -> QuintaResult<Self> {
    let client = reqwest::Client::builder()
      .timeout(settings.timeout)
      .build()
      .map_err(|e| QuintaError::Advisor { source: e.into() })?;
    Ok(Self { client, settings })
  }

  fn url(&self) -> String {
    format!(
      "{}/models/{}:generateContent",
      self.settings.endpoint.trim_end_matches('/'),
      self.settings.model
    )
  }
}

pub(crate) fn request_body(message: &str, products: &[Product]) -> Value {
  json!({
    "systemInstruction": { "parts": [{ "text": system_instruction(products) }] },
    "contents": [{ "role": "user", "parts": [{ "text": message }] }],
    "generationConfig": { "temperature": TEMPERATURE },
  })
}

/// Concatenates the text parts of the first candidate. Missing pieces give
/// an empty string.
pub(crate) fn answer_text(response: &Value) -> String {
  response["candidates"][0]["content"]["parts"]
    .as_array()
    .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect::<String>())
    .unwrap_or_default()
}

#[async_trait]
impl Advisor for GenerativeAdvisor {
  #[instrument(name = "GenerativeAdvisor::advise", skip(self, message, products), fields(model = %self.settings.model), err(Display))]
  async fn advise(&self, message: &str, products: &[Product]) -> QuintaResult<String> {
    let response = self
      .client
      .post(self.url())
      .header("x-goog-api-key", &self.settings.api_key)
      .json(&request_body(message, products))
      .send()
      .await
      .context("sending generateContent request")
      .and_then(|r| r.error_for_status().context("generateContent returned an error status"))
      .map_err(|source| QuintaError::Advisor { source })?;

    let body: Value = response
      .json()
      .await
      .context("decoding generateContent response")
      .map_err(|source| QuintaError::Advisor { source })?;
    let answer = answer_text(&body);
    debug!(answer_len = answer.len(), "Advisor answered.");
    Ok(answer)
  }
}

/// Used when no API key is configured. Every request fails, so callers going
/// through `advise_or_fallback` see the connection apology.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAdvisor;

#[async_trait]
impl Advisor for OfflineAdvisor {
  async fn advise(&self, _message: &str, _products: &[Product]) -> QuintaResult<String> {
    Err(QuintaError::Advisor {
      source: anyhow!("no advisor API key configured"),
    })
  }
}
