// quinta_server/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use crate::services::sessions::DEFAULT_SESSION_TTL;
use dotenvy::dotenv;
use quinta::{AdvisorSettings, StockPolicy, StorefrontConfig, DEFAULT_NAMESPACE};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Directory holding one JSON document per collection.
  pub data_dir: PathBuf,
  pub storage_namespace: String,
  pub stock_policy: StockPolicy,

  /// No key means the advisor answers with its fallback message.
  pub advisor_api_key: Option<String>,
  pub advisor_model: String,
  pub advisor_endpoint: String,
  pub advisor_timeout: Duration,

  /// Cart sessions idle for longer than this are dropped.
  pub session_ttl: Duration,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      data_dir: PathBuf::from("./data"),
      storage_namespace: DEFAULT_NAMESPACE.to_string(),
      stock_policy: StockPolicy::default(),
      advisor_api_key: None,
      advisor_model: quinta::advisor::DEFAULT_MODEL.to_string(),
      advisor_endpoint: quinta::advisor::DEFAULT_ENDPOINT.to_string(),
      advisor_timeout: Duration::from_secs(15),
      session_ttl: DEFAULT_SESSION_TTL,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };
    let defaults = Self::default();

    let server_host = get_env("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = match get_env("SERVER_PORT") {
      Ok(raw) => raw
        .parse::<u16>()
        .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?,
      Err(_) => defaults.server_port,
    };
    let data_dir = get_env("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir);
    let storage_namespace = get_env("STORAGE_NAMESPACE").unwrap_or(defaults.storage_namespace);
    let stock_policy = match get_env("STOCK_POLICY") {
      Ok(raw) => raw
        .parse::<StockPolicy>()
        .map_err(|e| AppError::Config(format!("Invalid STOCK_POLICY: {}", e)))?,
      Err(_) => defaults.stock_policy,
    };

    let advisor_api_key = get_env("ADVISOR_API_KEY").ok().filter(|k| !k.trim().is_empty());
    let advisor_model = get_env("ADVISOR_MODEL").unwrap_or(defaults.advisor_model);
    let advisor_endpoint = get_env("ADVISOR_ENDPOINT").unwrap_or(defaults.advisor_endpoint);
    let advisor_timeout = match get_env("ADVISOR_TIMEOUT_SECS") {
      Ok(raw) => Duration::from_secs(
        raw
          .parse::<u64>()
          .map_err(|e| AppError::Config(format!("Invalid ADVISOR_TIMEOUT_SECS: {}", e)))?,
      ),
      Err(_) => defaults.advisor_timeout,
    };
    let session_ttl = match get_env("SESSION_TTL_SECS") {
      Ok(raw) => Duration::from_secs(
        raw
          .parse::<u64>()
          .map_err(|e| AppError::Config(format!("Invalid SESSION_TTL_SECS: {}", e)))?,
      ),
      Err(_) => defaults.session_ttl,
    };

    tracing::info!(
      data_dir = %data_dir.display(),
      namespace = %storage_namespace,
      stock_policy = %stock_policy,
      advisor_enabled = advisor_api_key.is_some(),
      session_ttl_secs = session_ttl.as_secs(),
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      data_dir,
      storage_namespace,
      stock_policy,
      advisor_api_key,
      advisor_model,
      advisor_endpoint,
      advisor_timeout,
      session_ttl,
    })
  }

  pub fn storefront_config(&self) -> StorefrontConfig {
    StorefrontConfig::default()
      .with_namespace(self.storage_namespace.clone())
      .with_stock_policy(self.stock_policy)
  }

  /// `None` when no API key is configured.
  pub fn advisor_settings(&self) -> Option<AdvisorSettings> {
    let key = self.advisor_api_key.as_ref()?;
    let mut settings = AdvisorSettings::new(key.clone());
    settings.model = self.advisor_model.clone();
    settings.endpoint = self.advisor_endpoint.clone();
    settings.timeout = self.advisor_timeout;
    Some(settings)
  }
}
