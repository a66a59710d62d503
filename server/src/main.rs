// quinta_server/src/main.rs

mod config;
mod errors;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::state::{AppState, Store};

use actix_web::{web as actix_data, App, HttpServer};
use quinta::{Advisor, GenerativeAdvisor, JsonFileStore, OfflineAdvisor, SharedStorefront, Storefront};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

/// Opens the file store, loads (or seeds) every collection and writes the
/// result back so a fresh data directory is complete after the first start.
fn build_app_state(app_config: Arc<AppConfig>) -> AppResult<AppState> {
  let store: Store = Box::new(JsonFileStore::open(&app_config.data_dir)?);
  let storefront = Storefront::open(store, app_config.storefront_config())?;
  storefront.persist_all()?;
  tracing::info!(
    products = storefront.state().catalog.len(),
    employees = storefront.state().roster.len(),
    transactions = storefront.state().ledger.len(),
    "Storefront state loaded."
  );

  let advisor: Arc<dyn Advisor> = match app_config.advisor_settings() {
    Some(settings) => {
      tracing::info!(model = %settings.model, "Advisor enabled.");
      Arc::new(GenerativeAdvisor::new(settings)?)
    }
    None => {
      tracing::warn!("ADVISOR_API_KEY not set; the advisor will answer with its fallback message.");
      Arc::new(OfflineAdvisor)
    }
  };

  Ok(AppState::new(SharedStorefront::new(storefront), advisor, app_config))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting Quinta dos Ovos server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let app_state = match build_app_state(app_config.clone()) {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to open the storefront.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
