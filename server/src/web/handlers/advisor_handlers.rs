// quinta_server/src/web/handlers/advisor_handlers.rs

use actix_web::{web, HttpResponse};
use quinta::advise_or_fallback;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct AdvisorPayload {
  pub message: String,
}

#[instrument(name = "handler::advisor", skip(app_state, payload), fields(message_len = payload.message.len()))]
pub async fn advisor_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<AdvisorPayload>,
) -> Result<HttpResponse, AppError> {
  let message = payload.message.trim();
  if message.is_empty() {
    return Err(AppError::Validation("Message must not be empty.".to_string()));
  }
  // Snapshot so no lock is held while the request is in flight.
  let products = app_state.storefront.read().state().catalog.products().to_vec();
  let reply = advise_or_fallback(app_state.advisor.as_ref(), message, &products).await;
  Ok(HttpResponse::Ok().json(json!({ "reply": reply })))
}
