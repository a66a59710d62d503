// quinta_server/src/web/handlers/finance_handlers.rs

use actix_web::{web, HttpResponse};
use quinta::models::{Permission, Transaction};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::ActingUser;

const DEFAULT_RECENT: usize = 50;

#[derive(Deserialize, Debug)]
pub struct TransactionsQuery {
  pub limit: Option<usize>,
}

#[instrument(name = "handler::finance_summary", skip(app_state), fields(user_id = acting.user_id))]
pub async fn finance_summary_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Finance)?;
  let storefront = app_state.storefront.read();
  let ledger = &storefront.state().ledger;
  Ok(HttpResponse::Ok().json(json!({
      "summary": ledger.summary(),
      "byCategory": ledger.by_category()
  })))
}

#[instrument(name = "handler::list_transactions", skip(app_state, query), fields(user_id = acting.user_id))]
pub async fn list_transactions_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  query: web::Query<TransactionsQuery>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Finance)?;
  let storefront = app_state.storefront.read();
  let recent: Vec<&Transaction> = storefront
    .state()
    .ledger
    .recent(query.limit.unwrap_or(DEFAULT_RECENT))
    .collect();
  Ok(HttpResponse::Ok().json(json!({ "transactions": recent })))
}

#[instrument(name = "handler::dashboard", skip(app_state), fields(user_id = acting.user_id))]
pub async fn dashboard_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Dashboard)?;
  let dashboard = app_state.storefront.read().dashboard();
  Ok(HttpResponse::Ok().json(json!({ "dashboard": dashboard })))
}
