// quinta_server/src/web/handlers/account_handlers.rs

use actix_web::{web, HttpResponse};
use quinta::models::{AccountDraft, AccountPatch, Permission};
use quinta::Removal;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{ActingUser, ConfirmQuery};

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MovementPayload {
  /// Positive raises what the entity owes, negative settles it.
  pub delta_cents: i64,
}

#[instrument(name = "handler::list_accounts", skip(app_state), fields(user_id = acting.user_id))]
pub async fn list_accounts_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Finance)?;
  let storefront = app_state.storefront.read();
  let book = &storefront.state().accounts;
  Ok(HttpResponse::Ok().json(json!({
      "accounts": book.accounts(),
      "summary": book.summary()
  })))
}

#[instrument(name = "handler::open_account", skip(app_state, payload), fields(user_id = acting.user_id))]
pub async fn open_account_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  payload: web::Json<AccountDraft>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Finance)?;
  let account = app_state.storefront.write().open_account(payload.into_inner())?;
  Ok(HttpResponse::Created().json(json!({ "message": "Account opened.", "account": account })))
}

#[instrument(name = "handler::update_account", skip(app_state, path, payload), fields(user_id = acting.user_id))]
pub async fn update_account_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<u64>,
  payload: web::Json<AccountPatch>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Finance)?;
  let account = app_state
    .storefront
    .write()
    .update_account(path.into_inner(), payload.into_inner())?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Account updated.", "account": account })))
}

#[instrument(name = "handler::post_movement", skip(app_state, path, payload), fields(user_id = acting.user_id, delta = payload.delta_cents))]
pub async fn post_movement_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<u64>,
  payload: web::Json<MovementPayload>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Finance)?;
  let account = app_state
    .storefront
    .write()
    .post_account_movement(path.into_inner(), payload.delta_cents)?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Movement posted.", "account": account })))
}

#[instrument(name = "handler::close_account", skip(app_state, path, query), fields(user_id = acting.user_id))]
pub async fn close_account_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<u64>,
  query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Finance)?;
  let account_id = path.into_inner();
  match app_state.storefront.write().close_account(account_id, &query.confirm)? {
    Removal::Removed(account) => Ok(HttpResponse::Ok().json(json!({ "message": "Account closed.", "account": account }))),
    Removal::Missing => Err(AppError::NotFound(format!("Account {} not found.", account_id))),
    Removal::Declined => Err(AppError::Declined(format!(
      "Closing account {} requires ?confirm=true.",
      account_id
    ))),
  }
}
