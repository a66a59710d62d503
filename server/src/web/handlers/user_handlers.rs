// quinta_server/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use quinta::models::{Permission, UserDraft, UserPatch, UserProfile};
use quinta::Removal;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::extractors::{ActingUser, ConfirmQuery};

#[instrument(name = "handler::list_users", skip(app_state), fields(user_id = acting.user_id))]
pub async fn list_users_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Rh)?;
  let users: Vec<UserProfile> = app_state
    .storefront
    .read()
    .state()
    .users
    .users()
    .iter()
    .map(|u| u.profile())
    .collect();
  Ok(HttpResponse::Ok().json(json!({ "users": users })))
}

#[instrument(name = "handler::create_user", skip(app_state, payload), fields(user_id = acting.user_id, username = %payload.username))]
pub async fn create_user_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  payload: web::Json<UserDraft>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Rh)?;
  let user = app_state.storefront.write().create_user(payload.into_inner())?;
  info!(new_user_id = user.id, "System user created.");
  Ok(HttpResponse::Created().json(json!({ "message": "User created.", "user": user.profile() })))
}

#[instrument(name = "handler::update_user", skip(app_state, path, payload), fields(user_id = acting.user_id))]
pub async fn update_user_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<u64>,
  payload: web::Json<UserPatch>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Rh)?;
  let user = app_state
    .storefront
    .write()
    .update_user(path.into_inner(), payload.into_inner())?;
  Ok(HttpResponse::Ok().json(json!({ "message": "User updated.", "user": user.profile() })))
}

#[instrument(name = "handler::delete_user", skip(app_state, path, query), fields(user_id = acting.user_id))]
pub async fn delete_user_handler(
  app_state: web::Data<AppState>,
  acting: ActingUser,
  path: web::Path<u64>,
  query: web::Query<ConfirmQuery>,
) -> Result<HttpResponse, AppError> {
  acting.require(&app_state, Permission::Rh)?;
  let target = path.into_inner();
  let outcome = app_state
    .storefront
    .write()
    .delete_user(target, acting.user_id, &query.confirm)?;
  match outcome {
    Removal::Removed(user) => Ok(HttpResponse::Ok().json(json!({ "message": "User deleted.", "user": user.profile() }))),
    Removal::Missing => Err(AppError::NotFound(format!("User {} not found.", target))),
    Removal::Declined => Err(AppError::Declined(format!("Deleting user {} requires ?confirm=true.", target))),
  }
}
