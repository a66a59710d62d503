// quinta_server/src/web/handlers/session_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Opens a cart session. Clients send the returned id as `X-Session-ID`.
#[instrument(name = "handler::create_session", skip(app_state))]
pub async fn create_session_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let (session_id, created_at) = app_state.sessions.create();
  Ok(HttpResponse::Created().json(json!({
      "message": "Session opened.",
      "sessionId": session_id,
      "createdAt": created_at
  })))
}

/// Ends a cart session and discards its carts.
#[instrument(name = "handler::close_session", skip(app_state, path))]
pub async fn close_session_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let session_id = path.into_inner();
  if app_state.sessions.close(session_id) {
    Ok(HttpResponse::Ok().json(json!({ "message": "Session closed.", "sessionId": session_id })))
  } else {
    Err(AppError::NotFound(format!("Session {} not found.", session_id)))
  }
}
