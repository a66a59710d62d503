// quinta_server/src/web/extractors.rs

//! Request extractors for the headers the API relies on.

use actix_web::{FromRequest, HttpRequest};
use quinta::models::Permission;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub const SESSION_HEADER: &str = "X-Session-ID";
pub const ACTING_USER_HEADER: &str = "X-Acting-User";

/// The cart session named by `X-Session-ID`.
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

impl FromRequest for SessionId {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let parsed = req
      .headers()
      .get(SESSION_HEADER)
      .and_then(|value| value.to_str().ok())
      .and_then(|raw| Uuid::parse_str(raw).ok());
    match parsed {
      Some(id) => futures_util::future::ready(Ok(SessionId(id))),
      None => {
        warn!("SessionId extractor: Missing or invalid X-Session-ID header.");
        futures_util::future::ready(Err(AppError::Validation(
          "Missing or invalid X-Session-ID header. Open a session with POST /api/v1/sessions.".to_string(),
        )))
      }
    }
  }
}

/// The back-office user a request acts as, from `X-Acting-User`. Credentials
/// are not checked here; only the id is read.
#[derive(Debug, Clone, Copy)]
pub struct ActingUser {
  pub user_id: u64,
}

impl FromRequest for ActingUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    if let Some(header) = req.headers().get(ACTING_USER_HEADER) {
      if let Ok(raw) = header.to_str() {
        if let Ok(user_id) = raw.trim().parse::<u64>() {
          return futures_util::future::ready(Ok(ActingUser { user_id }));
        }
      }
    }
    warn!("ActingUser extractor: Missing or invalid X-Acting-User header.");
    futures_util::future::ready(Err(AppError::Auth(
      "Missing or invalid X-Acting-User header.".to_string(),
    )))
  }
}

impl ActingUser {
  /// Fails with 403 unless the user exists and may open `area`.
  pub fn require(&self, app_state: &AppState, area: Permission) -> Result<(), AppError> {
    let storefront = app_state.storefront.read();
    if storefront.state().users.has_permission(self.user_id, area) {
      Ok(())
    } else {
      warn!(user_id = self.user_id, ?area, "Permission denied.");
      Err(AppError::Forbidden(format!(
        "User {} may not access the '{:?}' area.",
        self.user_id, area
      )))
    }
  }
}

/// `?confirm=true` on destructive routes.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
  #[serde(default)]
  pub confirm: bool,
}
