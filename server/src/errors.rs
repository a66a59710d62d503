// quinta_server/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use quinta::QuintaError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Authentication Failed: {0}")]
  Auth(String),

  #[error("Forbidden: {0}")]
  Forbidden(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  /// The operator did not confirm a destructive request.
  #[error("Not confirmed: {0}")]
  Declined(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Storefront Error: {source}")]
  Storefront {
    #[from] // Allows conversion from quinta::QuintaError
    source: QuintaError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

// Handlers and startup code may use `?` on anyhow::Result
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<QuintaError>() {
      Ok(source) => AppError::Storefront { source },
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::Auth(m) => HttpResponse::Unauthorized().json(json!({"error": m})),
      AppError::Forbidden(m) => HttpResponse::Forbidden().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Declined(m) => HttpResponse::Conflict().json(json!({"error": "Confirmation required", "detail": m})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Storefront { source } => storefront_error_response(source),
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

fn storefront_error_response(source: &QuintaError) -> HttpResponse {
  let message = source.to_string();
  match source {
    QuintaError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
    QuintaError::NotFound { .. } => HttpResponse::NotFound().json(json!({"error": message})),
    QuintaError::OutOfStock { product_id, .. } => {
      HttpResponse::Conflict().json(json!({"error": message, "productId": product_id}))
    }
    QuintaError::InsufficientStock {
      product_id,
      requested,
      available,
      ..
    } => HttpResponse::Conflict().json(json!({
        "error": message,
        "productId": product_id,
        "requested": requested,
        "available": available
    })),
    QuintaError::AlreadyPaid { .. } => HttpResponse::Conflict().json(json!({"error": message})),
    QuintaError::SelfDeletion { .. } => HttpResponse::Forbidden().json(json!({"error": message})),
    QuintaError::Storage { .. }
    | QuintaError::Serialization(_)
    | QuintaError::PasswordHash(_)
    | QuintaError::Advisor { .. } => {
      tracing::error!(storefront_error_source = ?source, "Storefront failure details");
      HttpResponse::InternalServerError().json(json!({"error": "Storefront operation failed", "detail": message}))
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
