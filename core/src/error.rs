// quinta/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuintaError {
  /// A rule on the input was broken. Nothing was mutated.
  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Product '{name}' (id {product_id}) is out of stock")]
  OutOfStock { product_id: u64, name: String },

  #[error("Insufficient stock for '{name}' (id {product_id}): requested {requested}, available {available}")]
  InsufficientStock {
    product_id: u64,
    name: String,
    requested: i64,
    available: i64,
  },

  #[error("{entity} not found: {id}")]
  NotFound { entity: &'static str, id: String },

  #[error("Salary for employee {employee_id} was already paid in the current cycle")]
  AlreadyPaid { employee_id: u64 },

  #[error("User {user_id} cannot delete their own account")]
  SelfDeletion { user_id: u64 },

  #[error("Storage failure for key '{key}'. Source: {source}")]
  Storage {
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Password hashing failed: {0}")]
  PasswordHash(String),

  #[error("Advisor request failed. Source: {source}")]
  Advisor {
    #[source]
    source: AnyhowError,
  },
}

impl QuintaError {
  pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
    QuintaError::NotFound {
      entity,
      id: id.to_string(),
    }
  }

  pub fn storage(key: impl Into<String>, source: impl Into<AnyhowError>) -> Self {
    QuintaError::Storage {
      key: key.into(),
      source: source.into(),
    }
  }

  /// True for the rejections that leave state untouched and are meant to be
  /// shown to the operator as a notice.
  pub fn is_rejection(&self) -> bool {
    matches!(
      self,
      QuintaError::Validation(_)
        | QuintaError::OutOfStock { .. }
        | QuintaError::InsufficientStock { .. }
        | QuintaError::AlreadyPaid { .. }
        | QuintaError::SelfDeletion { .. }
    )
  }
}

pub type QuintaResult<T, E = QuintaError> = std::result::Result<T, E>;
