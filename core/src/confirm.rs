// quinta/src/confirm.rs

//! Confirmation gate for destructive operations.

/// Asked once before a destructive mutation. Answering `false` leaves every
/// collection untouched.
pub trait Confirm {
  fn confirm(&self, prompt: &str) -> bool;
}

impl Confirm for bool {
  fn confirm(&self, _prompt: &str) -> bool {
    *self
  }
}

/// Outcome of a confirmation-gated removal.
#[derive(Debug, Clone, PartialEq)]
pub enum Removal<T> {
  Removed(T),
  /// Nothing with that key exists. Not an error.
  Missing,
  /// The operator declined.
  Declined,
}

impl<T> Removal<T> {
  pub fn is_removed(&self) -> bool {
    matches!(self, Removal::Removed(_))
  }

  pub fn removed(self) -> Option<T> {
    match self {
      Removal::Removed(value) => Some(value),
      _ => None,
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Removal<U> {
    match self {
      Removal::Removed(value) => Removal::Removed(f(value)),
      Removal::Missing => Removal::Missing,
      Removal::Declined => Removal::Declined,
    }
  }
}
