// quinta/src/config.rs

//! Library-level configuration for a `Storefront`.

use crate::error::QuintaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default storage namespace. Every collection key is `<namespace>_<collection>`.
pub const DEFAULT_NAMESPACE: &str = "quintadosovos";

/// What checkout does when a line asks for more units than the catalog holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockPolicy {
  /// Validate every line first and fail the whole checkout with
  /// `InsufficientStock`. No state changes.
  #[default]
  #[serde(alias = "reject")]
  RejectOversell,
  /// Legacy behavior: decrement unconditionally, stock may go negative.
  /// Negative stock is reported through `Catalog::backordered`.
  #[serde(alias = "backorder")]
  AllowBackorder,
}

impl FromStr for StockPolicy {
  type Err = QuintaError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "reject" | "rejectoversell" | "reject_oversell" => Ok(StockPolicy::RejectOversell),
      "backorder" | "allowbackorder" | "allow_backorder" => Ok(StockPolicy::AllowBackorder),
      other => Err(QuintaError::Validation(format!(
        "Unknown stock policy '{}', expected 'reject' or 'backorder'",
        other
      ))),
    }
  }
}

impl fmt::Display for StockPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StockPolicy::RejectOversell => f.write_str("reject"),
      StockPolicy::AllowBackorder => f.write_str("backorder"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
  pub namespace: String,
  pub stock_policy: StockPolicy,
  /// When false, missing collections start empty instead of with the
  /// hardcoded default data.
  pub seed_defaults: bool,
}

impl Default for StorefrontConfig {
  fn default() -> Self {
    Self {
      namespace: DEFAULT_NAMESPACE.to_string(),
      stock_policy: StockPolicy::default(),
      seed_defaults: true,
    }
  }
}

impl StorefrontConfig {
  pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
    self.namespace = namespace.into();
    self
  }

  pub fn with_stock_policy(mut self, policy: StockPolicy) -> Self {
    self.stock_policy = policy;
    self
  }

  pub fn without_seed(mut self) -> Self {
    self.seed_defaults = false;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_policy_names() {
    assert_eq!("reject".parse::<StockPolicy>().unwrap(), StockPolicy::RejectOversell);
    assert_eq!(" Backorder ".parse::<StockPolicy>().unwrap(), StockPolicy::AllowBackorder);
    assert!("whatever".parse::<StockPolicy>().is_err());
  }

  #[test]
  fn default_config_rejects_oversell() {
    let cfg = StorefrontConfig::default();
    assert_eq!(cfg.namespace, "quintadosovos");
    assert_eq!(cfg.stock_policy, StockPolicy::RejectOversell);
    assert!(cfg.seed_defaults);
  }
}
