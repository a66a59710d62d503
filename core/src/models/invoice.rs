// quinta/src/models/invoice.rs

use super::CartLine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Receipt produced by a checkout. Held only as the "current invoice" shown
/// to the operator, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
  /// Random five digit number.
  pub id: u32,
  pub issued_at: DateTime<Utc>,
  pub items: Vec<CartLine>,
  pub total_cents: i64,
  pub total_cost_cents: i64,
}

impl Invoice {
  pub fn item_count(&self) -> u64 {
    self.items.iter().map(|l| u64::from(l.quantity)).sum()
  }

  pub fn gross_margin_cents(&self) -> i64 {
    self.total_cents - self.total_cost_cents
  }
}
