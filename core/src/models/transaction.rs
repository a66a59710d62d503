// quinta/src/models/transaction.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const SALES_CATEGORY: &str = "Vendas";
pub const PAYROLL_CATEGORY: &str = "RH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
  /// Money in.
  #[serde(rename = "ENTRADA")]
  Entrada,
  /// Money out.
  #[serde(rename = "SAIDA")]
  Saida,
}

/// One ledger entry. Written once and never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
  pub id: u64,
  pub date: NaiveDate,
  pub description: String,
  /// Always non-negative; the direction is carried by `kind`.
  pub amount_cents: i64,
  #[serde(rename = "type")]
  pub kind: TransactionKind,
  pub category: String,
  /// Cost of goods sold, for sales.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cost_cents: Option<i64>,
}

impl Transaction {
  /// Amount with the sign implied by the kind.
  pub fn signed_amount_cents(&self) -> i64 {
    match self.kind {
      TransactionKind::Entrada => self.amount_cents,
      TransactionKind::Saida => -self.amount_cents,
    }
  }
}
