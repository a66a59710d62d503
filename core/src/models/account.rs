// quinta/src/models/account.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Receivable (customer) or payable (supplier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountKind {
  Cliente,
  Fornecedor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
  #[default]
  Limpo,
  Devedor,
  Credor,
}

impl AccountStatus {
  /// Positive balance: the entity owes the shop. Negative: the shop owes the entity.
  pub fn for_balance(balance_cents: i64) -> Self {
    match balance_cents.signum() {
      1 => AccountStatus::Devedor,
      -1 => AccountStatus::Credor,
      _ => AccountStatus::Limpo,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAccount {
  pub id: u64,
  pub entity_name: String,
  #[serde(rename = "type")]
  pub kind: AccountKind,
  pub balance_cents: i64,
  #[serde(default)]
  pub status: AccountStatus,
  pub last_activity: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraft {
  pub entity_name: String,
  #[serde(rename = "type")]
  pub kind: AccountKind,
  #[serde(default)]
  pub opening_balance_cents: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountPatch {
  pub entity_name: Option<String>,
  #[serde(rename = "type")]
  pub kind: Option<AccountKind>,
}
