// quinta/src/ledger.rs

//! Append-only financial ledger.

use crate::ids::mint_id;
use crate::models::{Transaction, TransactionKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
  /// Sum of every `ENTRADA`.
  pub revenue_cents: i64,
  /// Sum of every `SAIDA`.
  pub expenses_cents: i64,
  pub cost_of_goods_cents: i64,
  /// Revenue minus cost of goods.
  pub gross_margin_cents: i64,
  /// Revenue minus expenses.
  pub net_cents: i64,
  pub transaction_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
  pub category: String,
  pub inbound_cents: i64,
  pub outbound_cents: i64,
  pub count: usize,
}

/// Entries are only ever appended. There is no edit or delete path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
  entries: Vec<Transaction>,
}

impl Ledger {
  pub fn new(entries: Vec<Transaction>) -> Self {
    Self { entries }
  }

  pub fn entries(&self) -> &[Transaction] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub(crate) fn record(
    &mut self,
    kind: TransactionKind,
    category: &str,
    description: String,
    amount_cents: i64,
    cost_cents: Option<i64>,
    now: DateTime<Utc>,
  ) -> Transaction {
    let entry = Transaction {
      id: mint_id(self.entries.iter().map(|t| t.id), now),
      date: now.date_naive(),
      description,
      amount_cents,
      kind,
      category: category.to_string(),
      cost_cents,
    };
    debug!(transaction_id = entry.id, kind = ?kind, amount_cents, "Ledger entry appended.");
    self.entries.push(entry.clone());
    entry
  }

  pub fn summary(&self) -> LedgerSummary {
    let mut summary = LedgerSummary {
      transaction_count: self.entries.len(),
      ..LedgerSummary::default()
    };
    for entry in &self.entries {
      match entry.kind {
        TransactionKind::Entrada => summary.revenue_cents += entry.amount_cents,
        TransactionKind::Saida => summary.expenses_cents += entry.amount_cents,
      }
      summary.cost_of_goods_cents += entry.cost_cents.unwrap_or(0);
    }
    summary.gross_margin_cents = summary.revenue_cents - summary.cost_of_goods_cents;
    summary.net_cents = summary.revenue_cents - summary.expenses_cents;
    summary
  }

  /// Totals per category, ordered by category label.
  pub fn by_category(&self) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, CategoryTotal> = BTreeMap::new();
    for entry in &self.entries {
      let total = totals.entry(entry.category.as_str()).or_insert_with(|| CategoryTotal {
        category: entry.category.clone(),
        inbound_cents: 0,
        outbound_cents: 0,
        count: 0,
      });
      match entry.kind {
        TransactionKind::Entrada => total.inbound_cents += entry.amount_cents,
        TransactionKind::Saida => total.outbound_cents += entry.amount_cents,
      }
      total.count += 1;
    }
    totals.into_values().collect()
  }

  /// The last `n` entries, newest first.
  pub fn recent(&self, n: usize) -> impl Iterator<Item = &Transaction> {
    self.entries.iter().rev().take(n)
  }
}
