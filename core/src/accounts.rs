// quinta/src/accounts.rs

//! Customer receivables and supplier payables.

use crate::confirm::{Confirm, Removal};
use crate::error::{QuintaError, QuintaResult};
use crate::ids::mint_id;
use crate::models::{AccountDraft, AccountKind, AccountPatch, AccountStatus, CurrentAccount};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsSummary {
  /// Sum of positive balances on customer accounts.
  pub receivable_cents: i64,
  /// Sum of supplier balances the shop owes, as a positive number.
  pub payable_cents: i64,
  pub open_accounts: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountBook {
  accounts: Vec<CurrentAccount>,
}

impl AccountBook {
  pub fn new(accounts: Vec<CurrentAccount>) -> Self {
    Self { accounts }
  }

  pub fn accounts(&self) -> &[CurrentAccount] {
    &self.accounts
  }

  pub fn len(&self) -> usize {
    self.accounts.len()
  }

  pub fn is_empty(&self) -> bool {
    self.accounts.is_empty()
  }

  pub fn get(&self, id: u64) -> Option<&CurrentAccount> {
    self.accounts.iter().find(|a| a.id == id)
  }

  fn get_mut(&mut self, id: u64) -> QuintaResult<&mut CurrentAccount> {
    self
      .accounts
      .iter_mut()
      .find(|a| a.id == id)
      .ok_or_else(|| QuintaError::not_found("Account", id))
  }

  pub fn open(&mut self, draft: AccountDraft, now: DateTime<Utc>) -> QuintaResult<&CurrentAccount> {
    if draft.entity_name.trim().is_empty() {
      return Err(QuintaError::Validation("Entity name cannot be empty".to_string()));
    }
    let account = CurrentAccount {
      id: mint_id(self.accounts.iter().map(|a| a.id), now),
      entity_name: draft.entity_name,
      kind: draft.kind,
      balance_cents: draft.opening_balance_cents,
      status: AccountStatus::for_balance(draft.opening_balance_cents),
      last_activity: now.date_naive(),
    };
    debug!(account_id = account.id, kind = ?account.kind, "Current account opened.");
    self.accounts.push(account);
    Ok(&self.accounts[self.accounts.len() - 1])
  }

  pub fn update(&mut self, id: u64, patch: AccountPatch) -> QuintaResult<&CurrentAccount> {
    if patch.entity_name.as_deref().is_some_and(|n| n.trim().is_empty()) {
      return Err(QuintaError::Validation("Entity name cannot be empty".to_string()));
    }
    let account = self.get_mut(id)?;
    if let Some(name) = patch.entity_name {
      account.entity_name = name;
    }
    if let Some(kind) = patch.kind {
      account.kind = kind;
    }
    Ok(account)
  }

  /// Moves the balance by `delta_cents` and re-derives the status.
  pub fn post_movement(&mut self, id: u64, delta_cents: i64, today: NaiveDate) -> QuintaResult<&CurrentAccount> {
    let account = self.get_mut(id)?;
    account.balance_cents = account
      .balance_cents
      .checked_add(delta_cents)
      .ok_or_else(|| QuintaError::Validation("Balance overflow".to_string()))?;
    account.status = AccountStatus::for_balance(account.balance_cents);
    account.last_activity = today;
    Ok(account)
  }

  pub fn close(&mut self, id: u64, confirm: &dyn Confirm) -> Removal<CurrentAccount> {
    let Some(position) = self.accounts.iter().position(|a| a.id == id) else {
      return Removal::Missing;
    };
    if !confirm.confirm(&format!("Encerrar a conta de {}?", self.accounts[position].entity_name)) {
      return Removal::Declined;
    }
    Removal::Removed(self.accounts.remove(position))
  }

  pub fn summary(&self) -> AccountsSummary {
    let mut summary = AccountsSummary::default();
    for account in &self.accounts {
      if account.status != AccountStatus::Limpo {
        summary.open_accounts += 1;
      }
      match account.kind {
        AccountKind::Cliente if account.balance_cents > 0 => summary.receivable_cents += account.balance_cents,
        AccountKind::Fornecedor if account.balance_cents < 0 => summary.payable_cents -= account.balance_cents,
        _ => {}
      }
    }
    summary
  }
}
