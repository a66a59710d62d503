// quinta/src/employees.rs

//! Staff records and payroll.

use crate::confirm::{Confirm, Removal};
use crate::error::{QuintaError, QuintaResult};
use crate::ids::mint_id;
use crate::ledger::Ledger;
use crate::models::{
  DocumentKind, Employee, EmployeeDraft, EmployeePatch, PaymentStatus, Transaction, TransactionKind,
  PAYROLL_CATEGORY,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
  employees: Vec<Employee>,
}

impl Roster {
  pub fn new(employees: Vec<Employee>) -> Self {
    Self { employees }
  }

  pub fn employees(&self) -> &[Employee] {
    &self.employees
  }

  pub fn len(&self) -> usize {
    self.employees.len()
  }

  pub fn is_empty(&self) -> bool {
    self.employees.is_empty()
  }

  pub fn get(&self, id: u64) -> Option<&Employee> {
    self.employees.iter().find(|e| e.id == id)
  }

  fn get_mut(&mut self, id: u64) -> QuintaResult<&mut Employee> {
    self
      .employees
      .iter_mut()
      .find(|e| e.id == id)
      .ok_or_else(|| QuintaError::not_found("Employee", id))
  }

  pub fn pending_payroll(&self) -> impl Iterator<Item = &Employee> {
    self.employees.iter().filter(|e| !e.is_paid())
  }

  #[instrument(name = "employees::hire", skip(self, draft, now), fields(name = %draft.name), err(Display))]
  pub fn hire(&mut self, draft: EmployeeDraft, now: DateTime<Utc>) -> QuintaResult<&Employee> {
    if draft.name.trim().is_empty() {
      return Err(QuintaError::Validation("Employee name cannot be empty".to_string()));
    }
    if draft.salary_cents < 0 {
      return Err(QuintaError::Validation("Salary cannot be negative".to_string()));
    }
    let employee = Employee {
      id: mint_id(self.employees.iter().map(|e| e.id), now),
      name: draft.name,
      role: draft.role,
      category: draft.category,
      salary_cents: draft.salary_cents,
      admission_date: draft.admission_date.unwrap_or_else(|| now.date_naive()),
      contact: draft.contact,
      payment_status: PaymentStatus::Pendente,
      last_payment_date: None,
      photo: None,
      id_card_doc: None,
      cv_doc: None,
    };
    info!(employee_id = employee.id, "Employee hired.");
    self.employees.push(employee);
    Ok(&self.employees[self.employees.len() - 1])
  }

  pub fn update(&mut self, id: u64, patch: EmployeePatch) -> QuintaResult<&Employee> {
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
      return Err(QuintaError::Validation("Employee name cannot be empty".to_string()));
    }
    if patch.salary_cents.is_some_and(|s| s < 0) {
      return Err(QuintaError::Validation("Salary cannot be negative".to_string()));
    }
    let employee = self.get_mut(id)?;
    patch.apply_to(employee);
    Ok(employee)
  }

  pub fn dismiss(&mut self, id: u64, confirm: &dyn Confirm) -> Removal<Employee> {
    let Some(position) = self.employees.iter().position(|e| e.id == id) else {
      return Removal::Missing;
    };
    if !confirm.confirm(&format!("Remover o funcionário {}?", self.employees[position].name)) {
      return Removal::Declined;
    }
    Removal::Removed(self.employees.remove(position))
  }

  /// Stores an already-encoded document in the given slot, replacing any
  /// previous one.
  pub fn attach_document(&mut self, id: u64, kind: DocumentKind, encoded: String) -> QuintaResult<&Employee> {
    if encoded.is_empty() {
      return Err(QuintaError::Validation("Document payload cannot be empty".to_string()));
    }
    let employee = self.get_mut(id)?;
    *employee.document_slot(kind) = Some(encoded);
    Ok(employee)
  }

  /// Pays one salary: a `SAIDA` in the ledger and the employee marked as
  /// paid for the current cycle. A second payment in the same cycle fails.
  #[instrument(name = "employees::pay_salary", skip(self, ledger, now), err(Display))]
  pub fn pay_salary(&mut self, id: u64, ledger: &mut Ledger, now: DateTime<Utc>) -> QuintaResult<Transaction> {
    let employee = self.get_mut(id)?;
    if employee.is_paid() {
      return Err(QuintaError::AlreadyPaid { employee_id: id });
    }
    let entry = ledger.record(
      TransactionKind::Saida,
      PAYROLL_CATEGORY,
      format!("Salário - {}", employee.name),
      employee.salary_cents,
      None,
      now,
    );
    employee.payment_status = PaymentStatus::Pago;
    employee.last_payment_date = Some(now.date_naive());
    info!(employee_id = id, amount_cents = entry.amount_cents, "Salary paid.");
    Ok(entry)
  }

  /// Starts a new payroll cycle: everyone is pending again. Returns how many
  /// employees were reset.
  pub fn open_payroll_cycle(&mut self) -> usize {
    let mut reset = 0;
    for employee in self.employees.iter_mut().filter(|e| e.is_paid()) {
      employee.payment_status = PaymentStatus::Pendente;
      reset += 1;
    }
    reset
  }

  pub(crate) fn relabel(&mut self, old: &str, new: &str) -> usize {
    let mut changed = 0;
    for employee in self.employees.iter_mut().filter(|e| e.category == old) {
      employee.category = new.to_string();
      changed += 1;
    }
    changed
  }
}
