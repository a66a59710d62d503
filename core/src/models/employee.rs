// quinta/src/models/employee.rs

use super::uncategorized;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
  #[default]
  Pendente,
  Pago,
}

/// Attachment slots on an employee record. The payload is stored as the
/// already-encoded string the upload produced (usually a data URL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
  Photo,
  IdCard,
  Cv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
  pub id: u64,
  pub name: String,
  #[serde(default)]
  pub role: String,
  #[serde(default = "uncategorized")]
  pub category: String,
  pub salary_cents: i64,
  pub admission_date: NaiveDate,
  #[serde(default)]
  pub contact: String,
  #[serde(default)]
  pub payment_status: PaymentStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last_payment_date: Option<NaiveDate>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub photo: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id_card_doc: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cv_doc: Option<String>,
}

impl Employee {
  pub fn is_paid(&self) -> bool {
    self.payment_status == PaymentStatus::Pago
  }

  pub fn document(&self, kind: DocumentKind) -> Option<&str> {
    match kind {
      DocumentKind::Photo => self.photo.as_deref(),
      DocumentKind::IdCard => self.id_card_doc.as_deref(),
      DocumentKind::Cv => self.cv_doc.as_deref(),
    }
  }

  pub(crate) fn document_slot(&mut self, kind: DocumentKind) -> &mut Option<String> {
    match kind {
      DocumentKind::Photo => &mut self.photo,
      DocumentKind::IdCard => &mut self.id_card_doc,
      DocumentKind::Cv => &mut self.cv_doc,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
  pub name: String,
  #[serde(default)]
  pub role: String,
  #[serde(default = "uncategorized")]
  pub category: String,
  pub salary_cents: i64,
  /// Defaults to the hiring day.
  #[serde(default)]
  pub admission_date: Option<NaiveDate>,
  #[serde(default)]
  pub contact: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeePatch {
  pub name: Option<String>,
  pub role: Option<String>,
  pub category: Option<String>,
  pub salary_cents: Option<i64>,
  pub admission_date: Option<NaiveDate>,
  pub contact: Option<String>,
}

impl EmployeePatch {
  pub(crate) fn apply_to(self, employee: &mut Employee) {
    if let Some(name) = self.name {
      employee.name = name;
    }
    if let Some(role) = self.role {
      employee.role = role;
    }
    if let Some(category) = self.category {
      employee.category = category;
    }
    if let Some(salary) = self.salary_cents {
      employee.salary_cents = salary;
    }
    if let Some(date) = self.admission_date {
      employee.admission_date = date;
    }
    if let Some(contact) = self.contact {
      employee.contact = contact;
    }
  }
}
