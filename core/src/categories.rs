// quinta/src/categories.rs

//! Category label lists and the cascade that keeps records consistent with
//! them.

use crate::confirm::{Confirm, Removal};
use crate::error::{QuintaError, QuintaResult};
use crate::models::UNCATEGORIZED;
use crate::state::AppState;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryKind {
  /// Labels on products.
  Product,
  /// Labels on employees and system users.
  Staff,
}

impl fmt::Display for CategoryKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CategoryKind::Product => f.write_str("product"),
      CategoryKind::Staff => f.write_str("staff"),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBook {
  pub product: Vec<String>,
  pub staff: Vec<String>,
}

impl CategoryBook {
  pub fn new(product: Vec<String>, staff: Vec<String>) -> Self {
    Self { product, staff }
  }

  pub fn list(&self, kind: CategoryKind) -> &[String] {
    match kind {
      CategoryKind::Product => &self.product,
      CategoryKind::Staff => &self.staff,
    }
  }

  fn list_mut(&mut self, kind: CategoryKind) -> &mut Vec<String> {
    match kind {
      CategoryKind::Product => &mut self.product,
      CategoryKind::Staff => &mut self.staff,
    }
  }

  pub fn contains(&self, kind: CategoryKind, name: &str) -> bool {
    self.list(kind).iter().any(|c| c == name)
  }
}

/// How many records a rename or delete touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
  pub products: usize,
  pub employees: usize,
  pub users: usize,
}

impl CascadeReport {
  pub fn total(&self) -> usize {
    self.products + self.employees + self.users
  }
}

fn normalized(name: &str) -> QuintaResult<String> {
  let trimmed = name.trim();
  if trimmed.is_empty() {
    return Err(QuintaError::Validation("Category name cannot be empty".to_string()));
  }
  Ok(trimmed.to_string())
}

fn duplicate() -> QuintaError {
  QuintaError::Validation("Categoria já existe!".to_string())
}

#[instrument(name = "categories::add", skip(state), err(Display))]
pub fn add_category(state: &mut AppState, kind: CategoryKind, name: &str) -> QuintaResult<String> {
  let name = normalized(name)?;
  if state.categories.contains(kind, &name) {
    return Err(duplicate());
  }
  state.categories.list_mut(kind).push(name.clone());
  Ok(name)
}

/// Renames a label in its list and on every record that carries it, in one
/// step.
#[instrument(name = "categories::rename", skip(state), err(Display))]
pub fn rename_category(state: &mut AppState, kind: CategoryKind, old: &str, new: &str) -> QuintaResult<CascadeReport> {
  let new = normalized(new)?;
  let position = state
    .categories
    .list(kind)
    .iter()
    .position(|c| c == old)
    .ok_or_else(|| QuintaError::not_found("Category", old))?;
  if new == old {
    return Ok(CascadeReport::default());
  }
  if state.categories.contains(kind, &new) {
    return Err(duplicate());
  }

  state.categories.list_mut(kind)[position] = new.clone();
  let report = relabel_records(state, kind, old, &new);
  info!(touched = report.total(), "Category renamed.");
  Ok(report)
}

/// Removes a label and moves every record that carried it to
/// "Sem Categoria". That sentinel label itself cannot be deleted.
#[instrument(name = "categories::delete", skip(state, confirm), err(Display))]
pub fn delete_category(
  state: &mut AppState,
  kind: CategoryKind,
  name: &str,
  confirm: &dyn Confirm,
) -> QuintaResult<Removal<CascadeReport>> {
  if name == UNCATEGORIZED {
    return Err(QuintaError::Validation(format!(
      "'{}' receives the records of deleted categories and cannot be deleted",
      UNCATEGORIZED
    )));
  }
  let Some(position) = state.categories.list(kind).iter().position(|c| c == name) else {
    return Ok(Removal::Missing);
  };
  if !confirm.confirm(&format!("Excluir a categoria {}?", name)) {
    return Ok(Removal::Declined);
  }

  state.categories.list_mut(kind).remove(position);
  let report = relabel_records(state, kind, name, UNCATEGORIZED);
  info!(reassigned = report.total(), "Category deleted.");
  Ok(Removal::Removed(report))
}

fn relabel_records(state: &mut AppState, kind: CategoryKind, old: &str, new: &str) -> CascadeReport {
  match kind {
    CategoryKind::Product => CascadeReport {
      products: state.catalog.relabel(old, new),
      ..CascadeReport::default()
    },
    CategoryKind::Staff => CascadeReport {
      employees: state.roster.relabel(old, new),
      users: state.users.relabel(old, new),
      ..CascadeReport::default()
    },
  }
}
