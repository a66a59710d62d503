// quinta/src/persistence.rs

//! Snapshotting collections into a `KeyValueStore` and rehydrating them.
//!
//! Each collection lives under `<namespace>_<collection>` as an envelope
//! `{"schemaVersion": 1, "items": [...]}`. A bare JSON array is the legacy
//! layout (version 0): amounts in floating point kwanza, free-form locale
//! dates and plaintext passwords. Those are migrated on load.

use crate::accounts::AccountBook;
use crate::catalog::Catalog;
use crate::categories::CategoryBook;
use crate::config::StorefrontConfig;
use crate::employees::Roster;
use crate::error::{QuintaError, QuintaResult};
use crate::ledger::Ledger;
use crate::seed;
use crate::state::AppState;
use crate::storage::KeyValueStore;
use crate::users::{hash_password, UserDirectory};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, info, instrument, warn};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
  Products,
  Employees,
  Users,
  Transactions,
  Accounts,
  Categories,
  StaffCategories,
}

impl Collection {
  pub const ALL: [Collection; 7] = [
    Collection::Products,
    Collection::Employees,
    Collection::Users,
    Collection::Transactions,
    Collection::Accounts,
    Collection::Categories,
    Collection::StaffCategories,
  ];

  pub fn suffix(self) -> &'static str {
    match self {
      Collection::Products => "products",
      Collection::Employees => "employees",
      Collection::Users => "users",
      Collection::Transactions => "transactions",
      Collection::Accounts => "accounts",
      Collection::Categories => "categories",
      Collection::StaffCategories => "staff_categories",
    }
  }

  pub fn key(self, namespace: &str) -> String {
    format!("{}_{}", namespace, self.suffix())
  }
}

impl fmt::Display for Collection {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.suffix())
  }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a, T: Serialize> {
  schema_version: u32,
  items: &'a T,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
  schema_version: u32,
  items: Value,
}

/// Writes one collection under its key, replacing whatever was there.
pub fn save_collection<S, T>(store: &S, namespace: &str, collection: Collection, items: &T) -> QuintaResult<()>
where
  S: KeyValueStore + ?Sized,
  T: Serialize,
{
  let raw = serde_json::to_string(&EnvelopeRef {
    schema_version: SCHEMA_VERSION,
    items,
  })?;
  store.save(&collection.key(namespace), &raw)
}

/// Decodes a stored document, migrating the legacy layout.
pub fn decode_collection<T: DeserializeOwned>(collection: Collection, raw: &str) -> QuintaResult<T> {
  let value: Value = serde_json::from_str(raw)?;
  let items = match value {
    Value::Array(_) => migrate_legacy(collection, value)?,
    Value::Object(_) => {
      let envelope: Envelope = serde_json::from_value(value)?;
      if envelope.schema_version != SCHEMA_VERSION {
        return Err(QuintaError::Validation(format!(
          "Unsupported schema version {} for {}",
          envelope.schema_version, collection
        )));
      }
      envelope.items
    }
    other => {
      return Err(QuintaError::Validation(format!(
        "Expected an array or an envelope for {}, found {}",
        collection, other
      )))
    }
  };
  Ok(serde_json::from_value(items)?)
}

/// Loads one collection. A missing key yields `seed()`. A document that
/// cannot be decoded is logged and also yields `seed()`; only a failing store
/// is an error.
pub fn load_collection<S, T>(
  store: &S,
  namespace: &str,
  collection: Collection,
  seed: impl FnOnce() -> QuintaResult<T>,
) -> QuintaResult<T>
where
  S: KeyValueStore + ?Sized,
  T: DeserializeOwned,
{
  let key = collection.key(namespace);
  let Some(raw) = store.load(&key)? else {
    debug!(%key, "No stored value, using defaults.");
    return seed();
  };
  match decode_collection(collection, &raw) {
    Ok(items) => Ok(items),
    Err(e) => {
      warn!(%key, error = %e, "Stored collection is unreadable, falling back to defaults.");
      seed()
    }
  }
}

/// Rehydrates the whole application state.
#[instrument(name = "persistence::load_state", skip(store, config), fields(namespace = %config.namespace), err(Display))]
pub fn load_state<S: KeyValueStore + ?Sized>(store: &S, config: &StorefrontConfig) -> QuintaResult<AppState> {
  let ns = config.namespace.as_str();
  let seeded = config.seed_defaults;

  let products = load_collection(store, ns, Collection::Products, || {
    Ok(if seeded { seed::default_products() } else { Vec::new() })
  })?;
  let employees = load_collection(store, ns, Collection::Employees, || Ok(Vec::new()))?;
  let users = load_collection(store, ns, Collection::Users, || {
    if seeded {
      seed::default_users()
    } else {
      Ok(Vec::new())
    }
  })?;
  let transactions = load_collection(store, ns, Collection::Transactions, || Ok(Vec::new()))?;
  let accounts = load_collection(store, ns, Collection::Accounts, || Ok(Vec::new()))?;
  let product_categories = load_collection(store, ns, Collection::Categories, || {
    Ok(if seeded { seed::default_product_categories() } else { Vec::new() })
  })?;
  let staff_categories = load_collection(store, ns, Collection::StaffCategories, || {
    Ok(if seeded { seed::default_staff_categories() } else { Vec::new() })
  })?;

  let state = AppState {
    catalog: Catalog::new(products),
    roster: Roster::new(employees),
    users: UserDirectory::new(users),
    ledger: Ledger::new(transactions),
    accounts: AccountBook::new(accounts),
    categories: CategoryBook::new(product_categories, staff_categories),
  };
  info!(
    products = state.catalog.len(),
    employees = state.roster.len(),
    transactions = state.ledger.len(),
    "Application state loaded."
  );
  Ok(state)
}

/// Writes the listed collections of `state`.
pub fn save_state<S: KeyValueStore + ?Sized>(
  store: &S,
  namespace: &str,
  state: &AppState,
  collections: &[Collection],
) -> QuintaResult<()> {
  for collection in collections {
    match collection {
      Collection::Products => save_collection(store, namespace, *collection, &state.catalog)?,
      Collection::Employees => save_collection(store, namespace, *collection, &state.roster)?,
      Collection::Users => save_collection(store, namespace, *collection, &state.users)?,
      Collection::Transactions => save_collection(store, namespace, *collection, &state.ledger)?,
      Collection::Accounts => save_collection(store, namespace, *collection, &state.accounts)?,
      Collection::Categories => save_collection(store, namespace, *collection, &state.categories.product)?,
      Collection::StaffCategories => save_collection(store, namespace, *collection, &state.categories.staff)?,
    }
  }
  debug!(count = collections.len(), "Collections persisted.");
  Ok(())
}

// --- Legacy (version 0) migration ---

fn migrate_legacy(collection: Collection, value: Value) -> QuintaResult<Value> {
  let Value::Array(records) = value else {
    return Ok(value);
  };
  let migrated = records
    .into_iter()
    .map(|record| match record {
      Value::Object(map) => migrate_record(collection, map).map(Value::Object),
      other => Ok(other),
    })
    .collect::<QuintaResult<Vec<_>>>()?;
  info!(%collection, records = migrated.len(), "Migrated legacy collection.");
  Ok(Value::Array(migrated))
}

fn migrate_record(collection: Collection, mut map: Map<String, Value>) -> QuintaResult<Map<String, Value>> {
  let id = map.get("id").and_then(Value::as_u64).unwrap_or(0);
  match collection {
    Collection::Products => {
      rename_amount(&mut map, "price", "priceCents");
      rename_amount(&mut map, "costPrice", "costPriceCents");
    }
    Collection::Transactions => {
      rename_amount(&mut map, "amount", "amountCents");
      rename_amount(&mut map, "cost", "costCents");
      migrate_date(&mut map, "date", id);
    }
    Collection::Employees => {
      rename_amount(&mut map, "salary", "salaryCents");
      migrate_date(&mut map, "admissionDate", id);
      migrate_optional_date(&mut map, "lastPaymentDate");
    }
    Collection::Users => {
      let hash = match map.remove("password") {
        Some(Value::String(plain)) if !plain.is_empty() => hash_password(&plain)?,
        // No password on record: the account stays locked until one is set.
        _ => String::new(),
      };
      map.entry("passwordHash").or_insert(Value::String(hash));
      if !map.contains_key("displayName") {
        let username = map.get("username").cloned().unwrap_or(Value::String(String::new()));
        map.insert("displayName".to_string(), username);
      }
      migrate_date(&mut map, "createdAt", id);
    }
    Collection::Accounts => {
      rename_amount(&mut map, "balance", "balanceCents");
      migrate_date(&mut map, "lastActivity", id);
    }
    Collection::Categories | Collection::StaffCategories => {}
  }
  Ok(map)
}

/// Kwanza as a JSON number becomes integer cêntimos under a new name.
fn rename_amount(map: &mut Map<String, Value>, from: &str, to: &str) {
  let Some(value) = map.remove(from) else {
    return;
  };
  let cents = match &value {
    Value::Number(n) => n.as_f64().map(kwanza_to_cents),
    Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok().map(kwanza_to_cents),
    _ => None,
  };
  match cents {
    Some(cents) => map.insert(to.to_string(), Value::from(cents)),
    None => map.insert(to.to_string(), value),
  };
}

pub(crate) fn kwanza_to_cents(kwanza: f64) -> i64 {
  (kwanza * 100.0).round() as i64
}

fn migrate_date(map: &mut Map<String, Value>, field: &str, id: u64) {
  let parsed = map
    .get(field)
    .and_then(Value::as_str)
    .and_then(parse_legacy_date)
    .unwrap_or_else(|| date_from_id(id));
  map.insert(field.to_string(), Value::String(parsed.to_string()));
}

fn migrate_optional_date(map: &mut Map<String, Value>, field: &str) {
  match map.get(field).and_then(Value::as_str).and_then(parse_legacy_date) {
    Some(date) => map.insert(field.to_string(), Value::String(date.to_string())),
    None => map.remove(field),
  };
}

/// Accepts ISO dates and datetimes plus the day-first and month-first forms
/// browsers produce for `toLocaleDateString`.
pub(crate) fn parse_legacy_date(raw: &str) -> Option<NaiveDate> {
  let raw = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.date_naive());
  }
  if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
    return Some(dt.date());
  }
  ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d.%m.%Y", "%d-%m-%Y"]
    .iter()
    .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Legacy ids are `Date.now()` milliseconds; small ids give the epoch.
fn date_from_id(id: u64) -> NaiveDate {
  i64::try_from(id)
    .ok()
    .and_then(DateTime::from_timestamp_millis)
    .map(|dt| dt.date_naive())
    .unwrap_or_default()
}
