// src/lib.rs

//! Quinta: storefront and back-office core for a poultry-supply business.
//!
//! The crate keeps a handful of ordered collections (products, employees,
//! system users, ledger transactions, current accounts and two category
//! lists) in one `AppState`, and offers:
//!  - A catalog with search, low-stock and backorder views.
//!  - Session carts and a checkout that turns a cart into an invoice, a
//!    ledger entry and a stock decrement.
//!  - HR records with payroll paid through the ledger.
//!  - A category cascade that keeps records consistent with their labels.
//!  - Snapshot persistence of every collection into a key-value store, with
//!    migration of the legacy unversioned layout.
//!  - An advisory chat client for a generative text service.

pub mod accounts;
pub mod advisor;
pub mod cart;
pub mod catalog;
pub mod categories;
pub mod checkout;
pub mod config;
pub mod confirm;
pub mod employees;
pub mod error;
mod ids;
pub mod ledger;
pub mod models;
pub mod money;
pub mod persistence;
pub mod seed;
pub mod shared;
pub mod state;
pub mod storage;
pub mod storefront;
pub mod users;

// --- Re-exports for the Public API ---

pub use crate::accounts::{AccountBook, AccountsSummary};
pub use crate::advisor::{advise_or_fallback, Advisor, AdvisorSettings, GenerativeAdvisor, OfflineAdvisor};
pub use crate::cart::{Cart, CartKind};
pub use crate::catalog::{Catalog, ALL_CATEGORIES};
pub use crate::categories::{CascadeReport, CategoryBook, CategoryKind};
pub use crate::config::{StockPolicy, StorefrontConfig, DEFAULT_NAMESPACE};
pub use crate::confirm::{Confirm, Removal};
pub use crate::employees::Roster;
pub use crate::error::{QuintaError, QuintaResult};
pub use crate::ledger::{CategoryTotal, Ledger, LedgerSummary};
pub use crate::money::format_kz;
pub use crate::persistence::Collection;
pub use crate::shared::SharedStorefront;
pub use crate::state::AppState;
pub use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use crate::storefront::{Dashboard, Storefront};
pub use crate::users::UserDirectory;
