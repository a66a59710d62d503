// quinta/src/state.rs
use crate::accounts::AccountBook;
use crate::catalog::Catalog;
use crate::categories::CategoryBook;
use crate::employees::Roster;
use crate::ledger::Ledger;
use crate::users::UserDirectory;

/// Every persisted collection, owned in one place. Passed by reference to the
/// operations that mutate it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
  pub catalog: Catalog,
  pub roster: Roster,
  pub users: UserDirectory,
  pub ledger: Ledger,
  pub accounts: AccountBook,
  pub categories: CategoryBook,
}
