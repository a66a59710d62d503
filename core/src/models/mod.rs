// quinta/src/models/mod.rs

//! Plain records owned by the application state. Records refer to each other
//! only by identifier or by category label, never by pointer.

pub mod account;
pub mod cart_line;
pub mod employee;
pub mod invoice;
pub mod product;
pub mod transaction;
pub mod user;

pub use account::{AccountDraft, AccountKind, AccountPatch, AccountStatus, CurrentAccount};
pub use cart_line::CartLine;
pub use employee::{DocumentKind, Employee, EmployeeDraft, EmployeePatch, PaymentStatus};
pub use invoice::Invoice;
pub use product::{Product, ProductDraft, ProductPatch};
pub use transaction::{Transaction, TransactionKind, PAYROLL_CATEGORY, SALES_CATEGORY};
pub use user::{Permission, Role, User, UserDraft, UserPatch, UserProfile};

/// Label given to records whose category was deleted.
pub const UNCATEGORIZED: &str = "Sem Categoria";

pub(crate) fn uncategorized() -> String {
  UNCATEGORIZED.to_string()
}
