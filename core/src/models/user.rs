// quinta/src/models/user.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  Admin,
  #[default]
  Staff,
}

/// Back-office areas a system user may open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
  Dashboard,
  Caixa,
  Stock,
  Rh,
  Finance,
}

impl Permission {
  pub const ALL: [Permission; 5] = [
    Permission::Dashboard,
    Permission::Caixa,
    Permission::Stock,
    Permission::Rh,
    Permission::Finance,
  ];
}

/// A back-office account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: u64,
  pub username: String,
  /// Argon2 PHC string.
  pub password_hash: String,
  #[serde(default)]
  pub role: Role,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  pub display_name: String,
  pub created_at: NaiveDate,
  #[serde(default)]
  pub permissions: Vec<Permission>,
}

impl User {
  /// Admins may open every area regardless of the permission list.
  pub fn has_permission(&self, permission: Permission) -> bool {
    self.role == Role::Admin || self.permissions.contains(&permission)
  }

  pub fn profile(&self) -> UserProfile {
    UserProfile {
      id: self.id,
      username: self.username.clone(),
      role: self.role,
      category: self.category.clone(),
      display_name: self.display_name.clone(),
      created_at: self.created_at,
      permissions: self.permissions.clone(),
    }
  }
}

/// `User` without the password hash, for handing out to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub id: u64,
  pub username: String,
  pub role: Role,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  pub display_name: String,
  pub created_at: NaiveDate,
  pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
  pub username: String,
  pub password: String,
  #[serde(default)]
  pub role: Role,
  #[serde(default)]
  pub category: Option<String>,
  /// Falls back to the username.
  #[serde(default)]
  pub display_name: Option<String>,
  #[serde(default)]
  pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
  pub password: Option<String>,
  pub role: Option<Role>,
  pub category: Option<String>,
  pub display_name: Option<String>,
  pub permissions: Option<Vec<Permission>>,
}
