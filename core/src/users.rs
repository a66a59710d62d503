// quinta/src/users.rs

//! Back-office system accounts.

use crate::confirm::{Confirm, Removal};
use crate::error::{QuintaError, QuintaResult};
use crate::ids::mint_id;
use crate::models::{Permission, User, UserDraft, UserPatch};
use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
  Argon2,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

/// Hashes a plain-text password with Argon2 and a fresh random salt.
#[instrument(name = "users::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> QuintaResult<String> {
  if password.is_empty() {
    return Err(QuintaError::Validation("Password cannot be empty".to_string()));
  }
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      QuintaError::PasswordHash(argon_err.to_string())
    })
}

/// Checks a plain-text password against a stored Argon2 hash. A mismatch is
/// `Ok(false)`; an unparseable hash is an error.
pub fn verify_password(stored_hash: &str, provided: &str) -> QuintaResult<bool> {
  let parsed = PasswordHash::new(stored_hash).map_err(|e| QuintaError::PasswordHash(e.to_string()))?;
  match Argon2::default().verify_password(provided.as_bytes(), &parsed) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(other) => Err(QuintaError::PasswordHash(other.to_string())),
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory {
  users: Vec<User>,
}

impl UserDirectory {
  pub fn new(users: Vec<User>) -> Self {
    Self { users }
  }

  pub fn users(&self) -> &[User] {
    &self.users
  }

  pub fn len(&self) -> usize {
    self.users.len()
  }

  pub fn is_empty(&self) -> bool {
    self.users.is_empty()
  }

  pub fn get(&self, id: u64) -> Option<&User> {
    self.users.iter().find(|u| u.id == id)
  }

  pub fn find_by_username(&self, username: &str) -> Option<&User> {
    self.users.iter().find(|u| u.username == username)
  }

  /// `false` for unknown users.
  pub fn has_permission(&self, id: u64, permission: Permission) -> bool {
    self.get(id).is_some_and(|u| u.has_permission(permission))
  }

  #[instrument(name = "users::create", skip(self, draft, now), fields(username = %draft.username), err(Display))]
  pub fn create(&mut self, draft: UserDraft, now: DateTime<Utc>) -> QuintaResult<&User> {
    let username = draft.username.trim().to_string();
    if username.is_empty() {
      return Err(QuintaError::Validation("Username cannot be empty".to_string()));
    }
    if self.find_by_username(&username).is_some() {
      return Err(QuintaError::Validation(format!("Username '{}' is already taken", username)));
    }
    let password_hash = hash_password(&draft.password)?;
    let user = User {
      id: mint_id(self.users.iter().map(|u| u.id), now),
      display_name: draft
        .display_name
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| username.clone()),
      username,
      password_hash,
      role: draft.role,
      category: draft.category,
      created_at: now.date_naive(),
      permissions: draft.permissions,
    };
    info!(user_id = user.id, "System user created.");
    self.users.push(user);
    Ok(&self.users[self.users.len() - 1])
  }

  /// Applies an edit. A new password is hashed before anything is written.
  pub fn update(&mut self, id: u64, patch: UserPatch) -> QuintaResult<&User> {
    let new_hash = patch.password.as_deref().map(hash_password).transpose()?;
    let user = self
      .users
      .iter_mut()
      .find(|u| u.id == id)
      .ok_or_else(|| QuintaError::not_found("User", id))?;
    if let Some(hash) = new_hash {
      user.password_hash = hash;
    }
    if let Some(role) = patch.role {
      user.role = role;
    }
    if let Some(category) = patch.category {
      user.category = Some(category);
    }
    if let Some(display_name) = patch.display_name {
      user.display_name = display_name;
    }
    if let Some(permissions) = patch.permissions {
      user.permissions = permissions;
    }
    debug!(user_id = id, "System user updated.");
    Ok(user)
  }

  /// Nobody may delete the account they are acting as.
  pub fn delete(&mut self, id: u64, acting_user_id: u64, confirm: &dyn Confirm) -> QuintaResult<Removal<User>> {
    if id == acting_user_id {
      return Err(QuintaError::SelfDeletion { user_id: id });
    }
    let Some(position) = self.users.iter().position(|u| u.id == id) else {
      return Ok(Removal::Missing);
    };
    if !confirm.confirm(&format!("Remover o usuário {}?", self.users[position].username)) {
      return Ok(Removal::Declined);
    }
    Ok(Removal::Removed(self.users.remove(position)))
  }

  pub(crate) fn relabel(&mut self, old: &str, new: &str) -> usize {
    let mut changed = 0;
    for user in self.users.iter_mut().filter(|u| u.category.as_deref() == Some(old)) {
      user.category = Some(new.to_string());
      changed += 1;
    }
    changed
  }
}
