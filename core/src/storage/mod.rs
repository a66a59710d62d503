// quinta/src/storage/mod.rs

//! Durable key-value backends. Each key holds one JSON document.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::QuintaResult;
use std::sync::Arc;

/// String blobs under string keys. `save` overwrites unconditionally.
pub trait KeyValueStore: Send + Sync {
  fn load(&self, key: &str) -> QuintaResult<Option<String>>;

  fn save(&self, key: &str, value: &str) -> QuintaResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
  fn load(&self, key: &str) -> QuintaResult<Option<String>> {
    (**self).load(key)
  }

  fn save(&self, key: &str, value: &str) -> QuintaResult<()> {
    (**self).save(key, value)
  }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
  fn load(&self, key: &str) -> QuintaResult<Option<String>> {
    (**self).load(key)
  }

  fn save(&self, key: &str, value: &str) -> QuintaResult<()> {
    (**self).save(key, value)
  }
}
