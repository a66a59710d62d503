// quinta/src/storage/memory.rs
use super::KeyValueStore;
use crate::error::QuintaResult;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Process-local store. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Keys currently held, sorted.
  pub fn keys(&self) -> Vec<String> {
    let mut keys: Vec<String> = self.entries.lock().keys().cloned().collect();
    keys.sort();
    keys
  }
}

impl KeyValueStore for MemoryStore {
  fn load(&self, key: &str) -> QuintaResult<Option<String>> {
    Ok(self.entries.lock().get(key).cloned())
  }

  fn save(&self, key: &str, value: &str) -> QuintaResult<()> {
    self.entries.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }
}
