// quinta/src/storage/file.rs
use super::KeyValueStore;
use crate::error::{QuintaError, QuintaResult};
use anyhow::Context;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// One `<key>.json` file per key inside a data directory. Writes go to a
/// sibling temp file that is then renamed over the target, so a reader never
/// sees a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  dir: PathBuf,
}

impl JsonFileStore {
  /// Opens the directory, creating it if needed.
  #[instrument(name = "JsonFileStore::open", skip(dir), fields(dir = %dir.as_ref().display()), err(Display))]
  pub fn open(dir: impl AsRef<Path>) -> QuintaResult<Self> {
    let dir = dir.as_ref().to_path_buf();
    fs::create_dir_all(&dir)
      .with_context(|| format!("creating data directory {}", dir.display()))
      .map_err(|e| QuintaError::storage(dir.display().to_string(), e))?;
    Ok(Self { dir })
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, key: &str) -> QuintaResult<PathBuf> {
    let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
      return Err(QuintaError::Validation(format!("Invalid storage key '{}'", key)));
    }
    Ok(self.dir.join(format!("{}.json", key)))
  }
}

impl KeyValueStore for JsonFileStore {
  fn load(&self, key: &str) -> QuintaResult<Option<String>> {
    let path = self.path_for(key)?;
    match fs::read_to_string(&path) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(QuintaError::storage(
        key,
        anyhow::Error::new(e).context(format!("reading {}", path.display())),
      )),
    }
  }

  fn save(&self, key: &str, value: &str) -> QuintaResult<()> {
    let path = self.path_for(key)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, value)
      .with_context(|| format!("writing {}", tmp.display()))
      .and_then(|_| fs::rename(&tmp, &path).with_context(|| format!("renaming onto {}", path.display())))
      .map_err(|e| QuintaError::storage(key, e))?;
    debug!(key, bytes = value.len(), "Collection written to disk.");
    Ok(())
  }
}
