use std::{fs, path::PathBuf};

use tracing::debug;

use crate::{
    core::utils::{ensure_dir, write_atomic},
    errors::Result,
};

use super::KeyValueStore;

const FILE_EXTENSION: &str = "json";

/// Filesystem-backed key-value store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Result<Self> {
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), FILE_EXTENSION))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        write_atomic(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)?;
            debug!(path = %path.display(), "removed value");
        }
        Ok(())
    }
}

/// Maps a key onto a safe file stem.
fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn canonical_key_replaces_path_separators() {
        assert_eq!(canonical_key("../etc/passwd"), "___etc_passwd");
        assert_eq!(
            canonical_key("expense-tracker-transactions"),
            "expense-tracker-transactions"
        );
        assert_eq!(canonical_key("  "), "_");
    }

    #[test]
    fn set_get_remove_round_trip_on_disk() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("store")).unwrap();
        assert_eq!(store.get("answer").unwrap(), None);

        store.set("answer", "42").unwrap();
        assert!(store.path_for("answer").exists());
        assert_eq!(store.get("answer").unwrap().as_deref(), Some("42"));

        store.remove("answer").unwrap();
        assert_eq!(store.get("answer").unwrap(), None);
        store.remove("answer").unwrap();
    }
}
