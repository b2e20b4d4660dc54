//! Preferences store.
//!
//! A free-form JSON preferences object kept under the `"lotlens"`
//! namespace key inside a single JSON file. Load/save only; the schema is
//! owned by whoever writes the preferences, not enforced here.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::Error;

/// Namespace key under which preferences live inside the file.
const NAMESPACE: &str = "lotlens";

/// File-backed preferences store.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    /// Create a store backed by the given file path.
    ///
    /// The file is created on first save, not here.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Load the preferences object.
    ///
    /// A missing file or missing namespace key yields an empty object.
    ///
    /// # Errors
    ///
    /// Returns `Error::Prefs` when the file exists but cannot be read or
    /// parsed.
    pub fn load(&self) -> Result<Value, Error> {
        if !self.path.exists() {
            return Ok(Value::Object(Map::new()));
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| Error::Prefs(format!("read failed: {}", e)))?;
        let root: Value = serde_json::from_str(&raw).map_err(|e| Error::Prefs(format!("parse failed: {}", e)))?;

        Ok(root.get(NAMESPACE).cloned().unwrap_or_else(|| Value::Object(Map::new())))
    }

    /// Save the preferences object, replacing the namespace key.
    ///
    /// Other keys in the file are preserved.
    ///
    /// # Errors
    ///
    /// Returns `Error::Prefs` when the file cannot be written.
    pub fn save(&self, prefs: &Value) -> Result<(), Error> {
        let mut root = if self.path.exists() {
            let raw = fs::read_to_string(&self.path).map_err(|e| Error::Prefs(format!("read failed: {}", e)))?;
            serde_json::from_str(&raw).unwrap_or_else(|_| Value::Object(Map::new()))
        } else {
            Value::Object(Map::new())
        };

        if !root.is_object() {
            root = Value::Object(Map::new());
        }
        root[NAMESPACE] = prefs.clone();

        let serialized =
            serde_json::to_string_pretty(&root).map_err(|e| Error::Prefs(format!("serialize failed: {}", e)))?;
        fs::write(&self.path, serialized).map_err(|e| Error::Prefs(format!("write failed: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path().join("prefs.json"));

        let prefs = store.load().unwrap();
        assert_eq!(prefs, json!({}));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path().join("prefs.json"));

        let prefs = json!({"theme": "dark", "panel_position": {"x": 20, "y": 40}});
        store.save(&prefs).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_save_preserves_foreign_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"other-app": {"keep": true}}"#).unwrap();

        let store = PrefsStore::new(&path);
        store.save(&json!({"theme": "light"})).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let root: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(root["other-app"]["keep"], json!(true));
        assert_eq!(root[NAMESPACE]["theme"], json!("light"));
    }

    #[test]
    fn test_load_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let store = PrefsStore::new(&path);
        assert!(matches!(store.load(), Err(Error::Prefs(_))));
    }
}
