//! Token storage — shared between library embedders and the CLI.
//!
//! The file store reads/writes `<config_dir>/brandgrid/auth.json`
//! (0600 on Unix). If another tool in the same config dir has already
//! stored a token, the CLI picks it up automatically.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Where the active API token lives.
///
/// Injected into [`crate::AnnotationClient`] so tests and embedders can
/// substitute an in-memory double for the config-dir file.
pub trait TokenStore: Send + Sync {
    /// Store `value` as the active token, overwriting any prior value.
    /// Storing an empty string is allowed; it reads back as configured
    /// but unusable, which the client reports at call time.
    fn set(&self, value: &str) -> Result<(), String>;

    /// The stored token, or `None` when nothing has ever been stored.
    fn get(&self) -> Option<String>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
}

/// File-backed store: one JSON file holding the token.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<config_dir>/brandgrid/auth.json`.
    /// Returns `None` if the platform config directory cannot be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|c| c.join("brandgrid/auth.json"))
    }

    /// Store at the default location.
    pub fn at_default_path() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn set(&self, value: &str) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let contents = serde_json::to_string_pretty(&StoredToken {
            token: value.to_string(),
        })
        .map_err(|e| format!("Failed to serialize token: {}", e))?;

        std::fs::write(&self.path, &contents)
            .map_err(|e| format!("Failed to write auth file: {}", e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&self.path, permissions)
                .map_err(|e| format!("Failed to set file permissions: {}", e))?;
        }

        Ok(())
    }

    fn get(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let stored: StoredToken = serde_json::from_str(&contents).ok()?;
        Some(stored.token)
    }
}

/// In-memory store for tests and single-process embedding.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn set(&self, value: &str) -> Result<(), String> {
        *self.token.lock().expect("token store mutex poisoned") = Some(value.to_string());
        Ok(())
    }

    fn get(&self) -> Option<String> {
        self.token.lock().expect("token store mutex poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("auth.json"));

        assert!(store.get().is_none());
        store.set("tok_abc123").unwrap();
        assert_eq!(store.get().as_deref(), Some("tok_abc123"));

        // Overwrite
        store.set("tok_newer").unwrap();
        assert_eq!(store.get().as_deref(), Some("tok_newer"));
    }

    #[test]
    fn test_file_store_empty_token_is_stored() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("auth.json"));

        store.set("").unwrap();
        assert_eq!(store.get().as_deref(), Some(""));
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested/deeper/auth.json"));

        store.set("tok").unwrap();
        assert_eq!(store.get().as_deref(), Some("tok"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("auth.json"));
        store.set("tok").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_file_store_invalid_json_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileTokenStore::new(path);
        assert!(store.get().is_none());
    }

    #[test]
    fn test_default_path_shape() {
        let path = FileTokenStore::default_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("brandgrid"));
        assert!(path.to_string_lossy().contains("auth.json"));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(store.get().is_none());
        store.set("abc").unwrap();
        assert_eq!(store.get().as_deref(), Some("abc"));

        let seeded = MemoryTokenStore::with_token("xyz");
        assert_eq!(seeded.get().as_deref(), Some("xyz"));
    }
}
