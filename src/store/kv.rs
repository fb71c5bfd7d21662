// Key-value store with fallback-on-failure semantics.
// Reads return a caller-supplied default on any failure; writes are
// fire-and-forget. Backed by one JSON file per key, or a map in memory.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Serialize, de::DeserializeOwned};

use super::paths;

/// Clonable handle to the persistent key-value store.
///
/// Every operation swallows backend failures: `get` falls back to the
/// supplied default, `set`/`remove`/`clear` simply have no effect. A session
/// against an unavailable backend degrades to non-persistent behavior.
#[derive(Debug, Clone)]
pub struct Store {
    backend: Backend,
}

#[derive(Debug, Clone)]
enum Backend {
    Disk(PathBuf),
    Memory(Arc<Mutex<HashMap<String, String>>>),
}

impl Store {
    /// Open the store at the default location, or in memory when no data
    /// directory can be resolved.
    pub fn open() -> Self {
        match paths::store_dir() {
            Some(dir) => Self::at(dir),
            None => Self::in_memory(),
        }
    }

    /// Open a store rooted at a specific directory.
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            backend: Backend::Disk(dir.as_ref().to_path_buf()),
        }
    }

    /// Create a store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(Mutex::new(HashMap::new()))),
        }
    }

    /// Read and deserialize the value under `key`, or return `fallback` when
    /// the key is absent, the backend is unavailable, or the payload is
    /// corrupt.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.read_raw(key) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or(fallback),
            None => fallback,
        }
    }

    /// Serialize and persist `value` under `key`. Failures are swallowed.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let Ok(json) = serde_json::to_string(value) else {
            return;
        };
        match &self.backend {
            Backend::Disk(dir) => {
                let _ = write_atomic(&dir.join(paths::key_file(key)), &json);
            }
            Backend::Memory(map) => {
                if let Ok(mut map) = map.lock() {
                    map.insert(key.to_string(), json);
                }
            }
        }
    }

    /// Delete the entry under `key`. Failures are swallowed.
    pub fn remove(&self, key: &str) {
        match &self.backend {
            Backend::Disk(dir) => {
                let _ = fs::remove_file(dir.join(paths::key_file(key)));
            }
            Backend::Memory(map) => {
                if let Ok(mut map) = map.lock() {
                    map.remove(key);
                }
            }
        }
    }

    /// Delete every entry (global reset).
    pub fn clear(&self) {
        match &self.backend {
            Backend::Disk(dir) => {
                let _ = fs::remove_dir_all(dir);
            }
            Backend::Memory(map) => {
                if let Ok(mut map) = map.lock() {
                    map.clear();
                }
            }
        }
    }

    fn read_raw(&self, key: &str) -> Option<String> {
        match &self.backend {
            Backend::Disk(dir) => fs::read_to_string(dir.join(paths::key_file(key))).ok(),
            Backend::Memory(map) => map.lock().ok()?.get(key).cloned(),
        }
    }
}

/// Write via temp file + rename so a crash never leaves a half-written entry.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Prefs {
        city: String,
        count: i32,
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::at(temp_dir.path());

        let prefs = Prefs {
            city: "Paris".to_string(),
            count: 3,
        };
        store.set("weather:city", &prefs);

        let read: Prefs = store.get(
            "weather:city",
            Prefs {
                city: String::new(),
                count: 0,
            },
        );
        assert_eq!(read, prefs);
    }

    #[test]
    fn test_get_missing_key_returns_fallback() {
        let store = Store::in_memory();
        assert_eq!(store.get("todos", Vec::<String>::new()), Vec::<String>::new());
        assert!(store.get("clock24h", true));
    }

    #[test]
    fn test_get_corrupt_value_returns_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::at(temp_dir.path());
        std::fs::write(
            temp_dir.path().join(paths::key_file("theme")),
            b"{ not json",
        )
        .unwrap();

        let theme: String = store.get("theme", "auto".to_string());
        assert_eq!(theme, "auto");
    }

    #[test]
    fn test_unavailable_backend_degrades_silently() {
        let temp_dir = TempDir::new().unwrap();
        // Root the store at a path occupied by a regular file: every read
        // and write against it fails.
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let store = Store::at(&blocker);

        store.set("theme", &"dark");
        let theme: String = store.get("theme", "auto".to_string());
        assert_eq!(theme, "auto");

        store.remove("theme");
        store.clear();
    }

    #[test]
    fn test_remove_deletes_entry() {
        let store = Store::in_memory();
        store.set("newsFeedSelected", &"https://example.com/rss");
        store.remove("newsFeedSelected");
        let selected: String = store.get("newsFeedSelected", "default".to_string());
        assert_eq!(selected, "default");
    }

    #[test]
    fn test_clear_resets_everything() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::at(temp_dir.path().join("store"));
        store.set("todos", &vec!["a", "b"]);
        store.set("clock24h", &false);

        store.clear();
        assert_eq!(store.get("todos", Vec::<String>::new()).len(), 0);
        assert!(store.get("clock24h", true));
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let store = Store::in_memory();
        store.set("weather:unit", &"c");
        store.set("weather:unit", &"f");
        let unit: String = store.get("weather:unit", "c".to_string());
        assert_eq!(unit, "f");
    }
}
