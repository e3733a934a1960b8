//! Favorite match ids, persisted write-through to a key-value store.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{ClientConfig, FAVORITES_KEY};
use crate::error::{MatchdayError, Result};
use crate::model::Match;

/// Durable string storage addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// Process-local store, mostly useful in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// A JSON object on disk, one string value per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored value. A missing file is an empty store; an unreadable
    /// or unparsable one is an error so that `set` never clobbers it.
    fn read_all(&self) -> Result<HashMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(self.storage_error(e)),
        };
        serde_json::from_str(&raw)
            .map_err(|e| self.storage_error(io::Error::new(ErrorKind::InvalidData, e)))
    }

    fn storage_error(&self, source: io::Error) -> MatchdayError {
        MatchdayError::Storage {
            path: self.path.clone(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_all()
            .inspect_err(|e| warn!(error = %e, "ignoring unreadable store"))
            .ok()?
            .remove(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);
        let raw = serde_json::to_string_pretty(&values)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
        }
        fs::write(&self.path, raw).map_err(|e| self.storage_error(e))
    }
}

/// The set of favorite match ids.
///
/// Loaded once from `store`; every [`toggle`](Self::toggle) rewrites the
/// whole set under [`FAVORITES_KEY`] as a JSON array of strings.
#[derive(Debug)]
pub struct FavoritesStore<K: KeyValueStore> {
    store: K,
    ids: BTreeSet<String>,
}

impl FavoritesStore<FileStore> {
    /// Open the file-backed store at the configured path.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::load(FileStore::new(&config.favorites_path))
    }
}

impl<K: KeyValueStore> FavoritesStore<K> {
    /// Read the saved set. A missing or unreadable value means no favorites.
    pub fn load(store: K) -> Self {
        let ids = match store.get(FAVORITES_KEY) {
            None => BTreeSet::new(),
            Some(raw) => serde_json::from_str::<Vec<String>>(&raw)
                .map(|ids| ids.into_iter().collect())
                .unwrap_or_else(|e| {
                    debug!(error = %e, "ignoring unreadable favorites");
                    BTreeSet::new()
                }),
        };
        debug!(count = ids.len(), "loaded favorites");
        Self { store, ids }
    }

    /// Flip membership of `id` and persist. Returns whether `id` is now a
    /// favorite.
    ///
    /// If persisting fails the in-memory set is left as it was.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let added = if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string())
        };

        if let Err(e) = self.persist() {
            warn!(error = %e, id, "failed to save favorites");
            if added {
                self.ids.remove(id);
            } else {
                self.ids.insert(id.to_string());
            }
            return Err(e);
        }
        Ok(added)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// The favorites among `matches`, in their original order.
    pub fn filter_favorites(&self, matches: &[Match]) -> Vec<Match> {
        matches
            .iter()
            .filter(|m| self.is_favorite(&m.id))
            .cloned()
            .collect()
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn into_inner(self) -> K {
        self.store
    }

    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.ids)?;
        self.store.set(FAVORITES_KEY, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::to_match;
    use crate::test_support::raw_event;

    fn fixture(id: &str) -> Match {
        to_match(&raw_event(id, Some("FT"), Some("1"), Some("1"))).unwrap()
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: String) -> Result<()> {
            Err(MatchdayError::Storage {
                path: PathBuf::from("/dev/full"),
                source: io::Error::other("disk full"),
            })
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("matchday-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let mut favorites = FavoritesStore::load(MemoryStore::default());

        assert!(favorites.toggle("2052711").unwrap());
        assert!(favorites.is_favorite("2052711"));
        assert_eq!(favorites.count(), 1);

        assert!(!favorites.toggle("2052711").unwrap());
        assert!(!favorites.is_favorite("2052711"));
        assert_eq!(favorites.count(), 0);
    }

    #[test]
    fn test_toggle_survives_reload() {
        let mut favorites = FavoritesStore::load(MemoryStore::default());
        favorites.toggle("b").unwrap();
        favorites.toggle("a").unwrap();

        let store = favorites.into_inner();
        assert_eq!(store.get(FAVORITES_KEY).as_deref(), Some(r#"["a","b"]"#));

        let reloaded = FavoritesStore::load(store);
        assert_eq!(reloaded.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_corrupt_value_loads_as_empty() {
        let mut store = MemoryStore::default();
        store.set(FAVORITES_KEY, "{not json".to_string()).unwrap();

        let favorites = FavoritesStore::load(store);
        assert_eq!(favorites.count(), 0);
    }

    #[test]
    fn test_wrong_shape_loads_as_empty() {
        let mut store = MemoryStore::default();
        store.set(FAVORITES_KEY, "[1, 2]".to_string()).unwrap();

        assert_eq!(FavoritesStore::load(store).count(), 0);
    }

    #[test]
    fn test_failed_persist_reverts_toggle() {
        let mut favorites = FavoritesStore::load(FailingStore);

        let err = favorites.toggle("1").unwrap_err();
        assert!(matches!(err, MatchdayError::Storage { .. }));
        assert!(!favorites.is_favorite("1"));
    }

    #[test]
    fn test_filter_favorites_preserves_order() {
        let mut favorites = FavoritesStore::load(MemoryStore::default());
        favorites.toggle("3").unwrap();
        favorites.toggle("1").unwrap();

        let matches = vec![fixture("1"), fixture("2"), fixture("3")];
        let ids: Vec<String> = favorites
            .filter_favorites(&matches)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("round-trip");
        let _ = fs::remove_file(&path);

        let mut favorites = FavoritesStore::load(FileStore::new(&path));
        favorites.toggle("2052711").unwrap();
        drop(favorites);

        let reloaded = FavoritesStore::load(FileStore::new(&path));
        assert!(reloaded.is_favorite("2052711"));

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains(FAVORITES_KEY));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_keeps_other_keys() {
        let path = temp_path("other-keys");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let mut store = FileStore::new(&path);
        store.set(FAVORITES_KEY, "[]".to_string()).unwrap();

        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        assert_eq!(store.get(FAVORITES_KEY).as_deref(), Some("[]"));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_store_refuses_to_overwrite_unparsable_file() {
        let path = temp_path("corrupt");
        fs::write(&path, r#"{"theme": ["dark"]"#).unwrap();

        let mut favorites = FavoritesStore::load(FileStore::new(&path));
        assert_eq!(favorites.count(), 0);

        let err = favorites.toggle("1").unwrap_err();
        assert!(matches!(err, MatchdayError::Storage { .. }), "got {err:?}");
        assert!(!favorites.is_favorite("1"));
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"theme": ["dark"]"#);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_empty() {
        let favorites = FavoritesStore::load(FileStore::new(temp_path("missing")));
        assert_eq!(favorites.count(), 0);
    }

    #[test]
    fn test_from_config_uses_favorites_path() {
        let path = temp_path("config");
        let config = ClientConfig {
            favorites_path: path.clone(),
            ..ClientConfig::default()
        };

        let favorites = FavoritesStore::from_config(&config);
        assert_eq!(favorites.into_inner().path(), path.as_path());
    }
}
