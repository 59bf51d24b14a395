//! Admin session persistence
//!
//! The session is nothing more than three key-value entries (`adminId`,
//! `adminName`, `adminEmail`). Having a name and an email stored is the whole
//! authorization signal: there is no token and no expiry. Views receive a
//! [`SessionStore`] explicitly so tests can hand them a fabricated session.

use campus_events_core::{AdminId, AdminIdentity};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage key for the admin id
pub const ADMIN_ID_KEY: &str = "adminId";
/// Storage key for the admin display name
pub const ADMIN_NAME_KEY: &str = "adminName";
/// Storage key for the admin email
pub const ADMIN_EMAIL_KEY: &str = "adminEmail";

/// String key-value storage backing the session
///
/// Failures are the backend's problem: callers assume reads and writes succeed.
pub trait KeyValueStorage: Send + Sync + fmt::Debug {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str);

    /// Remove a value if present
    fn remove(&self, key: &str);
}

/// Process-local storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

/// Storage persisted as a flat JSON object on disk
///
/// The file is read once when opened and rewritten after every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open storage at `path`, starting empty if the file is missing or unreadable
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read session file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        let result = serde_json::to_string_pretty(entries)
            .map_err(std::io::Error::from)
            .and_then(|raw| std::fs::write(&self.path, raw));

        if let Err(e) = result {
            warn!("Failed to write session file {}: {}", self.path.display(), e);
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.write();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write();
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

/// The locally stored claim of administrator identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    /// Administrator id, if one was stored and parses
    pub id: Option<AdminId>,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
}

/// Holder of the admin session consulted by protected views
pub trait SessionStore: Send + Sync + fmt::Debug {
    /// Persist an identity, overwriting any prior session
    fn login(&self, identity: &AdminIdentity);

    /// Current session, absent unless both name and email are stored
    fn current_session(&self) -> Option<AdminSession>;

    /// Erase every session field
    fn logout(&self);

    /// Whether a session is present
    fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }
}

/// [`SessionStore`] over any [`KeyValueStorage`]
#[derive(Debug, Default)]
pub struct LocalSessionStore<S> {
    storage: S,
}

/// Session store kept in memory
pub type MemorySessionStore = LocalSessionStore<MemoryStorage>;

/// Session store kept in a JSON file
pub type FileSessionStore = LocalSessionStore<FileStorage>;

impl<S: KeyValueStorage> LocalSessionStore<S> {
    /// Wrap a storage backend
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Underlying storage
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

impl MemorySessionStore {
    /// Empty in-memory session store
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }
}

impl FileSessionStore {
    /// Session store persisted at `path`
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileStorage::open(path))
    }
}

impl<S: KeyValueStorage> SessionStore for LocalSessionStore<S> {
    fn login(&self, identity: &AdminIdentity) {
        debug!(admin_id = identity.id, "Storing admin session");
        self.storage.set(ADMIN_ID_KEY, &identity.id.to_string());
        self.storage.set(ADMIN_NAME_KEY, &identity.name);
        self.storage.set(ADMIN_EMAIL_KEY, &identity.email);
    }

    fn current_session(&self) -> Option<AdminSession> {
        let name = self.storage.get(ADMIN_NAME_KEY).filter(|v| !v.is_empty())?;
        let email = self.storage.get(ADMIN_EMAIL_KEY).filter(|v| !v.is_empty())?;
        let id = self
            .storage
            .get(ADMIN_ID_KEY)
            .and_then(|raw| raw.parse().ok());

        Some(AdminSession { id, name, email })
    }

    fn logout(&self) {
        debug!("Clearing admin session");
        self.storage.remove(ADMIN_ID_KEY);
        self.storage.remove(ADMIN_NAME_KEY);
        self.storage.remove(ADMIN_EMAIL_KEY);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ann() -> AdminIdentity {
        AdminIdentity {
            id: 1,
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    #[test]
    fn test_login_persists_all_fields() {
        let store = MemorySessionStore::in_memory();
        store.login(&ann());

        assert_eq!(store.storage().get(ADMIN_ID_KEY).as_deref(), Some("1"));
        assert_eq!(store.storage().get(ADMIN_NAME_KEY).as_deref(), Some("Ann"));
        assert_eq!(
            store.storage().get(ADMIN_EMAIL_KEY).as_deref(),
            Some("a@x.com")
        );
        assert_eq!(
            store.current_session(),
            Some(AdminSession {
                id: Some(1),
                name: "Ann".to_string(),
                email: "a@x.com".to_string(),
            })
        );
    }

    #[test]
    fn test_login_overwrites_prior_session() {
        let store = MemorySessionStore::in_memory();
        store.login(&ann());
        store.login(&AdminIdentity {
            id: 2,
            name: "Bo".to_string(),
            email: "bo@x.com".to_string(),
        });

        let session = store.current_session().unwrap();
        assert_eq!(session.id, Some(2));
        assert_eq!(session.name, "Bo");
    }

    #[test]
    fn test_logout_clears_session() {
        let store = MemorySessionStore::in_memory();
        store.login(&ann());
        store.logout();

        assert!(store.current_session().is_none());
        assert!(!store.is_authenticated());
        assert!(store.storage().get(ADMIN_ID_KEY).is_none());
    }

    #[test]
    fn test_missing_name_or_email_means_absent() {
        let storage = MemoryStorage::new();
        storage.set(ADMIN_ID_KEY, "1");
        storage.set(ADMIN_NAME_KEY, "Ann");
        let store = LocalSessionStore::new(storage);
        assert!(store.current_session().is_none());

        store.storage().set(ADMIN_EMAIL_KEY, "");
        assert!(store.current_session().is_none());
    }

    #[test]
    fn test_fabricated_session_is_trusted() {
        // Nothing but presence is checked; no id is required either
        let storage = MemoryStorage::new();
        storage.set(ADMIN_NAME_KEY, "Mallory");
        storage.set(ADMIN_EMAIL_KEY, "m@x.com");
        let store = LocalSessionStore::new(storage);

        let session = store.current_session().unwrap();
        assert_eq!(session.id, None);
        assert_eq!(session.name, "Mallory");
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        FileSessionStore::at_path(&path).login(&ann());

        let reopened = FileSessionStore::at_path(&path);
        assert_eq!(reopened.current_session().unwrap().email, "a@x.com");

        reopened.logout();
        assert!(FileSessionStore::at_path(&path).current_session().is_none());
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::at_path(&path);
        assert!(store.current_session().is_none());

        store.login(&ann());
        assert!(FileSessionStore::at_path(&path).is_authenticated());
    }
}
