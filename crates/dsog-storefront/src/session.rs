//! Franchisee session.
//!
//! A shopper arriving through `?franchisee=<code>` or `?ref=<code>` is tied
//! to that franchisee: the choice is persisted and restored on later visits
//! that carry no code.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use dsog_commerce::checkout::OrderContact;
use dsog_commerce::franchisee::{Franchisee, FranchiseeDirectory, FranchiseeRecord};
use dsog_commerce::FranchiseeCode;
use tracing::{debug, info, warn};

use crate::error::SessionError;

/// Where the selected franchisee is remembered between runs.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<FranchiseeRecord>, SessionError>;
    fn save(&self, record: &FranchiseeRecord) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;
}

/// Stores the record as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<FranchiseeRecord>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, record: &FranchiseeRecord) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(record)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<FranchiseeRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<FranchiseeRecord>, SessionError> {
        Ok(self.record.lock()?.clone())
    }

    fn save(&self, record: &FranchiseeRecord) -> Result<(), SessionError> {
        *self.record.lock()? = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.record.lock()? = None;
        Ok(())
    }
}

/// The franchisee orders are routed through, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FranchiseeSession {
    current: Option<(FranchiseeCode, Franchisee)>,
}

impl FranchiseeSession {
    /// Session with no franchisee.
    pub fn none() -> Self {
        Self::default()
    }

    /// Resolve the active franchisee.
    ///
    /// A known code in `query` wins and is persisted. Otherwise the stored
    /// record is restored, provided its code is still in `directory`. Store
    /// failures are logged and leave the session empty.
    pub fn resolve(
        directory: &FranchiseeDirectory,
        store: &dyn SessionStore,
        query: Option<&str>,
    ) -> Self {
        if let Some(code) = query.and_then(|q| directory.code_from_query(q)) {
            if let Some(franchisee) = directory.get(code.as_str()) {
                info!(code = %code, name = %franchisee.name, "franchisee selected");
                let record = FranchiseeRecord::new(code.clone(), franchisee, Utc::now());
                if let Err(e) = store.save(&record) {
                    warn!(error = %e, "failed to persist franchisee session");
                }
                return Self {
                    current: Some((code, franchisee.clone())),
                };
            }
        }

        match store.load() {
            Ok(Some(record)) => match directory.get(record.code.as_str()) {
                Some(franchisee) => {
                    debug!(code = %record.code, "franchisee restored");
                    Self {
                        current: Some((record.code, franchisee.clone())),
                    }
                }
                None => {
                    debug!(code = %record.code, "stored franchisee no longer listed");
                    Self::none()
                }
            },
            Ok(None) => Self::none(),
            Err(e) => {
                warn!(error = %e, "failed to load franchisee session");
                Self::none()
            }
        }
    }

    pub fn current(&self) -> Option<&Franchisee> {
        self.current.as_ref().map(|(_, f)| f)
    }

    pub fn code(&self) -> Option<&FranchiseeCode> {
        self.current.as_ref().map(|(code, _)| code)
    }

    /// `main_line`, rerouted through the active franchisee.
    pub fn contact(&self, main_line: OrderContact) -> OrderContact {
        main_line.through(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> FranchiseeDirectory {
        let mut dir = FranchiseeDirectory::new();
        dir.insert("john", Franchisee::new("John Mwangi", "254722111111", "Nairobi CBD"));
        dir.insert("grace", Franchisee::new("Grace Wambui", "254722444444", "Kisumu"));
        dir
    }

    fn main_line() -> OrderContact {
        OrderContact::main_line("DSOG STORES", "254733737983")
    }

    #[test]
    fn test_query_code_selects_and_persists() {
        let store = MemorySessionStore::new();
        let session = FranchiseeSession::resolve(&directory(), &store, Some("?franchisee=john"));

        assert_eq!(session.current().unwrap().name, "John Mwangi");
        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.code.as_str(), "john");
        assert_eq!(saved.phone, "254722111111");
    }

    #[test]
    fn test_restores_from_store_without_query() {
        let store = MemorySessionStore::new();
        FranchiseeSession::resolve(&directory(), &store, Some("ref=grace"));

        let session = FranchiseeSession::resolve(&directory(), &store, None);
        assert_eq!(session.code().unwrap().as_str(), "grace");
    }

    #[test]
    fn test_unknown_code_falls_back_to_store() {
        let store = MemorySessionStore::new();
        let session = FranchiseeSession::resolve(&directory(), &store, Some("franchisee=ghost"));
        assert!(session.current().is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_stale_stored_code_ignored() {
        let store = MemorySessionStore::new();
        let gone = Franchisee::new("Old", "1", "Nowhere");
        store
            .save(&FranchiseeRecord::new("old".into(), &gone, Utc::now()))
            .unwrap();

        let session = FranchiseeSession::resolve(&directory(), &store, None);
        assert_eq!(session, FranchiseeSession::none());
    }

    #[test]
    fn test_contact_routes_through_franchisee() {
        let store = MemorySessionStore::new();
        let session = FranchiseeSession::resolve(&directory(), &store, Some("franchisee=john"));
        let contact = session.contact(main_line());
        assert_eq!(contact.number(), "254722111111");
        assert_eq!(contact.name(), "John Mwangi");

        let contact = FranchiseeSession::none().contact(main_line());
        assert_eq!(contact.number(), "254733737983");
        assert_eq!(contact.name(), "DSOG STORES");
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        assert!(store.load().unwrap().is_none());

        FranchiseeSession::resolve(&directory(), &store, Some("franchisee=grace"));
        let record = store.load().unwrap().unwrap();
        assert_eq!(record.location, "Kisumu");

        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_poisoned_memory_store_reports_errors() {
        let store = std::sync::Arc::new(MemorySessionStore::new());
        let holder = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _slot = holder.record.lock().unwrap();
            panic!("panic while holding the session lock");
        })
        .join();

        assert!(matches!(store.load(), Err(SessionError::Poisoned)));
        assert!(matches!(store.clear(), Err(SessionError::Poisoned)));
        let john = Franchisee::new("John Mwangi", "254722111111", "Nairobi CBD");
        let record = FranchiseeRecord::new("john".into(), &john, Utc::now());
        assert!(matches!(store.save(&record), Err(SessionError::Poisoned)));

        let session = FranchiseeSession::resolve(&directory(), &*store, Some("franchisee=john"));
        assert_eq!(session.code().unwrap().as_str(), "john");
        assert!(FranchiseeSession::resolve(&directory(), &*store, None)
            .current()
            .is_none());
    }

    #[test]
    fn test_corrupt_file_leaves_session_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(matches!(store.load(), Err(SessionError::Json(_))));
        let session = FranchiseeSession::resolve(&directory(), &store, None);
        assert!(session.current().is_none());
    }
}
