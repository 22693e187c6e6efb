//! API-key lifecycle across the durable and session-scoped targets.

use secrecy::{ExposeSecret, SecretString};

use crate::error::HubError;
use crate::storage::{StorageBackend, StorageTarget};

/// Key holding the raw credential in either target.
pub const API_KEY_KEY: &str = "gemini_api_key";
/// Key holding the active [`StorageTarget`] tag; only ever written to the
/// durable target.
pub const STORAGE_MODE_KEY: &str = "gemini_api_storage_mode";

pub(crate) const MISSING_KEY_MESSAGE: &str = "API Key를 입력해 주세요.";

/// The user's Gemini API key.
#[derive(Debug)]
pub struct Credential(SecretString);

impl Credential {
    /// Trims `raw`; returns `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Credential(SecretString::new(trimmed.to_string())))
        }
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// First four and last four characters, the rest elided.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.expose().chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

/// Keeps the credential in exactly one of two injected targets.
#[derive(Debug)]
pub struct CredentialStore<D, S> {
    durable: D,
    session: S,
}

impl<D: StorageBackend, S: StorageBackend> CredentialStore<D, S> {
    pub fn new(durable: D, session: S) -> Self {
        Self { durable, session }
    }

    pub fn durable(&self) -> &D {
        &self.durable
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    fn backend(&self, target: StorageTarget) -> &dyn StorageBackend {
        match target {
            StorageTarget::Durable => &self.durable,
            StorageTarget::Session => &self.session,
        }
    }

    fn backend_mut(&mut self, target: StorageTarget) -> &mut dyn StorageBackend {
        match target {
            StorageTarget::Durable => &mut self.durable,
            StorageTarget::Session => &mut self.session,
        }
    }

    /// Preference record as written by the last save, if any.
    pub fn stored_preference(&self) -> Option<StorageTarget> {
        match self.durable.get(STORAGE_MODE_KEY) {
            Ok(tag) => tag.as_deref().and_then(StorageTarget::from_tag),
            Err(err) => {
                log::warn!("Failed to read storage preference: {err}");
                None
            }
        }
    }

    /// Persisted preference, `Durable` when unset or unreadable.
    pub fn preference(&self) -> StorageTarget {
        self.stored_preference().unwrap_or_default()
    }

    /// Active credential, or an empty string when none is stored.
    pub fn load(&self) -> String {
        let target = self.preference();
        match self.backend(target).get(API_KEY_KEY) {
            Ok(value) => value.unwrap_or_default(),
            Err(err) => {
                log::warn!("Failed to read API key from {target} storage: {err}");
                String::new()
            }
        }
    }

    pub fn load_credential(&self) -> Option<Credential> {
        Credential::parse(&self.load())
    }

    /// Stores the trimmed key in `target` and drops any copy in the other
    /// target. The preference itself always goes to the durable target.
    ///
    /// The preference only moves once the key is written, so a failed write
    /// leaves the previously active key loadable.
    pub fn save(&mut self, raw: &str, target: StorageTarget) -> Result<Credential, HubError> {
        let credential =
            Credential::parse(raw).ok_or_else(|| HubError::validation(MISSING_KEY_MESSAGE))?;

        self.backend_mut(target)
            .set(API_KEY_KEY, credential.expose())?;
        self.durable.set(STORAGE_MODE_KEY, target.tag())?;
        self.backend_mut(target.other()).remove(API_KEY_KEY)?;

        log::debug!("API key saved to {target} storage");
        Ok(credential)
    }

    /// Removes the key from both targets along with the preference record.
    pub fn clear(&mut self) {
        for target in [StorageTarget::Durable, StorageTarget::Session] {
            if let Err(err) = self.backend_mut(target).remove(API_KEY_KEY) {
                log::warn!("Failed to remove API key from {target} storage: {err}");
            }
        }
        if let Err(err) = self.durable.remove(STORAGE_MODE_KEY) {
            log::warn!("Failed to remove storage preference: {err}");
        }
        log::debug!("API key cleared");
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::storage::MemoryBackend;

    type MemoryStore = CredentialStore<MemoryBackend, MemoryBackend>;

    fn store() -> MemoryStore {
        CredentialStore::new(MemoryBackend::new(), MemoryBackend::new())
    }

    fn stored_key(store: &MemoryStore, target: StorageTarget) -> Option<String> {
        let backend: &MemoryBackend = match target {
            StorageTarget::Durable => store.durable(),
            StorageTarget::Session => store.session(),
        };
        backend.get(API_KEY_KEY).unwrap()
    }

    fn any_target() -> impl Strategy<Value = StorageTarget> {
        prop_oneof![Just(StorageTarget::Durable), Just(StorageTarget::Session)]
    }

    proptest! {
        #[test]
        fn save_then_load_returns_key(
            key in "[A-Za-z0-9_-]{1,40}",
            pad in " {0,3}",
            target in any_target(),
        ) {
            let mut store = store();
            store.save(&format!("{pad}{key}{pad}"), target).unwrap();
            prop_assert_eq!(store.load(), key.clone());
            prop_assert_eq!(stored_key(&store, target), Some(key));
            prop_assert_eq!(stored_key(&store, target.other()), None);
            prop_assert_eq!(store.preference(), target);
        }
    }

    #[test]
    fn load_defaults_to_durable_when_preference_unset() {
        let mut durable = MemoryBackend::new();
        durable.set(API_KEY_KEY, "durable-key").unwrap();
        let mut session = MemoryBackend::new();
        session.set(API_KEY_KEY, "session-key").unwrap();
        let store = CredentialStore::new(durable, session);

        assert_eq!(store.preference(), StorageTarget::Durable);
        assert_eq!(store.load(), "durable-key");
    }

    #[test]
    fn empty_store_loads_empty_string() {
        assert_eq!(store().load(), "");
        assert!(store().load_credential().is_none());
    }

    #[rstest]
    #[case(StorageTarget::Durable)]
    #[case(StorageTarget::Session)]
    fn blank_save_fails_and_keeps_prior_state(#[case] target: StorageTarget) {
        let mut store = store();
        store.save("original", StorageTarget::Session).unwrap();

        let err = store.save("   ", target).unwrap_err();
        assert!(matches!(err, HubError::Validation(_)));
        assert_eq!(store.load(), "original");
        assert_eq!(store.preference(), StorageTarget::Session);
    }

    #[test]
    fn moving_target_deletes_stale_copy() {
        let mut store = store();
        store.save("k1", StorageTarget::Durable).unwrap();
        store.save("k2", StorageTarget::Session).unwrap();

        assert_eq!(stored_key(&store, StorageTarget::Durable), None);
        assert_eq!(stored_key(&store, StorageTarget::Session).as_deref(), Some("k2"));
        assert_eq!(store.load(), "k2");
    }

    #[rstest]
    #[case(StorageTarget::Durable)]
    #[case(StorageTarget::Session)]
    fn clear_then_load_is_empty(#[case] target: StorageTarget) {
        let mut store = store();
        store.save("key", target).unwrap();
        store.clear();

        assert_eq!(store.load(), "");
        assert_eq!(store.durable().get(STORAGE_MODE_KEY).unwrap(), None);
        assert!(store.durable().is_empty());
        assert!(store.session().is_empty());
    }

    #[test]
    fn clear_on_empty_store_succeeds() {
        let mut store = store();
        store.clear();
        assert_eq!(store.load(), "");
    }

    #[test]
    fn save_is_idempotent() {
        let mut store = store();
        store.save("key", StorageTarget::Session).unwrap();
        store.save("key", StorageTarget::Session).unwrap();
        assert_eq!(store.load(), "key");
        assert_eq!(stored_key(&store, StorageTarget::Durable), None);
    }

    #[derive(Debug)]
    struct BrokenBackend;

    impl StorageBackend for BrokenBackend {
        fn get(&self, _key: &str) -> io::Result<Option<String>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn set(&mut self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn remove(&mut self, _key: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn broken_backend_never_breaks_load_or_clear() {
        let mut store = CredentialStore::new(BrokenBackend, MemoryBackend::new());
        assert_eq!(store.load(), "");
        store.clear();
        let err = store.save("key", StorageTarget::Session).unwrap_err();
        assert!(matches!(err, HubError::Storage(_)));
    }

    #[test]
    fn failed_session_write_keeps_durable_key_active() {
        let mut durable = MemoryBackend::new();
        durable.set(API_KEY_KEY, "old-key").unwrap();
        durable
            .set(STORAGE_MODE_KEY, StorageTarget::Durable.tag())
            .unwrap();
        let mut store = CredentialStore::new(durable, BrokenBackend);

        let err = store.save("new-key", StorageTarget::Session).unwrap_err();
        assert!(matches!(err, HubError::Storage(_)));
        assert_eq!(store.load(), "old-key");
        assert_eq!(store.preference(), StorageTarget::Durable);
    }

    #[test]
    fn masked_hides_the_middle() {
        let credential = Credential::parse(" AIzaSyABCDEFGHwxyz ").unwrap();
        assert_eq!(credential.masked(), "AIza…wxyz");
        assert_eq!(Credential::parse("short").unwrap().masked(), "*****");
        assert!(Credential::parse(" \t").is_none());
    }
}
