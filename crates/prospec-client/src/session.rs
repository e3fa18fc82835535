//! Session Store
//!
//! Holds the authenticated identity plus the access and refresh tokens,
//! backed by durable storage under three fixed keys. The session is an
//! explicit object injected where needed, restored from storage at process
//! start and torn down on logout; there is no ambient singleton.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use prospec_core::Role;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "auth_user";

/// The authenticated user as the server describes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "roleDisplayName")]
    pub role_display_name: String,
}

/// Durable key/value persistence behind the session.
pub trait SessionStorage: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage, used by tests and one-shot invocations.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<std::collections::HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        self.entries.write().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
    }
}

/// One file per key under a directory, `~/.config/prospec` by default.
pub struct FileStorage {
    dir: std::path::PathBuf,
}

impl FileStorage {
    pub fn new(dir: std::path::PathBuf) -> Self {
        Self { dir }
    }

    pub fn default_dir() -> Option<Self> {
        dirs::config_dir().map(|d| Self::new(d.join("prospec")))
    }
}

impl SessionStorage for FileStorage {
    fn load(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.join(key)).ok()
    }

    fn save(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(self.dir.join(key), value))
        {
            tracing::warn!(key, error = %e, "failed to persist session entry");
        }
    }

    fn remove(&self, key: &str) {
        let _ = std::fs::remove_file(self.dir.join(key));
    }
}

#[derive(Default)]
struct SessionState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    identity: Option<Identity>,
}

/// Explicit session object shared by the gateway and the services.
pub struct Session {
    storage: Box<dyn SessionStorage>,
    state: RwLock<SessionState>,
}

impl Session {
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self { storage, state: RwLock::new(SessionState::default()) }
    }

    /// Reads the stored tokens and identity back, restoring a logged-in
    /// state without re-authenticating.
    pub fn restore(storage: Box<dyn SessionStorage>) -> Self {
        let state = SessionState {
            access_token: storage.load(ACCESS_TOKEN_KEY),
            refresh_token: storage.load(REFRESH_TOKEN_KEY),
            identity: storage
                .load(USER_KEY)
                .and_then(|raw| serde_json::from_str(&raw).ok()),
        };
        Self { storage, state: RwLock::new(state) }
    }

    /// Persists a successful login.
    pub fn store_login(&self, identity: Identity, access_token: &str, refresh_token: &str) {
        self.storage.save(ACCESS_TOKEN_KEY, access_token);
        self.storage.save(REFRESH_TOKEN_KEY, refresh_token);
        if let Ok(raw) = serde_json::to_string(&identity) {
            self.storage.save(USER_KEY, &raw);
        }
        let mut state = self.state.write();
        state.access_token = Some(access_token.to_string());
        state.refresh_token = Some(refresh_token.to_string());
        state.identity = Some(identity);
    }

    /// Replaces the access token after a refresh; the refresh token stays.
    pub fn set_access_token(&self, access_token: &str) {
        self.storage.save(ACCESS_TOKEN_KEY, access_token);
        self.state.write().access_token = Some(access_token.to_string());
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.read().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.state.read().refresh_token.clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.read().identity.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().access_token.is_some()
    }

    /// Removes all three storage keys and forgets the in-memory state.
    pub fn clear(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(USER_KEY);
        *self.state.write() = SessionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: 7,
            last_name: "Alaoui".into(),
            first_name: "Sara".into(),
            email: "sara@exemple.ma".into(),
            role: Role::Agent,
            role_display_name: "Agent".into(),
        }
    }

    #[test]
    fn test_login_then_restore() {
        let storage = MemoryStorage::new();
        {
            let session = Session::new(Box::new(storage));
            session.store_login(identity(), "acc-1", "ref-1");
            assert!(session.is_authenticated());

            // restore from the same backing entries
            let restored = Session::restore(Box::new(MemoryStorage {
                entries: RwLock::new(
                    [
                        (ACCESS_TOKEN_KEY.to_string(), "acc-1".to_string()),
                        (REFRESH_TOKEN_KEY.to_string(), "ref-1".to_string()),
                        (
                            USER_KEY.to_string(),
                            serde_json::to_string(&identity()).unwrap(),
                        ),
                    ]
                    .into_iter()
                    .collect(),
                ),
            }));
            assert!(restored.is_authenticated());
            assert_eq!(restored.identity().unwrap().role, Role::Agent);
            assert_eq!(restored.access_token().as_deref(), Some("acc-1"));
        }
    }

    #[test]
    fn test_clear_removes_all_three_keys() {
        let storage = MemoryStorage::new();
        let session = Session::new(Box::new(storage));
        session.store_login(identity(), "acc-1", "ref-1");

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.access_token().is_none());
        assert!(session.refresh_token().is_none());
        assert!(session.identity().is_none());
    }

    #[test]
    fn test_refresh_replaces_only_access_token() {
        let session = Session::new(Box::new(MemoryStorage::new()));
        session.store_login(identity(), "acc-1", "ref-1");
        session.set_access_token("acc-2");
        assert_eq!(session.access_token().as_deref(), Some("acc-2"));
        assert_eq!(session.refresh_token().as_deref(), Some("ref-1"));
    }

    #[test]
    fn test_file_storage_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("session"));
        storage.save(ACCESS_TOKEN_KEY, "acc");
        assert_eq!(storage.load(ACCESS_TOKEN_KEY).as_deref(), Some("acc"));
        storage.remove(ACCESS_TOKEN_KEY);
        assert!(storage.load(ACCESS_TOKEN_KEY).is_none());
    }
}
