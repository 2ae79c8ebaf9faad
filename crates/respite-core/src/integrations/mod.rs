pub mod auth;
pub mod spotify;

pub use auth::AuthConfig;
pub use spotify::PlayerApi;

/// Thin wrapper around the OS keyring for credential storage.
pub mod keyring_store {
    const SERVICE: &str = "respite";

    pub fn get(key: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.get_password() {
            Ok(pw) => Ok(Some(pw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set(key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        entry.set_password(value)?;
        Ok(())
    }

    pub fn delete(key: &str) -> Result<(), Box<dyn std::error::Error>> {
        let entry = keyring::Entry::new(SERVICE, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

const TOKEN_KEY: &str = "spotify_access_token";

/// Where the playback credential lives between runs.
///
/// The controller only ever holds one bearer token; this seam keeps the OS
/// keyring out of tests.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), Box<dyn std::error::Error>>;
    fn clear(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// Keyring-backed token store used by the application.
pub struct KeyringTokenStore;

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Option<String> {
        keyring_store::get(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) -> Result<(), Box<dyn std::error::Error>> {
        keyring_store::set(TOKEN_KEY, token)
    }

    fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        keyring_store::delete(TOKEN_KEY)
    }
}

/// In-memory token store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore(std::sync::Mutex<Option<String>>);

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self(std::sync::Mutex::new(Some(token.into())))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.0.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, token: &str) -> Result<(), Box<dyn std::error::Error>> {
        if let Ok(mut guard) = self.0.lock() {
            *guard = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Ok(mut guard) = self.0.lock() {
            *guard = None;
        }
        Ok(())
    }
}
