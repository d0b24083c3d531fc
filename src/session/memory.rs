use std::collections::HashMap;
use std::sync::Mutex;

use super::{ACCESS_TOKEN_KEY, SessionResult, SessionStore};

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries().insert(ACCESS_TOKEN_KEY.to_string(), token.into());
        store
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock cannot leave the map half-written
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> SessionResult<Option<String>> {
        Ok(self.entries().get(ACCESS_TOKEN_KEY).cloned())
    }

    fn set(&self, token: &str) -> SessionResult<()> {
        self.entries()
            .insert(ACCESS_TOKEN_KEY.to_string(), token.to_string());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        self.entries().remove(ACCESS_TOKEN_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn set_then_clear() {
        let store = MemorySessionStore::new();
        store.set("tok-1").unwrap();
        assert_eq!(store.get().unwrap(), Some("tok-1".to_string()));

        store.set("tok-2").unwrap();
        assert_eq!(store.get().unwrap(), Some("tok-2".to_string()));

        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn clear_on_empty_store_is_ok() {
        let store = MemorySessionStore::new();
        assert!(store.clear().is_ok());
    }

    #[test]
    fn with_token_prefills() {
        let store = MemorySessionStore::with_token("abc");
        assert_eq!(store.get().unwrap().as_deref(), Some("abc"));
    }
}
