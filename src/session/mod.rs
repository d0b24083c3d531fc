//! Session token storage.
//!
//! The bearer token lives in a single key-value slot. Callers depend on the
//! [`SessionStore`] capability rather than a concrete location, so the CLI can
//! persist to disk while tests use an in-memory store.

mod file;
#[cfg(test)]
mod memory;

pub use file::FileSessionStore;
#[cfg(test)]
pub use memory::MemorySessionStore;

use thiserror::Error;

/// Fixed key the bearer token is stored under.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Get/set/clear access to the one live session token.
pub trait SessionStore: Send + Sync {
    /// Current token, if any.
    fn get(&self) -> SessionResult<Option<String>>;

    /// Replace the stored token.
    fn set(&self, token: &str) -> SessionResult<()>;

    /// Remove the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> SessionResult<()>;
}
