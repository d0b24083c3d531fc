pub mod companies;
pub mod query;
pub mod session;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use log::debug;

use crate::api::{DataError, DataProvider, FetchWrapper, HttpTransport};
use crate::auth::AuthProvider;
use crate::config::Config;
use crate::session::{FileSessionStore, SessionStore};

/// The wired-up client stack shared by every command.
pub struct Services {
    pub data: Arc<DataProvider>,
    pub auth: AuthProvider,
}

impl Services {
    /// Build the stack against the configured API, with the token persisted on disk.
    pub fn connect(config: &Config) -> Result<Self> {
        let store = FileSessionStore::open_default().context("Failed to locate session storage")?;
        debug!("Session file: {}", store.path().display());
        let store: Arc<dyn SessionStore> = Arc::new(store);

        let transport = Arc::new(HttpTransport::new()?);
        let fetch = FetchWrapper::new(store.clone(), transport);
        let data = Arc::new(DataProvider::new(config.api_url.clone(), fetch));
        debug!("API URL: {}", data.api_url());

        let auth = AuthProvider::new(data.clone(), store);
        Ok(Self { data, auth })
    }

    /// Turn a failed data call into a command error.
    ///
    /// A rejected credential clears the stored session first.
    pub fn fail(&self, error: DataError) -> anyhow::Error {
        if self.auth.recover(&error).should_logout() {
            return anyhow!("Session expired ({}). Run 'crmc login' to sign in again.", error);
        }
        anyhow::Error::new(error)
    }
}
