//! File-backed token store.
//!
//! Persists the token in `<data_dir>/session.toml` under [`ACCESS_TOKEN_KEY`].

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::{ACCESS_TOKEN_KEY, SessionError, SessionResult, SessionStore};
use crate::platform::data_dir;

const SESSION_FILE: &str = "session.toml";

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store at the default location in the platform data directory.
    pub fn open_default() -> SessionResult<Self> {
        let dir = data_dir().map_err(|e| SessionError::Storage(e.to_string()))?;
        Ok(Self::at_path(dir.join(SESSION_FILE)))
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_content(&self) -> SessionResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| SessionError::Storage(format!("read {}: {}", self.path.display(), e)))
    }

    fn load_table(&self) -> SessionResult<toml::Table> {
        match self.read_content()? {
            Some(content) => toml::from_str(&content).map_err(|e| {
                SessionError::Storage(format!("parse {}: {}", self.path.display(), e))
            }),
            None => Ok(toml::Table::new()),
        }
    }

    /// Write the table with restrictive permissions via temp file + rename.
    fn save_table(&self, table: &toml::Table) -> SessionResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(table)
            .map_err(|e| SessionError::Storage(format!("serialize: {}", e)))?;

        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, &content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&temp_path, perms)?;
        }

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> SessionResult<Option<String>> {
        let table = self.load_table()?;
        let token = table
            .get(ACCESS_TOKEN_KEY)
            .and_then(|v| v.as_str())
            .map(str::to_string);
        Ok(token)
    }

    fn set(&self, token: &str) -> SessionResult<()> {
        let mut table = match self.read_content()? {
            Some(content) => toml::from_str(&content).unwrap_or_else(|e| {
                warn!("Replacing unparsable session file {}: {}", self.path.display(), e);
                toml::Table::new()
            }),
            None => toml::Table::new(),
        };
        table.insert(
            ACCESS_TOKEN_KEY.to_string(),
            toml::Value::String(token.to_string()),
        );
        self.save_table(&table)?;
        debug!("Stored session token in {} ({} chars)", self.path.display(), token.len());
        Ok(())
    }

    fn clear(&self) -> SessionResult<()> {
        let Some(content) = self.read_content()? else {
            return Ok(());
        };

        match toml::from_str::<toml::Table>(&content) {
            Ok(mut table) => {
                if table.remove(ACCESS_TOKEN_KEY).is_some() {
                    self.save_table(&table)?;
                    debug!("Removed session token from {}", self.path.display());
                }
            }
            Err(e) => {
                warn!("Removing unparsable session file {}: {}", self.path.display(), e);
                fs::remove_file(&self.path)?;
            }
        }
        Ok(())
    }
}
