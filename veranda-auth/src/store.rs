// File-backed token storage

use crate::token::OAuthToken;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Single-token store persisted as JSON on disk.
///
/// The file is seeded once from configuration and rewritten whenever a
/// refresh produces a new token, so restarts pick up the freshest token
/// rather than the configured seed.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Open the store, writing `seed` only if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>, seed: &OAuthToken) -> Result<Self> {
        let store = Self { path: path.into() };
        if !store.path.exists() {
            store.replace(seed)?;
        }
        Ok(store)
    }

    /// Read the stored token
    pub fn load(&self) -> Result<OAuthToken> {
        let bytes = fs::read(&self.path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Rewrite the stored token
    pub fn replace(&self, token: &OAuthToken) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(token)?;
        fs::write(&self.path, bytes)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn token(access_token: &str) -> OAuthToken {
        OAuthToken {
            access_token: access_token.to_string(),
            access_expiry: 3600,
            refresh_token: "rrr".to_string(),
            refresh_expiry: 86400,
            token_type: "Bearer".to_string(),
            user: "ops@example.com".to_string(),
            issued_at: Utc::now(),
        }
    }

    #[test]
    fn test_open_seeds_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");

        let store = TokenStore::open(&path, &token("seed")).unwrap();
        assert!(path.exists());
        assert_eq!(store.load().unwrap().access_token, "seed");
    }

    #[test]
    fn test_open_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");

        let store = TokenStore::open(&path, &token("first")).unwrap();
        store.replace(&token("refreshed")).unwrap();

        // Re-opening with a different seed must not clobber the stored token
        let reopened = TokenStore::open(&path, &token("second")).unwrap();
        assert_eq!(reopened.load().unwrap().access_token, "refreshed");
    }

    #[test]
    fn test_replace_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("token.json");

        let store = TokenStore::open(&path, &token("seed")).unwrap();
        let newer = token("newer");
        store.replace(&newer).unwrap();
        assert_eq!(store.load().unwrap(), newer);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore {
            path: dir.path().join("absent.json"),
        };
        assert!(store.load().is_err());
    }
}
