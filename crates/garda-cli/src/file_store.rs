//! Disk-backed session store.
//!
//! The CLI has no browser jar, so the cookie pair lives as `key=value`
//! lines in a state file. Reads go back to the file on every call,
//! matching the jar's freshest-read semantics. The [`SessionStore`] write
//! path is infallible by contract (a browser cookie write is too), so a
//! failed write is logged and the session simply looks logged out on the
//! next read.

use chrono::Utc;
use garda_auth::{SessionStore, Ttl};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_pairs(&self) -> Vec<(String, String)> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        contents
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn write_pairs(&self, pairs: &[(String, String)]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut contents = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        fs::write(&self.path, contents)
    }

    fn rewrite(&self, apply: impl FnOnce(&mut Vec<(String, String)>)) {
        let mut pairs = self.read_pairs();
        apply(&mut pairs);
        if let Err(err) = self.write_pairs(&pairs) {
            warn!(%err, path = %self.path.display(), "failed to persist session state");
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_pairs()
            .into_iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value)
    }

    fn set(&self, key: &str, value: &str, ttl: Ttl) {
        self.rewrite(|pairs| {
            pairs.retain(|(candidate, _)| candidate != key);
            if !ttl.is_expired(Utc::now()) {
                pairs.push((key.to_string(), value.to_string()));
            }
        });
    }

    fn remove(&self, key: &str) {
        self.rewrite(|pairs| pairs.retain(|(candidate, _)| candidate != key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garda_auth::{claims, ClaimsRecord, SessionView};

    #[test]
    fn values_survive_a_reload() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("session");

        let store = FileStore::new(&path);
        store.set("token", "t.p.s", Ttl::Session);
        store.set("role", "Admin", Ttl::Session);

        // A fresh store over the same path sees the same pair.
        let reloaded = FileStore::new(&path);
        assert_eq!(reloaded.get("token"), Some("t.p.s".to_string()));
        assert_eq!(reloaded.get("role"), Some("Admin".to_string()));
    }

    #[test]
    fn expired_write_clears_the_key() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let store = FileStore::new(dir.path().join("session"));

        store.set("token", "t", Ttl::Session);
        store.set("token", "", Ttl::expired());
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn missing_file_reads_as_logged_out() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let store = FileStore::new(dir.path().join("never-written"));
        assert_eq!(store.get("token"), None);
    }

    #[test]
    fn session_view_logout_empties_the_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("session");
        let store = FileStore::new(&path);
        let session = SessionView::over(&store);

        let token = claims::encode_unsigned(&ClaimsRecord::new("Client", "Rudi"));
        session.establish(&token).expect("should establish");
        assert!(session.token().is_some());

        session.logout();
        assert_eq!(session.token(), None);
        assert_eq!(session.role(), None);
        let contents = fs::read_to_string(&path).expect("file should exist");
        assert!(contents.is_empty(), "file still had: {contents}");
    }
}
