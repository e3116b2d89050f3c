//! Session persistence abstraction.
//!
//! The front ends keep the authenticated session as two cookies. The jar
//! behind them is modeled as an injected [`SessionStore`] capability rather
//! than ambient global state:
//!
//! - [`CookieString`] models the browser jar: one serialized
//!   `key=value; key2=value2` line, re-parsed on every read.
//! - [`MemoryStore`] is the test double, with real expiry deadlines.
//! - Consumers add their own backends (`garda-cli` persists to a file).
//!
//! The store is a single register read-modified-written atomically per
//! call. Nothing above it caches, so every reader always observes the
//! latest value, including external changes such as another view logging
//! out.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Cookie name holding the compact session token.
pub const TOKEN_KEY: &str = "token";

/// Cookie name caching the role string, kept equal to the role inside the
/// token so views skip a decode per render.
pub const ROLE_KEY: &str = "role";

/// Lifetime attached to a stored value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Kept until the store is cleared (a browser session cookie).
    Session,

    /// Kept until the given instant. Setting an already-past instant
    /// removes the key, which is how logout clears the pair.
    ExpiresAt(DateTime<Utc>),
}

impl Ttl {
    /// An expiry far enough in the past to delete on write.
    #[must_use]
    pub fn expired() -> Self {
        Self::ExpiresAt(DateTime::UNIX_EPOCH)
    }

    /// Returns `true` if a value with this lifetime is already gone at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self {
            Self::Session => false,
            Self::ExpiresAt(at) => *at <= now,
        }
    }
}

/// Key-value session persistence.
///
/// Implementations must be thread-safe; views on different tasks may read
/// the same jar concurrently.
pub trait SessionStore: Send + Sync {
    /// Returns the live value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes `key` with the given lifetime. An expired lifetime removes
    /// the key instead.
    fn set(&self, key: &str, value: &str, ttl: Ttl);

    /// Removes `key` outright.
    fn remove(&self, key: &str);
}

/// In-memory store for tests and headless use.
///
/// Unlike [`CookieString`], this backend keeps the expiry deadline per
/// entry, so a future `ExpiresAt` actually lapses.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, (String, Ttl)>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock();
        entries.get(key).and_then(|(value, ttl)| {
            if ttl.is_expired(Utc::now()) {
                None
            } else {
                Some(value.clone())
            }
        })
    }

    fn set(&self, key: &str, value: &str, ttl: Ttl) {
        let mut entries = self.entries.lock();
        if ttl.is_expired(Utc::now()) {
            entries.remove(key);
        } else {
            entries.insert(key.to_string(), (value.to_string(), ttl));
        }
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

/// A `document.cookie`-shaped store: one ambient serialized line.
///
/// Reads re-parse the line every time and match the exact key before the
/// first `=`, so `role` never matches a `role_backup` pair. The serialized
/// form carries no expiry attributes (the browser strips them too); an
/// expired write simply removes the pair at write time.
#[derive(Debug, Default)]
pub struct CookieString {
    inner: Mutex<String>,
}

impl CookieString {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing serialized cookie line.
    #[must_use]
    pub fn from_line(line: impl Into<String>) -> Self {
        Self {
            inner: Mutex::new(line.into()),
        }
    }

    /// The current `key=value; key2=value2` form.
    #[must_use]
    pub fn to_line(&self) -> String {
        self.inner.lock().clone()
    }

    fn rewrite(&self, apply: impl FnOnce(&mut Vec<(String, String)>)) {
        let mut inner = self.inner.lock();
        let mut pairs = parse_pairs(&inner);
        apply(&mut pairs);
        *inner = pairs
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
    }
}

fn parse_pairs(line: &str) -> Vec<(String, String)> {
    line.split("; ")
        .filter_map(|pair| pair.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

impl SessionStore for CookieString {
    fn get(&self, key: &str) -> Option<String> {
        let inner = self.inner.lock();
        inner
            .split("; ")
            .filter_map(|pair| pair.split_once('='))
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| value.to_string())
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
    use chrono::Duration;

    #[test]
    fn memory_store_round_trips_session_values() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "abc", Ttl::Session);
        assert_eq!(store.get(TOKEN_KEY), Some("abc".to_string()));
        store.remove(TOKEN_KEY);
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn memory_store_expired_write_deletes() {
        let store = MemoryStore::new();
        store.set(ROLE_KEY, "Admin", Ttl::Session);
        store.set(ROLE_KEY, "", Ttl::expired());
        assert_eq!(store.get(ROLE_KEY), None);
    }

    #[test]
    fn memory_store_honors_future_deadline() {
        let store = MemoryStore::new();
        store.set("k", "v", Ttl::ExpiresAt(Utc::now() + Duration::hours(1)));
        assert_eq!(store.get("k"), Some("v".to_string()));

        store.set("k", "v", Ttl::ExpiresAt(Utc::now() - Duration::seconds(1)));
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn cookie_string_matches_exact_key_only() {
        let store = CookieString::from_line("role_backup=SuperAdmin; role=Client; token=t.p.s");
        assert_eq!(store.get("role"), Some("Client".to_string()));
        assert_eq!(store.get("token"), Some("t.p.s".to_string()));
        assert_eq!(store.get("rol"), None);
    }

    #[test]
    fn cookie_string_set_replaces_in_place() {
        let store = CookieString::new();
        store.set(ROLE_KEY, "Admin", Ttl::Session);
        store.set(ROLE_KEY, "Client", Ttl::Session);
        assert_eq!(store.get(ROLE_KEY), Some("Client".to_string()));
        assert_eq!(store.to_line(), "role=Client");
    }

    #[test]
    fn cookie_string_expired_write_deletes_pair() {
        let store = CookieString::new();
        store.set(TOKEN_KEY, "t", Ttl::Session);
        store.set(ROLE_KEY, "Admin", Ttl::Session);
        store.set(TOKEN_KEY, "", Ttl::expired());
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(ROLE_KEY), Some("Admin".to_string()));
    }

    #[test]
    fn empty_store_reads_none() {
        let store = CookieString::new();
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.to_line(), "");
    }

    #[test]
    fn malformed_fragments_are_skipped() {
        let store = CookieString::from_line("garbage; role=Admin");
        assert_eq!(store.get("role"), Some("Admin".to_string()));
        assert_eq!(store.get("garbage"), None);
    }
}
