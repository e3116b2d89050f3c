//! On-demand session accessor.
//!
//! Nothing here caches between calls: every read goes back to the injected
//! [`SessionStore`]. Two views (or two tabs) can hold independent
//! `SessionView`s over the same jar without coordination, since the jar
//! itself is the single atomically-updated register.

use crate::claims::{self, ClaimsRecord};
use crate::error::{DecodeError, SessionError};
use crate::role::Role;
use crate::store::{SessionStore, Ttl, ROLE_KEY, TOKEN_KEY};
use tracing::warn;

/// Read/write access to the ambient session pair.
///
/// # Example
///
/// ```
/// use garda_auth::{claims, ClaimsRecord, MemoryStore, SessionView};
///
/// let store = MemoryStore::new();
/// let session = SessionView::over(&store);
///
/// let token = claims::encode_unsigned(&ClaimsRecord::new("Admin", "Budi"));
/// session.establish(&token).expect("token should decode");
/// assert_eq!(session.role().as_deref(), Some("Admin"));
///
/// session.logout();
/// assert_eq!(session.token(), None);
/// assert_eq!(session.role(), None);
/// ```
pub struct SessionView<'s> {
    store: &'s dyn SessionStore,
}

impl<'s> SessionView<'s> {
    /// Wraps a store without reading anything yet.
    #[must_use]
    pub fn over(store: &'s dyn SessionStore) -> Self {
        Self { store }
    }

    /// The raw token cookie, if present.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    /// The cached role cookie, if present.
    ///
    /// This is the per-render fast path; [`establish`](Self::establish)
    /// keeps it equal to the role inside the token payload.
    #[must_use]
    pub fn role(&self) -> Option<String> {
        self.store.get(ROLE_KEY)
    }

    /// The cached role parsed against the closed role set.
    ///
    /// Missing and unrecognized roles both come back as `None`; the menu
    /// layer renders that as empty or fully locked.
    #[must_use]
    pub fn parsed_role(&self) -> Option<Role> {
        self.role().and_then(|role| role.parse().ok())
    }

    /// Decodes the stored token into a fresh claims record.
    ///
    /// Reconstructed on every call, never cached, so it always reflects
    /// the latest cookie state. A malformed token is reported once on the
    /// diagnostic channel; the caller converts the error into the
    /// unauthenticated state instead of crashing.
    ///
    /// # Errors
    ///
    /// [`SessionError::Absent`] when there is no token cookie,
    /// [`SessionError::Token`] when one exists but does not decode.
    pub fn claims(&self) -> Result<ClaimsRecord, SessionError> {
        let token = self.token().ok_or(SessionError::Absent)?;
        claims::decode(&token).map_err(|err| {
            warn!(%err, "session token failed to decode; treating as logged out");
            SessionError::from(err)
        })
    }

    /// Stores the session pair after a successful login.
    ///
    /// Decodes the token first and only then writes both cookies, so the
    /// role cookie is always consistent with the token payload. A token
    /// that does not decode leaves the store untouched.
    ///
    /// # Errors
    ///
    /// [`DecodeError::MalformedToken`] when the server handed back a token
    /// this client cannot read.
    pub fn establish(&self, token: &str) -> Result<ClaimsRecord, DecodeError> {
        let claims = claims::decode(token)?;
        self.store.set(TOKEN_KEY, token, Ttl::Session);
        self.store.set(ROLE_KEY, &claims.role, Ttl::Session);
        Ok(claims)
    }

    /// Clears the session pair by writing both cookies already expired.
    ///
    /// The caller is expected to follow with a full reload of its root
    /// view. Nothing in memory needs surgical invalidation, because
    /// nothing above the store is cached.
    pub fn logout(&self) {
        self.store.set(TOKEN_KEY, "", Ttl::expired());
        self.store.set(ROLE_KEY, "", Ttl::expired());
    }
}
