//! Session claims and role-gated authorization for the garda suite.
//!
//! The garda front ends keep an authenticated session as two cookies: an
//! opaque compact token and a cached `role` string. This crate is the
//! mechanism around that pair:
//!
//! - [`claims`] — decode the token payload into a typed record. No
//!   signature or expiry verification; the server stays the authority.
//! - [`store`] — the injected cookie-jar capability, with an in-memory
//!   map and a `document.cookie`-shaped string as implementations.
//! - [`session`] — the on-demand accessor that keeps the cookie pair
//!   consistent and clears it on logout.
//! - [`menu`] — static catalogs filtered (hide) or flagged (lock) per
//!   role.
//!
//! # Crate Architecture
//!
//! ```text
//! role  (closed identifier set)
//!   ↑
//! claims (token payload → ClaimsRecord)
//!   ↑
//! session (SessionView over a SessionStore)  ←  store (jar capability)
//!   ↑
//! menu (catalog × role → visible/annotated subset)
//! ```
//!
//! # Fail closed
//!
//! Every failure path (absent cookie, malformed token, unrecognized role)
//! converges on "no role known": hidden menus render empty and locked
//! menus render locked. Errors are logged on the diagnostic channel and
//! swallowed at the view boundary, never thrown to a global handler.

pub mod claims;
pub mod error;
pub mod menu;
pub mod role;
pub mod session;
pub mod store;

pub use claims::{decode, encode_unsigned, ClaimsRecord};
pub use error::{DecodeError, SessionError};
pub use menu::{
    dashboard_sidebar, kiosk_menu, AnnotatedEntry, GatePolicy, MenuCatalog, MenuEntry,
};
pub use role::{Role, UnknownRole};
pub use session::SessionView;
pub use store::{CookieString, MemoryStore, SessionStore, Ttl, ROLE_KEY, TOKEN_KEY};
