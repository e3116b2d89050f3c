//! Typed REST client facade for the garda workforce API.
//!
//! The front ends talk to one backend behind a single base URL. This crate
//! is that collaborator surface, typed:
//!
//! - [`config`] — the base URL, from env or TOML
//! - [`client`] — the REST operations (login, attendance, patrol reports,
//!   dropdown options), each attaching `Authorization: Bearer <token>`
//! - [`fault`] — the tagged fault codes result screens branch on, decoded
//!   once at the envelope boundary
//! - [`scope`] — request lifetimes pinned to the owning view
//!
//! Expiry is never checked client-side and nothing is retried
//! automatically: a failed call surfaces exactly once, classified.

pub mod client;
pub mod config;
pub mod error;
pub mod fault;
pub mod scope;

pub use client::{
    session_token, ApiClient, AttendanceRecord, AttendanceStatus, AttendanceSubmission,
    GuardOption, LocationStatus, PatrolPost, PatrolReport, REPORT_PHOTO_COUNT,
};
pub use config::{ApiConfig, BASE_URL_ENV};
pub use error::ApiError;
pub use fault::{Envelope, FaultCode};
pub use scope::FetchScope;
