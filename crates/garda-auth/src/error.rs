//! Error taxonomy for claims decoding and session access.
//!
//! Both errors are swallowed at the view boundary and converted into the
//! unauthenticated state; they are never thrown up to a global handler.

use thiserror::Error;

/// Failure to extract a claims record from a compact token string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The token is present but its payload segment cannot be parsed:
    /// fewer than two `.`-delimited segments, undecodable base64, bytes
    /// that are not UTF-8, or JSON missing the required fields.
    #[error("malformed token payload")]
    MalformedToken,
}

/// Failure to derive an authenticated session from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No token cookie: logged out, never logged in, or running before the
    /// store is readable. Treated identically to an expired session.
    #[error("no active session")]
    Absent,

    /// A token cookie exists but does not decode.
    #[error(transparent)]
    Token(#[from] DecodeError),
}

impl SessionError {
    /// Returns `true` if the state is recoverable by logging in again.
    ///
    /// Currently every session error is; the predicate exists so callers
    /// route both variants to the same login screen on purpose rather than
    /// by accident.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Absent | Self::Token(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_converts_into_session_error() {
        let err = SessionError::from(DecodeError::MalformedToken);
        assert_eq!(err, SessionError::Token(DecodeError::MalformedToken));
        assert_eq!(err.to_string(), "malformed token payload");
    }

    #[test]
    fn every_variant_reads_as_unauthenticated() {
        assert!(SessionError::Absent.is_unauthenticated());
        assert!(SessionError::Token(DecodeError::MalformedToken).is_unauthenticated());
    }
}
