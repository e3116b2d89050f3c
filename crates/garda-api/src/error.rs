//! API error taxonomy.
//!
//! Callers surface these once (a toast, a result modal) and never retry
//! automatically.

use crate::fault::FaultCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No token in the session store; route to the login screen.
    #[error("no active session")]
    SessionAbsent,

    /// Transport-level failure.
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status with no parseable envelope.
    #[error("unexpected status {status}")]
    Status { status: u16 },

    /// The server answered with a classified fault.
    #[error("{message}")]
    Fault { code: FaultCode, message: String },

    /// Envelope body did not decode.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A patrol report was submitted before all photo slots were filled.
    #[error("patrol report incomplete: {have} of {need} photos")]
    IncompleteReport { have: usize, need: usize },
}

impl ApiError {
    /// The classified fault code, if the server produced one.
    #[must_use]
    pub fn fault_code(&self) -> Option<FaultCode> {
        match self {
            Self::Fault { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` if logging in again could help.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::SessionAbsent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_code_is_exposed() {
        let err = ApiError::Fault {
            code: FaultCode::ScheduleConflict,
            message: "Absen terlalu awal".to_string(),
        };
        assert_eq!(err.fault_code(), Some(FaultCode::ScheduleConflict));
        assert_eq!(err.to_string(), "Absen terlalu awal");
    }

    #[test]
    fn non_fault_errors_have_no_code() {
        assert_eq!(ApiError::Status { status: 502 }.fault_code(), None);
        assert!(ApiError::SessionAbsent.is_unauthenticated());
    }

    #[test]
    fn incomplete_report_names_the_counts() {
        let err = ApiError::IncompleteReport { have: 2, need: 4 };
        assert_eq!(err.to_string(), "patrol report incomplete: 2 of 4 photos");
    }
}
