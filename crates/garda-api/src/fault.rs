//! Tagged server fault codes.
//!
//! The attendance and patrol endpoints answer with a message and, on
//! success, a data payload. Result screens branch on what went wrong; the
//! branch is picked here, exactly once, from the envelope's explicit
//! `code` field, and then matched exhaustively.
//!
//! Envelopes from server builds that predate the `code` field carry only
//! the human-language message. [`FaultCode::from_message`] maps those onto
//! the same enum at this one boundary, so no screen ever sniffs message
//! substrings itself.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// What the server said went wrong, as a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultCode {
    /// Reported position outside the allowed radius or away from the
    /// main post.
    LocationInvalid,
    /// Face verification did not match a registered guard.
    FaceNotRecognized,
    /// Outside the schedule window: too early, unfinished previous shift,
    /// or no schedule at all.
    ScheduleConflict,
    /// Guard or user record missing.
    UserNotFound,
    /// Anything the server did not classify.
    #[serde(other)]
    Unknown,
}

impl FaultCode {
    /// Classifies a legacy message-only envelope.
    ///
    /// Matches the phrases the deployed server is known to emit. Anything
    /// unmatched is [`FaultCode::Unknown`]; current server builds send
    /// `code` and never reach this path.
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        let msg = message.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|needle| msg.contains(needle));

        if has(&["jarak", "radius", "pos utama", "location invalid"]) {
            Self::LocationInvalid
        } else if has(&["wajah", "face"]) {
            Self::FaceNotRecognized
        } else if has(&["jadwal", "terlalu awal", "menyelesaikan shift"]) {
            Self::ScheduleConflict
        } else if has(&["satpam", "user"]) {
            Self::UserNotFound
        } else {
            Self::Unknown
        }
    }
}

/// Response envelope shared by the record/report endpoints.
///
/// Success iff `data` is present; `message` is human-facing either way.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub code: Option<FaultCode>,

    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Resolves into the payload or the classified fault.
    ///
    /// # Errors
    ///
    /// [`ApiError::Fault`] carrying the explicit `code` when the server
    /// sent one, otherwise the code classified from the message.
    pub fn into_result(self) -> Result<T, ApiError> {
        match self.data {
            Some(data) => Ok(data),
            None => {
                let code = self
                    .code
                    .unwrap_or_else(|| FaultCode::from_message(&self.message));
                Err(ApiError::Fault {
                    code,
                    message: self.message,
                })
            }
        }
    }
}
