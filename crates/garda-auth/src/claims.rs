//! Compact-token claims extraction.
//!
//! A session token is three dot-separated base64url segments (header,
//! payload, signature). Only the payload is ever read. Signature
//! verification and expiry checking are deliberately absent: the token is
//! treated as a display hint and the server stays the sole authority, so a
//! stale or tampered token merely produces requests the server rejects.

use crate::error::DecodeError;
use crate::role::Role;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Identity attributes embedded in a session token payload.
///
/// The schema is strict where it matters: a payload without `role` does not
/// decode at all, instead of being trusted field-by-field at use sites.
/// `nama` is a display hint; `exp` and `iat` are carried for completeness
/// but never evaluated client-side. Unknown extra claims are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimsRecord {
    /// Role claim, verbatim. See [`ClaimsRecord::parsed_role`].
    pub role: String,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama: Option<String>,

    /// Expiry timestamp in seconds. Present in server tokens, unused here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued-at timestamp in seconds. Present in server tokens, unused here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl ClaimsRecord {
    /// Builds a minimal record with a role and display name.
    #[must_use]
    pub fn new(role: impl Into<String>, nama: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            nama: Some(nama.into()),
            exp: None,
            iat: None,
        }
    }

    /// The role claim parsed against the closed role set.
    ///
    /// An unrecognized spelling comes back as `None`, which the menu layer
    /// treats as fully unauthorized.
    #[must_use]
    pub fn parsed_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

/// Decodes the payload segment of a compact token into a claims record.
///
/// The token must contain at least two `.`-delimited segments. The middle
/// segment is translated from the URL-safe base64 alphabet (`-`→`+`,
/// `_`→`/`) to the standard one, decoded tolerant of missing padding, and
/// the resulting bytes parsed as UTF-8 JSON.
///
/// Pure function; no signature or expiry validation happens here.
///
/// # Errors
///
/// [`DecodeError::MalformedToken`] for any unparsable input. Callers must
/// treat that as "no role known" rather than propagating a crash.
///
/// # Example
///
/// ```
/// use garda_auth::claims::{decode, encode_unsigned, ClaimsRecord};
///
/// let token = encode_unsigned(&ClaimsRecord::new("Admin", "Budi"));
/// let claims = decode(&token).expect("well-formed token");
/// assert_eq!(claims.role, "Admin");
///
/// assert!(decode("abc.def").is_err());
/// ```
pub fn decode(token: &str) -> Result<ClaimsRecord, DecodeError> {
    let payload = token.split('.').nth(1).ok_or(DecodeError::MalformedToken)?;
    let standard: String = payload
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    let raw = STANDARD_NO_PAD
        .decode(standard.trim_end_matches('='))
        .map_err(|_| DecodeError::MalformedToken)?;
    let text = String::from_utf8(raw).map_err(|_| DecodeError::MalformedToken)?;
    serde_json::from_str(&text).map_err(|_| DecodeError::MalformedToken)
}

/// Builds a well-formed, unsigned three-segment token from a claims record.
///
/// The header advertises `alg: none` and the signature segment is empty.
/// Nothing in this crate verifies signatures, so [`decode`] accepts the
/// output; real deployments receive server-signed tokens through the login
/// flow instead. Intended for tests and kiosk provisioning.
#[must_use]
pub fn encode_unsigned(claims: &ClaimsRecord) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert("role".into(), claims.role.clone().into());
    if let Some(nama) = &claims.nama {
        payload.insert("nama".into(), nama.clone().into());
    }
    if let Some(exp) = claims.exp {
        payload.insert("exp".into(), exp.into());
    }
    if let Some(iat) = claims.iat {
        payload.insert("iat".into(), iat.into());
    }

    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::Value::Object(payload).to_string());
    format!("{header}.{payload}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_role_and_nama() {
        let claims = ClaimsRecord::new("SuperAdmin", "Siti Rahma");
        let decoded = decode(&encode_unsigned(&claims)).expect("round trip should decode");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn round_trip_preserves_timestamps() {
        let claims = ClaimsRecord {
            role: "Client".to_string(),
            nama: None,
            exp: Some(1_767_225_600),
            iat: Some(1_767_139_200),
        };
        let decoded = decode(&encode_unsigned(&claims)).expect("should decode");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn multibyte_nama_survives_the_byte_round_trip() {
        // A byte-per-character decode path would mangle these; non-ASCII
        // names must come back intact.
        let claims = ClaimsRecord::new("Admin", "Pak Agus \u{2014} P\u{00F6}s 3 \u{1F6E1}");
        let decoded = decode(&encode_unsigned(&claims)).expect("should decode");
        assert_eq!(decoded.nama, claims.nama);
    }

    #[test]
    fn single_segment_is_malformed() {
        assert_eq!(decode("notoken"), Err(DecodeError::MalformedToken));
        assert_eq!(decode(""), Err(DecodeError::MalformedToken));
    }

    #[test]
    fn two_segment_garbage_is_malformed() {
        // "def" is base64-decodable but the bytes are not UTF-8 JSON.
        assert_eq!(decode("abc.def"), Err(DecodeError::MalformedToken));
    }

    #[test]
    fn invalid_base64_payload_is_malformed() {
        assert_eq!(decode("abc.!!!.sig"), Err(DecodeError::MalformedToken));
    }

    #[test]
    fn payload_without_role_is_malformed() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"nama":"Budi"}"#);
        assert_eq!(decode(&format!("h.{payload}.s")), Err(DecodeError::MalformedToken));
    }

    #[test]
    fn url_safe_alphabet_is_translated() {
        // A payload whose encoding exercises '-' and '_' must still decode.
        let claims = ClaimsRecord::new("Client", "\u{3EFF}\u{3FBF}");
        let token = encode_unsigned(&claims);
        let payload = token.split('.').nth(1).expect("payload segment");
        assert!(
            payload.contains('-') || payload.contains('_'),
            "test payload should exercise the url-safe alphabet, got {payload}"
        );
        assert_eq!(decode(&token).expect("should decode"), claims);
    }

    #[test]
    fn signature_segment_is_ignored() {
        let claims = ClaimsRecord::new("Admin", "Budi");
        let token = encode_unsigned(&claims);
        let payload = token.split('.').nth(1).expect("payload segment");
        let forged = format!("whatever.{payload}.not-even-base64!!!");
        assert_eq!(decode(&forged).expect("should decode"), claims);
    }

    #[test]
    fn padded_payload_is_tolerated() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"role":"Admin"}"#);
        let padded = format!("{payload}==");
        let decoded = decode(&format!("h.{padded}.s")).expect("padding should be tolerated");
        assert_eq!(decoded.role, "Admin");
    }

    #[test]
    fn extra_claims_are_ignored() {
        let payload = URL_SAFE_NO_PAD.encode(r#"{"role":"Client","nip":"1987","shift":"malam"}"#);
        let decoded = decode(&format!("h.{payload}.s")).expect("should decode");
        assert_eq!(decoded.role, "Client");
        assert_eq!(decoded.nama, None);
    }

    #[test]
    fn parsed_role_fails_closed_on_unknown_spelling() {
        assert_eq!(ClaimsRecord::new("Admin", "x").parsed_role(), Some(Role::Admin));
        assert_eq!(ClaimsRecord::new("Manager", "x").parsed_role(), None);
    }
}
