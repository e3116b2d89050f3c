//! Typed REST client for the workforce API.
//!
//! Every authenticated call attaches `Authorization: Bearer <token>` with
//! the raw cookie value. There is no refresh flow and expiry is never
//! checked client-side: a lapsed token simply comes back as a server
//! fault, surfaced once to the caller.

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::fault::{Envelope, FaultCode};
use garda_auth::SessionView;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Photo slots a patrol report must fill before submission.
pub const REPORT_PHOTO_COUNT: usize = 4;

/// Attendance check-in/out submission: one face photo plus the GPS fix.
#[derive(Debug, Clone)]
pub struct AttendanceSubmission {
    /// PNG bytes of the captured face photo.
    pub image: Vec<u8>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Whether an attendance record opened or closed the shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "CHECK_IN")]
    CheckIn,
    #[serde(rename = "CHECK_OUT")]
    CheckOut,
    #[serde(other)]
    Other,
}

impl AttendanceStatus {
    /// Display label the result screen shows.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CheckIn => "Check In",
            Self::CheckOut => "Check Out",
            Self::Other => "-",
        }
    }
}

/// Attendance record echoed back on success.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceRecord {
    pub status: AttendanceStatus,
    /// Punctuality category, e.g. "Tepat Waktu".
    pub kategori: String,
    /// Distance from the assigned post, meters.
    pub distance: f64,
    /// Record timestamp, ISO 8601.
    pub time: String,
    pub nama_satpam: String,
    pub nip: String,
}

/// Location assessment a guard files with a patrol report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationStatus {
    #[serde(rename = "Aman")]
    Aman,
    #[serde(rename = "Tidak Aman")]
    TidakAman,
}

impl LocationStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aman => "Aman",
            Self::TidakAman => "Tidak Aman",
        }
    }
}

/// One patrol report, built up as the four guided photos arrive.
///
/// The capture screen walks the guard through four shots; each capture
/// fills (or retakes) one slot. Submission is refused client-side until
/// every slot is filled.
#[derive(Debug, Clone)]
pub struct PatrolReport {
    pub satpam_id: String,
    pub pos_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status_lokasi: LocationStatus,
    /// Free-form notes; an empty value is submitted as "-".
    pub keterangan: String,
    photos: [Option<Vec<u8>>; REPORT_PHOTO_COUNT],
}

impl PatrolReport {
    #[must_use]
    pub fn new(
        satpam_id: impl Into<String>,
        pos_id: impl Into<String>,
        latitude: f64,
        longitude: f64,
        status_lokasi: LocationStatus,
        keterangan: impl Into<String>,
    ) -> Self {
        Self {
            satpam_id: satpam_id.into(),
            pos_id: pos_id.into(),
            latitude,
            longitude,
            status_lokasi,
            keterangan: keterangan.into(),
            photos: Default::default(),
        }
    }

    /// Fills or retakes one of the four photo slots.
    ///
    /// Returns `false` (and stores nothing) for an out-of-range slot.
    pub fn set_photo(&mut self, slot: usize, jpeg: Vec<u8>) -> bool {
        match self.photos.get_mut(slot) {
            Some(entry) => {
                *entry = Some(jpeg);
                true
            }
            None => false,
        }
    }

    /// Filled photo slots so far.
    #[must_use]
    pub fn photo_count(&self) -> usize {
        self.photos.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` once every slot is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.photo_count() == REPORT_PHOTO_COUNT
    }
}

/// Guard entry for the report screen's dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuardOption {
    pub id: String,
    pub nama: String,
}

#[derive(Debug, Deserialize)]
struct GuardOptionList {
    #[serde(default)]
    satpams: Vec<GuardOption>,
}

/// A post on a guard's plotted patrol route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PatrolPost {
    pub pos_id: String,
    #[serde(default)]
    pub nama_pos: Option<String>,
}

impl PatrolPost {
    /// Display label, falling back to the id for unnamed posts.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.nama_pos {
            Some(nama) => nama.clone(),
            None => format!("Pos {}", self.pos_id),
        }
    }
}

/// The route endpoint answers with one post or a list depending on the
/// plotting; both shapes land here as a list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<FaultCode>,
}

/// The raw bearer token from the ambient session.
///
/// # Errors
///
/// [`ApiError::SessionAbsent`] when there is no token cookie; callers
/// route that straight to the login screen instead of issuing a request
/// the server would reject anyway.
pub fn session_token(session: &SessionView<'_>) -> Result<String, ApiError> {
    session.token().ok_or(ApiError::SessionAbsent)
}

/// REST client bound to one base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn authorized(&self, builder: RequestBuilder, token: &str) -> RequestBuilder {
        builder.bearer_auth(token)
    }

    /// Exchanges credentials for a session token.
    ///
    /// # Errors
    ///
    /// [`ApiError::Fault`] with the server's message when the credentials
    /// are rejected; transport and decode failures otherwise.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let url = self.config.endpoint("v1/auth/login");
        debug!(%url, %username, "login");
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body: LoginBody = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(ApiError::Status {
                    status: status.as_u16(),
                })
            }
            Err(err) => return Err(ApiError::Decode(err)),
        };

        match body.token {
            Some(token) if status.is_success() => Ok(token),
            _ => Err(ApiError::Fault {
                code: body
                    .code
                    .unwrap_or_else(|| FaultCode::from_message(&body.message)),
                message: body.message,
            }),
        }
    }

    /// Submits a face-recognition attendance photo with its GPS fix.
    pub async fn record_attendance(
        &self,
        token: &str,
        submission: AttendanceSubmission,
    ) -> Result<AttendanceRecord, ApiError> {
        let form = Form::new()
            .part(
                "image",
                Part::bytes(submission.image)
                    .file_name("attendance.png")
                    .mime_str("image/png")?,
            )
            .text("lat", submission.latitude.to_string())
            .text("lng", submission.longitude.to_string());

        let url = self.config.endpoint("v1/absensi/record");
        debug!(%url, "record attendance");
        let response = self
            .authorized(self.http.post(&url), token)
            .multipart(form)
            .send()
            .await?;
        Self::resolve_envelope(response).await
    }

    /// Submits a completed patrol report.
    ///
    /// # Errors
    ///
    /// [`ApiError::IncompleteReport`] before any network traffic when the
    /// four photo slots are not all filled.
    pub async fn submit_patrol_report(
        &self,
        token: &str,
        report: PatrolReport,
    ) -> Result<(), ApiError> {
        if !report.is_complete() {
            return Err(ApiError::IncompleteReport {
                have: report.photo_count(),
                need: REPORT_PHOTO_COUNT,
            });
        }

        let keterangan = if report.keterangan.is_empty() {
            "-".to_string()
        } else {
            report.keterangan
        };
        let mut form = Form::new()
            .text("satpam_id", report.satpam_id)
            .text("pos_id", report.pos_id)
            .text("latitude", report.latitude.to_string())
            .text("longitude", report.longitude.to_string())
            .text("status_lokasi", report.status_lokasi.as_str())
            .text("keterangan", keterangan);
        for (index, photo) in report.photos.into_iter().flatten().enumerate() {
            form = form.part(
                "foto_laporan",
                Part::bytes(photo)
                    .file_name(format!("patroli_{}.jpg", index + 1))
                    .mime_str("image/jpeg")?,
            );
        }

        let url = self.config.endpoint("v1/laporan/");
        debug!(%url, "submit patrol report");
        let response = self
            .authorized(self.http.post(&url), token)
            .multipart(form)
            .send()
            .await?;
        Self::resolve_envelope::<serde_json::Value>(response)
            .await
            .map(|_| ())
    }

    /// Guards available in the report screen's dropdown.
    pub async fn guard_options(&self, token: &str) -> Result<Vec<GuardOption>, ApiError> {
        let url = self.config.endpoint("v1/satpams/?mode=dropdown");
        debug!(%url, "fetch guard options");
        let response = self.authorized(self.http.get(&url), token).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let list: GuardOptionList = Self::parse_body(status, &text)?;
        Ok(list.satpams)
    }

    /// The posts plotted on one guard's patrol route.
    pub async fn patrol_route(
        &self,
        token: &str,
        satpam_id: &str,
    ) -> Result<Vec<PatrolPost>, ApiError> {
        let url = self
            .config
            .endpoint(&format!("v1/plotting/route/{satpam_id}"));
        debug!(%url, "fetch patrol route");
        let response = self.authorized(self.http.get(&url), token).send().await?;
        Self::resolve_envelope::<OneOrMany<PatrolPost>>(response)
            .await
            .map(OneOrMany::into_vec)
    }

    /// Decodes a `{message, code?, data?}` envelope into its payload or
    /// the classified fault. Classification happens here and nowhere else.
    async fn resolve_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;
        let envelope: Envelope<T> = Self::parse_body(status, &text)?;
        envelope.into_result()
    }

    fn parse_body<T: DeserializeOwned>(status: StatusCode, text: &str) -> Result<T, ApiError> {
        match serde_json::from_str(text) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(ApiError::Status {
                status: status.as_u16(),
            }),
            Err(err) => Err(ApiError::Decode(err)),
        }
    }
}
