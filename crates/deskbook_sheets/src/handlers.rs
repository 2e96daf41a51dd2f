// File: crates/deskbook_sheets/src/handlers.rs
use crate::dates::LedgerDate;
use crate::keys::Timeslot;
use crate::logic::{BookingDesk, BookingOutcome, BookingRequest, BookingResponse};
use crate::service::SheetsServiceError;
use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, HeaderMap, StatusCode},
    response::Json,
};
use chrono::NaiveDate;
use deskbook_common::services::LedgerService;
use deskbook_common::DeskbookError;
use deskbook_config::AppConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Header carrying the verified e-mail of the signed-in staff member.
pub const EMAIL_HEADER: &str = "x-auth-request-email";
pub const USER_HEADER: &str = "x-auth-request-user";
pub const PICTURE_HEADER: &str = "x-auth-request-picture";

/// Any ledger backend the handlers can be wired to.
pub type SharedLedger = dyn LedgerService<Error = SheetsServiceError>;

// Define shared state needed by the booking handlers
#[derive(Clone)]
pub struct DeskState {
    pub config: Arc<AppConfig>,
    pub desk: Arc<BookingDesk<SharedLedger>>,
}

impl DeskState {
    pub fn new(config: Arc<AppConfig>, ledger: Arc<SharedLedger>) -> Self {
        let desk = BookingDesk::new(ledger, &config.booking);
        Self {
            config,
            desk: Arc::new(desk),
        }
    }
}

/// The signed-in staff member, as asserted by the authenticating proxy in
/// front of this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffIdentity {
    pub email: String,
    pub display_name: Option<String>,
    pub picture_url: Option<String>,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for StaffIdentity
where
    S: Send + Sync,
{
    type Rejection = DeskbookError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let email = header_value(&parts.headers, EMAIL_HEADER).ok_or_else(|| {
            warn!("Request to {} without {} header", parts.uri.path(), EMAIL_HEADER);
            DeskbookError::AuthError("sign-in required".to_string())
        })?;
        Ok(StaffIdentity {
            email,
            display_name: header_value(&parts.headers, USER_HEADER),
            picture_url: header_value(&parts.headers, PICTURE_HEADER),
        })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookDeskRequest {
    /// Requested day, `YYYY-MM-DD`.
    pub booking_date: NaiveDate,
    #[serde(default)]
    pub booking_time: Timeslot,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProfileResponse {
    pub email: String,
    pub display_name: Option<String>,
    pub picture_url: Option<String>,
    pub home_url: Option<String>,
}

fn outcome_status(outcome: &BookingOutcome) -> StatusCode {
    match outcome {
        BookingOutcome::Booked { .. } => StatusCode::CREATED,
        BookingOutcome::Duplicate | BookingOutcome::NoVacancy => StatusCode::CONFLICT,
        BookingOutcome::InvalidDate => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// Handler to book a desk for the signed-in staff member.
#[axum::debug_handler]
pub async fn book_desk_handler(
    State(state): State<Arc<DeskState>>,
    identity: StaffIdentity,
    Json(payload): Json<BookDeskRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), DeskbookError> {
    let request = BookingRequest {
        identity: identity.email,
        date: LedgerDate::new(payload.booking_date),
        slot: payload.booking_time,
    };

    let outcome = state.desk.process_booking(&request).await?;
    let response = BookingResponse::from_outcome(&outcome, &request, state.desk.window_days());
    info!("{}", response.message);

    Ok((outcome_status(&outcome), Json(response)))
}

/// Landing-page data for the signed-in staff member.
pub async fn profile_handler(
    State(state): State<Arc<DeskState>>,
    identity: StaffIdentity,
) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        email: identity.email,
        display_name: identity.display_name,
        picture_url: identity.picture_url,
        home_url: state.config.home_url.clone(),
    })
}

pub async fn health_handler() -> &'static str {
    "ok"
}
