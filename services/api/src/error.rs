use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::types::BookingRejection;

/// API error variants. Each maps to one HTTP status and a stable `kind` code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 400
    #[error("missing data")]
    MissingData,
    #[error("invalid field: {0}")]
    InvalidField(&'static str),
    #[error("rating window expired")]
    RatingWindowExpired,
    #[error("class already started")]
    ClassAlreadyStarted,
    #[error("check-in window closed")]
    CheckinWindowClosed,
    #[error("pin not set")]
    PinNotSet,

    // 401
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid or expired code")]
    InvalidOtp,

    // 403
    #[error("account not verified")]
    AccountNotVerified,
    #[error("forbidden")]
    Forbidden,

    // 404
    #[error("user not found")]
    UserNotFound,
    #[error("sede not found")]
    SedeNotFound,
    #[error("clase not found")]
    ClaseNotFound,
    #[error("reserva not found")]
    ReservaNotFound,
    #[error("asistencia not found")]
    AsistenciaNotFound,
    #[error("objetivo not found")]
    ObjetivoNotFound,
    #[error("noticia not found")]
    NoticiaNotFound,
    #[error("notificacion not found")]
    NotificacionNotFound,

    // 409
    #[error("email already registered")]
    EmailTaken,
    #[error("username already taken")]
    UsernameTaken,
    #[error("class is full")]
    ClassFull,
    #[error("class already booked")]
    DuplicateBooking,
    #[error("already checked in")]
    AlreadyCheckedIn,
    #[error("class already rated")]
    AlreadyRated,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingData => "MISSING_DATA",
            Self::InvalidField(_) => "INVALID_FIELD",
            Self::RatingWindowExpired => "RATING_WINDOW_EXPIRED",
            Self::ClassAlreadyStarted => "CLASS_ALREADY_STARTED",
            Self::CheckinWindowClosed => "CHECKIN_WINDOW_CLOSED",
            Self::PinNotSet => "PIN_NOT_SET",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidOtp => "INVALID_OTP",
            Self::AccountNotVerified => "ACCOUNT_NOT_VERIFIED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::SedeNotFound => "SEDE_NOT_FOUND",
            Self::ClaseNotFound => "CLASE_NOT_FOUND",
            Self::ReservaNotFound => "RESERVA_NOT_FOUND",
            Self::AsistenciaNotFound => "ASISTENCIA_NOT_FOUND",
            Self::ObjetivoNotFound => "OBJETIVO_NOT_FOUND",
            Self::NoticiaNotFound => "NOTICIA_NOT_FOUND",
            Self::NotificacionNotFound => "NOTIFICACION_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::ClassFull => "CLASS_FULL",
            Self::DuplicateBooking => "DUPLICATE_BOOKING",
            Self::AlreadyCheckedIn => "ALREADY_CHECKED_IN",
            Self::AlreadyRated => "ALREADY_RATED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingData
            | Self::InvalidField(_)
            | Self::RatingWindowExpired
            | Self::ClassAlreadyStarted
            | Self::CheckinWindowClosed
            | Self::PinNotSet => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::InvalidToken | Self::InvalidOtp => {
                StatusCode::UNAUTHORIZED
            }
            Self::AccountNotVerified | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound
            | Self::SedeNotFound
            | Self::ClaseNotFound
            | Self::ReservaNotFound
            | Self::AsistenciaNotFound
            | Self::ObjetivoNotFound
            | Self::NoticiaNotFound
            | Self::NotificacionNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken
            | Self::UsernameTaken
            | Self::ClassFull
            | Self::DuplicateBooking
            | Self::AlreadyCheckedIn
            | Self::AlreadyRated => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BookingRejection> for ApiError {
    fn from(rejection: BookingRejection) -> Self {
        match rejection {
            BookingRejection::ClassFull => Self::ClassFull,
            BookingRejection::AlreadyBooked => Self::DuplicateBooking,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // TraceLayer already records status for every request; only the
        // anyhow chain of a 500 is worth logging here.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
