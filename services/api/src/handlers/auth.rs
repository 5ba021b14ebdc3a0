use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::user::UserResponse;
use crate::state::AppState;
use crate::usecase::auth::{
    ForgotPasswordUseCase, LoginInput, LoginUseCase, PinLoginInput, PinLoginUseCase,
    RegisterInput, RegisterUseCase, ResetPasswordInput, ResetPasswordUseCase, Session,
    VerifyCodeInput, VerifyLoginUseCase, VerifyRegisterUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    /// Token expiry, seconds since epoch.
    pub expires_at: u64,
    pub user: UserResponse,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            expires_at: session.expires_at,
            user: session.user.into(),
        }
    }
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub nombre: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
    };
    let user = usecase
        .execute(RegisterInput {
            nombre: body.nombre,
            email: body.email,
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /api/auth/register/verify ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

pub async fn verify_register(
    State(state): State<AppState>,
    Json(body): Json<VerifyCodeRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let usecase = VerifyRegisterUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        jwt_secret: state.jwt_secret.clone(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let session = usecase
        .execute(VerifyCodeInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok(Json(session.into()))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
    };
    usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(StatusCode::ACCEPTED)
}

// ── POST /api/auth/login/verify ──────────────────────────────────────────────

pub async fn verify_login(
    State(state): State<AppState>,
    Json(body): Json<VerifyCodeRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let usecase = VerifyLoginUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        jwt_secret: state.jwt_secret.clone(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let session = usecase
        .execute(VerifyCodeInput {
            email: body.email,
            code: body.code,
        })
        .await?;
    Ok(Json(session.into()))
}

// ── POST /api/auth/login/pin ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PinLoginRequest {
    pub email: String,
    pub pin: String,
}

pub async fn login_pin(
    State(state): State<AppState>,
    Json(body): Json<PinLoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let usecase = PinLoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
        token_ttl_secs: state.token_ttl_secs,
    };
    let session = usecase
        .execute(PinLoginInput {
            email: body.email,
            pin: body.pin,
        })
        .await?;
    Ok(Json(session.into()))
}

// ── POST /api/auth/password/forgot ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = ForgotPasswordUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
    };
    usecase.execute(&body.email).await?;
    Ok(StatusCode::ACCEPTED)
}

// ── POST /api/auth/password/reset ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = ResetPasswordUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            code: body.code,
            password: body.password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
