use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ritmofit_domain::pagination::PageRequest;
use ritmofit_domain::user::Role;

use crate::auth::{AuthUser, RequireAdmin};
use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::user::{
    ConfirmDeletionUseCase, ListUsersUseCase, RequestDeletionUseCase, SetActiveUseCase,
    SetPinUseCase, SetPushTokenUseCase, SetRoleUseCase, UpdateMeInput, UpdateMeUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub activo: bool,
    pub has_pin: bool,
    #[serde(serialize_with = "ritmofit_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "ritmofit_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nombre: user.nombre,
            email: user.email,
            username: user.username,
            role: user.role,
            activo: user.activo,
            has_pin: user.pin_hash.is_some(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── GET /api/users/me ────────────────────────────────────────────────────────

pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(user.into())
}

// ── PATCH /api/users/me ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub nombre: Option<String>,
    pub username: Option<String>,
}

pub async fn update_me(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = UpdateMeUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(
            user,
            UpdateMeInput {
                nombre: body.nombre,
                username: body.username,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── PUT /api/users/me/pin ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetPinRequest {
    pub pin: String,
}

pub async fn set_pin(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(body): Json<SetPinRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = SetPinUseCase {
        users: state.user_repo(),
    };
    usecase.execute(user, &body.pin).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT /api/users/me/push-token ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetPushTokenRequest {
    /// `null` unregisters the device.
    pub push_token: Option<String>,
}

pub async fn set_push_token(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(body): Json<SetPushTokenRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = SetPushTokenUseCase {
        users: state.user_repo(),
    };
    usecase.execute(user, body.push_token).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /api/users/me/delete-request ────────────────────────────────────────

pub async fn request_deletion(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let usecase = RequestDeletionUseCase {
        otps: state.otp_repo(),
        mailer: state.mailer.clone(),
    };
    usecase.execute(&user).await?;
    Ok(StatusCode::ACCEPTED)
}

// ── DELETE /api/users/me ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ConfirmDeletionRequest {
    pub code: String,
}

pub async fn delete_me(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(body): Json<ConfirmDeletionRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = ConfirmDeletionUseCase {
        users: state.user_repo(),
        otps: state.otp_repo(),
    };
    usecase.execute(user, &body.code).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/users ───────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct UserListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_users(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let users = usecase.execute(page).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

// ── PATCH /api/users/{id}/role ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetRoleRequest {
    pub role: Role,
}

pub async fn set_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<SetRoleRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    if user_id == admin.id && body.role != Role::Admin {
        return Err(ApiError::Forbidden);
    }
    let usecase = SetRoleUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(user_id, body.role).await?;
    Ok(Json(user.into()))
}

// ── PATCH /api/users/{id}/active ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetActiveRequest {
    pub activo: bool,
}

pub async fn set_active(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<SetActiveRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    if user_id == admin.id && !body.activo {
        return Err(ApiError::Forbidden);
    }
    let usecase = SetActiveUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(user_id, body.activo).await?;
    Ok(Json(user.into()))
}
