use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::types::Notificacion;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::notificacion::{ListNotificacionesUseCase, MarkNotificacionReadUseCase};

#[derive(Serialize)]
pub struct NotificacionResponse {
    pub id: Uuid,
    pub titulo: String,
    pub mensaje: String,
    pub leida: bool,
    #[serde(serialize_with = "ritmofit_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Notificacion> for NotificacionResponse {
    fn from(n: Notificacion) -> Self {
        Self {
            id: n.id,
            titulo: n.titulo,
            mensaje: n.mensaje,
            leida: n.leida,
            created_at: n.created_at,
        }
    }
}

// ── GET /api/notificaciones ──────────────────────────────────────────────────

pub async fn list_notificaciones(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<NotificacionResponse>>, ApiError> {
    let usecase = ListNotificacionesUseCase {
        repo: state.notificacion_repo(),
    };
    let items = usecase.execute(user.id).await?;
    Ok(Json(
        items.into_iter().map(NotificacionResponse::from).collect(),
    ))
}

// ── PATCH /api/notificaciones/{id}/leida ─────────────────────────────────────

pub async fn mark_read(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = MarkNotificacionReadUseCase {
        repo: state.notificacion_repo(),
    };
    usecase.execute(user.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
