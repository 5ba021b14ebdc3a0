use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::types::Calificacion;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::calificacion::{ListCalificacionesUseCase, RateClaseInput, RateClaseUseCase};

#[derive(Serialize)]
pub struct CalificacionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub clase_id: Uuid,
    pub puntuacion: i16,
    pub puntuacion_instructor: Option<i16>,
    pub comentario: Option<String>,
    #[serde(serialize_with = "ritmofit_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Calificacion> for CalificacionResponse {
    fn from(c: Calificacion) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            clase_id: c.clase_id,
            puntuacion: c.puntuacion,
            puntuacion_instructor: c.puntuacion_instructor,
            comentario: c.comentario,
            created_at: c.created_at,
        }
    }
}

// ── POST /api/calificaciones ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RateClaseRequest {
    pub clase_id: Uuid,
    pub puntuacion: i16,
    pub puntuacion_instructor: Option<i16>,
    pub comentario: Option<String>,
}

pub async fn rate_clase(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(body): Json<RateClaseRequest>,
) -> Result<(StatusCode, Json<CalificacionResponse>), ApiError> {
    let usecase = RateClaseUseCase {
        clases: state.clase_repo(),
        asistencias: state.asistencia_repo(),
        calificaciones: state.calificacion_repo(),
    };
    let calificacion = usecase
        .execute(
            user.actor(),
            RateClaseInput {
                clase_id: body.clase_id,
                puntuacion: body.puntuacion,
                puntuacion_instructor: body.puntuacion_instructor,
                comentario: body.comentario,
            },
            state.local_now(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(calificacion.into())))
}

// ── GET /api/calificaciones ──────────────────────────────────────────────────

pub async fn list_calificaciones(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CalificacionResponse>>, ApiError> {
    let usecase = ListCalificacionesUseCase {
        calificaciones: state.calificacion_repo(),
    };
    let items = usecase.execute(user.id).await?;
    Ok(Json(
        items.into_iter().map(CalificacionResponse::from).collect(),
    ))
}
