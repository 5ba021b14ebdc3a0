use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ritmofit_domain::booking::ReservaEstado;

use crate::auth::AuthUser;
use crate::domain::types::{Reserva, ReservaClase};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::reserva::{BookClaseUseCase, CancelReservaUseCase, ListReservasUseCase};

#[derive(Serialize)]
pub struct ReservaResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub clase_id: Uuid,
    pub estado: ReservaEstado,
    #[serde(serialize_with = "ritmofit_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Reserva> for ReservaResponse {
    fn from(r: Reserva) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            clase_id: r.clase_id,
            estado: r.estado,
            created_at: r.created_at,
        }
    }
}

/// A booking as listed to its owner, with the class it is for.
#[derive(Serialize)]
pub struct ReservaClaseResponse {
    #[serde(flatten)]
    pub reserva: ReservaResponse,
    pub sede_id: Uuid,
    pub disciplina: String,
    pub fecha: chrono::NaiveDate,
    #[serde(serialize_with = "ritmofit_core::serde::to_hh_mm")]
    pub hora_inicio: chrono::NaiveTime,
    pub duracion_min: i32,
}

impl From<ReservaClase> for ReservaClaseResponse {
    fn from(item: ReservaClase) -> Self {
        Self {
            reserva: item.reserva.into(),
            sede_id: item.clase.sede_id,
            disciplina: item.clase.disciplina,
            fecha: item.clase.fecha,
            hora_inicio: item.clase.hora_inicio,
            duracion_min: item.clase.duracion_min,
        }
    }
}

// ── POST /api/reservas ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct BookRequest {
    pub clase_id: Uuid,
}

pub async fn book_clase(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(body): Json<BookRequest>,
) -> Result<(StatusCode, Json<ReservaResponse>), ApiError> {
    let usecase = BookClaseUseCase {
        clases: state.clase_repo(),
        reservas: state.reserva_repo(),
    };
    let reserva = usecase
        .execute(user.actor(), body.clase_id, state.local_now())
        .await?;
    Ok((StatusCode::CREATED, Json(reserva.into())))
}

// ── GET /api/reservas ────────────────────────────────────────────────────────

pub async fn list_reservas(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReservaClaseResponse>>, ApiError> {
    let usecase = ListReservasUseCase {
        reservas: state.reserva_repo(),
    };
    let items = usecase.execute(user.id).await?;
    Ok(Json(
        items.into_iter().map(ReservaClaseResponse::from).collect(),
    ))
}

// ── DELETE /api/reservas/{id} ────────────────────────────────────────────────

pub async fn cancel_reserva(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = CancelReservaUseCase {
        reservas: state.reserva_repo(),
    };
    usecase.execute(user.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
