use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::types::{Asistencia, HistorialItem};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::asistencia::{CheckInUseCase, HistorialUseCase};

#[derive(Serialize)]
pub struct AsistenciaResponse {
    pub id: Uuid,
    pub clase_id: Uuid,
    pub fecha_asistencia: NaiveDate,
    #[serde(serialize_with = "ritmofit_core::serde::to_opt_hh_mm")]
    pub checkin_hora: Option<NaiveTime>,
    pub confirmado_qr: bool,
}

impl From<Asistencia> for AsistenciaResponse {
    fn from(a: Asistencia) -> Self {
        Self {
            id: a.id,
            clase_id: a.clase_id,
            fecha_asistencia: a.fecha_asistencia,
            checkin_hora: a.checkin_hora,
            confirmado_qr: a.confirmado_qr,
        }
    }
}

// ── POST /api/asistencias ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckInRequest {
    pub clase_id: Uuid,
    #[serde(default)]
    pub confirmado_qr: bool,
}

pub async fn check_in(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<AsistenciaResponse>), ApiError> {
    let usecase = CheckInUseCase {
        clases: state.clase_repo(),
        reservas: state.reserva_repo(),
        asistencias: state.asistencia_repo(),
    };
    let asistencia = usecase
        .execute(
            user.actor(),
            body.clase_id,
            body.confirmado_qr,
            state.local_now(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(asistencia.into())))
}

// ── GET /api/historial ───────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct HistorialQuery {
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct HistorialResponse {
    #[serde(flatten)]
    pub asistencia: AsistenciaResponse,
    pub disciplina: String,
    pub fecha: NaiveDate,
    #[serde(serialize_with = "ritmofit_core::serde::to_hh_mm")]
    pub hora_inicio: NaiveTime,
    pub duracion_min: i32,
    pub sede_id: Uuid,
    pub sede_nombre: Option<String>,
}

impl From<HistorialItem> for HistorialResponse {
    fn from(item: HistorialItem) -> Self {
        Self {
            asistencia: item.asistencia.into(),
            disciplina: item.clase.disciplina,
            fecha: item.clase.fecha,
            hora_inicio: item.clase.hora_inicio,
            duracion_min: item.clase.duracion_min,
            sede_id: item.clase.sede_id,
            sede_nombre: item.sede_nombre,
        }
    }
}

pub async fn get_historial(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Query(query): Query<HistorialQuery>,
) -> Result<Json<Vec<HistorialResponse>>, ApiError> {
    let usecase = HistorialUseCase {
        asistencias: state.asistencia_repo(),
    };
    let items = usecase.execute(user.id, query.desde, query.hasta).await?;
    Ok(Json(items.into_iter().map(HistorialResponse::from).collect()))
}
