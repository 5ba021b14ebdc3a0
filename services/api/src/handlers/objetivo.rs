use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::domain::types::ObjetivoProgreso;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::objetivo::{
    CreateObjetivoInput, CreateObjetivoUseCase, DeleteObjetivoUseCase, GetObjetivoUseCase,
    ListObjetivosUseCase,
};

#[derive(Serialize)]
pub struct ObjetivoResponse {
    pub id: Uuid,
    pub disciplina: String,
    pub clases_objetivo: i32,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub completadas: u64,
    pub porcentaje: u8,
}

impl From<ObjetivoProgreso> for ObjetivoResponse {
    fn from(progreso: ObjetivoProgreso) -> Self {
        let porcentaje = progreso.porcentaje();
        let objetivo = progreso.objetivo;
        Self {
            id: objetivo.id,
            disciplina: objetivo.disciplina,
            clases_objetivo: objetivo.clases_objetivo,
            fecha_inicio: objetivo.fecha_inicio,
            fecha_fin: objetivo.fecha_fin,
            completadas: progreso.completadas,
            porcentaje,
        }
    }
}

// ── GET /api/objetivos ───────────────────────────────────────────────────────

pub async fn list_objetivos(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ObjetivoResponse>>, ApiError> {
    let usecase = ListObjetivosUseCase {
        objetivos: state.objetivo_repo(),
        asistencias: state.asistencia_repo(),
    };
    let items = usecase.execute(user.id).await?;
    Ok(Json(items.into_iter().map(ObjetivoResponse::from).collect()))
}

// ── POST /api/objetivos ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateObjetivoRequest {
    pub disciplina: String,
    pub clases_objetivo: i32,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
}

pub async fn create_objetivo(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateObjetivoRequest>,
) -> Result<(StatusCode, Json<ObjetivoResponse>), ApiError> {
    let usecase = CreateObjetivoUseCase {
        objetivos: state.objetivo_repo(),
        asistencias: state.asistencia_repo(),
    };
    let progreso = usecase
        .execute(
            user.id,
            CreateObjetivoInput {
                disciplina: body.disciplina,
                clases_objetivo: body.clases_objetivo,
                fecha_inicio: body.fecha_inicio,
                fecha_fin: body.fecha_fin,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(progreso.into())))
}

// ── GET /api/objetivos/{id} ──────────────────────────────────────────────────

pub async fn get_objetivo(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ObjetivoResponse>, ApiError> {
    let usecase = GetObjetivoUseCase {
        objetivos: state.objetivo_repo(),
        asistencias: state.asistencia_repo(),
    };
    Ok(Json(usecase.execute(user.actor(), id).await?.into()))
}

// ── DELETE /api/objetivos/{id} ───────────────────────────────────────────────

pub async fn delete_objetivo(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteObjetivoUseCase {
        objetivos: state.objetivo_repo(),
    };
    usecase.execute(user.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
