use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::RequireStaff;
use crate::domain::types::{ClaseCupo, ClaseFilter};
use crate::error::ApiError;
use crate::handlers::calificacion::CalificacionResponse;
use crate::handlers::reserva::ReservaResponse;
use crate::state::AppState;
use crate::usecase::clase::{
    ClaseRatingsUseCase, ClaseRosterUseCase, CreateClaseInput, CreateClaseUseCase,
    DeleteClaseUseCase, GetClaseUseCase, ListClasesUseCase, UpdateClaseInput, UpdateClaseUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ClaseResponse {
    pub id: Uuid,
    pub sede_id: Uuid,
    pub instructor_id: Uuid,
    pub disciplina: String,
    pub fecha: NaiveDate,
    #[serde(serialize_with = "ritmofit_core::serde::to_hh_mm")]
    pub hora_inicio: NaiveTime,
    pub duracion_min: i32,
    pub cupo_maximo: i32,
    pub cupos_disponibles: u64,
}

impl From<ClaseCupo> for ClaseResponse {
    fn from(cupo: ClaseCupo) -> Self {
        let cupos_disponibles = cupo.cupos_disponibles();
        let clase = cupo.clase;
        Self {
            id: clase.id,
            sede_id: clase.sede_id,
            instructor_id: clase.instructor_id,
            disciplina: clase.disciplina,
            fecha: clase.fecha,
            hora_inicio: clase.hora_inicio,
            duracion_min: clase.duracion_min,
            cupo_maximo: clase.cupo_maximo,
            cupos_disponibles,
        }
    }
}

// ── GET /api/clases ──────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ClaseListQuery {
    pub sede_id: Option<Uuid>,
    pub disciplina: Option<String>,
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}

pub async fn list_clases(
    State(state): State<AppState>,
    Query(query): Query<ClaseListQuery>,
) -> Result<Json<Vec<ClaseResponse>>, ApiError> {
    let usecase = ListClasesUseCase {
        clases: state.clase_repo(),
    };
    let filter = ClaseFilter {
        sede_id: query.sede_id,
        disciplina: query.disciplina.filter(|d| !d.trim().is_empty()),
        desde: query.desde,
        hasta: query.hasta,
    };
    let clases = usecase.execute(filter).await?;
    Ok(Json(clases.into_iter().map(ClaseResponse::from).collect()))
}

// ── GET /api/clases/{id} ─────────────────────────────────────────────────────

pub async fn get_clase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaseResponse>, ApiError> {
    let usecase = GetClaseUseCase {
        clases: state.clase_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/clases ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateClaseRequest {
    pub sede_id: Uuid,
    /// Required for admins; instructors may omit it.
    pub instructor_id: Option<Uuid>,
    pub disciplina: String,
    pub fecha: NaiveDate,
    #[serde(deserialize_with = "ritmofit_core::serde::from_hh_mm")]
    pub hora_inicio: NaiveTime,
    pub duracion_min: i32,
    pub cupo_maximo: i32,
}

pub async fn create_clase(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(body): Json<CreateClaseRequest>,
) -> Result<(StatusCode, Json<ClaseResponse>), ApiError> {
    let usecase = CreateClaseUseCase {
        clases: state.clase_repo(),
        sedes: state.sede_repo(),
        users: state.user_repo(),
    };
    let clase = usecase
        .execute(
            user.actor(),
            CreateClaseInput {
                sede_id: body.sede_id,
                instructor_id: body.instructor_id,
                disciplina: body.disciplina,
                fecha: body.fecha,
                hora_inicio: body.hora_inicio,
                duracion_min: body.duracion_min,
                cupo_maximo: body.cupo_maximo,
            },
        )
        .await?;
    let cupo = ClaseCupo {
        clase,
        reservados: 0,
    };
    Ok((StatusCode::CREATED, Json(cupo.into())))
}

// ── PATCH /api/clases/{id} ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateClaseRequest {
    pub sede_id: Option<Uuid>,
    pub disciplina: Option<String>,
    pub fecha: Option<NaiveDate>,
    #[serde(default, deserialize_with = "ritmofit_core::serde::from_opt_hh_mm")]
    pub hora_inicio: Option<NaiveTime>,
    pub duracion_min: Option<i32>,
    pub cupo_maximo: Option<i32>,
}

pub async fn update_clase(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateClaseRequest>,
) -> Result<Json<ClaseResponse>, ApiError> {
    let usecase = UpdateClaseUseCase {
        clases: state.clase_repo(),
        sedes: state.sede_repo(),
    };
    let cupo = usecase
        .execute(
            user.actor(),
            id,
            UpdateClaseInput {
                sede_id: body.sede_id,
                disciplina: body.disciplina,
                fecha: body.fecha,
                hora_inicio: body.hora_inicio,
                duracion_min: body.duracion_min,
                cupo_maximo: body.cupo_maximo,
            },
        )
        .await?;
    Ok(Json(cupo.into()))
}

// ── DELETE /api/clases/{id} ──────────────────────────────────────────────────

pub async fn delete_clase(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteClaseUseCase {
        clases: state.clase_repo(),
    };
    usecase.execute(user.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /api/clases/{id}/reservas ────────────────────────────────────────────

pub async fn get_roster(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReservaResponse>>, ApiError> {
    let usecase = ClaseRosterUseCase {
        clases: state.clase_repo(),
        reservas: state.reserva_repo(),
    };
    let reservas = usecase.execute(user.actor(), id).await?;
    Ok(Json(reservas.into_iter().map(ReservaResponse::from).collect()))
}

// ── GET /api/clases/{id}/calificaciones ──────────────────────────────────────

pub async fn get_clase_ratings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CalificacionResponse>>, ApiError> {
    let usecase = ClaseRatingsUseCase {
        clases: state.clase_repo(),
        calificaciones: state.calificacion_repo(),
    };
    let items = usecase.execute(id).await?;
    Ok(Json(
        items.into_iter().map(CalificacionResponse::from).collect(),
    ))
}
