use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::RequireAdmin;
use crate::domain::types::Sede;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::sede::{
    CreateSedeInput, CreateSedeUseCase, DeleteSedeUseCase, GetSedeUseCase, ListSedesUseCase,
    UpdateSedeInput, UpdateSedeUseCase,
};

#[derive(Serialize)]
pub struct SedeResponse {
    pub id: Uuid,
    pub nombre: String,
    pub direccion: String,
    pub latitud: f64,
    pub longitud: f64,
    pub disciplinas: String,
    pub telefono: Option<String>,
}

impl From<Sede> for SedeResponse {
    fn from(sede: Sede) -> Self {
        Self {
            id: sede.id,
            nombre: sede.nombre,
            direccion: sede.direccion,
            latitud: sede.latitud,
            longitud: sede.longitud,
            disciplinas: sede.disciplinas,
            telefono: sede.telefono,
        }
    }
}

// ── GET /api/sedes ───────────────────────────────────────────────────────────

pub async fn list_sedes(
    State(state): State<AppState>,
) -> Result<Json<Vec<SedeResponse>>, ApiError> {
    let usecase = ListSedesUseCase {
        repo: state.sede_repo(),
    };
    let sedes = usecase.execute().await?;
    Ok(Json(sedes.into_iter().map(SedeResponse::from).collect()))
}

// ── GET /api/sedes/{id} ──────────────────────────────────────────────────────

pub async fn get_sede(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SedeResponse>, ApiError> {
    let usecase = GetSedeUseCase {
        repo: state.sede_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/sedes ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSedeRequest {
    pub nombre: String,
    pub direccion: String,
    pub latitud: f64,
    pub longitud: f64,
    #[serde(default)]
    pub disciplinas: String,
    pub telefono: Option<String>,
}

pub async fn create_sede(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateSedeRequest>,
) -> Result<(StatusCode, Json<SedeResponse>), ApiError> {
    let usecase = CreateSedeUseCase {
        repo: state.sede_repo(),
    };
    let sede = usecase
        .execute(CreateSedeInput {
            nombre: body.nombre,
            direccion: body.direccion,
            latitud: body.latitud,
            longitud: body.longitud,
            disciplinas: body.disciplinas,
            telefono: body.telefono,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(sede.into())))
}

// ── PATCH /api/sedes/{id} ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateSedeRequest {
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub disciplinas: Option<String>,
    #[serde(default, deserialize_with = "ritmofit_core::serde::double_option")]
    pub telefono: Option<Option<String>>,
}

pub async fn update_sede(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSedeRequest>,
) -> Result<Json<SedeResponse>, ApiError> {
    let usecase = UpdateSedeUseCase {
        repo: state.sede_repo(),
    };
    let sede = usecase
        .execute(
            id,
            UpdateSedeInput {
                nombre: body.nombre,
                direccion: body.direccion,
                latitud: body.latitud,
                longitud: body.longitud,
                disciplinas: body.disciplinas,
                telefono: body.telefono,
            },
        )
        .await?;
    Ok(Json(sede.into()))
}

// ── DELETE /api/sedes/{id} ───────────────────────────────────────────────────

pub async fn delete_sede(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteSedeUseCase {
        repo: state.sede_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
