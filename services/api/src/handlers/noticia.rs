use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ritmofit_domain::news::NoticiaTipo;

use crate::auth::RequireAdmin;
use crate::domain::types::Noticia;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::noticia::{
    CreateNoticiaInput, CreateNoticiaUseCase, DeleteNoticiaUseCase, GetNoticiaUseCase,
    ListNoticiasUseCase, UpdateNoticiaInput, UpdateNoticiaUseCase,
};

#[derive(Serialize)]
pub struct NoticiaResponse {
    pub id: Uuid,
    pub titulo: String,
    pub contenido: String,
    pub tipo: NoticiaTipo,
    pub imagen_url: Option<String>,
    pub codigo_promo: Option<String>,
    pub fecha_publicacion: NaiveDate,
    pub fecha_expiracion: Option<NaiveDate>,
}

impl From<Noticia> for NoticiaResponse {
    fn from(n: Noticia) -> Self {
        Self {
            id: n.id,
            titulo: n.titulo,
            contenido: n.contenido,
            tipo: n.tipo,
            imagen_url: n.imagen_url,
            codigo_promo: n.codigo_promo,
            fecha_publicacion: n.fecha_publicacion,
            fecha_expiracion: n.fecha_expiracion,
        }
    }
}

// ── GET /api/noticias ────────────────────────────────────────────────────────

pub async fn list_noticias(
    State(state): State<AppState>,
) -> Result<Json<Vec<NoticiaResponse>>, ApiError> {
    let usecase = ListNoticiasUseCase {
        repo: state.noticia_repo(),
    };
    let items = usecase.execute(state.today()).await?;
    Ok(Json(items.into_iter().map(NoticiaResponse::from).collect()))
}

// ── GET /api/noticias/{id} ───────────────────────────────────────────────────

pub async fn get_noticia(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NoticiaResponse>, ApiError> {
    let usecase = GetNoticiaUseCase {
        repo: state.noticia_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /api/noticias ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateNoticiaRequest {
    pub titulo: String,
    pub contenido: String,
    #[serde(default = "default_tipo")]
    pub tipo: NoticiaTipo,
    pub imagen_url: Option<String>,
    pub codigo_promo: Option<String>,
    pub fecha_publicacion: Option<NaiveDate>,
    pub fecha_expiracion: Option<NaiveDate>,
}

fn default_tipo() -> NoticiaTipo {
    NoticiaTipo::Noticia
}

pub async fn create_noticia(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<CreateNoticiaRequest>,
) -> Result<(StatusCode, Json<NoticiaResponse>), ApiError> {
    let usecase = CreateNoticiaUseCase {
        repo: state.noticia_repo(),
    };
    let noticia = usecase
        .execute(
            CreateNoticiaInput {
                titulo: body.titulo,
                contenido: body.contenido,
                tipo: body.tipo,
                imagen_url: body.imagen_url,
                codigo_promo: body.codigo_promo,
                fecha_publicacion: body.fecha_publicacion,
                fecha_expiracion: body.fecha_expiracion,
            },
            state.today(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(noticia.into())))
}

// ── PATCH /api/noticias/{id} ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateNoticiaRequest {
    pub titulo: Option<String>,
    pub contenido: Option<String>,
    pub tipo: Option<NoticiaTipo>,
    #[serde(default, deserialize_with = "ritmofit_core::serde::double_option")]
    pub imagen_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "ritmofit_core::serde::double_option")]
    pub codigo_promo: Option<Option<String>>,
    pub fecha_publicacion: Option<NaiveDate>,
    #[serde(default, deserialize_with = "ritmofit_core::serde::double_option")]
    pub fecha_expiracion: Option<Option<NaiveDate>>,
}

pub async fn update_noticia(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateNoticiaRequest>,
) -> Result<Json<NoticiaResponse>, ApiError> {
    let usecase = UpdateNoticiaUseCase {
        repo: state.noticia_repo(),
    };
    let noticia = usecase
        .execute(
            id,
            UpdateNoticiaInput {
                titulo: body.titulo,
                contenido: body.contenido,
                tipo: body.tipo,
                imagen_url: body.imagen_url,
                codigo_promo: body.codigo_promo,
                fecha_publicacion: body.fecha_publicacion,
                fecha_expiracion: body.fecha_expiracion,
            },
        )
        .await?;
    Ok(Json(noticia.into()))
}

// ── DELETE /api/noticias/{id} ────────────────────────────────────────────────

pub async fn delete_noticia(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteNoticiaUseCase {
        repo: state.noticia_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
