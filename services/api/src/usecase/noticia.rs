use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use ritmofit_domain::news::NoticiaTipo;

use crate::domain::repository::NoticiaRepository;
use crate::domain::types::Noticia;
use crate::error::ApiError;

fn validate_dates(publicacion: NaiveDate, expiracion: Option<NaiveDate>) -> Result<(), ApiError> {
    if expiracion.is_some_and(|exp| exp < publicacion) {
        return Err(ApiError::InvalidField("fecha_expiracion"));
    }
    Ok(())
}

pub struct ListNoticiasUseCase<R: NoticiaRepository> {
    pub repo: R,
}

impl<R: NoticiaRepository> ListNoticiasUseCase<R> {
    pub async fn execute(&self, today: NaiveDate) -> Result<Vec<Noticia>, ApiError> {
        self.repo.list_visible(today).await
    }
}

pub struct GetNoticiaUseCase<R: NoticiaRepository> {
    pub repo: R,
}

impl<R: NoticiaRepository> GetNoticiaUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Noticia, ApiError> {
        self.repo.get(id).await?.ok_or(ApiError::NoticiaNotFound)
    }
}

pub struct CreateNoticiaInput {
    pub titulo: String,
    pub contenido: String,
    pub tipo: NoticiaTipo,
    pub imagen_url: Option<String>,
    pub codigo_promo: Option<String>,
    /// Defaults to `today`.
    pub fecha_publicacion: Option<NaiveDate>,
    pub fecha_expiracion: Option<NaiveDate>,
}

pub struct CreateNoticiaUseCase<R: NoticiaRepository> {
    pub repo: R,
}

impl<R: NoticiaRepository> CreateNoticiaUseCase<R> {
    pub async fn execute(
        &self,
        input: CreateNoticiaInput,
        today: NaiveDate,
    ) -> Result<Noticia, ApiError> {
        if input.titulo.trim().is_empty() || input.contenido.trim().is_empty() {
            return Err(ApiError::MissingData);
        }
        let fecha_publicacion = input.fecha_publicacion.unwrap_or(today);
        validate_dates(fecha_publicacion, input.fecha_expiracion)?;

        let noticia = Noticia {
            id: Uuid::now_v7(),
            titulo: input.titulo.trim().to_owned(),
            contenido: input.contenido,
            tipo: input.tipo,
            imagen_url: input.imagen_url,
            codigo_promo: input.codigo_promo,
            fecha_publicacion,
            fecha_expiracion: input.fecha_expiracion,
            created_at: Utc::now(),
        };
        self.repo.create(&noticia).await?;
        Ok(noticia)
    }
}

#[derive(Default)]
pub struct UpdateNoticiaInput {
    pub titulo: Option<String>,
    pub contenido: Option<String>,
    pub tipo: Option<NoticiaTipo>,
    pub imagen_url: Option<Option<String>>,
    pub codigo_promo: Option<Option<String>>,
    pub fecha_publicacion: Option<NaiveDate>,
    pub fecha_expiracion: Option<Option<NaiveDate>>,
}

pub struct UpdateNoticiaUseCase<R: NoticiaRepository> {
    pub repo: R,
}

impl<R: NoticiaRepository> UpdateNoticiaUseCase<R> {
    pub async fn execute(&self, id: Uuid, input: UpdateNoticiaInput) -> Result<Noticia, ApiError> {
        let mut noticia = self.repo.get(id).await?.ok_or(ApiError::NoticiaNotFound)?;

        if let Some(titulo) = input.titulo {
            if titulo.trim().is_empty() {
                return Err(ApiError::InvalidField("titulo"));
            }
            noticia.titulo = titulo.trim().to_owned();
        }
        if let Some(contenido) = input.contenido {
            noticia.contenido = contenido;
        }
        if let Some(tipo) = input.tipo {
            noticia.tipo = tipo;
        }
        if let Some(imagen_url) = input.imagen_url {
            noticia.imagen_url = imagen_url;
        }
        if let Some(codigo_promo) = input.codigo_promo {
            noticia.codigo_promo = codigo_promo;
        }
        if let Some(fecha) = input.fecha_publicacion {
            noticia.fecha_publicacion = fecha;
        }
        if let Some(fecha) = input.fecha_expiracion {
            noticia.fecha_expiracion = fecha;
        }
        validate_dates(noticia.fecha_publicacion, noticia.fecha_expiracion)?;

        self.repo.update(&noticia).await?;
        Ok(noticia)
    }
}

pub struct DeleteNoticiaUseCase<R: NoticiaRepository> {
    pub repo: R,
}

impl<R: NoticiaRepository> DeleteNoticiaUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::NoticiaNotFound);
        }
        Ok(())
    }
}
