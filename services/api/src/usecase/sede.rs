use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::SedeRepository;
use crate::domain::types::Sede;
use crate::error::ApiError;

fn validate_coordinates(latitud: f64, longitud: f64) -> Result<(), ApiError> {
    if !(-90.0..=90.0).contains(&latitud) {
        return Err(ApiError::InvalidField("latitud"));
    }
    if !(-180.0..=180.0).contains(&longitud) {
        return Err(ApiError::InvalidField("longitud"));
    }
    Ok(())
}

pub struct ListSedesUseCase<R: SedeRepository> {
    pub repo: R,
}

impl<R: SedeRepository> ListSedesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Sede>, ApiError> {
        self.repo.list().await
    }
}

pub struct GetSedeUseCase<R: SedeRepository> {
    pub repo: R,
}

impl<R: SedeRepository> GetSedeUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Sede, ApiError> {
        self.repo.get(id).await?.ok_or(ApiError::SedeNotFound)
    }
}

pub struct CreateSedeInput {
    pub nombre: String,
    pub direccion: String,
    pub latitud: f64,
    pub longitud: f64,
    pub disciplinas: String,
    pub telefono: Option<String>,
}

pub struct CreateSedeUseCase<R: SedeRepository> {
    pub repo: R,
}

impl<R: SedeRepository> CreateSedeUseCase<R> {
    pub async fn execute(&self, input: CreateSedeInput) -> Result<Sede, ApiError> {
        let nombre = input.nombre.trim();
        let direccion = input.direccion.trim();
        if nombre.is_empty() || direccion.is_empty() {
            return Err(ApiError::MissingData);
        }
        validate_coordinates(input.latitud, input.longitud)?;

        let sede = Sede {
            id: Uuid::now_v7(),
            nombre: nombre.to_owned(),
            direccion: direccion.to_owned(),
            latitud: input.latitud,
            longitud: input.longitud,
            disciplinas: input.disciplinas.trim().to_owned(),
            telefono: input.telefono,
            created_at: Utc::now(),
        };
        self.repo.create(&sede).await?;
        Ok(sede)
    }
}

#[derive(Default)]
pub struct UpdateSedeInput {
    pub nombre: Option<String>,
    pub direccion: Option<String>,
    pub latitud: Option<f64>,
    pub longitud: Option<f64>,
    pub disciplinas: Option<String>,
    pub telefono: Option<Option<String>>,
}

pub struct UpdateSedeUseCase<R: SedeRepository> {
    pub repo: R,
}

impl<R: SedeRepository> UpdateSedeUseCase<R> {
    pub async fn execute(&self, id: Uuid, input: UpdateSedeInput) -> Result<Sede, ApiError> {
        let mut sede = self.repo.get(id).await?.ok_or(ApiError::SedeNotFound)?;

        if let Some(nombre) = input.nombre {
            if nombre.trim().is_empty() {
                return Err(ApiError::InvalidField("nombre"));
            }
            sede.nombre = nombre.trim().to_owned();
        }
        if let Some(direccion) = input.direccion {
            if direccion.trim().is_empty() {
                return Err(ApiError::InvalidField("direccion"));
            }
            sede.direccion = direccion.trim().to_owned();
        }
        if let Some(latitud) = input.latitud {
            sede.latitud = latitud;
        }
        if let Some(longitud) = input.longitud {
            sede.longitud = longitud;
        }
        if let Some(disciplinas) = input.disciplinas {
            sede.disciplinas = disciplinas.trim().to_owned();
        }
        if let Some(telefono) = input.telefono {
            sede.telefono = telefono;
        }
        validate_coordinates(sede.latitud, sede.longitud)?;

        self.repo.update(&sede).await?;
        Ok(sede)
    }
}

pub struct DeleteSedeUseCase<R: SedeRepository> {
    pub repo: R,
}

impl<R: SedeRepository> DeleteSedeUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.repo.delete(id).await? {
            return Err(ApiError::SedeNotFound);
        }
        Ok(())
    }
}
