use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::repository::{AsistenciaRepository, ObjetivoRepository};
use crate::domain::types::{Actor, Objetivo, ObjetivoProgreso};
use crate::error::ApiError;

async fn with_progress<A: AsistenciaRepository>(
    asistencias: &A,
    objetivo: Objetivo,
) -> Result<ObjetivoProgreso, ApiError> {
    let completadas = asistencias
        .count_in_period(
            objetivo.user_id,
            &objetivo.disciplina,
            objetivo.fecha_inicio,
            objetivo.fecha_fin,
        )
        .await?;
    Ok(ObjetivoProgreso {
        objetivo,
        completadas,
    })
}

async fn owned_objetivo<R: ObjetivoRepository>(
    repo: &R,
    actor: Actor,
    id: Uuid,
) -> Result<Objetivo, ApiError> {
    let objetivo = repo.get(id).await?.ok_or(ApiError::ObjetivoNotFound)?;
    if objetivo.user_id != actor.user_id {
        return Err(ApiError::Forbidden);
    }
    Ok(objetivo)
}

pub struct ListObjetivosUseCase<R: ObjetivoRepository, A: AsistenciaRepository> {
    pub objetivos: R,
    pub asistencias: A,
}

impl<R: ObjetivoRepository, A: AsistenciaRepository> ListObjetivosUseCase<R, A> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<ObjetivoProgreso>, ApiError> {
        let objetivos = self.objetivos.list_by_user(user_id).await?;
        let mut out = Vec::with_capacity(objetivos.len());
        for objetivo in objetivos {
            out.push(with_progress(&self.asistencias, objetivo).await?);
        }
        Ok(out)
    }
}

pub struct GetObjetivoUseCase<R: ObjetivoRepository, A: AsistenciaRepository> {
    pub objetivos: R,
    pub asistencias: A,
}

impl<R: ObjetivoRepository, A: AsistenciaRepository> GetObjetivoUseCase<R, A> {
    pub async fn execute(&self, actor: Actor, id: Uuid) -> Result<ObjetivoProgreso, ApiError> {
        let objetivo = owned_objetivo(&self.objetivos, actor, id).await?;
        with_progress(&self.asistencias, objetivo).await
    }
}

pub struct CreateObjetivoInput {
    pub disciplina: String,
    pub clases_objetivo: i32,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
}

pub struct CreateObjetivoUseCase<R: ObjetivoRepository, A: AsistenciaRepository> {
    pub objetivos: R,
    pub asistencias: A,
}

impl<R: ObjetivoRepository, A: AsistenciaRepository> CreateObjetivoUseCase<R, A> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateObjetivoInput,
    ) -> Result<ObjetivoProgreso, ApiError> {
        let disciplina = input.disciplina.trim();
        if disciplina.is_empty() {
            return Err(ApiError::InvalidField("disciplina"));
        }
        if input.clases_objetivo <= 0 {
            return Err(ApiError::InvalidField("clases_objetivo"));
        }
        if input.fecha_inicio > input.fecha_fin {
            return Err(ApiError::InvalidField("fecha_fin"));
        }

        let objetivo = Objetivo {
            id: Uuid::now_v7(),
            user_id,
            disciplina: disciplina.to_owned(),
            clases_objetivo: input.clases_objetivo,
            fecha_inicio: input.fecha_inicio,
            fecha_fin: input.fecha_fin,
            created_at: Utc::now(),
        };
        self.objetivos.create(&objetivo).await?;
        with_progress(&self.asistencias, objetivo).await
    }
}

pub struct DeleteObjetivoUseCase<R: ObjetivoRepository> {
    pub objetivos: R,
}

impl<R: ObjetivoRepository> DeleteObjetivoUseCase<R> {
    pub async fn execute(&self, actor: Actor, id: Uuid) -> Result<(), ApiError> {
        owned_objetivo(&self.objetivos, actor, id).await?;
        if !self.objetivos.delete(id).await? {
            return Err(ApiError::ObjetivoNotFound);
        }
        Ok(())
    }
}
