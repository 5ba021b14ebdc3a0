use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::{AsistenciaRepository, CalificacionRepository, ClaseRepository};
use crate::domain::types::{Actor, Calificacion, within_rating_window};
use crate::error::ApiError;

const SCORE_RANGE: std::ops::RangeInclusive<i16> = 1..=5;

pub struct RateClaseInput {
    pub clase_id: Uuid,
    pub puntuacion: i16,
    pub puntuacion_instructor: Option<i16>,
    pub comentario: Option<String>,
}

pub struct RateClaseUseCase<C, A, Q>
where
    C: ClaseRepository,
    A: AsistenciaRepository,
    Q: CalificacionRepository,
{
    pub clases: C,
    pub asistencias: A,
    pub calificaciones: Q,
}

impl<C, A, Q> RateClaseUseCase<C, A, Q>
where
    C: ClaseRepository,
    A: AsistenciaRepository,
    Q: CalificacionRepository,
{
    /// Rate a class the actor attended, once, within 24h of check-in. `now` is gym-local.
    pub async fn execute(
        &self,
        actor: Actor,
        input: RateClaseInput,
        now: NaiveDateTime,
    ) -> Result<Calificacion, ApiError> {
        if !SCORE_RANGE.contains(&input.puntuacion) {
            return Err(ApiError::InvalidField("puntuacion"));
        }
        if input
            .puntuacion_instructor
            .is_some_and(|p| !SCORE_RANGE.contains(&p))
        {
            return Err(ApiError::InvalidField("puntuacion_instructor"));
        }

        let asistencia = self
            .asistencias
            .find(actor.user_id, input.clase_id)
            .await?
            .ok_or(ApiError::AsistenciaNotFound)?;
        if self
            .calificaciones
            .exists(actor.user_id, input.clase_id)
            .await?
        {
            return Err(ApiError::AlreadyRated);
        }

        let hora_clase = self
            .clases
            .get(input.clase_id)
            .await?
            .map(|c| c.clase.hora_inicio);
        let checkin = asistencia.checkin_instant(hora_clase);
        if !within_rating_window(checkin, now) {
            return Err(ApiError::RatingWindowExpired);
        }

        let calificacion = Calificacion {
            id: Uuid::now_v7(),
            user_id: actor.user_id,
            clase_id: input.clase_id,
            puntuacion: input.puntuacion,
            puntuacion_instructor: input.puntuacion_instructor,
            comentario: input
                .comentario
                .map(|c| c.trim().to_owned())
                .filter(|c| !c.is_empty()),
            created_at: Utc::now(),
        };
        self.calificaciones.create(&calificacion).await?;
        Ok(calificacion)
    }
}

pub struct ListCalificacionesUseCase<Q: CalificacionRepository> {
    pub calificaciones: Q,
}

impl<Q: CalificacionRepository> ListCalificacionesUseCase<Q> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Calificacion>, ApiError> {
        self.calificaciones.list_by_user(user_id).await
    }
}
