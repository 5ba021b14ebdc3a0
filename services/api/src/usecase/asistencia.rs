use chrono::{NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::{AsistenciaRepository, ClaseRepository, ReservaRepository};
use crate::domain::types::{Actor, Asistencia, HistorialItem};
use crate::error::ApiError;

// ── CheckIn ──────────────────────────────────────────────────────────────────

pub struct CheckInUseCase<C, R, A>
where
    C: ClaseRepository,
    R: ReservaRepository,
    A: AsistenciaRepository,
{
    pub clases: C,
    pub reservas: R,
    pub asistencias: A,
}

impl<C, R, A> CheckInUseCase<C, R, A>
where
    C: ClaseRepository,
    R: ReservaRepository,
    A: AsistenciaRepository,
{
    /// Record attendance at `now` (gym-local). The booking's `estado` is left as is.
    pub async fn execute(
        &self,
        actor: Actor,
        clase_id: Uuid,
        confirmado_qr: bool,
        now: NaiveDateTime,
    ) -> Result<Asistencia, ApiError> {
        let cupo = self
            .clases
            .get(clase_id)
            .await?
            .ok_or(ApiError::ClaseNotFound)?;
        if self
            .reservas
            .find_by_user_and_clase(actor.user_id, clase_id)
            .await?
            .is_none()
        {
            return Err(ApiError::ReservaNotFound);
        }
        if !cupo.clase.checkin_open(now) {
            return Err(ApiError::CheckinWindowClosed);
        }
        if self.asistencias.find(actor.user_id, clase_id).await?.is_some() {
            return Err(ApiError::AlreadyCheckedIn);
        }

        let asistencia = Asistencia {
            id: Uuid::now_v7(),
            user_id: actor.user_id,
            clase_id,
            fecha_asistencia: now.date(),
            checkin_hora: Some(now.time()),
            confirmado_qr,
            created_at: Utc::now(),
        };
        self.asistencias.create(&asistencia).await?;

        tracing::info!(%clase_id, user_id = %actor.user_id, confirmado_qr, "check-in");
        Ok(asistencia)
    }
}

// ── Historial ────────────────────────────────────────────────────────────────

pub struct HistorialUseCase<A: AsistenciaRepository> {
    pub asistencias: A,
}

impl<A: AsistenciaRepository> HistorialUseCase<A> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        desde: Option<NaiveDate>,
        hasta: Option<NaiveDate>,
    ) -> Result<Vec<HistorialItem>, ApiError> {
        if let (Some(desde), Some(hasta)) = (desde, hasta) {
            if desde > hasta {
                return Err(ApiError::InvalidField("desde"));
            }
        }
        self.asistencias.history(user_id, desde, hasta).await
    }
}
