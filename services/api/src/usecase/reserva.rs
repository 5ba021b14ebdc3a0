use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;

use ritmofit_domain::booking::ReservaEstado;
use ritmofit_domain::user::Role;

use crate::domain::repository::{ClaseRepository, ReservaRepository};
use crate::domain::types::{Actor, Reserva, ReservaClase};
use crate::error::ApiError;

// ── Book ─────────────────────────────────────────────────────────────────────

pub struct BookClaseUseCase<C: ClaseRepository, R: ReservaRepository> {
    pub clases: C,
    pub reservas: R,
}

impl<C: ClaseRepository, R: ReservaRepository> BookClaseUseCase<C, R> {
    /// Book a seat for `actor` in `clase_id`. `now` is gym-local time.
    pub async fn execute(
        &self,
        actor: Actor,
        clase_id: Uuid,
        now: NaiveDateTime,
    ) -> Result<Reserva, ApiError> {
        if actor.role != Role::Socio {
            return Err(ApiError::Forbidden);
        }
        let cupo = self
            .clases
            .get(clase_id)
            .await?
            .ok_or(ApiError::ClaseNotFound)?;
        if now >= cupo.clase.starts_at() {
            return Err(ApiError::ClassAlreadyStarted);
        }

        let reserva = Reserva {
            id: Uuid::now_v7(),
            user_id: actor.user_id,
            clase_id,
            estado: ReservaEstado::Activa,
            created_at: Utc::now(),
        };
        self.reservas.book(&reserva).await?;

        tracing::info!(reserva_id = %reserva.id, %clase_id, user_id = %actor.user_id, "clase booked");
        Ok(reserva)
    }
}

// ── ListMine ─────────────────────────────────────────────────────────────────

pub struct ListReservasUseCase<R: ReservaRepository> {
    pub reservas: R,
}

impl<R: ReservaRepository> ListReservasUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<ReservaClase>, ApiError> {
        self.reservas.list_by_user(user_id).await
    }
}

// ── Cancel ───────────────────────────────────────────────────────────────────

pub struct CancelReservaUseCase<R: ReservaRepository> {
    pub reservas: R,
}

impl<R: ReservaRepository> CancelReservaUseCase<R> {
    /// Hard-delete the booking. Only its owner or an admin may cancel it.
    pub async fn execute(&self, actor: Actor, id: Uuid) -> Result<(), ApiError> {
        let reserva = self
            .reservas
            .get(id)
            .await?
            .ok_or(ApiError::ReservaNotFound)?;
        if !actor.can_manage(reserva.user_id) {
            return Err(ApiError::Forbidden);
        }
        if !self.reservas.delete(id).await? {
            return Err(ApiError::ReservaNotFound);
        }
        tracing::info!(reserva_id = %id, by = %actor.user_id, "reserva cancelled");
        Ok(())
    }
}
