#![allow(async_fn_in_trait)]

use chrono::NaiveDate;
use uuid::Uuid;

use ritmofit_domain::otp::OtpPurpose;
use ritmofit_domain::pagination::PageRequest;

use crate::domain::types::{
    Asistencia, Calificacion, Clase, ClaseCupo, ClaseFilter, HistorialItem, Noticia,
    Notificacion, Objetivo, OtpCode, ReminderTarget, Reserva, ReservaClase, Sede, User,
};
use crate::error::ApiError;

pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError>;
    async fn list(&self, page: PageRequest) -> Result<Vec<User>, ApiError>;

    /// Insert a new user. Unique violations map to `EmailTaken` / `UsernameTaken`.
    async fn create(&self, user: &User) -> Result<(), ApiError>;

    /// Persist every mutable column of `user` (keyed by id).
    async fn update(&self, user: &User) -> Result<(), ApiError>;
}

/// One-time codes, at most one per (user, purpose).
pub trait OtpRepository: Send + Sync {
    /// Store `otp`, replacing any in-flight code with the same user and purpose.
    async fn upsert(&self, otp: &OtpCode) -> Result<(), ApiError>;

    async fn find(&self, user_id: Uuid, purpose: OtpPurpose)
    -> Result<Option<OtpCode>, ApiError>;

    async fn delete(&self, user_id: Uuid, purpose: OtpPurpose) -> Result<(), ApiError>;

    /// Count one wrong guess against the stored code. Returns the new total,
    /// or 0 when no code is stored.
    async fn record_failed_attempt(
        &self,
        user_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<i32, ApiError>;
}

pub trait SedeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Sede>, ApiError>;
    async fn get(&self, id: Uuid) -> Result<Option<Sede>, ApiError>;
    async fn create(&self, sede: &Sede) -> Result<(), ApiError>;
    async fn update(&self, sede: &Sede) -> Result<(), ApiError>;

    /// Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

pub trait ClaseRepository: Send + Sync {
    /// Classes matching `filter`, ordered by date and start time, with seat counts.
    async fn list(&self, filter: &ClaseFilter) -> Result<Vec<ClaseCupo>, ApiError>;
    async fn get(&self, id: Uuid) -> Result<Option<ClaseCupo>, ApiError>;
    async fn create(&self, clase: &Clase) -> Result<(), ApiError>;
    async fn update(&self, clase: &Clase) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

pub trait ReservaRepository: Send + Sync {
    /// Admit and insert `reserva` atomically with respect to other bookings of
    /// the same class. Fails with `ClaseNotFound`, `ClassFull` or `DuplicateBooking`.
    async fn book(&self, reserva: &Reserva) -> Result<(), ApiError>;

    async fn get(&self, id: Uuid) -> Result<Option<Reserva>, ApiError>;
    async fn find_by_user_and_clase(
        &self,
        user_id: Uuid,
        clase_id: Uuid,
    ) -> Result<Option<Reserva>, ApiError>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ReservaClase>, ApiError>;
    async fn list_by_clase(&self, clase_id: Uuid) -> Result<Vec<Reserva>, ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;

    /// Active bookings of users with a push token, for classes dated within `[desde, hasta]`.
    async fn reminder_targets(
        &self,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<Vec<ReminderTarget>, ApiError>;
}

pub trait AsistenciaRepository: Send + Sync {
    async fn find(&self, user_id: Uuid, clase_id: Uuid) -> Result<Option<Asistencia>, ApiError>;

    /// Unique violation maps to `AlreadyCheckedIn`.
    async fn create(&self, asistencia: &Asistencia) -> Result<(), ApiError>;

    /// Attendance of `user_id` joined with class and venue, newest first.
    async fn history(
        &self,
        user_id: Uuid,
        desde: Option<NaiveDate>,
        hasta: Option<NaiveDate>,
    ) -> Result<Vec<HistorialItem>, ApiError>;

    /// Attendance of `user_id` at classes of `disciplina` dated within `[desde, hasta]`.
    async fn count_in_period(
        &self,
        user_id: Uuid,
        disciplina: &str,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<u64, ApiError>;
}

pub trait CalificacionRepository: Send + Sync {
    async fn exists(&self, user_id: Uuid, clase_id: Uuid) -> Result<bool, ApiError>;

    /// Unique violation maps to `AlreadyRated`.
    async fn create(&self, calificacion: &Calificacion) -> Result<(), ApiError>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Calificacion>, ApiError>;
    async fn list_by_clase(&self, clase_id: Uuid) -> Result<Vec<Calificacion>, ApiError>;
}

pub trait ObjetivoRepository: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Objetivo>, ApiError>;
    async fn get(&self, id: Uuid) -> Result<Option<Objetivo>, ApiError>;
    async fn create(&self, objetivo: &Objetivo) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

pub trait NoticiaRepository: Send + Sync {
    /// Items visible on `today`, newest publication first.
    async fn list_visible(&self, today: NaiveDate) -> Result<Vec<Noticia>, ApiError>;
    async fn get(&self, id: Uuid) -> Result<Option<Noticia>, ApiError>;
    async fn create(&self, noticia: &Noticia) -> Result<(), ApiError>;
    async fn update(&self, noticia: &Noticia) -> Result<(), ApiError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

pub trait NotificacionRepository: Send + Sync {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Notificacion>, ApiError>;
    async fn get(&self, id: Uuid) -> Result<Option<Notificacion>, ApiError>;
    async fn create(&self, notificacion: &Notificacion) -> Result<(), ApiError>;
    async fn mark_read(&self, id: Uuid) -> Result<(), ApiError>;
}

/// Outbound email. Delivery failures are the caller's to log.
pub trait Mailer: Send + Sync {
    async fn send_otp(&self, to: &str, purpose: OtpPurpose, code: &str) -> anyhow::Result<()>;
}

/// Outbound device push.
pub trait PushSender: Send + Sync {
    async fn send(&self, push_token: &str, title: &str, body: &str) -> anyhow::Result<()>;
}
