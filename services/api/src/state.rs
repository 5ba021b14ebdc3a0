use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbAsistenciaRepository, DbCalificacionRepository, DbClaseRepository, DbNoticiaRepository,
    DbNotificacionRepository, DbObjetivoRepository, DbOtpRepository, DbReservaRepository,
    DbSedeRepository, DbUserRepository,
};
use crate::infra::mailer::SmtpMailer;
use crate::infra::push::ExpoPushClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    /// Gym wall-clock offset. Class dates and times are local to it.
    pub utc_offset: FixedOffset,
    pub mailer: SmtpMailer,
    pub push: ExpoPushClient,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn sede_repo(&self) -> DbSedeRepository {
        DbSedeRepository {
            db: self.db.clone(),
        }
    }

    pub fn clase_repo(&self) -> DbClaseRepository {
        DbClaseRepository {
            db: self.db.clone(),
        }
    }

    pub fn reserva_repo(&self) -> DbReservaRepository {
        DbReservaRepository {
            db: self.db.clone(),
        }
    }

    pub fn asistencia_repo(&self) -> DbAsistenciaRepository {
        DbAsistenciaRepository {
            db: self.db.clone(),
        }
    }

    pub fn calificacion_repo(&self) -> DbCalificacionRepository {
        DbCalificacionRepository {
            db: self.db.clone(),
        }
    }

    pub fn objetivo_repo(&self) -> DbObjetivoRepository {
        DbObjetivoRepository {
            db: self.db.clone(),
        }
    }

    pub fn noticia_repo(&self) -> DbNoticiaRepository {
        DbNoticiaRepository {
            db: self.db.clone(),
        }
    }

    pub fn notificacion_repo(&self) -> DbNotificacionRepository {
        DbNotificacionRepository {
            db: self.db.clone(),
        }
    }

    /// Current gym-local wall-clock time.
    pub fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.utc_offset).naive_local()
    }

    pub fn today(&self) -> NaiveDate {
        self.local_now().date()
    }
}
