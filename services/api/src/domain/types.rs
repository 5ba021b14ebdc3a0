use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use ritmofit_domain::booking::ReservaEstado;
use ritmofit_domain::news::NoticiaTipo;
use ritmofit_domain::otp::OtpPurpose;
use ritmofit_domain::user::Role;

/// One-time code length in digits.
pub const OTP_LEN: usize = 6;

/// One-time code time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 15 * 60;

/// How long after check-in a class may still be rated.
pub const RATING_WINDOW_HOURS: i64 = 24;

/// How early before the start of a class check-in opens.
pub const CHECKIN_OPENS_MINUTES: i64 = 60;

/// Reminders go out for classes starting strictly between these two bounds from now.
pub const REMINDER_MIN_LEAD_MINUTES: i64 = 60;
pub const REMINDER_MAX_LEAD_MINUTES: i64 = 120;

/// Width of the reminder window. Sweeping once per window puts each booking
/// in exactly one sweep; shorter periods remind the same booking again.
pub const REMINDER_WINDOW_SECS: u64 =
    ((REMINDER_MAX_LEAD_MINUTES - REMINDER_MIN_LEAD_MINUTES) * 60) as u64;

/// Wrong guesses tolerated before an emailed code is discarded.
pub const OTP_MAX_ATTEMPTS: i32 = 5;

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub nombre: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub password_hash: String,
    pub pin_hash: Option<String>,
    pub activo: bool,
    pub verificado: bool,
    pub eliminado: bool,
    pub push_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether a token for this user may be honoured.
    pub fn is_live(&self) -> bool {
        self.activo && !self.eliminado
    }

    /// Registered but never confirmed. Accounts disabled by an admin after
    /// confirming do not qualify.
    pub fn awaiting_verification(&self) -> bool {
        !self.verificado && !self.activo && !self.eliminado
    }

    pub fn actor(&self) -> Actor {
        Actor {
            user_id: self.id,
            role: self.role,
        }
    }
}

/// The authenticated caller of a use case.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Admins may act on anything; everyone else only on what they own.
    pub fn can_manage(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}

#[derive(Debug, Clone)]
pub struct OtpCode {
    pub id: Uuid,
    pub user_id: Uuid,
    pub purpose: OtpPurpose,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    /// Wrong guesses so far.
    pub attempts: i32,
    pub created_at: DateTime<Utc>,
}

impl OtpCode {
    /// A code is accepted only for its own purpose, with matching digits, before expiry.
    pub fn accepts(&self, purpose: OtpPurpose, code: &str, now: DateTime<Utc>) -> bool {
        self.purpose == purpose && self.code == code && self.expires_at > now
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Sede {
    pub id: Uuid,
    pub nombre: String,
    pub direccion: String,
    pub latitud: f64,
    pub longitud: f64,
    pub disciplinas: String,
    pub telefono: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Clase {
    pub id: Uuid,
    pub sede_id: Uuid,
    pub instructor_id: Uuid,
    pub disciplina: String,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    pub duracion_min: i32,
    pub cupo_maximo: i32,
    pub created_at: DateTime<Utc>,
}

impl Clase {
    /// Start instant in gym-local time.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.fecha.and_time(self.hora_inicio)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at() + Duration::minutes(i64::from(self.duracion_min))
    }

    /// Check-in is open from an hour before start until the class ends.
    pub fn checkin_open(&self, now: NaiveDateTime) -> bool {
        let opens = self.starts_at() - Duration::minutes(CHECKIN_OPENS_MINUTES);
        now >= opens && now <= self.ends_at()
    }
}

/// A class together with the number of seats currently held.
#[derive(Debug, Clone)]
pub struct ClaseCupo {
    pub clase: Clase,
    pub reservados: u64,
}

impl ClaseCupo {
    pub fn cupos_disponibles(&self) -> u64 {
        let cupo = u64::try_from(self.clase.cupo_maximo).unwrap_or(0);
        cupo.saturating_sub(self.reservados)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClaseFilter {
    pub sede_id: Option<Uuid>,
    pub disciplina: Option<String>,
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
}

// ── Bookings ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Reserva {
    pub id: Uuid,
    pub user_id: Uuid,
    pub clase_id: Uuid,
    pub estado: ReservaEstado,
    pub created_at: DateTime<Utc>,
}

/// A booking joined with its class, as listed to its owner.
#[derive(Debug, Clone)]
pub struct ReservaClase {
    pub reserva: Reserva,
    pub clase: Clase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRejection {
    ClassFull,
    AlreadyBooked,
}

/// Admission rule for a new booking. Capacity is checked before duplication.
pub fn admit_booking(
    reservados: u64,
    cupo_maximo: i32,
    already_booked: bool,
) -> Result<(), BookingRejection> {
    let cupo = u64::try_from(cupo_maximo).unwrap_or(0);
    if reservados >= cupo {
        return Err(BookingRejection::ClassFull);
    }
    if already_booked {
        return Err(BookingRejection::AlreadyBooked);
    }
    Ok(())
}

/// Everything the reminder sweep needs for one booking.
#[derive(Debug, Clone)]
pub struct ReminderTarget {
    pub reserva_id: Uuid,
    pub user_id: Uuid,
    pub push_token: String,
    pub disciplina: String,
    pub sede_nombre: String,
    pub starts_at: NaiveDateTime,
}

/// Whether a class starting at `starts_at` is due a reminder at `now`.
pub fn due_for_reminder(starts_at: NaiveDateTime, now: NaiveDateTime) -> bool {
    let lead = starts_at - now;
    lead > Duration::minutes(REMINDER_MIN_LEAD_MINUTES)
        && lead < Duration::minutes(REMINDER_MAX_LEAD_MINUTES)
}

// ── Attendance and ratings ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Asistencia {
    pub id: Uuid,
    pub user_id: Uuid,
    pub clase_id: Uuid,
    pub fecha_asistencia: NaiveDate,
    pub checkin_hora: Option<NaiveTime>,
    pub confirmado_qr: bool,
    pub created_at: DateTime<Utc>,
}

impl Asistencia {
    /// Check-in instant: recorded time, else the class start time, else midnight.
    pub fn checkin_instant(&self, hora_clase: Option<NaiveTime>) -> NaiveDateTime {
        let hora = self.checkin_hora.or(hora_clase).unwrap_or_default();
        self.fecha_asistencia.and_time(hora)
    }
}

/// An attendance record joined with its class, for the history view.
#[derive(Debug, Clone)]
pub struct HistorialItem {
    pub asistencia: Asistencia,
    pub clase: Clase,
    pub sede_nombre: Option<String>,
}

/// Whether a rating submitted at `now` is still inside the window opened by `checkin`.
pub fn within_rating_window(checkin: NaiveDateTime, now: NaiveDateTime) -> bool {
    now - checkin <= Duration::hours(RATING_WINDOW_HOURS)
}

#[derive(Debug, Clone)]
pub struct Calificacion {
    pub id: Uuid,
    pub user_id: Uuid,
    pub clase_id: Uuid,
    pub puntuacion: i16,
    pub puntuacion_instructor: Option<i16>,
    pub comentario: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ── Goals ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Objetivo {
    pub id: Uuid,
    pub user_id: Uuid,
    pub disciplina: String,
    pub clases_objetivo: i32,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A goal with the matching attendance count inside its period.
#[derive(Debug, Clone)]
pub struct ObjetivoProgreso {
    pub objetivo: Objetivo,
    pub completadas: u64,
}

impl ObjetivoProgreso {
    /// Progress percentage, capped at 100.
    pub fn porcentaje(&self) -> u8 {
        let target = u64::try_from(self.objetivo.clases_objetivo).unwrap_or(0);
        if target == 0 {
            return 100;
        }
        let pct = (self.completadas * 100 / target).min(100);
        pct as u8
    }
}

// ── Content and notifications ────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Noticia {
    pub id: Uuid,
    pub titulo: String,
    pub contenido: String,
    pub tipo: NoticiaTipo,
    pub imagen_url: Option<String>,
    pub codigo_promo: Option<String>,
    pub fecha_publicacion: NaiveDate,
    pub fecha_expiracion: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Noticia {
    /// Published on or before `today` and not yet expired. An item stays
    /// visible through its expiry date.
    pub fn is_visible_on(&self, today: NaiveDate) -> bool {
        self.fecha_publicacion <= today && self.fecha_expiracion.is_none_or(|exp| exp >= today)
    }
}

#[derive(Debug, Clone)]
pub struct Notificacion {
    pub id: Uuid,
    pub user_id: Uuid,
    pub titulo: String,
    pub mensaje: String,
    pub leida: bool,
    pub created_at: DateTime<Utc>,
}
