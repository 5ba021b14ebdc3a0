use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use ritmofit_api::domain::repository::{
    AsistenciaRepository, CalificacionRepository, ClaseRepository, Mailer, NotificacionRepository,
    ObjetivoRepository, OtpRepository, PushSender, ReservaRepository, SedeRepository,
    UserRepository,
};
use ritmofit_api::domain::types::{
    Asistencia, Calificacion, Clase, ClaseCupo, ClaseFilter, HistorialItem, Notificacion,
    Objetivo, OtpCode, ReminderTarget, Reserva, ReservaClase, Sede, User, admit_booking,
};
use ritmofit_api::error::ApiError;
use ritmofit_api::password::hash_password;
use ritmofit_domain::booking::ReservaEstado;
use ritmofit_domain::otp::OtpPurpose;
use ritmofit_domain::pagination::PageRequest;
use ritmofit_domain::user::Role;

pub use ritmofit_testing::auth::TEST_JWT_SECRET;
pub use ritmofit_testing::clock::{at, date, time};

pub const TEST_PASSWORD: &str = "correct-horse";

// Hashed once; argon2 is slow in debug builds.
static TEST_PASSWORD_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password(TEST_PASSWORD).unwrap());

// ── In-memory store ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub otps: Vec<OtpCode>,
    pub sedes: Vec<Sede>,
    pub clases: Vec<Clase>,
    pub reservas: Vec<Reserva>,
    pub asistencias: Vec<Asistencia>,
    pub calificaciones: Vec<Calificacion>,
    pub objetivos: Vec<Objetivo>,
    pub notificaciones: Vec<Notificacion>,
}

impl Tables {
    fn cupo(&self, clase: &Clase) -> ClaseCupo {
        let reservados = self
            .reservas
            .iter()
            .filter(|r| r.clase_id == clase.id)
            .count() as u64;
        ClaseCupo {
            clase: clase.clone(),
            reservados,
        }
    }
}

/// Shared in-memory tables. Every mock repository handed out by a store sees
/// the same data, so use cases can be inspected after they run.
#[derive(Clone, Default)]
pub struct MockStore {
    inner: Arc<Mutex<Tables>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> MutexGuard<'_, Tables> {
        self.inner.lock().unwrap()
    }

    pub fn users(&self) -> MockUserRepo {
        MockUserRepo { store: self.clone() }
    }

    pub fn otps(&self) -> MockOtpRepo {
        MockOtpRepo { store: self.clone() }
    }

    pub fn sedes(&self) -> MockSedeRepo {
        MockSedeRepo { store: self.clone() }
    }

    pub fn clases(&self) -> MockClaseRepo {
        MockClaseRepo { store: self.clone() }
    }

    pub fn reservas(&self) -> MockReservaRepo {
        MockReservaRepo { store: self.clone() }
    }

    pub fn asistencias(&self) -> MockAsistenciaRepo {
        MockAsistenciaRepo { store: self.clone() }
    }

    pub fn calificaciones(&self) -> MockCalificacionRepo {
        MockCalificacionRepo { store: self.clone() }
    }

    pub fn objetivos(&self) -> MockObjetivoRepo {
        MockObjetivoRepo { store: self.clone() }
    }

    pub fn notificaciones(&self) -> MockNotificacionRepo {
        MockNotificacionRepo { store: self.clone() }
    }

    // ── Seeding ──

    pub fn add_user(&self, user: User) -> User {
        self.tables().users.push(user.clone());
        user
    }

    pub fn add_sede(&self, sede: Sede) -> Sede {
        self.tables().sedes.push(sede.clone());
        sede
    }

    pub fn add_clase(&self, clase: Clase) -> Clase {
        self.tables().clases.push(clase.clone());
        clase
    }

    pub fn add_reserva(&self, user_id: Uuid, clase_id: Uuid) -> Reserva {
        let reserva = Reserva {
            id: Uuid::new_v4(),
            user_id,
            clase_id,
            estado: ReservaEstado::Activa,
            created_at: Utc::now(),
        };
        self.tables().reservas.push(reserva.clone());
        reserva
    }

    pub fn add_asistencia(&self, asistencia: Asistencia) -> Asistencia {
        self.tables().asistencias.push(asistencia.clone());
        asistencia
    }

    pub fn find_user(&self, id: Uuid) -> Option<User> {
        self.tables().users.iter().find(|u| u.id == id).cloned()
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(role: Role) -> User {
    let id = Uuid::new_v4();
    let now = Utc::now();
    User {
        id,
        nombre: "Ana Pérez".to_owned(),
        email: format!("{}@example.com", id.simple()),
        username: format!("user-{}", id.simple()),
        role,
        password_hash: TEST_PASSWORD_HASH.clone(),
        pin_hash: None,
        activo: true,
        verificado: true,
        eliminado: false,
        push_token: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_sede() -> Sede {
    Sede {
        id: Uuid::new_v4(),
        nombre: "Sede Palermo".to_owned(),
        direccion: "Av. Santa Fe 3200".to_owned(),
        latitud: -34.588,
        longitud: -58.410,
        disciplinas: "spinning,yoga".to_owned(),
        telefono: None,
        created_at: Utc::now(),
    }
}

pub fn test_clase(
    sede_id: Uuid,
    instructor_id: Uuid,
    fecha: NaiveDate,
    hora_inicio: NaiveTime,
    cupo_maximo: i32,
) -> Clase {
    Clase {
        id: Uuid::new_v4(),
        sede_id,
        instructor_id,
        disciplina: "spinning".to_owned(),
        fecha,
        hora_inicio,
        duracion_min: 60,
        cupo_maximo,
        created_at: Utc::now(),
    }
}

pub fn test_asistencia(
    user_id: Uuid,
    clase_id: Uuid,
    fecha: NaiveDate,
    checkin_hora: Option<NaiveTime>,
) -> Asistencia {
    Asistencia {
        id: Uuid::new_v4(),
        user_id,
        clase_id,
        fecha_asistencia: fecha,
        checkin_hora,
        confirmado_qr: false,
        created_at: Utc::now(),
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    store: MockStore,
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.store.find_user(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .store
            .tables()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .store
            .tables()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, ApiError> {
        Ok(self
            .store
            .tables()
            .users
            .iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.store.tables().users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), ApiError> {
        let mut tables = self.store.tables();
        let slot = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(ApiError::UserNotFound)?;
        *slot = user.clone();
        Ok(())
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockOtpRepo {
    store: MockStore,
}

impl OtpRepository for MockOtpRepo {
    async fn upsert(&self, otp: &OtpCode) -> Result<(), ApiError> {
        let mut tables = self.store.tables();
        tables
            .otps
            .retain(|o| !(o.user_id == otp.user_id && o.purpose == otp.purpose));
        tables.otps.push(otp.clone());
        Ok(())
    }

    async fn find(
        &self,
        user_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, ApiError> {
        Ok(self
            .store
            .tables()
            .otps
            .iter()
            .find(|o| o.user_id == user_id && o.purpose == purpose)
            .cloned())
    }

    async fn delete(&self, user_id: Uuid, purpose: OtpPurpose) -> Result<(), ApiError> {
        self.store
            .tables()
            .otps
            .retain(|o| !(o.user_id == user_id && o.purpose == purpose));
        Ok(())
    }

    async fn record_failed_attempt(
        &self,
        user_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<i32, ApiError> {
        let mut tables = self.store.tables();
        Ok(tables
            .otps
            .iter_mut()
            .find(|o| o.user_id == user_id && o.purpose == purpose)
            .map_or(0, |o| {
                o.attempts += 1;
                o.attempts
            }))
    }
}

// ── MockSedeRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockSedeRepo {
    store: MockStore,
}

impl SedeRepository for MockSedeRepo {
    async fn list(&self) -> Result<Vec<Sede>, ApiError> {
        Ok(self.store.tables().sedes.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Sede>, ApiError> {
        Ok(self.store.tables().sedes.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, sede: &Sede) -> Result<(), ApiError> {
        self.store.tables().sedes.push(sede.clone());
        Ok(())
    }

    async fn update(&self, sede: &Sede) -> Result<(), ApiError> {
        let mut tables = self.store.tables();
        let slot = tables
            .sedes
            .iter_mut()
            .find(|s| s.id == sede.id)
            .ok_or(ApiError::SedeNotFound)?;
        *slot = sede.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.store.tables();
        let before = tables.sedes.len();
        tables.sedes.retain(|s| s.id != id);
        Ok(tables.sedes.len() < before)
    }
}

// ── MockClaseRepo ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockClaseRepo {
    store: MockStore,
}

impl ClaseRepository for MockClaseRepo {
    async fn list(&self, filter: &ClaseFilter) -> Result<Vec<ClaseCupo>, ApiError> {
        let tables = self.store.tables();
        let mut out: Vec<ClaseCupo> = tables
            .clases
            .iter()
            .filter(|c| filter.sede_id.is_none_or(|id| c.sede_id == id))
            .filter(|c| {
                filter
                    .disciplina
                    .as_deref()
                    .is_none_or(|d| c.disciplina == d)
            })
            .filter(|c| filter.desde.is_none_or(|d| c.fecha >= d))
            .filter(|c| filter.hasta.is_none_or(|d| c.fecha <= d))
            .map(|c| tables.cupo(c))
            .collect();
        out.sort_by_key(|c| c.clase.starts_at());
        Ok(out)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ClaseCupo>, ApiError> {
        let tables = self.store.tables();
        Ok(tables
            .clases
            .iter()
            .find(|c| c.id == id)
            .map(|c| tables.cupo(c)))
    }

    async fn create(&self, clase: &Clase) -> Result<(), ApiError> {
        self.store.tables().clases.push(clase.clone());
        Ok(())
    }

    async fn update(&self, clase: &Clase) -> Result<(), ApiError> {
        let mut tables = self.store.tables();
        let slot = tables
            .clases
            .iter_mut()
            .find(|c| c.id == clase.id)
            .ok_or(ApiError::ClaseNotFound)?;
        *slot = clase.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.store.tables();
        let before = tables.clases.len();
        tables.clases.retain(|c| c.id != id);
        tables.reservas.retain(|r| r.clase_id != id);
        Ok(tables.clases.len() < before)
    }
}

// ── MockReservaRepo ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockReservaRepo {
    store: MockStore,
}

impl ReservaRepository for MockReservaRepo {
    /// Admission and insert run under one lock, like the row lock in the real repository.
    async fn book(&self, reserva: &Reserva) -> Result<(), ApiError> {
        let mut tables = self.store.tables();
        let clase = tables
            .clases
            .iter()
            .find(|c| c.id == reserva.clase_id)
            .cloned()
            .ok_or(ApiError::ClaseNotFound)?;
        let reservados = tables.cupo(&clase).reservados;
        let already_booked = tables
            .reservas
            .iter()
            .any(|r| r.clase_id == reserva.clase_id && r.user_id == reserva.user_id);
        admit_booking(reservados, clase.cupo_maximo, already_booked)?;
        tables.reservas.push(reserva.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Reserva>, ApiError> {
        Ok(self
            .store
            .tables()
            .reservas
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_by_user_and_clase(
        &self,
        user_id: Uuid,
        clase_id: Uuid,
    ) -> Result<Option<Reserva>, ApiError> {
        Ok(self
            .store
            .tables()
            .reservas
            .iter()
            .find(|r| r.user_id == user_id && r.clase_id == clase_id)
            .cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ReservaClase>, ApiError> {
        let tables = self.store.tables();
        Ok(tables
            .reservas
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| {
                let clase = tables.clases.iter().find(|c| c.id == r.clase_id)?;
                Some(ReservaClase {
                    reserva: r.clone(),
                    clase: clase.clone(),
                })
            })
            .collect())
    }

    async fn list_by_clase(&self, clase_id: Uuid) -> Result<Vec<Reserva>, ApiError> {
        Ok(self
            .store
            .tables()
            .reservas
            .iter()
            .filter(|r| r.clase_id == clase_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.store.tables();
        let before = tables.reservas.len();
        tables.reservas.retain(|r| r.id != id);
        Ok(tables.reservas.len() < before)
    }

    async fn reminder_targets(
        &self,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<Vec<ReminderTarget>, ApiError> {
        let tables = self.store.tables();
        Ok(tables
            .reservas
            .iter()
            .filter(|r| r.estado == ReservaEstado::Activa)
            .filter_map(|r| {
                let clase = tables.clases.iter().find(|c| c.id == r.clase_id)?;
                if clase.fecha < desde || clase.fecha > hasta {
                    return None;
                }
                let user = tables
                    .users
                    .iter()
                    .find(|u| u.id == r.user_id && u.is_live())?;
                let push_token = user.push_token.clone()?;
                let sede_nombre = tables
                    .sedes
                    .iter()
                    .find(|s| s.id == clase.sede_id)
                    .map(|s| s.nombre.clone())
                    .unwrap_or_default();
                Some(ReminderTarget {
                    reserva_id: r.id,
                    user_id: r.user_id,
                    push_token,
                    disciplina: clase.disciplina.clone(),
                    sede_nombre,
                    starts_at: clase.starts_at(),
                })
            })
            .collect())
    }
}

// ── MockAsistenciaRepo ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockAsistenciaRepo {
    store: MockStore,
}

impl AsistenciaRepository for MockAsistenciaRepo {
    async fn find(&self, user_id: Uuid, clase_id: Uuid) -> Result<Option<Asistencia>, ApiError> {
        Ok(self
            .store
            .tables()
            .asistencias
            .iter()
            .find(|a| a.user_id == user_id && a.clase_id == clase_id)
            .cloned())
    }

    async fn create(&self, asistencia: &Asistencia) -> Result<(), ApiError> {
        let mut tables = self.store.tables();
        if tables
            .asistencias
            .iter()
            .any(|a| a.user_id == asistencia.user_id && a.clase_id == asistencia.clase_id)
        {
            return Err(ApiError::AlreadyCheckedIn);
        }
        tables.asistencias.push(asistencia.clone());
        Ok(())
    }

    async fn history(
        &self,
        user_id: Uuid,
        desde: Option<NaiveDate>,
        hasta: Option<NaiveDate>,
    ) -> Result<Vec<HistorialItem>, ApiError> {
        let tables = self.store.tables();
        let mut out: Vec<HistorialItem> = tables
            .asistencias
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter(|a| desde.is_none_or(|d| a.fecha_asistencia >= d))
            .filter(|a| hasta.is_none_or(|d| a.fecha_asistencia <= d))
            .filter_map(|a| {
                let clase = tables.clases.iter().find(|c| c.id == a.clase_id)?;
                Some(HistorialItem {
                    asistencia: a.clone(),
                    clase: clase.clone(),
                    sede_nombre: tables
                        .sedes
                        .iter()
                        .find(|s| s.id == clase.sede_id)
                        .map(|s| s.nombre.clone()),
                })
            })
            .collect();
        out.sort_by(|a, b| b.asistencia.fecha_asistencia.cmp(&a.asistencia.fecha_asistencia));
        Ok(out)
    }

    async fn count_in_period(
        &self,
        user_id: Uuid,
        disciplina: &str,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<u64, ApiError> {
        let tables = self.store.tables();
        Ok(tables
            .asistencias
            .iter()
            .filter(|a| a.user_id == user_id)
            .filter(|a| a.fecha_asistencia >= desde && a.fecha_asistencia <= hasta)
            .filter(|a| {
                tables
                    .clases
                    .iter()
                    .any(|c| c.id == a.clase_id && c.disciplina == disciplina)
            })
            .count() as u64)
    }
}

// ── MockCalificacionRepo ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockCalificacionRepo {
    store: MockStore,
}

impl CalificacionRepository for MockCalificacionRepo {
    async fn exists(&self, user_id: Uuid, clase_id: Uuid) -> Result<bool, ApiError> {
        Ok(self
            .store
            .tables()
            .calificaciones
            .iter()
            .any(|c| c.user_id == user_id && c.clase_id == clase_id))
    }

    async fn create(&self, calificacion: &Calificacion) -> Result<(), ApiError> {
        let mut tables = self.store.tables();
        if tables
            .calificaciones
            .iter()
            .any(|c| c.user_id == calificacion.user_id && c.clase_id == calificacion.clase_id)
        {
            return Err(ApiError::AlreadyRated);
        }
        tables.calificaciones.push(calificacion.clone());
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Calificacion>, ApiError> {
        Ok(self
            .store
            .tables()
            .calificaciones
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_clase(&self, clase_id: Uuid) -> Result<Vec<Calificacion>, ApiError> {
        Ok(self
            .store
            .tables()
            .calificaciones
            .iter()
            .filter(|c| c.clase_id == clase_id)
            .cloned()
            .collect())
    }
}

// ── MockObjetivoRepo ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockObjetivoRepo {
    store: MockStore,
}

impl ObjetivoRepository for MockObjetivoRepo {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Objetivo>, ApiError> {
        Ok(self
            .store
            .tables()
            .objetivos
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Objetivo>, ApiError> {
        Ok(self
            .store
            .tables()
            .objetivos
            .iter()
            .find(|o| o.id == id)
            .cloned())
    }

    async fn create(&self, objetivo: &Objetivo) -> Result<(), ApiError> {
        self.store.tables().objetivos.push(objetivo.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.store.tables();
        let before = tables.objetivos.len();
        tables.objetivos.retain(|o| o.id != id);
        Ok(tables.objetivos.len() < before)
    }
}

// ── MockNotificacionRepo ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockNotificacionRepo {
    store: MockStore,
}

impl NotificacionRepository for MockNotificacionRepo {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Notificacion>, ApiError> {
        Ok(self
            .store
            .tables()
            .notificaciones
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Notificacion>, ApiError> {
        Ok(self
            .store
            .tables()
            .notificaciones
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn create(&self, notificacion: &Notificacion) -> Result<(), ApiError> {
        self.store
            .tables()
            .notificaciones
            .push(notificacion.clone());
        Ok(())
    }

    async fn mark_read(&self, id: Uuid) -> Result<(), ApiError> {
        if let Some(n) = self
            .store
            .tables()
            .notificaciones
            .iter_mut()
            .find(|n| n.id == id)
        {
            n.leida = true;
        }
        Ok(())
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentOtp {
    pub to: String,
    pub purpose: OtpPurpose,
    pub code: String,
}

#[derive(Clone, Default)]
pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<SentOtp>>>,
    pub fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Most recent code emailed to `to` for `purpose`.
    pub fn last_code(&self, to: &str, purpose: OtpPurpose) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.to == to && m.purpose == purpose)
            .map(|m| m.code.clone())
    }
}

impl Mailer for MockMailer {
    async fn send_otp(&self, to: &str, purpose: OtpPurpose, code: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("smtp unavailable");
        }
        self.sent.lock().unwrap().push(SentOtp {
            to: to.to_owned(),
            purpose,
            code: code.to_owned(),
        });
        Ok(())
    }
}

// ── MockPush ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentPush {
    pub push_token: String,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct MockPush {
    pub sent: Arc<Mutex<Vec<SentPush>>>,
    /// Tokens the endpoint rejects.
    pub rejected: Vec<String>,
}

impl MockPush {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(tokens: &[&str]) -> Self {
        Self {
            rejected: tokens.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentPush> {
        self.sent.lock().unwrap().clone()
    }
}

impl PushSender for MockPush {
    async fn send(&self, push_token: &str, title: &str, body: &str) -> anyhow::Result<()> {
        if self.rejected.iter().any(|t| t == push_token) {
            anyhow::bail!("DeviceNotRegistered");
        }
        self.sent.lock().unwrap().push(SentPush {
            push_token: push_token.to_owned(),
            title: title.to_owned(),
            body: body.to_owned(),
        });
        Ok(())
    }
}
