use std::collections::HashMap;

use anyhow::Context as _;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
    TransactionError, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use ritmofit_api_schema::{
    asistencias, calificaciones, clases, noticias, notificaciones, objetivos, otp_codes,
    reservas, sedes, users,
};
use ritmofit_domain::booking::ReservaEstado;
use ritmofit_domain::news::NoticiaTipo;
use ritmofit_domain::otp::OtpPurpose;
use ritmofit_domain::pagination::PageRequest;
use ritmofit_domain::user::Role;

use crate::domain::repository::{
    AsistenciaRepository, CalificacionRepository, ClaseRepository, NoticiaRepository,
    NotificacionRepository, ObjetivoRepository, OtpRepository, ReservaRepository,
    SedeRepository, UserRepository,
};
use crate::domain::types::{
    Asistencia, BookingRejection, Calificacion, Clase, ClaseCupo, ClaseFilter, HistorialItem,
    Noticia, Notificacion, Objetivo, OtpCode, ReminderTarget, Reserva, ReservaClase, Sede, User,
    admit_booking,
};
use crate::error::ApiError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Unique index names on `users`, as created by the migration.
const USERS_EMAIL_INDEX: &str = "uq_users_email";
const USERS_USERNAME_INDEX: &str = "uq_users_username";

/// Which account field a unique-violation message is about, by index name.
///
/// MySQL reports `Duplicate entry '<value>' for key '<table>.<index>'`; only the
/// key part is inspected so the duplicated value cannot mislead.
fn user_conflict(message: &str) -> Option<ApiError> {
    let key = message
        .rsplit_once(" for key ")
        .map_or(message, |(_, key)| key);
    if key.contains(USERS_USERNAME_INDEX) {
        Some(ApiError::UsernameTaken)
    } else if key.contains(USERS_EMAIL_INDEX) {
        Some(ApiError::EmailTaken)
    } else {
        None
    }
}

fn map_user_write_error(err: DbErr, context: &'static str) -> ApiError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        if let Some(conflict) = user_conflict(&message) {
            return conflict;
        }
    }
    anyhow::Error::new(err).context(context).into()
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<User>, ApiError> {
        let models = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list users")?;
        models.into_iter().map(user_from_model).collect()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        user_to_active_model(user)
            .insert(&self.db)
            .await
            .map_err(|e| map_user_write_error(e, "create user"))?;
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), ApiError> {
        let result = user_to_active_model(user).update(&self.db).await;
        match result {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ApiError::UserNotFound),
            Err(e) => Err(map_user_write_error(e, "update user")),
        }
    }
}

fn user_to_active_model(user: &User) -> users::ActiveModel {
    users::ActiveModel {
        id: Set(user.id),
        nombre: Set(user.nombre.clone()),
        email: Set(user.email.clone()),
        username: Set(user.username.clone()),
        role: Set(user.role.as_str().to_owned()),
        password_hash: Set(user.password_hash.clone()),
        pin_hash: Set(user.pin_hash.clone()),
        activo: Set(user.activo),
        verificado: Set(user.verificado),
        eliminado: Set(user.eliminado),
        push_token: Set(user.push_token.clone()),
        created_at: Set(user.created_at),
        updated_at: Set(user.updated_at),
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    Ok(User {
        role: model.role.parse::<Role>().context("parse user role")?,
        id: model.id,
        nombre: model.nombre,
        email: model.email,
        username: model.username,
        password_hash: model.password_hash,
        pin_hash: model.pin_hash,
        activo: model.activo,
        verificado: model.verificado,
        eliminado: model.eliminado,
        push_token: model.push_token,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn upsert(&self, otp: &OtpCode) -> Result<(), ApiError> {
        let model = otp_codes::ActiveModel {
            id: Set(otp.id),
            user_id: Set(otp.user_id),
            purpose: Set(otp.purpose.as_str().to_owned()),
            code: Set(otp.code.clone()),
            expires_at: Set(otp.expires_at),
            attempts: Set(otp.attempts),
            created_at: Set(otp.created_at),
        };
        otp_codes::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([otp_codes::Column::UserId, otp_codes::Column::Purpose])
                    .update_columns([
                        otp_codes::Column::Code,
                        otp_codes::Column::ExpiresAt,
                        otp_codes::Column::Attempts,
                        otp_codes::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert otp code")?;
        Ok(())
    }

    async fn find(
        &self,
        user_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpCode>, ApiError> {
        let model = otp_codes::Entity::find()
            .filter(otp_codes::Column::UserId.eq(user_id))
            .filter(otp_codes::Column::Purpose.eq(purpose.as_str()))
            .one(&self.db)
            .await
            .context("find otp code")?;
        model.map(otp_from_model).transpose()
    }

    async fn delete(&self, user_id: Uuid, purpose: OtpPurpose) -> Result<(), ApiError> {
        otp_codes::Entity::delete_many()
            .filter(otp_codes::Column::UserId.eq(user_id))
            .filter(otp_codes::Column::Purpose.eq(purpose.as_str()))
            .exec(&self.db)
            .await
            .context("delete otp code")?;
        Ok(())
    }

    async fn record_failed_attempt(
        &self,
        user_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<i32, ApiError> {
        otp_codes::Entity::update_many()
            .col_expr(
                otp_codes::Column::Attempts,
                Expr::col(otp_codes::Column::Attempts).add(1),
            )
            .filter(otp_codes::Column::UserId.eq(user_id))
            .filter(otp_codes::Column::Purpose.eq(purpose.as_str()))
            .exec(&self.db)
            .await
            .context("record failed otp attempt")?;
        Ok(self
            .find(user_id, purpose)
            .await?
            .map_or(0, |otp| otp.attempts))
    }
}

fn otp_from_model(model: otp_codes::Model) -> Result<OtpCode, ApiError> {
    Ok(OtpCode {
        purpose: model.purpose.parse::<OtpPurpose>().context("parse otp purpose")?,
        id: model.id,
        user_id: model.user_id,
        code: model.code,
        expires_at: model.expires_at,
        attempts: model.attempts,
        created_at: model.created_at,
    })
}

// ── Sede repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSedeRepository {
    pub db: DatabaseConnection,
}

impl SedeRepository for DbSedeRepository {
    async fn list(&self) -> Result<Vec<Sede>, ApiError> {
        let models = sedes::Entity::find()
            .order_by_asc(sedes::Column::Nombre)
            .all(&self.db)
            .await
            .context("list sedes")?;
        Ok(models.into_iter().map(sede_from_model).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Sede>, ApiError> {
        let model = sedes::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("get sede")?;
        Ok(model.map(sede_from_model))
    }

    async fn create(&self, sede: &Sede) -> Result<(), ApiError> {
        sede_to_active_model(sede)
            .insert(&self.db)
            .await
            .context("create sede")?;
        Ok(())
    }

    async fn update(&self, sede: &Sede) -> Result<(), ApiError> {
        match sede_to_active_model(sede).update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ApiError::SedeNotFound),
            Err(e) => Err(anyhow::Error::new(e).context("update sede").into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = sedes::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete sede")?;
        Ok(result.rows_affected > 0)
    }
}

fn sede_to_active_model(sede: &Sede) -> sedes::ActiveModel {
    sedes::ActiveModel {
        id: Set(sede.id),
        nombre: Set(sede.nombre.clone()),
        direccion: Set(sede.direccion.clone()),
        latitud: Set(sede.latitud),
        longitud: Set(sede.longitud),
        disciplinas: Set(sede.disciplinas.clone()),
        telefono: Set(sede.telefono.clone()),
        created_at: Set(sede.created_at),
    }
}

fn sede_from_model(model: sedes::Model) -> Sede {
    Sede {
        id: model.id,
        nombre: model.nombre,
        direccion: model.direccion,
        latitud: model.latitud,
        longitud: model.longitud,
        disciplinas: model.disciplinas,
        telefono: model.telefono,
        created_at: model.created_at,
    }
}

// ── Clase repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbClaseRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct SeatCount {
    clase_id: Uuid,
    total: i64,
}

/// Booking rows per class, in any state, for the given classes only.
async fn seat_counts(
    db: &DatabaseConnection,
    clase_ids: Vec<Uuid>,
) -> Result<HashMap<Uuid, u64>, ApiError> {
    if clase_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = reservas::Entity::find()
        .select_only()
        .column(reservas::Column::ClaseId)
        .column_as(Expr::col(reservas::Column::Id).count(), "total")
        .filter(reservas::Column::ClaseId.is_in(clase_ids))
        .group_by(reservas::Column::ClaseId)
        .into_model::<SeatCount>()
        .all(db)
        .await
        .context("count reservas per clase")?;
    Ok(rows
        .into_iter()
        .map(|r| (r.clase_id, u64::try_from(r.total).unwrap_or(0)))
        .collect())
}

impl ClaseRepository for DbClaseRepository {
    async fn list(&self, filter: &ClaseFilter) -> Result<Vec<ClaseCupo>, ApiError> {
        let mut query = clases::Entity::find();
        if let Some(sede_id) = filter.sede_id {
            query = query.filter(clases::Column::SedeId.eq(sede_id));
        }
        if let Some(disciplina) = &filter.disciplina {
            query = query.filter(clases::Column::Disciplina.eq(disciplina.as_str()));
        }
        if let Some(desde) = filter.desde {
            query = query.filter(clases::Column::Fecha.gte(desde));
        }
        if let Some(hasta) = filter.hasta {
            query = query.filter(clases::Column::Fecha.lte(hasta));
        }
        let models = query
            .order_by_asc(clases::Column::Fecha)
            .order_by_asc(clases::Column::HoraInicio)
            .all(&self.db)
            .await
            .context("list clases")?;

        let counts = seat_counts(&self.db, models.iter().map(|m| m.id).collect()).await?;
        Ok(models
            .into_iter()
            .map(|m| {
                let reservados = counts.get(&m.id).copied().unwrap_or(0);
                ClaseCupo {
                    clase: clase_from_model(m),
                    reservados,
                }
            })
            .collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<ClaseCupo>, ApiError> {
        let Some(model) = clases::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("get clase")?
        else {
            return Ok(None);
        };
        let counts = seat_counts(&self.db, vec![id]).await?;
        Ok(Some(ClaseCupo {
            reservados: counts.get(&id).copied().unwrap_or(0),
            clase: clase_from_model(model),
        }))
    }

    async fn create(&self, clase: &Clase) -> Result<(), ApiError> {
        clase_to_active_model(clase)
            .insert(&self.db)
            .await
            .context("create clase")?;
        Ok(())
    }

    async fn update(&self, clase: &Clase) -> Result<(), ApiError> {
        match clase_to_active_model(clase).update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ApiError::ClaseNotFound),
            Err(e) => Err(anyhow::Error::new(e).context("update clase").into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = clases::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete clase")?;
        Ok(result.rows_affected > 0)
    }
}

fn clase_to_active_model(clase: &Clase) -> clases::ActiveModel {
    clases::ActiveModel {
        id: Set(clase.id),
        sede_id: Set(clase.sede_id),
        instructor_id: Set(clase.instructor_id),
        disciplina: Set(clase.disciplina.clone()),
        fecha: Set(clase.fecha),
        hora_inicio: Set(clase.hora_inicio),
        duracion_min: Set(clase.duracion_min),
        cupo_maximo: Set(clase.cupo_maximo),
        created_at: Set(clase.created_at),
    }
}

fn clase_from_model(model: clases::Model) -> Clase {
    Clase {
        id: model.id,
        sede_id: model.sede_id,
        instructor_id: model.instructor_id,
        disciplina: model.disciplina,
        fecha: model.fecha,
        hora_inicio: model.hora_inicio,
        duracion_min: model.duracion_min,
        cupo_maximo: model.cupo_maximo,
        created_at: model.created_at,
    }
}

// ── Reserva repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbReservaRepository {
    pub db: DatabaseConnection,
}

enum BookOutcome {
    Booked,
    ClaseNotFound,
    Rejected(BookingRejection),
}

impl ReservaRepository for DbReservaRepository {
    async fn book(&self, reserva: &Reserva) -> Result<(), ApiError> {
        let reserva = reserva.clone();
        let result = self
            .db
            .transaction::<_, BookOutcome, DbErr>(move |txn| {
                Box::pin(async move {
                    // Serializes concurrent bookings of the same class until commit.
                    let Some(clase) = clases::Entity::find_by_id(reserva.clase_id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                    else {
                        return Ok(BookOutcome::ClaseNotFound);
                    };

                    let reservados = reservas::Entity::find()
                        .filter(reservas::Column::ClaseId.eq(reserva.clase_id))
                        .count(txn)
                        .await?;
                    let already_booked = reservas::Entity::find()
                        .filter(reservas::Column::ClaseId.eq(reserva.clase_id))
                        .filter(reservas::Column::UserId.eq(reserva.user_id))
                        .one(txn)
                        .await?
                        .is_some();

                    if let Err(rejection) =
                        admit_booking(reservados, clase.cupo_maximo, already_booked)
                    {
                        return Ok(BookOutcome::Rejected(rejection));
                    }

                    reserva_to_active_model(&reserva).insert(txn).await?;
                    Ok(BookOutcome::Booked)
                })
            })
            .await;

        match result {
            Ok(BookOutcome::Booked) => Ok(()),
            Ok(BookOutcome::ClaseNotFound) => Err(ApiError::ClaseNotFound),
            Ok(BookOutcome::Rejected(rejection)) => Err(rejection.into()),
            Err(TransactionError::Transaction(e)) if is_unique_violation(&e) => {
                Err(ApiError::DuplicateBooking)
            }
            Err(e) => Err(anyhow::Error::new(e).context("book clase").into()),
        }
    }

    async fn get(&self, id: Uuid) -> Result<Option<Reserva>, ApiError> {
        let model = reservas::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("get reserva")?;
        model.map(reserva_from_model).transpose()
    }

    async fn find_by_user_and_clase(
        &self,
        user_id: Uuid,
        clase_id: Uuid,
    ) -> Result<Option<Reserva>, ApiError> {
        let model = reservas::Entity::find()
            .filter(reservas::Column::UserId.eq(user_id))
            .filter(reservas::Column::ClaseId.eq(clase_id))
            .one(&self.db)
            .await
            .context("find reserva by user and clase")?;
        model.map(reserva_from_model).transpose()
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ReservaClase>, ApiError> {
        let rows = reservas::Entity::find()
            .filter(reservas::Column::UserId.eq(user_id))
            .find_also_related(clases::Entity)
            .order_by_asc(clases::Column::Fecha)
            .order_by_asc(clases::Column::HoraInicio)
            .all(&self.db)
            .await
            .context("list reservas by user")?;
        rows.into_iter()
            .filter_map(|(reserva, clase)| clase.map(|c| (reserva, c)))
            .map(|(reserva, clase)| {
                Ok(ReservaClase {
                    reserva: reserva_from_model(reserva)?,
                    clase: clase_from_model(clase),
                })
            })
            .collect()
    }

    async fn list_by_clase(&self, clase_id: Uuid) -> Result<Vec<Reserva>, ApiError> {
        let models = reservas::Entity::find()
            .filter(reservas::Column::ClaseId.eq(clase_id))
            .order_by_asc(reservas::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list reservas by clase")?;
        models.into_iter().map(reserva_from_model).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = reservas::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete reserva")?;
        Ok(result.rows_affected > 0)
    }

    async fn reminder_targets(
        &self,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<Vec<ReminderTarget>, ApiError> {
        let rows = reservas::Entity::find()
            .filter(reservas::Column::Estado.eq(ReservaEstado::Activa.as_str()))
            .find_also_related(clases::Entity)
            .filter(clases::Column::Fecha.between(desde, hasta))
            .all(&self.db)
            .await
            .context("list reservas for reminders")?;
        let rows: Vec<(reservas::Model, clases::Model)> = rows
            .into_iter()
            .filter_map(|(reserva, clase)| clase.map(|c| (reserva, c)))
            .collect();
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<Uuid> = rows.iter().map(|(r, _)| r.user_id).collect();
        let push_tokens: HashMap<Uuid, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(user_ids))
            .filter(users::Column::PushToken.is_not_null())
            .filter(users::Column::Activo.eq(true))
            .filter(users::Column::Eliminado.eq(false))
            .all(&self.db)
            .await
            .context("load reminder recipients")?
            .into_iter()
            .filter_map(|u| u.push_token.map(|t| (u.id, t)))
            .collect();

        let sede_ids: Vec<Uuid> = rows.iter().map(|(_, c)| c.sede_id).collect();
        let sede_names: HashMap<Uuid, String> = sedes::Entity::find()
            .filter(sedes::Column::Id.is_in(sede_ids))
            .all(&self.db)
            .await
            .context("load reminder sedes")?
            .into_iter()
            .map(|s| (s.id, s.nombre))
            .collect();

        Ok(rows
            .into_iter()
            .filter_map(|(reserva, clase)| {
                let push_token = push_tokens.get(&reserva.user_id)?.clone();
                Some(ReminderTarget {
                    reserva_id: reserva.id,
                    user_id: reserva.user_id,
                    push_token,
                    sede_nombre: sede_names.get(&clase.sede_id).cloned().unwrap_or_default(),
                    starts_at: clase.fecha.and_time(clase.hora_inicio),
                    disciplina: clase.disciplina,
                })
            })
            .collect())
    }
}

fn reserva_to_active_model(reserva: &Reserva) -> reservas::ActiveModel {
    reservas::ActiveModel {
        id: Set(reserva.id),
        user_id: Set(reserva.user_id),
        clase_id: Set(reserva.clase_id),
        estado: Set(reserva.estado.as_str().to_owned()),
        created_at: Set(reserva.created_at),
    }
}

fn reserva_from_model(model: reservas::Model) -> Result<Reserva, ApiError> {
    Ok(Reserva {
        estado: model.estado.parse::<ReservaEstado>().context("parse reserva estado")?,
        id: model.id,
        user_id: model.user_id,
        clase_id: model.clase_id,
        created_at: model.created_at,
    })
}

// ── Asistencia repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAsistenciaRepository {
    pub db: DatabaseConnection,
}

impl AsistenciaRepository for DbAsistenciaRepository {
    async fn find(&self, user_id: Uuid, clase_id: Uuid) -> Result<Option<Asistencia>, ApiError> {
        let model = asistencias::Entity::find()
            .filter(asistencias::Column::UserId.eq(user_id))
            .filter(asistencias::Column::ClaseId.eq(clase_id))
            .one(&self.db)
            .await
            .context("find asistencia")?;
        Ok(model.map(asistencia_from_model))
    }

    async fn create(&self, asistencia: &Asistencia) -> Result<(), ApiError> {
        let model = asistencias::ActiveModel {
            id: Set(asistencia.id),
            user_id: Set(asistencia.user_id),
            clase_id: Set(asistencia.clase_id),
            fecha_asistencia: Set(asistencia.fecha_asistencia),
            checkin_hora: Set(asistencia.checkin_hora),
            confirmado_qr: Set(asistencia.confirmado_qr),
            created_at: Set(asistencia.created_at),
        };
        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ApiError::AlreadyCheckedIn),
            Err(e) => Err(anyhow::Error::new(e).context("create asistencia").into()),
        }
    }

    async fn history(
        &self,
        user_id: Uuid,
        desde: Option<NaiveDate>,
        hasta: Option<NaiveDate>,
    ) -> Result<Vec<HistorialItem>, ApiError> {
        let mut query = asistencias::Entity::find()
            .filter(asistencias::Column::UserId.eq(user_id));
        if let Some(desde) = desde {
            query = query.filter(asistencias::Column::FechaAsistencia.gte(desde));
        }
        if let Some(hasta) = hasta {
            query = query.filter(asistencias::Column::FechaAsistencia.lte(hasta));
        }
        let rows = query
            .find_also_related(clases::Entity)
            .order_by_desc(asistencias::Column::FechaAsistencia)
            .order_by_desc(asistencias::Column::CheckinHora)
            .all(&self.db)
            .await
            .context("list asistencias by user")?;

        let sede_ids: Vec<Uuid> = rows
            .iter()
            .filter_map(|(_, c)| c.as_ref().map(|c| c.sede_id))
            .collect();
        let sede_names: HashMap<Uuid, String> = if sede_ids.is_empty() {
            HashMap::new()
        } else {
            sedes::Entity::find()
                .filter(sedes::Column::Id.is_in(sede_ids))
                .all(&self.db)
                .await
                .context("load historial sedes")?
                .into_iter()
                .map(|s| (s.id, s.nombre))
                .collect()
        };

        Ok(rows
            .into_iter()
            .filter_map(|(asistencia, clase)| {
                let clase = clase_from_model(clase?);
                Some(HistorialItem {
                    sede_nombre: sede_names.get(&clase.sede_id).cloned(),
                    asistencia: asistencia_from_model(asistencia),
                    clase,
                })
            })
            .collect())
    }

    async fn count_in_period(
        &self,
        user_id: Uuid,
        disciplina: &str,
        desde: NaiveDate,
        hasta: NaiveDate,
    ) -> Result<u64, ApiError> {
        let count = asistencias::Entity::find()
            .inner_join(clases::Entity)
            .filter(asistencias::Column::UserId.eq(user_id))
            .filter(clases::Column::Disciplina.eq(disciplina))
            .filter(asistencias::Column::FechaAsistencia.between(desde, hasta))
            .count(&self.db)
            .await
            .context("count asistencias for objetivo")?;
        Ok(count)
    }
}

fn asistencia_from_model(model: asistencias::Model) -> Asistencia {
    Asistencia {
        id: model.id,
        user_id: model.user_id,
        clase_id: model.clase_id,
        fecha_asistencia: model.fecha_asistencia,
        checkin_hora: model.checkin_hora,
        confirmado_qr: model.confirmado_qr,
        created_at: model.created_at,
    }
}

// ── Calificacion repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCalificacionRepository {
    pub db: DatabaseConnection,
}

impl CalificacionRepository for DbCalificacionRepository {
    async fn exists(&self, user_id: Uuid, clase_id: Uuid) -> Result<bool, ApiError> {
        let count = calificaciones::Entity::find()
            .filter(calificaciones::Column::UserId.eq(user_id))
            .filter(calificaciones::Column::ClaseId.eq(clase_id))
            .count(&self.db)
            .await
            .context("check calificacion exists")?;
        Ok(count > 0)
    }

    async fn create(&self, calificacion: &Calificacion) -> Result<(), ApiError> {
        let model = calificaciones::ActiveModel {
            id: Set(calificacion.id),
            user_id: Set(calificacion.user_id),
            clase_id: Set(calificacion.clase_id),
            puntuacion: Set(calificacion.puntuacion),
            puntuacion_instructor: Set(calificacion.puntuacion_instructor),
            comentario: Set(calificacion.comentario.clone()),
            created_at: Set(calificacion.created_at),
        };
        match model.insert(&self.db).await {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(ApiError::AlreadyRated),
            Err(e) => Err(anyhow::Error::new(e).context("create calificacion").into()),
        }
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Calificacion>, ApiError> {
        let models = calificaciones::Entity::find()
            .filter(calificaciones::Column::UserId.eq(user_id))
            .order_by_desc(calificaciones::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list calificaciones by user")?;
        Ok(models.into_iter().map(calificacion_from_model).collect())
    }

    async fn list_by_clase(&self, clase_id: Uuid) -> Result<Vec<Calificacion>, ApiError> {
        let models = calificaciones::Entity::find()
            .filter(calificaciones::Column::ClaseId.eq(clase_id))
            .order_by_desc(calificaciones::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list calificaciones by clase")?;
        Ok(models.into_iter().map(calificacion_from_model).collect())
    }
}

fn calificacion_from_model(model: calificaciones::Model) -> Calificacion {
    Calificacion {
        id: model.id,
        user_id: model.user_id,
        clase_id: model.clase_id,
        puntuacion: model.puntuacion,
        puntuacion_instructor: model.puntuacion_instructor,
        comentario: model.comentario,
        created_at: model.created_at,
    }
}

// ── Objetivo repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbObjetivoRepository {
    pub db: DatabaseConnection,
}

impl ObjetivoRepository for DbObjetivoRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Objetivo>, ApiError> {
        let models = objetivos::Entity::find()
            .filter(objetivos::Column::UserId.eq(user_id))
            .order_by_desc(objetivos::Column::FechaInicio)
            .all(&self.db)
            .await
            .context("list objetivos by user")?;
        Ok(models.into_iter().map(objetivo_from_model).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Objetivo>, ApiError> {
        let model = objetivos::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("get objetivo")?;
        Ok(model.map(objetivo_from_model))
    }

    async fn create(&self, objetivo: &Objetivo) -> Result<(), ApiError> {
        objetivos::ActiveModel {
            id: Set(objetivo.id),
            user_id: Set(objetivo.user_id),
            disciplina: Set(objetivo.disciplina.clone()),
            clases_objetivo: Set(objetivo.clases_objetivo),
            fecha_inicio: Set(objetivo.fecha_inicio),
            fecha_fin: Set(objetivo.fecha_fin),
            created_at: Set(objetivo.created_at),
        }
        .insert(&self.db)
        .await
        .context("create objetivo")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = objetivos::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete objetivo")?;
        Ok(result.rows_affected > 0)
    }
}

fn objetivo_from_model(model: objetivos::Model) -> Objetivo {
    Objetivo {
        id: model.id,
        user_id: model.user_id,
        disciplina: model.disciplina,
        clases_objetivo: model.clases_objetivo,
        fecha_inicio: model.fecha_inicio,
        fecha_fin: model.fecha_fin,
        created_at: model.created_at,
    }
}

// ── Noticia repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNoticiaRepository {
    pub db: DatabaseConnection,
}

impl NoticiaRepository for DbNoticiaRepository {
    async fn list_visible(&self, today: NaiveDate) -> Result<Vec<Noticia>, ApiError> {
        let models = noticias::Entity::find()
            .filter(noticias::Column::FechaPublicacion.lte(today))
            .filter(
                Condition::any()
                    .add(noticias::Column::FechaExpiracion.is_null())
                    .add(noticias::Column::FechaExpiracion.gte(today)),
            )
            .order_by_desc(noticias::Column::FechaPublicacion)
            .order_by_desc(noticias::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list visible noticias")?;
        models.into_iter().map(noticia_from_model).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Noticia>, ApiError> {
        let model = noticias::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("get noticia")?;
        model.map(noticia_from_model).transpose()
    }

    async fn create(&self, noticia: &Noticia) -> Result<(), ApiError> {
        noticia_to_active_model(noticia)
            .insert(&self.db)
            .await
            .context("create noticia")?;
        Ok(())
    }

    async fn update(&self, noticia: &Noticia) -> Result<(), ApiError> {
        match noticia_to_active_model(noticia).update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ApiError::NoticiaNotFound),
            Err(e) => Err(anyhow::Error::new(e).context("update noticia").into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let result = noticias::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete noticia")?;
        Ok(result.rows_affected > 0)
    }
}

fn noticia_to_active_model(noticia: &Noticia) -> noticias::ActiveModel {
    noticias::ActiveModel {
        id: Set(noticia.id),
        titulo: Set(noticia.titulo.clone()),
        contenido: Set(noticia.contenido.clone()),
        tipo: Set(noticia.tipo.as_str().to_owned()),
        imagen_url: Set(noticia.imagen_url.clone()),
        codigo_promo: Set(noticia.codigo_promo.clone()),
        fecha_publicacion: Set(noticia.fecha_publicacion),
        fecha_expiracion: Set(noticia.fecha_expiracion),
        created_at: Set(noticia.created_at),
    }
}

fn noticia_from_model(model: noticias::Model) -> Result<Noticia, ApiError> {
    Ok(Noticia {
        tipo: model.tipo.parse::<NoticiaTipo>().context("parse noticia tipo")?,
        id: model.id,
        titulo: model.titulo,
        contenido: model.contenido,
        imagen_url: model.imagen_url,
        codigo_promo: model.codigo_promo,
        fecha_publicacion: model.fecha_publicacion,
        fecha_expiracion: model.fecha_expiracion,
        created_at: model.created_at,
    })
}

// ── Notificacion repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbNotificacionRepository {
    pub db: DatabaseConnection,
}

impl NotificacionRepository for DbNotificacionRepository {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Notificacion>, ApiError> {
        let models = notificaciones::Entity::find()
            .filter(notificaciones::Column::UserId.eq(user_id))
            .order_by_desc(notificaciones::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list notificaciones by user")?;
        Ok(models.into_iter().map(notificacion_from_model).collect())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Notificacion>, ApiError> {
        let model = notificaciones::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("get notificacion")?;
        Ok(model.map(notificacion_from_model))
    }

    async fn create(&self, notificacion: &Notificacion) -> Result<(), ApiError> {
        notificaciones::ActiveModel {
            id: Set(notificacion.id),
            user_id: Set(notificacion.user_id),
            titulo: Set(notificacion.titulo.clone()),
            mensaje: Set(notificacion.mensaje.clone()),
            leida: Set(notificacion.leida),
            created_at: Set(notificacion.created_at),
        }
        .insert(&self.db)
        .await
        .context("create notificacion")?;
        Ok(())
    }

    async fn mark_read(&self, id: Uuid) -> Result<(), ApiError> {
        notificaciones::ActiveModel {
            id: Set(id),
            leida: Set(true),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark notificacion read")?;
        Ok(())
    }
}

fn notificacion_from_model(model: notificaciones::Model) -> Notificacion {
    Notificacion {
        id: model.id,
        user_id: model.user_id,
        titulo: model.titulo,
        mensaje: model.mensaje,
        leida: model.leida,
        created_at: model.created_at,
    }
}
