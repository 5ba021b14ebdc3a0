use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use ritmofit_domain::user::Role;

use crate::domain::repository::{
    CalificacionRepository, ClaseRepository, ReservaRepository, SedeRepository, UserRepository,
};
use crate::domain::types::{Actor, Calificacion, Clase, ClaseCupo, ClaseFilter, Reserva};
use crate::error::ApiError;

fn validate_shape(disciplina: &str, duracion_min: i32, cupo_maximo: i32) -> Result<(), ApiError> {
    if disciplina.trim().is_empty() {
        return Err(ApiError::InvalidField("disciplina"));
    }
    if duracion_min <= 0 {
        return Err(ApiError::InvalidField("duracion_min"));
    }
    if cupo_maximo <= 0 {
        return Err(ApiError::InvalidField("cupo_maximo"));
    }
    Ok(())
}

/// Load a class the actor may manage: admins manage all, instructors their own.
async fn managed_clase<C: ClaseRepository>(
    clases: &C,
    actor: Actor,
    id: Uuid,
) -> Result<ClaseCupo, ApiError> {
    let cupo = clases.get(id).await?.ok_or(ApiError::ClaseNotFound)?;
    if !actor.can_manage(cupo.clase.instructor_id) {
        return Err(ApiError::Forbidden);
    }
    Ok(cupo)
}

// ── List / Get ───────────────────────────────────────────────────────────────

pub struct ListClasesUseCase<C: ClaseRepository> {
    pub clases: C,
}

impl<C: ClaseRepository> ListClasesUseCase<C> {
    pub async fn execute(&self, filter: ClaseFilter) -> Result<Vec<ClaseCupo>, ApiError> {
        if let (Some(desde), Some(hasta)) = (filter.desde, filter.hasta) {
            if desde > hasta {
                return Err(ApiError::InvalidField("desde"));
            }
        }
        self.clases.list(&filter).await
    }
}

pub struct GetClaseUseCase<C: ClaseRepository> {
    pub clases: C,
}

impl<C: ClaseRepository> GetClaseUseCase<C> {
    pub async fn execute(&self, id: Uuid) -> Result<ClaseCupo, ApiError> {
        self.clases.get(id).await?.ok_or(ApiError::ClaseNotFound)
    }
}

// ── Create ───────────────────────────────────────────────────────────────────

pub struct CreateClaseInput {
    pub sede_id: Uuid,
    /// Required for admins; instructors always create their own classes.
    pub instructor_id: Option<Uuid>,
    pub disciplina: String,
    pub fecha: NaiveDate,
    pub hora_inicio: NaiveTime,
    pub duracion_min: i32,
    pub cupo_maximo: i32,
}

pub struct CreateClaseUseCase<C, S, U>
where
    C: ClaseRepository,
    S: SedeRepository,
    U: UserRepository,
{
    pub clases: C,
    pub sedes: S,
    pub users: U,
}

impl<C, S, U> CreateClaseUseCase<C, S, U>
where
    C: ClaseRepository,
    S: SedeRepository,
    U: UserRepository,
{
    pub async fn execute(&self, actor: Actor, input: CreateClaseInput) -> Result<Clase, ApiError> {
        let instructor_id = match actor.role {
            Role::Admin => input.instructor_id.ok_or(ApiError::MissingData)?,
            Role::Instructor => match input.instructor_id {
                Some(id) if id != actor.user_id => return Err(ApiError::Forbidden),
                _ => actor.user_id,
            },
            Role::Socio => return Err(ApiError::Forbidden),
        };
        validate_shape(&input.disciplina, input.duracion_min, input.cupo_maximo)?;

        if self.sedes.get(input.sede_id).await?.is_none() {
            return Err(ApiError::SedeNotFound);
        }
        if instructor_id != actor.user_id {
            let instructor = self
                .users
                .find_by_id(instructor_id)
                .await?
                .filter(|u| u.is_live())
                .ok_or(ApiError::UserNotFound)?;
            if instructor.role == Role::Socio {
                return Err(ApiError::InvalidField("instructor_id"));
            }
        }

        let clase = Clase {
            id: Uuid::now_v7(),
            sede_id: input.sede_id,
            instructor_id,
            disciplina: input.disciplina.trim().to_owned(),
            fecha: input.fecha,
            hora_inicio: input.hora_inicio,
            duracion_min: input.duracion_min,
            cupo_maximo: input.cupo_maximo,
            created_at: Utc::now(),
        };
        self.clases.create(&clase).await?;
        tracing::info!(clase_id = %clase.id, %instructor_id, "clase created");
        Ok(clase)
    }
}

// ── Update ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateClaseInput {
    pub sede_id: Option<Uuid>,
    pub disciplina: Option<String>,
    pub fecha: Option<NaiveDate>,
    pub hora_inicio: Option<NaiveTime>,
    pub duracion_min: Option<i32>,
    pub cupo_maximo: Option<i32>,
}

pub struct UpdateClaseUseCase<C: ClaseRepository, S: SedeRepository> {
    pub clases: C,
    pub sedes: S,
}

impl<C: ClaseRepository, S: SedeRepository> UpdateClaseUseCase<C, S> {
    pub async fn execute(
        &self,
        actor: Actor,
        id: Uuid,
        input: UpdateClaseInput,
    ) -> Result<ClaseCupo, ApiError> {
        let ClaseCupo {
            mut clase,
            reservados,
        } = managed_clase(&self.clases, actor, id).await?;

        if let Some(sede_id) = input.sede_id {
            if self.sedes.get(sede_id).await?.is_none() {
                return Err(ApiError::SedeNotFound);
            }
            clase.sede_id = sede_id;
        }
        if let Some(disciplina) = input.disciplina {
            clase.disciplina = disciplina.trim().to_owned();
        }
        if let Some(fecha) = input.fecha {
            clase.fecha = fecha;
        }
        if let Some(hora_inicio) = input.hora_inicio {
            clase.hora_inicio = hora_inicio;
        }
        if let Some(duracion_min) = input.duracion_min {
            clase.duracion_min = duracion_min;
        }
        if let Some(cupo_maximo) = input.cupo_maximo {
            // Capacity may not drop below seats already held.
            if u64::try_from(cupo_maximo).unwrap_or(0) < reservados {
                return Err(ApiError::InvalidField("cupo_maximo"));
            }
            clase.cupo_maximo = cupo_maximo;
        }
        validate_shape(&clase.disciplina, clase.duracion_min, clase.cupo_maximo)?;

        self.clases.update(&clase).await?;
        Ok(ClaseCupo { clase, reservados })
    }
}

// ── Delete ───────────────────────────────────────────────────────────────────

pub struct DeleteClaseUseCase<C: ClaseRepository> {
    pub clases: C,
}

impl<C: ClaseRepository> DeleteClaseUseCase<C> {
    pub async fn execute(&self, actor: Actor, id: Uuid) -> Result<(), ApiError> {
        managed_clase(&self.clases, actor, id).await?;
        if !self.clases.delete(id).await? {
            return Err(ApiError::ClaseNotFound);
        }
        tracing::info!(clase_id = %id, "clase deleted");
        Ok(())
    }
}

// ── Roster / ratings ─────────────────────────────────────────────────────────

pub struct ClaseRosterUseCase<C: ClaseRepository, R: ReservaRepository> {
    pub clases: C,
    pub reservas: R,
}

impl<C: ClaseRepository, R: ReservaRepository> ClaseRosterUseCase<C, R> {
    pub async fn execute(&self, actor: Actor, id: Uuid) -> Result<Vec<Reserva>, ApiError> {
        managed_clase(&self.clases, actor, id).await?;
        self.reservas.list_by_clase(id).await
    }
}

pub struct ClaseRatingsUseCase<C: ClaseRepository, Q: CalificacionRepository> {
    pub clases: C,
    pub calificaciones: Q,
}

impl<C: ClaseRepository, Q: CalificacionRepository> ClaseRatingsUseCase<C, Q> {
    pub async fn execute(&self, id: Uuid) -> Result<Vec<Calificacion>, ApiError> {
        if self.clases.get(id).await?.is_none() {
            return Err(ApiError::ClaseNotFound);
        }
        self.calificaciones.list_by_clase(id).await
    }
}
