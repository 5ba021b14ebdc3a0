use sea_orm::entity::prelude::*;

/// Scheduled class session. Available seats are never stored:
/// `cupo_maximo` minus the number of `reservas` rows for the class.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub sede_id: Uuid,
    pub instructor_id: Uuid,
    pub disciplina: String,
    pub fecha: chrono::NaiveDate,
    pub hora_inicio: chrono::NaiveTime,
    pub duracion_min: i32,
    pub cupo_maximo: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sedes::Entity",
        from = "Column::SedeId",
        to = "super::sedes::Column::Id"
    )]
    Sede,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::InstructorId",
        to = "super::users::Column::Id"
    )]
    Instructor,
    #[sea_orm(has_many = "super::reservas::Entity")]
    Reservas,
}

impl Related<super::sedes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sede.def()
    }
}

impl Related<super::reservas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
