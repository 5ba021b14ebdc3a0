use sea_orm::entity::prelude::*;

/// Check-in record, distinct from the booking.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "asistencias")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub clase_id: Uuid,
    pub fecha_asistencia: chrono::NaiveDate,
    pub checkin_hora: Option<chrono::NaiveTime>,
    pub confirmado_qr: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clases::Entity",
        from = "Column::ClaseId",
        to = "super::clases::Column::Id"
    )]
    Clase,
}

impl Related<super::clases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
