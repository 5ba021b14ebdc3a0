use sea_orm::entity::prelude::*;

/// 1-5 rating of a class. Unique on (user_id, clase_id).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "calificaciones")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub clase_id: Uuid,
    pub puntuacion: i16,
    pub puntuacion_instructor: Option<i16>,
    pub comentario: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
