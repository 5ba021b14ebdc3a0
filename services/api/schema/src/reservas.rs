use sea_orm::entity::prelude::*;

/// Booking of a user against a class. Unique on (user_id, clase_id).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reservas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub clase_id: Uuid,
    pub estado: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::clases::Entity",
        from = "Column::ClaseId",
        to = "super::clases::Column::Id"
    )]
    Clase,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::clases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
