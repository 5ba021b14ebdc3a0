use sea_orm::entity::prelude::*;

/// Physical venue.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sedes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nombre: String,
    pub direccion: String,
    pub latitud: f64,
    pub longitud: f64,
    /// Comma-separated list of disciplines offered.
    pub disciplinas: String,
    pub telefono: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::clases::Entity")]
    Clases,
}

impl Related<super::clases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
