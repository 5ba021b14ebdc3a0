use sea_orm::entity::prelude::*;

/// Editorial item: news, promo, or event.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "noticias")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub titulo: String,
    #[sea_orm(column_type = "Text")]
    pub contenido: String,
    pub tipo: String,
    pub imagen_url: Option<String>,
    pub codigo_promo: Option<String>,
    pub fecha_publicacion: chrono::NaiveDate,
    pub fecha_expiracion: Option<chrono::NaiveDate>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
