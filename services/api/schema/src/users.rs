use sea_orm::entity::prelude::*;

/// Account record. `role` holds `socio` | `instructor` | `admin`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nombre: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub role: String,
    pub password_hash: String,
    pub pin_hash: Option<String>,
    /// False until the registration code is confirmed, or after an admin disables the account.
    pub activo: bool,
    /// Set once the registration code is confirmed. Never cleared.
    pub verificado: bool,
    /// Soft-delete flag set by the account-deletion flow.
    pub eliminado: bool,
    pub push_token: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::otp_codes::Entity")]
    OtpCodes,
    #[sea_orm(has_many = "super::reservas::Entity")]
    Reservas,
    #[sea_orm(has_many = "super::notificaciones::Entity")]
    Notificaciones,
}

impl Related<super::otp_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OtpCodes.def()
    }
}

impl Related<super::reservas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservas.def()
    }
}

impl Related<super::notificaciones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notificaciones.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
