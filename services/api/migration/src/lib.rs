pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users;
mod m20250101_000002_create_otp_codes;
mod m20250101_000003_create_sedes;
mod m20250101_000004_create_clases;
mod m20250101_000005_create_reservas;
mod m20250101_000006_create_asistencias;
mod m20250101_000007_create_calificaciones;
mod m20250101_000008_create_objetivos;
mod m20250101_000009_create_noticias;
mod m20250101_000010_create_notificaciones;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users::Migration),
            Box::new(m20250101_000002_create_otp_codes::Migration),
            Box::new(m20250101_000003_create_sedes::Migration),
            Box::new(m20250101_000004_create_clases::Migration),
            Box::new(m20250101_000005_create_reservas::Migration),
            Box::new(m20250101_000006_create_asistencias::Migration),
            Box::new(m20250101_000007_create_calificaciones::Migration),
            Box::new(m20250101_000008_create_objetivos::Migration),
            Box::new(m20250101_000009_create_noticias::Migration),
            Box::new(m20250101_000010_create_notificaciones::Migration),
        ]
    }
}
