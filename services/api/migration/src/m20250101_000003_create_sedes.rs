use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sedes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sedes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Sedes::Nombre).string().not_null())
                    .col(ColumnDef::new(Sedes::Direccion).string().not_null())
                    .col(ColumnDef::new(Sedes::Latitud).double().not_null())
                    .col(ColumnDef::new(Sedes::Longitud).double().not_null())
                    .col(
                        ColumnDef::new(Sedes::Disciplinas)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Sedes::Telefono).string().null())
                    .col(
                        ColumnDef::new(Sedes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sedes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sedes {
    Table,
    Id,
    Nombre,
    Direccion,
    Latitud,
    Longitud,
    Disciplinas,
    Telefono,
    CreatedAt,
}
