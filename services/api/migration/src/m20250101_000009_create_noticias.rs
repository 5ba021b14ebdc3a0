use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Noticias::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Noticias::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Noticias::Titulo).string().not_null())
                    .col(ColumnDef::new(Noticias::Contenido).text().not_null())
                    .col(
                        ColumnDef::new(Noticias::Tipo)
                            .string_len(16)
                            .not_null()
                            .default("noticia"),
                    )
                    .col(ColumnDef::new(Noticias::ImagenUrl).string().null())
                    .col(ColumnDef::new(Noticias::CodigoPromo).string().null())
                    .col(ColumnDef::new(Noticias::FechaPublicacion).date().not_null())
                    .col(ColumnDef::new(Noticias::FechaExpiracion).date().null())
                    .col(
                        ColumnDef::new(Noticias::CreatedAt)
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
            .drop_table(Table::drop().table(Noticias::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Noticias {
    Table,
    Id,
    Titulo,
    Contenido,
    Tipo,
    ImagenUrl,
    CodigoPromo,
    FechaPublicacion,
    FechaExpiracion,
    CreatedAt,
}
