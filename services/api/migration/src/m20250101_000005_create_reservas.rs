use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservas::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reservas::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Reservas::UserId).uuid().not_null())
                    .col(ColumnDef::new(Reservas::ClaseId).uuid().not_null())
                    .col(
                        ColumnDef::new(Reservas::Estado)
                            .string_len(16)
                            .not_null()
                            .default("activa"),
                    )
                    .col(
                        ColumnDef::new(Reservas::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reservas::Table, Reservas::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Reservas::Table, Reservas::ClaseId)
                            .to(Clases::Table, Clases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        // One booking per (user, class); the booking transaction relies on it.
        manager
            .create_index(
                Index::create()
                    .table(Reservas::Table)
                    .col(Reservas::UserId)
                    .col(Reservas::ClaseId)
                    .unique()
                    .name("uq_reservas_user_clase")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Reservas::Table)
                    .col(Reservas::ClaseId)
                    .name("idx_reservas_clase_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservas::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reservas {
    Table,
    Id,
    UserId,
    ClaseId,
    Estado,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Clases {
    Table,
    Id,
}
