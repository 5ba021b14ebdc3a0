use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Asistencias::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Asistencias::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Asistencias::UserId).uuid().not_null())
                    .col(ColumnDef::new(Asistencias::ClaseId).uuid().not_null())
                    .col(ColumnDef::new(Asistencias::FechaAsistencia).date().not_null())
                    .col(ColumnDef::new(Asistencias::CheckinHora).time().null())
                    .col(
                        ColumnDef::new(Asistencias::ConfirmadoQr)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Asistencias::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Asistencias::Table, Asistencias::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Asistencias::Table, Asistencias::ClaseId)
                            .to(Clases::Table, Clases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Asistencias::Table)
                    .col(Asistencias::UserId)
                    .col(Asistencias::ClaseId)
                    .unique()
                    .name("uq_asistencias_user_clase")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Asistencias::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Asistencias {
    Table,
    Id,
    UserId,
    ClaseId,
    FechaAsistencia,
    CheckinHora,
    ConfirmadoQr,
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
