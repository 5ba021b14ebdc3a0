use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Calificaciones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Calificaciones::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Calificaciones::UserId).uuid().not_null())
                    .col(ColumnDef::new(Calificaciones::ClaseId).uuid().not_null())
                    .col(
                        ColumnDef::new(Calificaciones::Puntuacion)
                            .small_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Calificaciones::PuntuacionInstructor)
                            .small_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Calificaciones::Comentario).text().null())
                    .col(
                        ColumnDef::new(Calificaciones::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Calificaciones::Table, Calificaciones::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Calificaciones::Table, Calificaciones::ClaseId)
                            .to(Clases::Table, Clases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Calificaciones::Table)
                    .col(Calificaciones::UserId)
                    .col(Calificaciones::ClaseId)
                    .unique()
                    .name("uq_calificaciones_user_clase")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Calificaciones::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Calificaciones {
    Table,
    Id,
    UserId,
    ClaseId,
    Puntuacion,
    PuntuacionInstructor,
    Comentario,
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
