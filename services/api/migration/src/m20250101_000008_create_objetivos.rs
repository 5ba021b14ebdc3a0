use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Objetivos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Objetivos::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Objetivos::UserId).uuid().not_null())
                    .col(ColumnDef::new(Objetivos::Disciplina).string().not_null())
                    .col(ColumnDef::new(Objetivos::ClasesObjetivo).integer().not_null())
                    .col(ColumnDef::new(Objetivos::FechaInicio).date().not_null())
                    .col(ColumnDef::new(Objetivos::FechaFin).date().not_null())
                    .col(
                        ColumnDef::new(Objetivos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Objetivos::Table, Objetivos::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Objetivos::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Objetivos {
    Table,
    Id,
    UserId,
    Disciplina,
    ClasesObjetivo,
    FechaInicio,
    FechaFin,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
