use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Clases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Clases::SedeId).uuid().not_null())
                    .col(ColumnDef::new(Clases::InstructorId).uuid().not_null())
                    .col(ColumnDef::new(Clases::Disciplina).string().not_null())
                    .col(ColumnDef::new(Clases::Fecha).date().not_null())
                    .col(ColumnDef::new(Clases::HoraInicio).time().not_null())
                    .col(ColumnDef::new(Clases::DuracionMin).integer().not_null())
                    .col(ColumnDef::new(Clases::CupoMaximo).integer().not_null())
                    .col(
                        ColumnDef::new(Clases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Clases::Table, Clases::SedeId)
                            .to(Sedes::Table, Sedes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Clases::Table, Clases::InstructorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Clases::Table)
                    .col(Clases::Fecha)
                    .col(Clases::HoraInicio)
                    .name("idx_clases_fecha_hora")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Clases::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Clases {
    Table,
    Id,
    SedeId,
    InstructorId,
    Disciplina,
    Fecha,
    HoraInicio,
    DuracionMin,
    CupoMaximo,
    CreatedAt,
}

#[derive(Iden)]
enum Sedes {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
