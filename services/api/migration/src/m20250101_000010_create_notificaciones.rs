use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notificaciones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notificaciones::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notificaciones::UserId).uuid().not_null())
                    .col(ColumnDef::new(Notificaciones::Titulo).string().not_null())
                    .col(ColumnDef::new(Notificaciones::Mensaje).string().not_null())
                    .col(
                        ColumnDef::new(Notificaciones::Leida)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notificaciones::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notificaciones::Table, Notificaciones::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Notificaciones::Table)
                    .col(Notificaciones::UserId)
                    .name("idx_notificaciones_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notificaciones::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Notificaciones {
    Table,
    Id,
    UserId,
    Titulo,
    Mensaje,
    Leida,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
