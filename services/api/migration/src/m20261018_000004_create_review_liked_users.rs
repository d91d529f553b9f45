use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReviewLikedUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReviewLikedUsers::ReviewId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReviewLikedUsers::UserId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ReviewLikedUsers::ReviewId)
                            .col(ReviewLikedUsers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReviewLikedUsers::Table, ReviewLikedUsers::ReviewId)
                            .to(Reviews::Table, Reviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ReviewLikedUsers::Table, ReviewLikedUsers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReviewLikedUsers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ReviewLikedUsers {
    Table,
    ReviewId,
    UserId,
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
