use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // One row per username: the durable key-value namespace backing UserStore.
        manager
            .create_table(
                Table::create()
                    .table(UserRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserRecords::Key)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserRecords::Value)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserRecords::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserRecords {
    Table,
    Key,
    Value,
    UpdatedAt,
}
