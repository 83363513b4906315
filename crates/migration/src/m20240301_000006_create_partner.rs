//! Create `partner` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Partner::Table)
                    .if_not_exists()
                    .col(pk_auto(Partner::Id))
                    .col(string_len(Partner::Name, 128).unique_key())
                    .col(string_len_null(Partner::LogoUrl, 512))
                    .col(string_len_null(Partner::Website, 512))
                    .col(integer(Partner::SortOrder).default(0))
                    .col(boolean(Partner::IsActive).default(true))
                    .col(timestamp_with_time_zone(Partner::CreatedAt))
                    .col(timestamp_with_time_zone(Partner::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Partner::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Partner { Table, Id, Name, LogoUrl, Website, SortOrder, IsActive, CreatedAt, UpdatedAt }
