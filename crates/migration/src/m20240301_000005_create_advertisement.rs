//! Create `advertisement` table (homepage banners and slots).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Advertisement::Table)
                    .if_not_exists()
                    .col(pk_auto(Advertisement::Id))
                    .col(string_len(Advertisement::Title, 255))
                    .col(string_len(Advertisement::ImageUrl, 512))
                    .col(string_len_null(Advertisement::LinkUrl, 512))
                    .col(string_len(Advertisement::Position, 64).default("home"))
                    .col(integer(Advertisement::SortOrder).default(0))
                    .col(boolean(Advertisement::IsActive).default(true))
                    .col(timestamp_with_time_zone(Advertisement::CreatedAt))
                    .col(timestamp_with_time_zone(Advertisement::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Advertisement::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Advertisement { Table, Id, Title, ImageUrl, LinkUrl, Position, SortOrder, IsActive, CreatedAt, UpdatedAt }
