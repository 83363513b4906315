//! Create `site_config` key/value table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SiteConfig::Table)
                    .if_not_exists()
                    .col(pk_auto(SiteConfig::Id))
                    .col(string_len(SiteConfig::ConfigKey, 128).unique_key())
                    .col(text(SiteConfig::ConfigValue))
                    .col(string_len_null(SiteConfig::Description, 255))
                    .col(boolean(SiteConfig::IsActive).default(true))
                    .col(timestamp_with_time_zone(SiteConfig::CreatedAt))
                    .col(timestamp_with_time_zone(SiteConfig::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(SiteConfig::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum SiteConfig { Table, Id, ConfigKey, ConfigValue, Description, IsActive, CreatedAt, UpdatedAt }
