//! Create `product` table with FK to `category`.
//!
//! Prices are stored as integer cents.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_auto(Product::Id))
                    .col(integer(Product::CategoryId))
                    .col(string_len(Product::Name, 255))
                    .col(string_len(Product::Sku, 64).unique_key())
                    .col(text_null(Product::Description))
                    .col(big_integer(Product::PriceCents).default(0))
                    .col(integer(Product::Stock).default(0))
                    .col(string_len_null(Product::ImageUrl, 512))
                    .col(boolean(Product::IsActive).default(true))
                    .col(timestamp_with_time_zone(Product::CreatedAt))
                    .col(timestamp_with_time_zone(Product::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_category")
                            .from(Product::Table, Product::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Product::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Product { Table, Id, CategoryId, Name, Sku, Description, PriceCents, Stock, ImageUrl, IsActive, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Category { Table, Id }
