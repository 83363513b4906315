//! Create `orders` table with FK to `user`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_auto(Orders::Id))
                    .col(string_len(Orders::OrderNo, 64).unique_key())
                    .col(integer(Orders::UserId))
                    .col(big_integer(Orders::TotalCents).default(0))
                    .col(string_len(Orders::Status, 32).default("pending"))
                    .col(text(Orders::ShippingAddress))
                    .col(string_len_null(Orders::ContactPhone, 32))
                    .col(boolean(Orders::IsActive).default(true))
                    .col(timestamp_with_time_zone(Orders::CreatedAt))
                    .col(timestamp_with_time_zone(Orders::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user")
                            .from(Orders::Table, Orders::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Orders::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Orders { Table, Id, OrderNo, UserId, TotalCents, Status, ShippingAddress, ContactPhone, IsActive, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
