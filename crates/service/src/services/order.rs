use async_trait::async_trait;
use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use models::{order, user, validate};
use crate::crud::{blank_to_none, ensure_exists, CrudService, Resource};
use crate::errors::ServiceError;
use crate::query::{FieldKind, QuerySchema, SortDirection};

pub type OrderService = CrudService<Orders>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateOrder {
    pub user_id: i32,
    pub total_cents: i64,
    #[serde(default)]
    pub status: Option<String>,
    pub shipping_address: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateOrder {
    pub total_cents: Option<i64>,
    pub status: Option<String>,
    pub shipping_address: Option<String>,
    pub contact_phone: Option<String>,
}

impl CreateOrder {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate::non_negative("total_cents", self.total_cents)?;
        validate::required("shipping_address", &self.shipping_address, 1024)?;
        if let Some(s) = &self.status { order::validate_status(s)?; }
        Ok(())
    }
}

impl UpdateOrder {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(t) = self.total_cents { validate::non_negative("total_cents", t)?; }
        if let Some(a) = &self.shipping_address { validate::required("shipping_address", a, 1024)?; }
        if let Some(s) = &self.status { order::validate_status(s)?; }
        Ok(())
    }
}

/// `ORD-` followed by 32 uppercase hex digits.
pub fn generate_order_no() -> String {
    format!("ORD-{}", Uuid::new_v4().simple()).to_ascii_uppercase()
}

pub struct Orders;

#[async_trait]
impl Resource for Orders {
    type Entity = order::Entity;
    type Model = order::Model;
    type ActiveModel = order::ActiveModel;
    type CreateInput = CreateOrder;
    type UpdateInput = UpdateOrder;

    const NAME: &'static str = "order";

    fn id_column() -> order::Column { order::Column::Id }

    fn query_schema() -> QuerySchema<order::Entity> {
        QuerySchema::new(order::Column::CreatedAt, SortDirection::Desc)
            .filter("order_no", order::Column::OrderNo, FieldKind::Text)
            .filter("user_id", order::Column::UserId, FieldKind::Integer)
            .filter("status", order::Column::Status, FieldKind::Text)
            .filter("is_active", order::Column::IsActive, FieldKind::Bool)
            .sort("id", order::Column::Id)
            .sort("total_cents", order::Column::TotalCents)
            .sort("created_at", order::Column::CreatedAt)
            .sort("updated_at", order::Column::UpdatedAt)
    }

    async fn validate_create(db: &DatabaseConnection, input: &CreateOrder) -> Result<(), ServiceError> {
        input.validate()?;
        ensure_exists::<user::Entity>(db, user::Column::Id, input.user_id, "user").await
    }

    async fn validate_update(_db: &DatabaseConnection, _current: &order::Model, input: &UpdateOrder) -> Result<(), ServiceError> {
        input.validate()
    }

    fn new_active_model(input: CreateOrder, now: DateTimeWithTimeZone) -> Result<order::ActiveModel, ServiceError> {
        Ok(order::ActiveModel {
            id: NotSet,
            order_no: Set(generate_order_no()),
            user_id: Set(input.user_id),
            total_cents: Set(input.total_cents),
            status: Set(input.status.unwrap_or_else(|| "pending".to_string())),
            shipping_address: Set(input.shipping_address.trim().to_string()),
            contact_phone: Set(blank_to_none(input.contact_phone)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    fn apply_update(am: &mut order::ActiveModel, input: UpdateOrder, now: DateTimeWithTimeZone) -> Result<(), ServiceError> {
        if let Some(t) = input.total_cents { am.total_cents = Set(t); }
        if let Some(s) = input.status { am.status = Set(s); }
        if let Some(a) = input.shipping_address { am.shipping_address = Set(a.trim().to_string()); }
        if input.contact_phone.is_some() { am.contact_phone = Set(blank_to_none(input.contact_phone)); }
        am.updated_at = Set(now);
        Ok(())
    }

    fn set_active(am: &mut order::ActiveModel, active: bool, now: DateTimeWithTimeZone) {
        am.is_active = Set(active);
        am.updated_at = Set(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pagination;
    use crate::query::Filter;
    use crate::services::user::{CreateUser, UserService};
    use crate::test_support::get_db;

    async fn seed_user(db: &DatabaseConnection) -> Result<i32, anyhow::Error> {
        let u = UserService::new(db.clone())
            .create(CreateUser { email: "buyer@example.com".into(), name: "Buyer".into(), password: "S3curePass!".into(), role: None })
            .await?;
        Ok(u.id)
    }

    fn input(user_id: i32, total_cents: i64) -> CreateOrder {
        CreateOrder { user_id, total_cents, status: None, shipping_address: "1 Main St".into(), contact_phone: Some("".into()) }
    }

    #[test]
    fn order_numbers_are_unique_and_prefixed() {
        let a = generate_order_no();
        let b = generate_order_no();
        assert!(a.starts_with("ORD-"));
        assert_eq!(a.len(), 36);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn order_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let uid = seed_user(&db).await?;
        let svc = OrderService::new(db);

        let o = svc.create(input(uid, 4200)).await?;
        assert_eq!(o.status, "pending");
        assert_eq!(o.contact_phone, None);
        assert!(o.order_no.starts_with("ORD-"));

        let paid = svc.update(o.id, UpdateOrder { status: Some("paid".into()), ..Default::default() }).await?;
        assert_eq!(paid.status, "paid");
        assert_eq!(paid.order_no, o.order_no);

        let err = svc.update(o.id, UpdateOrder { status: Some("refunded".into()), ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.get(o.id).await?.status, "paid");
        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = OrderService::new(db);
        let err = svc.create(input(77, 100)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.count().await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn filter_by_status_list() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let uid = seed_user(&db).await?;
        let svc = OrderService::new(db);
        let a = svc.create(input(uid, 100)).await?;
        let b = svc.create(input(uid, 200)).await?;
        svc.create(input(uid, 300)).await?;
        svc.update(a.id, UpdateOrder { status: Some("shipped".into()), ..Default::default() }).await?;
        svc.update(b.id, UpdateOrder { status: Some("cancelled".into()), ..Default::default() }).await?;

        let r = svc
            .find_paginated(Pagination::default(), &[Filter::new("status", crate::query::FilterOp::In, "shipped,cancelled")], None)
            .await?;
        assert_eq!(r.total, 2);
        let r = svc.find_paginated(Pagination::default(), &[Filter::eq("user_id", uid)], None).await?;
        assert_eq!(r.total, 3);
        Ok(())
    }
}
