use async_trait::async_trait;
use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use models::{category, product, validate};
use crate::crud::{blank_to_none, ensure_exists, ensure_unique, CrudService, Resource};
use crate::errors::ServiceError;
use crate::query::{FieldKind, QuerySchema, SortDirection};

pub type ProductService = CrudService<Products>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateProduct {
    pub category_id: i32,
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Absent fields are left untouched; empty `description`/`image_url` clear them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateProduct {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
}

impl CreateProduct {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate::required("name", &self.name, 255)?;
        product::validate_sku(&self.sku)?;
        validate::non_negative("price_cents", self.price_cents)?;
        validate::non_negative("stock", self.stock.into())?;
        validate::optional_url("image_url", self.image_url.as_deref())?;
        Ok(())
    }
}

impl UpdateProduct {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(n) = &self.name { validate::required("name", n, 255)?; }
        if let Some(s) = &self.sku { product::validate_sku(s)?; }
        if let Some(p) = self.price_cents { validate::non_negative("price_cents", p)?; }
        if let Some(s) = self.stock { validate::non_negative("stock", s.into())?; }
        validate::optional_url("image_url", self.image_url.as_deref())?;
        Ok(())
    }
}

pub struct Products;

#[async_trait]
impl Resource for Products {
    type Entity = product::Entity;
    type Model = product::Model;
    type ActiveModel = product::ActiveModel;
    type CreateInput = CreateProduct;
    type UpdateInput = UpdateProduct;

    const NAME: &'static str = "product";

    fn id_column() -> product::Column { product::Column::Id }

    fn query_schema() -> QuerySchema<product::Entity> {
        QuerySchema::new(product::Column::CreatedAt, SortDirection::Desc)
            .filter("name", product::Column::Name, FieldKind::Text)
            .filter("sku", product::Column::Sku, FieldKind::Text)
            .filter("category_id", product::Column::CategoryId, FieldKind::Integer)
            .filter("is_active", product::Column::IsActive, FieldKind::Bool)
            .sort("id", product::Column::Id)
            .sort("name", product::Column::Name)
            .sort("price_cents", product::Column::PriceCents)
            .sort("stock", product::Column::Stock)
            .sort("created_at", product::Column::CreatedAt)
            .sort("updated_at", product::Column::UpdatedAt)
    }

    async fn validate_create(db: &DatabaseConnection, input: &CreateProduct) -> Result<(), ServiceError> {
        input.validate()?;
        ensure_exists::<category::Entity>(db, category::Column::Id, input.category_id, "category").await?;
        ensure_unique::<product::Entity>(db, product::Column::Sku, &input.sku, None, "sku").await
    }

    async fn validate_update(db: &DatabaseConnection, current: &product::Model, input: &UpdateProduct) -> Result<(), ServiceError> {
        input.validate()?;
        if let Some(cid) = input.category_id.filter(|c| *c != current.category_id) {
            ensure_exists::<category::Entity>(db, category::Column::Id, cid, "category").await?;
        }
        if let Some(sku) = input.sku.as_deref() {
            ensure_unique::<product::Entity>(db, product::Column::Sku, sku, Some((product::Column::Id, current.id)), "sku").await?;
        }
        Ok(())
    }

    fn new_active_model(input: CreateProduct, now: DateTimeWithTimeZone) -> Result<product::ActiveModel, ServiceError> {
        Ok(product::ActiveModel {
            id: NotSet,
            category_id: Set(input.category_id),
            name: Set(input.name.trim().to_string()),
            sku: Set(input.sku),
            description: Set(blank_to_none(input.description)),
            price_cents: Set(input.price_cents),
            stock: Set(input.stock),
            image_url: Set(blank_to_none(input.image_url)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    fn apply_update(am: &mut product::ActiveModel, input: UpdateProduct, now: DateTimeWithTimeZone) -> Result<(), ServiceError> {
        if let Some(c) = input.category_id { am.category_id = Set(c); }
        if let Some(n) = input.name { am.name = Set(n.trim().to_string()); }
        if let Some(s) = input.sku { am.sku = Set(s); }
        if input.description.is_some() { am.description = Set(blank_to_none(input.description)); }
        if let Some(p) = input.price_cents { am.price_cents = Set(p); }
        if let Some(s) = input.stock { am.stock = Set(s); }
        if input.image_url.is_some() { am.image_url = Set(blank_to_none(input.image_url)); }
        am.updated_at = Set(now);
        Ok(())
    }

    fn set_active(am: &mut product::ActiveModel, active: bool, now: DateTimeWithTimeZone) {
        am.is_active = Set(active);
        am.updated_at = Set(now);
    }
}
