use async_trait::async_trait;
use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use models::{partner, validate};
use crate::crud::{blank_to_none, ensure_unique, CrudService, Resource};
use crate::errors::ServiceError;
use crate::query::{FieldKind, QuerySchema, SortDirection};

pub type PartnerService = CrudService<Partners>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatePartner {
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdatePartner {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub sort_order: Option<i32>,
}

pub struct Partners;

#[async_trait]
impl Resource for Partners {
    type Entity = partner::Entity;
    type Model = partner::Model;
    type ActiveModel = partner::ActiveModel;
    type CreateInput = CreatePartner;
    type UpdateInput = UpdatePartner;

    const NAME: &'static str = "partner";

    fn id_column() -> partner::Column { partner::Column::Id }

    fn query_schema() -> QuerySchema<partner::Entity> {
        QuerySchema::new(partner::Column::SortOrder, SortDirection::Asc)
            .filter("name", partner::Column::Name, FieldKind::Text)
            .filter("is_active", partner::Column::IsActive, FieldKind::Bool)
            .sort("id", partner::Column::Id)
            .sort("name", partner::Column::Name)
            .sort("sort_order", partner::Column::SortOrder)
            .sort("created_at", partner::Column::CreatedAt)
    }

    async fn validate_create(db: &DatabaseConnection, input: &CreatePartner) -> Result<(), ServiceError> {
        validate::required("name", &input.name, 128)?;
        validate::optional_url("logo_url", input.logo_url.as_deref())?;
        validate::optional_url("website", input.website.as_deref())?;
        ensure_unique::<partner::Entity>(db, partner::Column::Name, input.name.trim(), None, "partner name").await
    }

    async fn validate_update(db: &DatabaseConnection, current: &partner::Model, input: &UpdatePartner) -> Result<(), ServiceError> {
        validate::optional_url("logo_url", input.logo_url.as_deref())?;
        validate::optional_url("website", input.website.as_deref())?;
        if let Some(name) = &input.name {
            validate::required("name", name, 128)?;
            ensure_unique::<partner::Entity>(db, partner::Column::Name, name.trim(), Some((partner::Column::Id, current.id)), "partner name").await?;
        }
        Ok(())
    }

    fn new_active_model(input: CreatePartner, now: DateTimeWithTimeZone) -> Result<partner::ActiveModel, ServiceError> {
        Ok(partner::ActiveModel {
            id: NotSet,
            name: Set(input.name.trim().to_string()),
            logo_url: Set(blank_to_none(input.logo_url)),
            website: Set(blank_to_none(input.website)),
            sort_order: Set(input.sort_order),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    fn apply_update(am: &mut partner::ActiveModel, input: UpdatePartner, now: DateTimeWithTimeZone) -> Result<(), ServiceError> {
        if let Some(n) = input.name { am.name = Set(n.trim().to_string()); }
        if input.logo_url.is_some() { am.logo_url = Set(blank_to_none(input.logo_url)); }
        if input.website.is_some() { am.website = Set(blank_to_none(input.website)); }
        if let Some(o) = input.sort_order { am.sort_order = Set(o); }
        am.updated_at = Set(now);
        Ok(())
    }

    fn set_active(am: &mut partner::ActiveModel, active: bool, now: DateTimeWithTimeZone) {
        am.is_active = Set(active);
        am.updated_at = Set(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    fn input(name: &str) -> CreatePartner {
        CreatePartner { name: name.into(), logo_url: None, website: Some("https://acme.example".into()), sort_order: 0 }
    }

    #[tokio::test]
    async fn partner_name_is_unique_after_trimming() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = PartnerService::new(db);
        let p = svc.create(input("Acme")).await?;
        assert_eq!(p.website.as_deref(), Some("https://acme.example"));

        let err = svc.create(input("  Acme ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.count().await?, 1);

        let renamed = svc.update(p.id, UpdatePartner { name: Some("Acme".into()), website: Some(String::new()), ..Default::default() }).await?;
        assert_eq!(renamed.website, None);
        Ok(())
    }
}
