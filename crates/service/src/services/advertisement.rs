use async_trait::async_trait;
use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use models::{advertisement, validate};
use crate::crud::{blank_to_none, CrudService, Resource};
use crate::errors::ServiceError;
use crate::query::{FieldKind, QuerySchema, SortDirection};

pub type AdvertisementService = CrudService<Advertisements>;

fn default_position() -> String { "home".to_string() }

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateAdvertisement {
    pub title: String,
    pub image_url: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default = "default_position")]
    pub position: String,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateAdvertisement {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub position: Option<String>,
    pub sort_order: Option<i32>,
}

impl CreateAdvertisement {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate::required("title", &self.title, 255)?;
        validate::required("image_url", &self.image_url, 512)?;
        validate::optional_url("image_url", Some(&self.image_url))?;
        validate::optional_url("link_url", self.link_url.as_deref())?;
        validate::required("position", &self.position, 64)?;
        Ok(())
    }
}

impl UpdateAdvertisement {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(t) = &self.title { validate::required("title", t, 255)?; }
        if let Some(i) = &self.image_url {
            validate::required("image_url", i, 512)?;
            validate::optional_url("image_url", Some(i))?;
        }
        validate::optional_url("link_url", self.link_url.as_deref())?;
        if let Some(p) = &self.position { validate::required("position", p, 64)?; }
        Ok(())
    }
}

pub struct Advertisements;

#[async_trait]
impl Resource for Advertisements {
    type Entity = advertisement::Entity;
    type Model = advertisement::Model;
    type ActiveModel = advertisement::ActiveModel;
    type CreateInput = CreateAdvertisement;
    type UpdateInput = UpdateAdvertisement;

    const NAME: &'static str = "advertisement";

    fn id_column() -> advertisement::Column { advertisement::Column::Id }

    fn query_schema() -> QuerySchema<advertisement::Entity> {
        QuerySchema::new(advertisement::Column::SortOrder, SortDirection::Asc)
            .filter("title", advertisement::Column::Title, FieldKind::Text)
            .filter("position", advertisement::Column::Position, FieldKind::Text)
            .filter("is_active", advertisement::Column::IsActive, FieldKind::Bool)
            .sort("id", advertisement::Column::Id)
            .sort("sort_order", advertisement::Column::SortOrder)
            .sort("created_at", advertisement::Column::CreatedAt)
    }

    async fn validate_create(_db: &DatabaseConnection, input: &CreateAdvertisement) -> Result<(), ServiceError> {
        input.validate()
    }

    async fn validate_update(_db: &DatabaseConnection, _current: &advertisement::Model, input: &UpdateAdvertisement) -> Result<(), ServiceError> {
        input.validate()
    }

    fn new_active_model(input: CreateAdvertisement, now: DateTimeWithTimeZone) -> Result<advertisement::ActiveModel, ServiceError> {
        Ok(advertisement::ActiveModel {
            id: NotSet,
            title: Set(input.title.trim().to_string()),
            image_url: Set(input.image_url.trim().to_string()),
            link_url: Set(blank_to_none(input.link_url)),
            position: Set(input.position.trim().to_string()),
            sort_order: Set(input.sort_order),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    fn apply_update(am: &mut advertisement::ActiveModel, input: UpdateAdvertisement, now: DateTimeWithTimeZone) -> Result<(), ServiceError> {
        if let Some(t) = input.title { am.title = Set(t.trim().to_string()); }
        if let Some(i) = input.image_url { am.image_url = Set(i.trim().to_string()); }
        if input.link_url.is_some() { am.link_url = Set(blank_to_none(input.link_url)); }
        if let Some(p) = input.position { am.position = Set(p.trim().to_string()); }
        if let Some(o) = input.sort_order { am.sort_order = Set(o); }
        am.updated_at = Set(now);
        Ok(())
    }

    fn set_active(am: &mut advertisement::ActiveModel, active: bool, now: DateTimeWithTimeZone) {
        am.is_active = Set(active);
        am.updated_at = Set(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pagination;
    use crate::query::Filter;
    use crate::test_support::get_db;

    fn banner(title: &str, position: &str, sort_order: i32) -> CreateAdvertisement {
        CreateAdvertisement {
            title: title.into(),
            image_url: "https://cdn.example.com/b.png".into(),
            link_url: None,
            position: position.into(),
            sort_order,
        }
    }

    #[tokio::test]
    async fn advertisement_crud_and_slot_listing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = AdvertisementService::new(db);
        let late = svc.create(banner("Late", "home", 9)).await?;
        svc.create(banner("Early", "home", 1)).await?;
        svc.create(banner("Side", "sidebar", 0)).await?;

        svc.soft_delete(late.id).await?;
        let live = svc
            .find_paginated(Pagination::default(), &[Filter::eq("position", "home"), Filter::eq("is_active", true)], None)
            .await?;
        assert_eq!(live.total, 1);
        assert_eq!(live.items[0].title, "Early");

        let moved = svc.update(late.id, UpdateAdvertisement { position: Some("sidebar".into()), ..Default::default() }).await?;
        assert_eq!(moved.position, "sidebar");
        assert!(!moved.is_active);
        Ok(())
    }

    #[tokio::test]
    async fn bad_link_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = AdvertisementService::new(db);
        let mut b = banner("Promo", "home", 0);
        b.link_url = Some("javascript:alert(1)".into());
        assert!(matches!(svc.create(b).await, Err(ServiceError::Validation(_))));
        Ok(())
    }
}
