use async_trait::async_trait;
use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use models::{category, validate};
use crate::crud::{blank_to_none, ensure_unique, CrudService, Resource};
use crate::errors::ServiceError;
use crate::query::{FieldKind, QuerySchema, SortDirection};

pub type CategoryService = CrudService<Categories>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Absent fields are left untouched; an empty `description` clears it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

impl CreateCategory {
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate::required("name", &self.name, 128)?;
        category::validate_slug(&self.slug)?;
        Ok(())
    }
}

impl UpdateCategory {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(n) = &self.name { validate::required("name", n, 128)?; }
        if let Some(s) = &self.slug { category::validate_slug(s)?; }
        Ok(())
    }
}

pub struct Categories;

#[async_trait]
impl Resource for Categories {
    type Entity = category::Entity;
    type Model = category::Model;
    type ActiveModel = category::ActiveModel;
    type CreateInput = CreateCategory;
    type UpdateInput = UpdateCategory;

    const NAME: &'static str = "category";

    fn id_column() -> category::Column { category::Column::Id }

    fn query_schema() -> QuerySchema<category::Entity> {
        QuerySchema::new(category::Column::SortOrder, SortDirection::Asc)
            .filter("name", category::Column::Name, FieldKind::Text)
            .filter("slug", category::Column::Slug, FieldKind::Text)
            .filter("is_active", category::Column::IsActive, FieldKind::Bool)
            .sort("id", category::Column::Id)
            .sort("name", category::Column::Name)
            .sort("sort_order", category::Column::SortOrder)
            .sort("created_at", category::Column::CreatedAt)
    }

    async fn validate_create(db: &DatabaseConnection, input: &CreateCategory) -> Result<(), ServiceError> {
        input.validate()?;
        ensure_unique::<category::Entity>(db, category::Column::Slug, &input.slug, None, "slug").await
    }

    async fn validate_update(db: &DatabaseConnection, current: &category::Model, input: &UpdateCategory) -> Result<(), ServiceError> {
        input.validate()?;
        if let Some(slug) = input.slug.as_deref().filter(|s| *s != current.slug) {
            ensure_unique::<category::Entity>(db, category::Column::Slug, slug, Some((category::Column::Id, current.id)), "slug").await?;
        }
        Ok(())
    }

    fn new_active_model(input: CreateCategory, now: DateTimeWithTimeZone) -> Result<category::ActiveModel, ServiceError> {
        Ok(category::ActiveModel {
            id: NotSet,
            name: Set(input.name.trim().to_string()),
            slug: Set(input.slug),
            description: Set(blank_to_none(input.description)),
            sort_order: Set(input.sort_order),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    fn apply_update(am: &mut category::ActiveModel, input: UpdateCategory, now: DateTimeWithTimeZone) -> Result<(), ServiceError> {
        if let Some(n) = input.name { am.name = Set(n.trim().to_string()); }
        if let Some(s) = input.slug { am.slug = Set(s); }
        if input.description.is_some() { am.description = Set(blank_to_none(input.description)); }
        if let Some(o) = input.sort_order { am.sort_order = Set(o); }
        am.updated_at = Set(now);
        Ok(())
    }

    fn set_active(am: &mut category::ActiveModel, active: bool, now: DateTimeWithTimeZone) {
        am.is_active = Set(active);
        am.updated_at = Set(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::Pagination;
    use crate::query::{Filter, SortSpec};
    use crate::test_support::get_db;

    fn input(name: &str, slug: &str, sort_order: i32) -> CreateCategory {
        CreateCategory { name: name.into(), slug: slug.into(), description: None, sort_order }
    }

    #[tokio::test]
    async fn category_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = CategoryService::new(db);

        let c = svc.create(input("Shirts", "shirts", 2)).await?;
        assert!(c.id > 0);
        assert!(c.is_active);
        assert_eq!(c.created_at, c.updated_at);

        let found = svc.get(c.id).await?;
        assert_eq!(found.slug, "shirts");

        let updated = svc
            .update(c.id, UpdateCategory { name: Some("Tees".into()), description: Some("cotton".into()), ..Default::default() })
            .await?;
        assert_eq!(updated.name, "Tees");
        assert_eq!(updated.slug, "shirts");
        assert_eq!(updated.description.as_deref(), Some("cotton"));
        assert!(updated.updated_at >= c.updated_at);

        let cleared = svc.update(c.id, UpdateCategory { description: Some("  ".into()), ..Default::default() }).await?;
        assert_eq!(cleared.description, None);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_slug_is_rejected_without_insert() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = CategoryService::new(db);
        svc.create(input("Shirts", "shirts", 0)).await?;

        let err = svc.create(input("Other shirts", "shirts", 0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)), "{err}");
        assert_eq!(svc.count().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_may_keep_own_slug_but_not_take_another() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = CategoryService::new(db);
        let a = svc.create(input("A", "a", 0)).await?;
        svc.create(input("B", "b", 0)).await?;

        svc.update(a.id, UpdateCategory { slug: Some("a".into()), ..Default::default() }).await?;
        let err = svc.update(a.id, UpdateCategory { slug: Some("b".into()), ..Default::default() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.get(a.id).await?.slug, "a");
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = CategoryService::new(db);
        let err = svc.update(42, UpdateCategory::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn soft_delete_and_restore_toggle_active() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = CategoryService::new(db);
        let c = svc.create(input("Hats", "hats", 0)).await?;

        assert!(!svc.soft_delete(c.id).await?.is_active);
        // second call on an already disabled row still succeeds
        assert!(!svc.soft_delete(c.id).await?.is_active);
        assert_eq!(svc.count().await?, 1);

        assert!(svc.restore(c.id).await?.is_active);
        Ok(())
    }

    #[tokio::test]
    async fn soft_delete_missing_id_leaves_store_unchanged() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = CategoryService::new(db);
        let c = svc.create(input("Hats", "hats", 0)).await?;

        let err = svc.soft_delete(c.id + 100).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(svc.count().await?, 1);
        assert!(svc.get(c.id).await?.is_active);
        Ok(())
    }

    #[tokio::test]
    async fn list_sorts_by_sort_order_by_default() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = CategoryService::new(db);
        svc.create(input("Third", "third", 3)).await?;
        svc.create(input("First", "first", 1)).await?;
        svc.create(input("Second", "second", 2)).await?;

        let page = svc.find_paginated(Pagination::default(), &[], None).await?;
        let slugs: Vec<_> = page.items.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, ["first", "second", "third"]);

        let by_name = svc
            .find_paginated(Pagination::default(), &[], Some(&SortSpec::new("name", SortDirection::Desc)))
            .await?;
        assert_eq!(by_name.items[0].name, "Third");

        let inactive = svc.find_paginated(Pagination::default(), &[Filter::eq("is_active", false)], None).await?;
        assert_eq!(inactive.total, 0);
        Ok(())
    }
}
