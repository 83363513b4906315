//! Generic CRUD service shared by every storefront entity.
//!
//! An entity plugs in by implementing [`Resource`]: it names its SeaORM types,
//! declares its query allow-list and supplies the validation hooks that run
//! before any write. [`CrudService`] then provides create/get/update,
//! soft delete/restore and paginated listing on an injected connection.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    prelude::DateTimeWithTimeZone, ActiveModelBehavior, ActiveModelTrait, ColumnTrait,
    DatabaseConnection, EntityTrait, FromQueryResult, IntoActiveModel, PaginatorTrait,
    QueryFilter,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::pagination::{PageResult, Pagination};
use crate::query::{self, Filter, QuerySchema, SortSpec};

#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: FromQueryResult
        + IntoActiveModel<Self::ActiveModel>
        + Serialize
        + Send
        + Sync
        + 'static;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + Sync + 'static;
    type CreateInput: DeserializeOwned + Send + Sync + 'static;
    type UpdateInput: DeserializeOwned + Send + Sync + 'static;

    /// Singular name used in error messages and logs.
    const NAME: &'static str;

    fn id_column() -> <Self::Entity as EntityTrait>::Column;

    fn query_schema() -> QuerySchema<Self::Entity>;

    /// Runs before insert; uniqueness and reference checks belong here.
    async fn validate_create(_db: &DatabaseConnection, _input: &Self::CreateInput) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Runs before update with the row as currently stored.
    async fn validate_update(
        _db: &DatabaseConnection,
        _current: &Self::Model,
        _input: &Self::UpdateInput,
    ) -> Result<(), ServiceError> {
        Ok(())
    }

    fn new_active_model(input: Self::CreateInput, now: DateTimeWithTimeZone) -> Result<Self::ActiveModel, ServiceError>;

    /// Copy the provided fields onto `am` and set `updated_at`.
    fn apply_update(am: &mut Self::ActiveModel, input: Self::UpdateInput, now: DateTimeWithTimeZone) -> Result<(), ServiceError>;

    fn set_active(am: &mut Self::ActiveModel, active: bool, now: DateTimeWithTimeZone);
}

/// CRUD operations for one resource over an injected connection.
pub struct CrudService<R: Resource> {
    db: DatabaseConnection,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for CrudService<R> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), _resource: PhantomData }
    }
}

impl<R: Resource> CrudService<R> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, _resource: PhantomData }
    }

    /// Validate then insert. Returns the stored row with generated fields.
    #[instrument(skip_all, fields(resource = R::NAME))]
    pub async fn create(&self, input: R::CreateInput) -> Result<R::Model, ServiceError> {
        R::validate_create(&self.db, &input).await?;
        let am = R::new_active_model(input, now())?;
        let created = am.insert(&self.db).await.map_err(|e| ServiceError::from_write(e, R::NAME))?;
        info!(resource = R::NAME, "created");
        Ok(created)
    }

    pub async fn get(&self, id: i32) -> Result<R::Model, ServiceError> {
        R::Entity::find()
            .filter(R::id_column().eq(id))
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found(R::NAME))
    }

    #[instrument(skip(self, input), fields(resource = R::NAME))]
    pub async fn update(&self, id: i32, input: R::UpdateInput) -> Result<R::Model, ServiceError> {
        let current = self.get(id).await?;
        R::validate_update(&self.db, &current, &input).await?;
        let mut am: R::ActiveModel = current.into_active_model();
        R::apply_update(&mut am, input, now())?;
        let updated = am.update(&self.db).await.map_err(|e| ServiceError::from_write(e, R::NAME))?;
        info!(resource = R::NAME, id, "updated");
        Ok(updated)
    }

    /// Mark the row disabled. Repeating the call on a disabled row succeeds.
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn soft_delete(&self, id: i32) -> Result<R::Model, ServiceError> {
        self.set_active(id, false).await
    }

    /// Reverse of [`soft_delete`](Self::soft_delete).
    #[instrument(skip(self), fields(resource = R::NAME))]
    pub async fn restore(&self, id: i32) -> Result<R::Model, ServiceError> {
        self.set_active(id, true).await
    }

    pub async fn find_paginated(
        &self,
        page: Pagination,
        filters: &[Filter],
        sort: Option<&SortSpec>,
    ) -> Result<PageResult<R::Model>, ServiceError> {
        query::query(&self.db, &R::query_schema(), filters, sort, page).await
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(R::Entity::find().count(&self.db).await?)
    }

    async fn set_active(&self, id: i32, active: bool) -> Result<R::Model, ServiceError> {
        let mut am: R::ActiveModel = self.get(id).await?.into_active_model();
        R::set_active(&mut am, active, now());
        let updated = am.update(&self.db).await.map_err(|e| ServiceError::from_write(e, R::NAME))?;
        info!(resource = R::NAME, id, active, "status changed");
        Ok(updated)
    }
}

pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

/// Fail with `Validation` when another row already holds `value` in `column`.
/// `except` excludes the row being updated.
pub(crate) async fn ensure_unique<E>(
    db: &DatabaseConnection,
    column: E::Column,
    value: &str,
    except: Option<(E::Column, i32)>,
    label: &str,
) -> Result<(), ServiceError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    let mut q = E::find().filter(column.eq(value));
    if let Some((id_col, id)) = except {
        q = q.filter(id_col.ne(id));
    }
    if q.count(db).await? > 0 {
        return Err(ServiceError::Validation(format!("{label} '{value}' already exists")));
    }
    Ok(())
}

/// Fail with `Validation` when the referenced row does not exist.
pub(crate) async fn ensure_exists<E>(db: &DatabaseConnection, id_column: E::Column, id: i32, label: &str) -> Result<(), ServiceError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    if E::find().filter(id_column.eq(id)).count(db).await? == 0 {
        return Err(ServiceError::Validation(format!("{label} {id} does not exist")));
    }
    Ok(())
}

/// Normalize optional text input: blank means "clear".
pub(crate) fn blank_to_none(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
