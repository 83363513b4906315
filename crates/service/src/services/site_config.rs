use async_trait::async_trait;
use sea_orm::{prelude::DateTimeWithTimeZone, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use models::{site_config, validate};
use crate::crud::{blank_to_none, ensure_unique, CrudService, Resource};
use crate::errors::ServiceError;
use crate::query::{FieldKind, QuerySchema, SortDirection};

pub type SiteConfigService = CrudService<SiteConfigs>;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateSiteConfig {
    pub config_key: String,
    pub config_value: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The key is immutable once created.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateSiteConfig {
    pub config_value: Option<String>,
    pub description: Option<String>,
}

/// Active entry for `key`, if any.
pub async fn find_by_key(db: &DatabaseConnection, key: &str) -> Result<Option<site_config::Model>, ServiceError> {
    let found = site_config::Entity::find()
        .filter(site_config::Column::ConfigKey.eq(key))
        .filter(site_config::Column::IsActive.eq(true))
        .one(db)
        .await?;
    Ok(found)
}

pub struct SiteConfigs;

#[async_trait]
impl Resource for SiteConfigs {
    type Entity = site_config::Entity;
    type Model = site_config::Model;
    type ActiveModel = site_config::ActiveModel;
    type CreateInput = CreateSiteConfig;
    type UpdateInput = UpdateSiteConfig;

    const NAME: &'static str = "site_config";

    fn id_column() -> site_config::Column { site_config::Column::Id }

    fn query_schema() -> QuerySchema<site_config::Entity> {
        QuerySchema::new(site_config::Column::ConfigKey, SortDirection::Asc)
            .filter("config_key", site_config::Column::ConfigKey, FieldKind::Text)
            .filter("is_active", site_config::Column::IsActive, FieldKind::Bool)
            .sort("id", site_config::Column::Id)
            .sort("config_key", site_config::Column::ConfigKey)
            .sort("updated_at", site_config::Column::UpdatedAt)
    }

    async fn validate_create(db: &DatabaseConnection, input: &CreateSiteConfig) -> Result<(), ServiceError> {
        site_config::validate_key(&input.config_key)?;
        ensure_unique::<site_config::Entity>(db, site_config::Column::ConfigKey, &input.config_key, None, "config_key").await
    }

    async fn validate_update(_db: &DatabaseConnection, _current: &site_config::Model, input: &UpdateSiteConfig) -> Result<(), ServiceError> {
        match input.description.as_deref().map(str::trim) {
            Some(d) if !d.is_empty() => validate::required("description", d, 255)?,
            _ => {}
        }
        Ok(())
    }

    fn new_active_model(input: CreateSiteConfig, now: DateTimeWithTimeZone) -> Result<site_config::ActiveModel, ServiceError> {
        Ok(site_config::ActiveModel {
            id: NotSet,
            config_key: Set(input.config_key),
            config_value: Set(input.config_value),
            description: Set(blank_to_none(input.description)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    fn apply_update(am: &mut site_config::ActiveModel, input: UpdateSiteConfig, now: DateTimeWithTimeZone) -> Result<(), ServiceError> {
        if let Some(v) = input.config_value { am.config_value = Set(v); }
        if input.description.is_some() { am.description = Set(blank_to_none(input.description)); }
        am.updated_at = Set(now);
        Ok(())
    }

    fn set_active(am: &mut site_config::ActiveModel, active: bool, now: DateTimeWithTimeZone) {
        am.is_active = Set(active);
        am.updated_at = Set(now);
    }
}
