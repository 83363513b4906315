use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use rand::rngs::OsRng;
use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use models::user;
use crate::crud::{ensure_unique, CrudService, Resource};
use crate::errors::ServiceError;
use crate::query::{FieldKind, QuerySchema, SortDirection};

pub type UserService = CrudService<Users>;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

fn validate_password(password: &str) -> Result<(), ServiceError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
    }
    Ok(())
}

impl CreateUser {
    pub fn validate(&self) -> Result<(), ServiceError> {
        user::validate_email(&self.email)?;
        user::validate_name(&self.name)?;
        validate_password(&self.password)?;
        if let Some(r) = &self.role { user::validate_role(r)?; }
        Ok(())
    }
}

impl UpdateUser {
    pub fn validate(&self) -> Result<(), ServiceError> {
        if let Some(e) = &self.email { user::validate_email(e)?; }
        if let Some(n) = &self.name { user::validate_name(n)?; }
        if let Some(p) = &self.password { validate_password(p)?; }
        if let Some(r) = &self.role { user::validate_role(r)?; }
        Ok(())
    }
}

/// Argon2id hash in PHC string format.
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Validation(format!("password rejected: {e}")))
}

pub fn verify_password(hash: &str, password: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
        .unwrap_or(false)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

pub struct Users;

#[async_trait]
impl Resource for Users {
    type Entity = user::Entity;
    type Model = user::Model;
    type ActiveModel = user::ActiveModel;
    type CreateInput = CreateUser;
    type UpdateInput = UpdateUser;

    const NAME: &'static str = "user";

    fn id_column() -> user::Column { user::Column::Id }

    fn query_schema() -> QuerySchema<user::Entity> {
        QuerySchema::new(user::Column::Id, SortDirection::Desc)
            .filter("email", user::Column::Email, FieldKind::Text)
            .filter("name", user::Column::Name, FieldKind::Text)
            .filter("role", user::Column::Role, FieldKind::Text)
            .filter("is_active", user::Column::IsActive, FieldKind::Bool)
            .sort("id", user::Column::Id)
            .sort("email", user::Column::Email)
            .sort("name", user::Column::Name)
            .sort("created_at", user::Column::CreatedAt)
    }

    async fn validate_create(db: &DatabaseConnection, input: &CreateUser) -> Result<(), ServiceError> {
        input.validate()?;
        ensure_unique::<user::Entity>(db, user::Column::Email, &normalize_email(&input.email), None, "email").await
    }

    async fn validate_update(db: &DatabaseConnection, current: &user::Model, input: &UpdateUser) -> Result<(), ServiceError> {
        input.validate()?;
        if let Some(email) = input.email.as_deref() {
            ensure_unique::<user::Entity>(db, user::Column::Email, &normalize_email(email), Some((user::Column::Id, current.id)), "email").await?;
        }
        Ok(())
    }

    fn new_active_model(input: CreateUser, now: DateTimeWithTimeZone) -> Result<user::ActiveModel, ServiceError> {
        Ok(user::ActiveModel {
            id: NotSet,
            email: Set(normalize_email(&input.email)),
            name: Set(input.name.trim().to_string()),
            password_hash: Set(hash_password(&input.password)?),
            role: Set(input.role.unwrap_or_else(|| "customer".to_string())),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    fn apply_update(am: &mut user::ActiveModel, input: UpdateUser, now: DateTimeWithTimeZone) -> Result<(), ServiceError> {
        if let Some(e) = input.email { am.email = Set(normalize_email(&e)); }
        if let Some(n) = input.name { am.name = Set(n.trim().to_string()); }
        if let Some(p) = input.password { am.password_hash = Set(hash_password(&p)?); }
        if let Some(r) = input.role { am.role = Set(r); }
        am.updated_at = Set(now);
        Ok(())
    }

    fn set_active(am: &mut user::ActiveModel, active: bool, now: DateTimeWithTimeZone) {
        am.is_active = Set(active);
        am.updated_at = Set(now);
    }
}
