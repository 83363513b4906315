//! OpenAPI document served at `/api-docs/openapi.json`.
//!
//! The CRUD routes are generic over the resource, so their path items are
//! generated from [`RESOURCES`] instead of per-handler attributes.

use utoipa::openapi::path::{OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathItemBuilder, PathItemType};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::{ContentBuilder, Object, Ref, Required, ResponseBuilder, Schema, SchemaType};
use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Every API body is wrapped in this envelope; `code` equals the HTTP status.
#[derive(ToSchema)]
pub struct EnvelopeDoc {
    pub code: u16,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

#[derive(ToSchema)]
pub struct PageResultDoc {
    pub items: Vec<serde_json::Value>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

#[derive(ToSchema)]
pub struct CreateCategoryDoc { pub name: String, pub slug: String, pub description: Option<String>, pub sort_order: Option<i32> }

#[derive(ToSchema)]
pub struct CreateProductDoc {
    pub category_id: i32,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateUserDoc { pub email: String, pub name: String, pub password: String, pub role: Option<String> }

#[derive(ToSchema)]
pub struct CreateOrderDoc {
    pub user_id: i32,
    pub total_cents: i64,
    pub status: Option<String>,
    pub shipping_address: String,
    pub contact_phone: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateAdvertisementDoc {
    pub title: String,
    pub image_url: String,
    pub link_url: Option<String>,
    pub position: Option<String>,
    pub sort_order: Option<i32>,
}

#[derive(ToSchema)]
pub struct CreatePartnerDoc { pub name: String, pub logo_url: Option<String>, pub website: Option<String>, pub sort_order: Option<i32> }

#[derive(ToSchema)]
pub struct CreateSiteConfigDoc { pub config_key: String, pub config_value: String, pub description: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::handlers::site_config_by_key,
    ),
    components(
        schemas(
            HealthResponse,
            EnvelopeDoc,
            PageResultDoc,
            CreateCategoryDoc,
            CreateProductDoc,
            CreateUserDoc,
            CreateOrderDoc,
            CreateAdvertisementDoc,
            CreatePartnerDoc,
            CreateSiteConfigDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "categories"),
        (name = "products"),
        (name = "users"),
        (name = "orders"),
        (name = "advertisements"),
        (name = "partners"),
        (name = "site-configs")
    )
)]
pub struct ApiDoc;

/// `(path segment, create schema)` for every CRUD resource.
pub const RESOURCES: &[(&str, &str)] = &[
    ("categories", "CreateCategoryDoc"),
    ("products", "CreateProductDoc"),
    ("users", "CreateUserDoc"),
    ("orders", "CreateOrderDoc"),
    ("advertisements", "CreateAdvertisementDoc"),
    ("partners", "CreatePartnerDoc"),
    ("site-configs", "CreateSiteConfigDoc"),
];

fn query_param(name: &str, description: &str, kind: SchemaType) -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(Schema::Object(Object::with_type(kind))))
        .build()
}

fn id_param() -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(Schema::Object(Object::with_type(SchemaType::Integer))))
        .build()
}

fn envelope(description: &str) -> utoipa::openapi::Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", ContentBuilder::new().schema(Ref::from_schema_name("EnvelopeDoc")).build())
        .build()
}

fn json_body(schema: &str) -> utoipa::openapi::request_body::RequestBody {
    RequestBodyBuilder::new()
        .content("application/json", ContentBuilder::new().schema(Ref::from_schema_name(schema)).build())
        .required(Some(Required::True))
        .build()
}

fn operation(tag: &str, id: String, summary: String) -> OperationBuilder {
    OperationBuilder::new().tag(tag).operation_id(Some(id)).summary(Some(summary))
}

/// Full document: annotated handlers plus the generated CRUD paths.
pub fn document() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    for (tag, create_schema) in RESOURCES {
        let op_name = tag.replace('-', "_");

        let list = operation(tag, format!("list_{op_name}"), format!("List {tag}"))
            .parameter(query_param("page", "1-based page, default 1", SchemaType::Integer))
            .parameter(query_param("pageSize", "items per page, 1..=100, default 20", SchemaType::Integer))
            .parameter(query_param("sortBy", "allow-listed sort key", SchemaType::String))
            .parameter(query_param("sortOrder", "asc or desc", SchemaType::String))
            .response("200", envelope("PageResultDoc inside the envelope"))
            .response("400", envelope("Unknown filter field or bad filter value"));
        let create = operation(tag, format!("create_{op_name}"), format!("Create {tag}"))
            .request_body(Some(json_body(create_schema)))
            .response("201", envelope("Created row"))
            .response("400", envelope("Validation failed, nothing stored"));
        doc.paths.paths.insert(
            format!("/api/{tag}"),
            PathItemBuilder::new()
                .operation(PathItemType::Get, list.build())
                .operation(PathItemType::Post, create.build())
                .build(),
        );

        let get = operation(tag, format!("get_{op_name}"), format!("Get one of {tag}"))
            .parameter(id_param())
            .response("200", envelope("Row"))
            .response("404", envelope("No row with this id"));
        let update = operation(tag, format!("update_{op_name}"), format!("Update one of {tag}"))
            .parameter(id_param())
            .request_body(Some(json_body(create_schema)))
            .response("200", envelope("Updated row"))
            .response("400", envelope("Validation failed"))
            .response("404", envelope("No row with this id"));
        let delete = operation(tag, format!("delete_{op_name}"), format!("Disable one of {tag}"))
            .parameter(id_param())
            .response("200", envelope("Row with is_active = false"))
            .response("404", envelope("No row with this id"));
        doc.paths.paths.insert(
            format!("/api/{tag}/{{id}}"),
            PathItemBuilder::new()
                .operation(PathItemType::Get, get.build())
                .operation(PathItemType::Put, update.build())
                .operation(PathItemType::Delete, delete.build())
                .build(),
        );

        let restore = operation(tag, format!("restore_{op_name}"), format!("Re-enable one of {tag}"))
            .parameter(id_param())
            .response("200", envelope("Row with is_active = true"))
            .response("404", envelope("No row with this id"));
        doc.paths.paths.insert(
            format!("/api/{tag}/{{id}}/restore"),
            PathItem::new(PathItemType::Post, restore.build()),
        );
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_has_its_crud_paths() {
        let doc = document();
        for (tag, _) in RESOURCES {
            assert!(doc.paths.paths.contains_key(&format!("/api/{tag}")), "{tag}");
            assert!(doc.paths.paths.contains_key(&format!("/api/{tag}/{{id}}")), "{tag}");
            assert!(doc.paths.paths.contains_key(&format!("/api/{tag}/{{id}}/restore")), "{tag}");
        }
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/api/site-configs/key/{key}"));
    }
}
