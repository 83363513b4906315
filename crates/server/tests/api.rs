use std::net::SocketAddr;

use migration::MigratorTrait;
use reqwest::StatusCode;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        let res = self.client.post(self.url(path)).json(&body).send().await?;
        Ok((res.status(), res.json().await?))
    }

    async fn get(&self, path: &str) -> anyhow::Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        Ok((res.status(), res.json().await?))
    }
}

/// Router over a private in-memory SQLite database on an ephemeral port.
async fn start_server() -> anyhow::Result<TestApp> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;

    let app = server::startup::build_app(db);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = server::startup::serve(listener, app, std::future::pending()).await {
            eprintln!("server error: {e}");
        }
    });

    Ok(TestApp { base_url: format!("http://{addr}"), client: reqwest::Client::new() })
}

async fn seed_category(app: &TestApp) -> anyhow::Result<i64> {
    let (status, body) = app.post("/api/categories", json!({"name": "Apparel", "slug": "apparel"})).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(body["data"]["id"].as_i64().unwrap())
}

#[tokio::test]
async fn health_and_openapi_are_served() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (status, body) = app.get("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = app.get("/api-docs/openapi.json").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/products/{id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn create_list_and_page_products() -> anyhow::Result<()> {
    let app = start_server().await?;
    let cat = seed_category(&app).await?;
    for i in 0..25 {
        let name = if i % 5 == 0 { format!("Blue shirt {i}") } else { format!("Mug {i}") };
        let (status, _) = app
            .post("/api/products", json!({"category_id": cat, "name": name, "sku": format!("SKU-{i:03}"), "price_cents": 1000 + i}))
            .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/products?page=3&pageSize=10").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    let data = &body["data"];
    assert_eq!(data["total"], 25);
    assert_eq!(data["total_pages"], 3);
    assert_eq!(data["items"].as_array().unwrap().len(), 5);

    let (_, body) = app.get("/api/products?name__like=shirt&sortBy=price_cents&sortOrder=desc").await?;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert!(items.iter().all(|p| p["name"].as_str().unwrap().contains("shirt")));
    assert_eq!(items[0]["sku"], "SKU-020");

    let (_, body) = app.get("/api/products?page=zero&pageSize=1000").await?;
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["page_size"], 100);
    Ok(())
}

#[tokio::test]
async fn errors_use_the_envelope() -> anyhow::Result<()> {
    let app = start_server().await?;
    seed_category(&app).await?;

    let (status, body) = app.post("/api/categories", json!({"name": "Again", "slug": "apparel"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["data"].is_null());

    let (status, body) = app.get("/api/categories/9999").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);

    let (status, _) = app.get("/api/categories?colour=red").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get("/api/categories/not-a-number").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let res = app.client.delete(app.url("/api/categories/4242")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let (_, body) = app.get("/api/categories").await?;
    assert_eq!(body["data"]["total"], 1);
    Ok(())
}

#[tokio::test]
async fn soft_delete_restore_and_update() -> anyhow::Result<()> {
    let app = start_server().await?;
    let id = seed_category(&app).await?;

    let res = app.client.delete(app.url(&format!("/api/categories/{id}"))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["is_active"], false);

    let (_, body) = app.get("/api/categories?is_active=true").await?;
    assert_eq!(body["data"]["total"], 0);

    let (status, body) = app.post(&format!("/api/categories/{id}/restore"), json!({})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], true);

    let res = app
        .client
        .put(app.url(&format!("/api/categories/{id}")))
        .json(&json!({"name": "Clothing"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["name"], "Clothing");
    assert_eq!(body["data"]["slug"], "apparel");
    Ok(())
}

#[tokio::test]
async fn users_never_expose_password_hash() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (status, body) = app
        .post("/api/users", json!({"email": "Ana@Example.com", "name": "Ana", "password": "correct horse"}))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "ana@example.com");
    assert!(body["data"].get("password_hash").is_none());

    let (_, body) = app.get("/api/users?role=customer").await?;
    assert_eq!(body["data"]["total"], 1);
    assert!(body["data"]["items"][0].get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn site_config_lookup_by_key() -> anyhow::Result<()> {
    let app = start_server().await?;
    let (status, _) = app
        .post("/api/site-configs", json!({"config_key": "site.title", "config_value": "My Shop"}))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.get("/api/site-configs/key/site.title").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["config_value"], "My Shop");

    let (status, body) = app.get("/api/site-configs/key/missing.key").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    Ok(())
}
