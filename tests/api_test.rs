//! API integration tests
//!
//! Exercise the catalog routes end to end against a file-backed SQLite database

use anyhow::Result;
use axum::http::StatusCode;
use axum_test::TestServer;
use catalog::database::connection::{establish_connection, get_database_url, setup_database};
use catalog::server::app::create_app;
use serde_json::Value;
use tempfile::NamedTempFile;

/// Create a test server backed by a temporary database file
async fn setup_test_server() -> Result<(TestServer, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = get_database_url(temp_file.path().to_str());

    let db = establish_connection(&db_url).await?;
    setup_database(&db).await?;

    let app = create_app(db, Some("*")).await?;
    let server = TestServer::new(app)?;

    Ok((server, temp_file))
}

async fn create_category(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/categories")
        .form(&[("name", name)])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

    let categories: Vec<Value> = server.get("/categories").await.json();
    categories
        .iter()
        .find(|c| c["name"] == name)
        .and_then(|c| c["id"].as_i64())
        .expect("category should be listed")
}

async fn add_attribute(server: &TestServer, category_id: i64, name: &str, data_type: &str) -> i64 {
    let response = server
        .post(&format!("/categories/{}/attributes", category_id))
        .form(&[("name", name), ("data_type", data_type)])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

    let detail: Value = server
        .get(&format!("/categories/{}", category_id))
        .await
        .json();
    detail["attributes"]
        .as_array()
        .and_then(|attrs| attrs.iter().rev().find(|a| a["name"] == name))
        .and_then(|a| a["id"].as_i64())
        .expect("attribute should be listed")
}

async fn create_product(server: &TestServer, category_id: i64, name: &str, price: &str) -> i64 {
    let category_id = category_id.to_string();
    let response = server
        .post("/products")
        .form(&[
            ("name", name),
            ("price", price),
            ("category_id", category_id.as_str()),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

    let listing: Value = server.get("/products").await.json();
    listing["products"][0]["id"]
        .as_i64()
        .expect("product should be listed")
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let (server, _temp_file) = setup_test_server().await?;

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "catalog-server");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_category_lifecycle() -> Result<()> {
    let (server, _temp_file) = setup_test_server().await?;

    let response = server
        .post("/categories")
        .form(&[("name", "  Dresses ")])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/categories");

    // Same name again
    let response = server
        .post("/categories")
        .form(&[("name", "Dresses")])
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "CONFLICT");

    // Blank name
    let response = server.post("/categories").form(&[("name", "   ")]).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "VALIDATION_FAILED");

    let categories: Vec<Value> = server.get("/categories").await.json();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["name"], "Dresses");

    let id = categories[0]["id"].as_i64().unwrap_or_default();
    let response = server.delete(&format!("/categories/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.get(&format!("/categories/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "NOT_FOUND");

    Ok(())
}

#[tokio::test]
async fn test_add_attribute_validation() -> Result<()> {
    let (server, _temp_file) = setup_test_server().await?;
    let shoes = create_category(&server, "Shoes").await;

    let size = add_attribute(&server, shoes, "Size", "NUMBER").await;
    let detail: Value = server.get(&format!("/categories/{}", shoes)).await.json();
    let attribute = &detail["attributes"][0];
    assert_eq!(attribute["id"].as_i64(), Some(size));
    assert_eq!(attribute["data_type"], "number");

    let response = server
        .post(&format!("/categories/{}/attributes", shoes))
        .form(&[("name", "Weight"), ("data_type", "integer")])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/categories/999/attributes")
        .form(&[("name", "Size"), ("data_type", "text")])
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let detail: Value = server.get(&format!("/categories/{}", shoes)).await.json();
    assert_eq!(detail["attributes"].as_array().map(Vec::len), Some(1));

    Ok(())
}

#[tokio::test]
async fn test_product_values_round_trip() -> Result<()> {
    let (server, _temp_file) = setup_test_server().await?;
    let dresses = create_category(&server, "Dresses").await;
    let color = add_attribute(&server, dresses, "Color", "text").await;
    let in_stock = add_attribute(&server, dresses, "In stock", "boolean").await;
    let released = add_attribute(&server, dresses, "Released", "date").await;

    let product = create_product(&server, dresses, "Red Dress", "49.90").await;

    let response = server
        .post(&format!("/products/{}/edit", product))
        .form(&[
            (format!("attr_{}", color), "red".to_string()),
            (format!("attr_{}", in_stock), "on".to_string()),
            (format!("attr_{}", released), "2024-03-01".to_string()),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

    let view: Value = server
        .get(&format!("/products/{}/edit", product))
        .await
        .json();
    assert_eq!(view["product"]["name"], "Red Dress");
    assert_eq!(view["product"]["price"], 49.9);
    assert_eq!(view["existing"][color.to_string()], "red");
    assert_eq!(view["existing"][in_stock.to_string()], "true");
    assert_eq!(view["existing"][released.to_string()], "2024-03-01");

    // An unchecked box is submitted as an absent field
    let response = server
        .post(&format!("/products/{}/edit", product))
        .form(&[(format!("attr_{}", color), "blue".to_string())])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

    let view: Value = server
        .get(&format!("/products/{}/edit", product))
        .await
        .json();
    assert_eq!(view["existing"][color.to_string()], "blue");
    assert_eq!(view["existing"][in_stock.to_string()], "false");
    assert_eq!(view["existing"][released.to_string()], "2024-03-01");

    Ok(())
}

#[tokio::test]
async fn test_repeated_field_uses_first_value() -> Result<()> {
    let (server, _temp_file) = setup_test_server().await?;
    let dresses = create_category(&server, "Dresses").await;
    let in_stock = add_attribute(&server, dresses, "In stock", "boolean").await;
    let product = create_product(&server, dresses, "Red Dress", "10").await;

    let key = format!("attr_{}", in_stock);
    let response = server
        .post(&format!("/products/{}/edit", product))
        .form(&[(key.clone(), "on".to_string()), (key, "off".to_string())])
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

    let view: Value = server
        .get(&format!("/products/{}/edit", product))
        .await
        .json();
    assert_eq!(view["existing"][in_stock.to_string()], "true");

    Ok(())
}

#[tokio::test]
async fn test_invalid_value_writes_nothing() -> Result<()> {
    let (server, _temp_file) = setup_test_server().await?;
    let shoes = create_category(&server, "Shoes").await;
    let size = add_attribute(&server, shoes, "Size", "number").await;
    let material = add_attribute(&server, shoes, "Material", "text").await;
    let product = create_product(&server, shoes, "Runner", "").await;

    let response = server
        .post(&format!("/products/{}/edit", product))
        .form(&[
            (format!("attr_{}", material), "leather".to_string()),
            (format!("attr_{}", size), "ten".to_string()),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "VALIDATION_FAILED");

    let view: Value = server
        .get(&format!("/products/{}/edit", product))
        .await
        .json();
    assert_eq!(view["product"]["price"], 0.0);
    assert_eq!(view["existing"].as_object().map(|m| m.len()), Some(0));

    Ok(())
}

#[tokio::test]
async fn test_create_product_rejects_bad_input() -> Result<()> {
    let (server, _temp_file) = setup_test_server().await?;
    let dresses = create_category(&server, "Dresses").await;
    let dresses = dresses.to_string();

    let response = server
        .post("/products")
        .form(&[
            ("name", "Red Dress"),
            ("price", "cheap"),
            ("category_id", dresses.as_str()),
        ])
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/products")
        .form(&[("name", "Red Dress"), ("price", "10"), ("category_id", "9999")])
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let listing: Value = server.get("/products").await.json();
    assert_eq!(listing["products"].as_array().map(Vec::len), Some(0));

    let response = server.get("/products/12345/edit").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_dashboard_and_delete_product() -> Result<()> {
    let (server, _temp_file) = setup_test_server().await?;
    let dresses = create_category(&server, "Dresses").await;
    add_attribute(&server, dresses, "Size", "text").await;
    let product = create_product(&server, dresses, "Red Dress", "10").await;

    let summary: Value = server.get("/").await.json();
    assert_eq!(summary["counts"]["categories"], 1);
    assert_eq!(summary["counts"]["products"], 1);
    assert_eq!(summary["counts"]["attributes"], 1);
    assert_eq!(summary["latest"][0]["name"], "Red Dress");

    let response = server.delete(&format!("/products/{}", product)).await;
    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

    let response = server.delete(&format!("/products/{}", product)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let summary: Value = server.get("/").await.json();
    assert_eq!(summary["counts"]["products"], 0);

    Ok(())
}

#[tokio::test]
async fn test_seed_is_idempotent() -> Result<()> {
    let (server, _temp_file) = setup_test_server().await?;

    for _ in 0..2 {
        let response = server.get("/seed").await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/");
    }

    let categories: Vec<Value> = server.get("/categories").await.json();
    let names: Vec<&str> = categories.iter().filter_map(|c| c["name"].as_str()).collect();
    assert_eq!(names, vec!["Dresses", "Shoes"]);

    let summary: Value = server.get("/").await.json();
    assert_eq!(summary["counts"]["attributes"], 4);

    Ok(())
}
