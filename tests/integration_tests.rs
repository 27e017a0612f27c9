//! Integration tests for the prismo client library.
//!
//! These run the full operation path (builder -> transport -> normalizer)
//! against the embedded backend with a throwaway on-disk SQLite database,
//! so no server is required.

use prismo::{PrismoClient, PrismoError, RawResult, Row, TypegenOptions};
use serde_json::json;
use tempfile::TempDir;

fn temp_db() -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!("file://{}", dir.path().join("test.db").display());
    (dir, url)
}

fn client(url: &str) -> PrismoClient {
    PrismoClient::builder()
        .url(url)
        .token("unused-locally")
        .embedded(true)
        .build()
        .expect("build embedded client")
}

fn row(value: serde_json::Value) -> Row {
    value.as_object().expect("object literal").clone()
}

async fn seed_guilds(client: &PrismoClient) {
    client
        .sql(r#"CREATE TABLE "Guild" ("id" TEXT, "name" TEXT, "count" INTEGER)"#)
        .await
        .expect("create table");
}

#[tokio::test]
async fn test_embedded_crud_round_trip() {
    let (_dir, url) = temp_db();
    let db = client(&url);
    seed_guilds(&db).await;

    let data = row(json!({"id": "1", "name": "ferris", "count": 42}));
    let created = db.create("Guild", &data).await.unwrap();
    assert_eq!(created, data);

    let rows = db.find_many("Guild", None, None).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], json!("1"));
    assert_eq!(rows[0]["name"], json!("ferris"));
    assert_eq!(rows[0]["count"], json!(42));

    let found = db.find_one("Guild", "1").await.unwrap().unwrap();
    assert_eq!(found["name"], json!("ferris"));
    assert!(db.find_one("Guild", "404").await.unwrap().is_none());

    let filter = row(json!({"id": "1"}));
    let update = row(json!({"count": 43}));
    db.update("Guild", &filter, &update).await.unwrap();

    let first = db
        .find_first("Guild", &row(json!({"count": 43})))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first["id"], json!("1"));

    db.delete("Guild", &filter).await.unwrap();
    assert!(db.find_many("Guild", None, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_many_with_filter_and_limit() {
    let (_dir, url) = temp_db();
    let db = client(&url);
    seed_guilds(&db).await;

    for i in 0..5 {
        let data = row(json!({"id": i.to_string(), "name": "dup", "count": i}));
        db.create("Guild", &data).await.unwrap();
    }

    let filter = row(json!({"name": "dup"}));
    let rows = db
        .find_many("Guild", Some(&filter), Some(3))
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);

    // Row order follows the backend's result order.
    let ids: Vec<&str> = rows.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["0", "1", "2"]);
}

#[tokio::test]
async fn test_list_tables() {
    let (_dir, url) = temp_db();
    let db = client(&url);
    seed_guilds(&db).await;
    db.sql(r#"CREATE TABLE "users" ("id" TEXT)"#).await.unwrap();

    let tables = db.list_tables().await.unwrap();
    assert!(tables.contains(&"Guild".to_string()));
    assert!(tables.contains(&"users".to_string()));
}

#[tokio::test]
async fn test_raw_sql_returns_driver_shape() {
    let (_dir, url) = temp_db();
    let db = client(&url);
    seed_guilds(&db).await;

    let raw = db.sql(r#"SELECT * FROM "Guild""#).await.unwrap();
    match raw {
        RawResult::Driver(result) => {
            assert_eq!(result.columns, ["id", "name", "count"]);
            assert!(result.rows.is_empty());
        }
        RawResult::Columnar(_) => panic!("embedded backend must return the driver shape"),
    }
}

#[tokio::test]
async fn test_query_error_carries_backend_message() {
    let (_dir, url) = temp_db();
    let db = client(&url);

    match db.find_many("missing", None, None).await {
        Err(PrismoError::Query(message)) => assert!(message.contains("missing")),
        other => panic!("expected query error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_version_unsupported_on_embedded() {
    let (_dir, url) = temp_db();
    let db = client(&url);

    assert!(matches!(
        db.version().await,
        Err(PrismoError::Unsupported("version"))
    ));
}

#[tokio::test]
async fn test_generate_types_end_to_end() {
    let (_dir, url) = temp_db();
    let db = client(&url);
    seed_guilds(&db).await;
    db.sql(r#"CREATE TABLE "Event" ("id" TEXT, "at" DATETIME, "score" REAL)"#)
        .await
        .unwrap();

    let out = tempfile::tempdir().unwrap();
    let types_path = db
        .generate_types(
            TypegenOptions::default()
                .out_dir(out.path())
                .write_sql_files(true),
        )
        .await
        .unwrap();

    let artifact = std::fs::read_to_string(&types_path).unwrap();

    // Table blocks appear in sqlite_master result order (creation order).
    assert!(artifact.contains("pub const TABLES: &[&str] = &[\"Guild\", \"Event\"];"));
    let guild_at = artifact.find("pub struct Guild").unwrap();
    let event_at = artifact.find("pub struct Event").unwrap();
    assert!(guild_at < event_at);

    assert!(artifact.contains("pub count: Option<f64>,"));
    assert!(artifact.contains("pub at: Option<String>,"));
    assert!(artifact.contains("pub score: Option<f64>,"));

    let ddl = std::fs::read_to_string(out.path().join("sql/Event.sql")).unwrap();
    assert!(ddl.contains(r#"CREATE TABLE "Event""#));
}
