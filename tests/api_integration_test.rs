use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use sprint_horoscope::domain::ports::HoroscopeStore;
use sprint_horoscope::server::{self, AppState};
use sprint_horoscope::{HoroscopeError, HoroscopeResult, HoroscopeService, MemoryStore, OfflineGenerator};
use std::sync::Arc;

const PHOTO: &str = "data:image/jpeg;base64,aGVsbG8=";
const STORE_FAILURE: &str = "disk quota exceeded on horoscope.db";

/// 每個操作都失敗的 store
struct BrokenStore;

fn store_failure() -> HoroscopeError {
    HoroscopeError::IoError(std::io::Error::new(std::io::ErrorKind::Other, STORE_FAILURE))
}

#[async_trait]
impl HoroscopeStore for BrokenStore {
    async fn save(&self, _result: &HoroscopeResult) -> sprint_horoscope::Result<i64> {
        Err(store_failure())
    }

    async fn mark_liked(&self, _id: i64) -> sprint_horoscope::Result<bool> {
        Err(store_failure())
    }

    async fn get_all(&self) -> sprint_horoscope::Result<Vec<HoroscopeResult>> {
        Err(store_failure())
    }

    async fn get_by_id(&self, _id: i64) -> sprint_horoscope::Result<Option<HoroscopeResult>> {
        Err(store_failure())
    }
}

async fn spawn_app() -> Result<String> {
    spawn_app_with(Arc::new(MemoryStore::new())).await
}

async fn spawn_app_with(store: Arc<dyn HoroscopeStore>) -> Result<String> {
    let state = AppState {
        service: HoroscopeService::new(Arc::new(OfflineGenerator), store),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, server::router(state)).await.unwrap();
    });

    Ok(format!("http://{}", address))
}

fn ann() -> Value {
    json!({
        "firstName": "Ann",
        "birthday": "07/01",
        "photoUrl": PHOTO,
        "occupation": "Business Analyst"
    })
}

/// 完整流程：建立 → 讀取 → 按讚 → 列出已儲存
#[tokio::test]
async fn test_create_like_and_list() -> Result<()> {
    let base = spawn_app().await?;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("{}/api/horoscope", base))
        .json(&ann())
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let id = created["id"].as_i64().expect("id in response");

    let fetched: Value = client
        .get(format!("{}/api/horoscope?horoscopeId={}", base, id))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["firstName"], "Ann");
    assert_eq!(fetched["zodiacSign"], "Cancer");
    assert_eq!(fetched["saved"], false);
    assert!(fetched["createdAt"].is_string());
    let horoscope = fetched["horoscope"].as_str().unwrap();
    assert!(horoscope.contains("Ann"));
    assert!(horoscope.contains("overly detailed spreadsheet"));

    // 未按讚前列表是空的
    let saved: Value = client
        .get(format!("{}/api/horoscope/saved", base))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(saved["horoscopes"], json!([]));

    let liked: Value = client
        .put(format!("{}/api/horoscope", base))
        .json(&json!({ "id": id }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(liked, json!({ "success": true, "id": id }));

    let saved: Value = client
        .get(format!("{}/api/horoscope/saved", base))
        .send()
        .await?
        .json()
        .await?;
    let list = saved["horoscopes"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["saved"], true);

    Ok(())
}

#[tokio::test]
async fn test_saved_list_is_newest_first() -> Result<()> {
    let base = spawn_app().await?;
    let client = reqwest::Client::new();

    let mut ids = Vec::new();
    for name in ["Ann", "Bob", "Cat"] {
        let mut body = ann();
        body["firstName"] = json!(name);
        let created: Value = client
            .post(format!("{}/api/horoscope", base))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;
        ids.push(created["id"].as_i64().unwrap());
    }

    for id in &ids {
        client
            .put(format!("{}/api/horoscope", base))
            .json(&json!({ "id": id }))
            .send()
            .await?
            .error_for_status()?;
    }

    let saved: Value = client
        .get(format!("{}/api/horoscope/saved", base))
        .send()
        .await?
        .json()
        .await?;
    let names: Vec<&str> = saved["horoscopes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["firstName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cat", "Bob", "Ann"]);

    Ok(())
}

#[tokio::test]
async fn test_create_rejects_missing_fields() -> Result<()> {
    let base = spawn_app().await?;
    let client = reqwest::Client::new();

    let mut body = ann();
    body.as_object_mut().unwrap().remove("occupation");

    let response = client
        .post(format!("{}/api/horoscope", base))
        .json(&body)
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    let error: Value = response.json().await?;
    assert_eq!(error["error"], "All fields are required");

    Ok(())
}

#[tokio::test]
async fn test_create_rejects_bad_birthday_and_bad_json() -> Result<()> {
    let base = spawn_app().await?;
    let client = reqwest::Client::new();

    let mut body = ann();
    body["birthday"] = json!("13/01");
    let response = client
        .post(format!("{}/api/horoscope", base))
        .json(&body)
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    let error: Value = response.json().await?;
    assert!(error["error"].as_str().unwrap().contains("month"));

    let response = client
        .post(format!("{}/api/horoscope", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(response.status(), 400);
    let error: Value = response.json().await?;
    assert!(error["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_get_errors() -> Result<()> {
    let base = spawn_app().await?;
    let client = reqwest::Client::new();

    let response = client.get(format!("{}/api/horoscope", base)).send().await?;
    assert_eq!(response.status(), 400);
    let error: Value = response.json().await?;
    assert_eq!(error["error"], "horoscopeId is required");

    let response = client
        .get(format!("{}/api/horoscope?horoscopeId=abc", base))
        .send()
        .await?;
    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/api/horoscope?horoscopeId=999", base))
        .send()
        .await?;
    assert_eq!(response.status(), 404);
    let error: Value = response.json().await?;
    assert_eq!(error["error"], "Horoscope not found");

    Ok(())
}

#[tokio::test]
async fn test_like_errors() -> Result<()> {
    let base = spawn_app().await?;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/api/horoscope", base))
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(response.status(), 400);

    let response = client
        .put(format!("{}/api/horoscope", base))
        .json(&json!({ "id": 12345 }))
        .send()
        .await?;
    assert_eq!(response.status(), 404);

    Ok(())
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let base = spawn_app().await?;
    let body: Value = reqwest::get(format!("{}/health", base)).await?.json().await?;
    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}

/// store 壞掉時只回 500 與通用訊息，不洩漏底層錯誤
#[tokio::test]
async fn test_store_failures_return_generic_500() -> Result<()> {
    let base = spawn_app_with(Arc::new(BrokenStore)).await?;
    let client = reqwest::Client::new();

    let responses = vec![
        (
            client.post(format!("{}/api/horoscope", base)).json(&ann()).send().await?,
            "Failed to generate horoscope",
        ),
        (
            client
                .get(format!("{}/api/horoscope?horoscopeId=1", base))
                .send()
                .await?,
            "Failed to retrieve horoscope",
        ),
        (
            client
                .put(format!("{}/api/horoscope", base))
                .json(&json!({ "id": 1 }))
                .send()
                .await?,
            "Failed to save horoscope",
        ),
        (
            client.get(format!("{}/api/horoscope/saved", base)).send().await?,
            "Failed to fetch saved horoscopes",
        ),
    ];

    for (response, message) in responses {
        assert_eq!(response.status(), 500);
        let raw = response.text().await?;
        assert!(!raw.contains(STORE_FAILURE), "cause leaked: {}", raw);
        assert!(!raw.contains("IO error"), "cause leaked: {}", raw);

        let body: Value = serde_json::from_str(&raw)?;
        assert_eq!(body, json!({ "error": message }));
    }

    Ok(())
}
