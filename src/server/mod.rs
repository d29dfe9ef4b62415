pub mod types;

use crate::core::service::HoroscopeService;
use crate::domain::model::HoroscopeResult;
use crate::utils::error::{HoroscopeError, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use types::{
    ApiError, CreateHoroscopeRequest, CreateHoroscopeResponse, GetHoroscopeQuery,
    LikeHoroscopeRequest, LikeHoroscopeResponse, SavedHoroscopesResponse,
};

/// Photos arrive as data URIs, so allow more than axum's 2 MB default.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub service: HoroscopeService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/horoscope",
            get(get_horoscope).post(create_horoscope).put(like_horoscope),
        )
        .route("/api/horoscope/saved", get(list_saved))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

pub async fn run(state: AppState, bind_address: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn get_horoscope(
    State(state): State<AppState>,
    Query(query): Query<GetHoroscopeQuery>,
) -> std::result::Result<Json<HoroscopeResult>, ApiError> {
    let raw_id = query
        .horoscope_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("horoscopeId is required"))?;
    let id: i64 = raw_id
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request("horoscopeId must be a number"))?;

    let horoscope = state
        .service
        .get(id)
        .await
        .map_err(|e| ApiError::internal("Failed to retrieve horoscope", &e))?;

    match horoscope {
        Some(h) => Ok(Json(h)),
        None => Err(ApiError::not_found("Horoscope not found")),
    }
}

async fn create_horoscope(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateHoroscopeRequest>, JsonRejection>,
) -> std::result::Result<Json<CreateHoroscopeResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let request = payload.into_request().map_err(|e| match e {
        HoroscopeError::MissingFieldError { .. } => ApiError::bad_request("All fields are required"),
        other => ApiError::bad_request(other.to_string()),
    })?;

    let result = state
        .service
        .create(&request)
        .await
        .map_err(|e| ApiError::internal("Failed to generate horoscope", &e))?;

    // create 成功時一定有 id
    let id = result
        .id
        .ok_or_else(|| ApiError::internal("Failed to generate horoscope", &"store returned no id"))?;

    Ok(Json(CreateHoroscopeResponse { id }))
}

async fn like_horoscope(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LikeHoroscopeRequest>, JsonRejection>,
) -> std::result::Result<Json<LikeHoroscopeResponse>, ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let id = payload.id.ok_or_else(|| ApiError::bad_request("id is required"))?;

    let updated = state
        .service
        .like(id)
        .await
        .map_err(|e| ApiError::internal("Failed to save horoscope", &e))?;

    if !updated {
        return Err(ApiError::not_found("Horoscope not found"));
    }

    Ok(Json(LikeHoroscopeResponse { success: true, id }))
}

async fn list_saved(
    State(state): State<AppState>,
) -> std::result::Result<Json<SavedHoroscopesResponse>, ApiError> {
    let horoscopes = state
        .service
        .liked()
        .await
        .map_err(|e| ApiError::internal("Failed to fetch saved horoscopes", &e))?;

    Ok(Json(SavedHoroscopesResponse { horoscopes }))
}
