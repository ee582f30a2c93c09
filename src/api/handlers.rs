use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::request_id::RequestId;
use crate::models::{
    CatalogItem, HistoryEvent, NewHistoryEvent, RecommendationRequest, Recommendations,
    UserPreferences,
};
use crate::services::recommend_for_profile;

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List the catalog
pub async fn get_catalog(State(state): State<AppState>) -> Json<Vec<CatalogItem>> {
    Json(state.engine.catalog().items().to_vec())
}

/// Get one catalog item by id
pub async fn get_catalog_item(
    State(state): State<AppState>,
    Path(item_id): Path<u32>,
) -> AppResult<Json<CatalogItem>> {
    state
        .engine
        .catalog()
        .get(item_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Catalog item {}", item_id)))
}

/// Score a caller-supplied profile without touching the stores
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> Json<Recommendations> {
    tracing::info!(
        request_id = %request_id,
        history_len = request.history.len(),
        "Processing recommendation request"
    );

    let recommendations = state.engine.generate_recommendations(
        &request.preferences,
        &request.history,
        &mut rand::thread_rng(),
    );

    Json(recommendations)
}

/// Get stored preferences, or the defaults if none were saved
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<UserPreferences>> {
    let preferences = state
        .preferences
        .get_preferences(profile_id)
        .await?
        .unwrap_or_default();
    Ok(Json(preferences))
}

/// Replace stored preferences
pub async fn put_preferences(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
    Json(preferences): Json<UserPreferences>,
) -> AppResult<Json<UserPreferences>> {
    state
        .preferences
        .set_preferences(profile_id, preferences.clone())
        .await?;

    tracing::info!(profile_id = %profile_id, style = ?preferences.sailing_style, "Preferences saved");
    Ok(Json(preferences))
}

/// Get the stored browsing history
pub async fn get_history(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<Vec<HistoryEvent>>> {
    Ok(Json(state.history.get_history(profile_id).await?))
}

/// Append one event to the browsing history
pub async fn append_history(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(profile_id): Path<Uuid>,
    Json(new_event): Json<NewHistoryEvent>,
) -> AppResult<(StatusCode, Json<HistoryEvent>)> {
    let event = new_event.stamp(Utc::now());

    if let Err(e) = state.history.append_event(profile_id, event.clone()).await {
        tracing::warn!(request_id = %request_id, profile_id = %profile_id, error = %e, "History event rejected");
        return Err(e);
    }

    Ok((StatusCode::CREATED, Json(event)))
}

/// Recommendations for a stored profile
pub async fn profile_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<Recommendations>> {
    tracing::info!(request_id = %request_id, profile_id = %profile_id, "Processing profile recommendations");

    let recommendations = recommend_for_profile(
        &state.engine,
        state.preferences.as_ref(),
        state.history.as_ref(),
        profile_id,
    )
    .await?;

    Ok(Json(recommendations))
}
