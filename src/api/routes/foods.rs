//! Food Routes
//!
//! Remedy corpus browsing, filtering, and personalized picks.
//!
//! - GET /api/v1/foods - Full corpus
//! - GET /api/v1/foods/featured - Featured items (?limit=6)
//! - GET /api/v1/foods/remedy-of-day - One random item
//! - GET /api/v1/foods/condition/:condition - Condition filter (?limit=10)
//! - POST /api/v1/foods/seed - Load the built-in corpus
//! - GET /api/v1/users/:id/recommendations - Personalized picks (?limit=12)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::{LimitParams, SeedResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::corpus;
use crate::engine::{
    featured, filter_by_condition, recommend, remedy_of_day, CONDITION_LIMIT, FEATURED_LIMIT,
    PERSONALIZED_LIMIT,
};
use crate::store::CorpusItem;

/// GET /api/v1/foods
pub async fn list_foods(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CorpusItem>>> {
    let foods = state.store.foods().await?;
    Ok(Json(foods))
}

/// GET /api/v1/foods/featured?limit=6
pub async fn featured_foods(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LimitParams>,
) -> ApiResult<Json<Vec<CorpusItem>>> {
    let foods = state.store.foods().await?;
    let limit = params.limit.unwrap_or(FEATURED_LIMIT);

    Ok(Json(featured(&foods, limit)))
}

/// GET /api/v1/foods/remedy-of-day
///
/// One uniformly random corpus item. 404 until the corpus is seeded.
pub async fn daily_remedy(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CorpusItem>> {
    let foods = state.store.foods().await?;
    let remedy = remedy_of_day(&foods)
        .cloned()
        .ok_or_else(|| ApiError::NotFound("food corpus is empty".to_string()))?;

    Ok(Json(remedy))
}

/// GET /api/v1/foods/condition/:condition?limit=10
///
/// Case-insensitive substring match against condition tags.
pub async fn foods_for_condition(
    State(state): State<Arc<AppState>>,
    Path(condition): Path<String>,
    Query(params): Query<LimitParams>,
) -> ApiResult<Json<Vec<CorpusItem>>> {
    let foods = state.store.foods().await?;
    let limit = params.limit.unwrap_or(CONDITION_LIMIT);

    Ok(Json(filter_by_condition(&foods, &condition, limit)))
}

/// POST /api/v1/foods/seed
///
/// Replace the stored corpus with the built-in food list.
pub async fn seed_foods(State(state): State<Arc<AppState>>) -> ApiResult<Json<SeedResponse>> {
    let count = state.store.seed_foods(corpus::defaults()).await?;

    tracing::info!(count, "food corpus seeded");

    Ok(Json(SeedResponse {
        message: "Foods seeded successfully".to_string(),
        count,
    }))
}

/// GET /api/v1/users/:id/recommendations?limit=12
///
/// Corpus items matching the user's conditions and dosha.
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<LimitParams>,
) -> ApiResult<Json<Vec<CorpusItem>>> {
    let user = state
        .store
        .user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;

    let foods = state.store.foods().await?;
    let limit = params.limit.unwrap_or(PERSONALIZED_LIMIT);

    Ok(Json(recommend(&user, &foods, limit)))
}
