//! User Routes
//!
//! Registration, profile lookup, and profile updates.
//!
//! - POST /api/v1/users - Register a user
//! - GET /api/v1/users/:id - Fetch a user
//! - PUT /api/v1/users/:id/profile - Update measurements and conditions

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::CreateUserRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::store::{ProfileUpdate, User};

/// POST /api/v1/users
///
/// Register a new user. The dosha stays unset until measurements
/// arrive through the profile endpoint.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    validate_name(&req.name)?;
    validate_age(req.age)?;

    let user = User::new(req.name.trim(), req.age, req.gender);
    state.store.put_user(user.clone()).await?;

    tracing::info!(user_id = %user.id, name = %user.name, "user registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<User>> {
    let user = state
        .store
        .user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;

    Ok(Json(user))
}

/// PUT /api/v1/users/:id/profile
///
/// Merge measurement and condition updates into the profile and
/// reclassify the dosha from the resulting BMI.
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<Json<User>> {
    let user = state.classifier.update_profile(id, update).await?;
    Ok(Json(user))
}

/// Validate a display name
fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation("name cannot be empty".to_string()));
    }
    if name.len() > 120 {
        return Err(ApiError::Validation(
            "name too long (max 120 characters)".to_string(),
        ));
    }
    Ok(())
}

/// Validate an age
fn validate_age(age: u8) -> Result<(), ApiError> {
    if !(1..=120).contains(&age) {
        return Err(ApiError::Validation(
            "age must be between 1 and 120".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Asha").is_ok());
        assert!(validate_name("  padded  ").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"x".repeat(121)).is_err());
    }

    #[test]
    fn test_validate_age() {
        assert!(validate_age(1).is_ok());
        assert!(validate_age(34).is_ok());
        assert!(validate_age(120).is_ok());
        assert!(validate_age(0).is_err());
        assert!(validate_age(121).is_err());
    }
}
