//! Chat Routes
//!
//! The rule-based guidance endpoint.
//!
//! - POST /api/v1/users/:id/chat - Route a message through the dispatcher

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::ChatRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chat::Reply;

/// POST /api/v1/users/:id/chat
///
/// Match the message against the rule book and render the first hit
/// with the user's profile and the current corpus.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<Reply>> {
    validate_message(&req.message)?;

    let user = state
        .store
        .user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;

    let foods = state.store.foods().await?;
    let reply = state.dispatcher.route(&req.message, &user, &foods);

    Ok(Json(reply))
}

/// Validate a chat message
fn validate_message(message: &str) -> Result<(), ApiError> {
    if message.trim().is_empty() {
        return Err(ApiError::Validation("message cannot be empty".to_string()));
    }
    if message.len() > 2000 {
        return Err(ApiError::Validation(
            "message too long (max 2000 characters)".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_message() {
        assert!(validate_message("what is my dosha?").is_ok());
        assert!(validate_message("").is_err());
        assert!(validate_message("   ").is_err());
        assert!(validate_message(&"y".repeat(2001)).is_err());
    }
}
