use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::instrument;

use crate::{
    error::AppError,
    state::AppState,
    users::{
        dto::{LookupQuery, MessageResponse, RegisterRequest},
        repo_types::User,
        services::{find_user, list_users, register_user},
    },
};

/// Both paths expose the same registration and lookup pair.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", get(lookup).post(register))
        .route("/api/auth/user", get(lookup).post(register))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(payload) = payload.map_err(|e| AppError::InvalidBody(e.body_text()))?;
    register_user(state.users.as_ref(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created",
        }),
    ))
}

/// A single user when `id` is given, otherwise the whole collection.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum LookupResponse {
    One(User),
    All(Vec<User>),
}

#[instrument(skip(state))]
pub async fn lookup(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<LookupResponse>, AppError> {
    let query = LookupQuery::from_pairs(pairs);
    let store = state.users.as_ref();
    let body = match query.id() {
        Some(id) => LookupResponse::One(find_user(store, id).await?),
        None => LookupResponse::All(list_users(store).await?),
    };
    Ok(Json(body))
}
