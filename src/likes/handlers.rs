use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::{AppError, Result},
    likes::{
        dto::{AddLikeRequest, LikeResponse, LikesQuery, MessageResponse},
        services,
    },
    state::AppState,
};

pub fn like_routes() -> Router<AppState> {
    Router::new().route("/likes/", get(list_likes).post(add_like))
}

/// GET /likes/?email=
#[instrument(skip(state, query))]
pub async fn list_likes(
    State(state): State<AppState>,
    query: std::result::Result<Query<LikesQuery>, QueryRejection>,
) -> Result<Json<Vec<LikeResponse>>> {
    let Query(q) = query.map_err(|e| AppError::validation(e.body_text()))?;
    let likes =
        services::list_likes(state.identities.as_ref(), state.likes.as_ref(), &q.email).await?;
    Ok(Json(likes.into_iter().map(LikeResponse::from).collect()))
}

/// POST /likes/ {email, liked_item_id}
#[instrument(skip(state, payload))]
pub async fn add_like(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AddLikeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let Json(body) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let created = services::add_like(
        state.identities.as_ref(),
        state.likes.as_ref(),
        &body.email,
        &body.liked_item_id,
    )
    .await?;

    Ok(if created {
        (StatusCode::CREATED, Json(MessageResponse { message: "Like added" }))
    } else {
        (StatusCode::OK, Json(MessageResponse { message: "Already liked" }))
    })
}
