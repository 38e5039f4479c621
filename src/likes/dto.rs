use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::likes::repo_types::Like;

#[derive(Debug, Deserialize)]
pub struct LikesQuery {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct AddLikeRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub liked_item_id: String,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub id: Uuid,
    pub user: Uuid,
    pub liked_item_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Like> for LikeResponse {
    fn from(l: Like) -> Self {
        Self {
            id: l.id,
            user: l.user_id,
            liked_item_id: l.liked_item_id,
            created_at: l.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
