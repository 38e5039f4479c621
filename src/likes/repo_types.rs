use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A user marking a catalog item as liked. Unique per (user_id, liked_item_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub liked_item_id: String, // opaque catalog key, not checked against properties
    pub created_at: OffsetDateTime,
}
