use tracing::{debug, info, instrument, warn};

use crate::accounts::repo::IdentityStore;
use crate::accounts::repo_types::User;
use crate::accounts::services::USER_NOT_FOUND;
use crate::error::{AppError, Result};
use crate::likes::repo::EngagementStore;
use crate::likes::repo_types::Like;

async fn resolve_user(identities: &dyn IdentityStore, email: &str) -> Result<User> {
    identities
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| {
            warn!("likes requested for unknown email");
            AppError::not_found(USER_NOT_FOUND)
        })
}

#[instrument(skip(identities, likes))]
pub async fn list_likes(
    identities: &dyn IdentityStore,
    likes: &dyn EngagementStore,
    email: &str,
) -> Result<Vec<Like>> {
    if email.is_empty() {
        return Err(AppError::validation("Email query param required"));
    }
    let user = resolve_user(identities, email).await?;
    let rows = likes.list_for_user(user.id).await?;
    debug!(user_id = %user.id, count = rows.len(), "likes listed");
    Ok(rows)
}

/// Returns true when a new like was recorded, false when it already existed.
#[instrument(skip(identities, likes))]
pub async fn add_like(
    identities: &dyn IdentityStore,
    likes: &dyn EngagementStore,
    email: &str,
    liked_item_id: &str,
) -> Result<bool> {
    if email.is_empty() || liked_item_id.is_empty() {
        return Err(AppError::validation("Email and liked_item_id required"));
    }
    let user = resolve_user(identities, email).await?;
    let (like, created) = likes.get_or_create(user.id, liked_item_id).await?;
    if created {
        info!(user_id = %user.id, like_id = %like.id, "like added");
    } else {
        debug!(user_id = %user.id, like_id = %like.id, "already liked");
    }
    Ok(created)
}
