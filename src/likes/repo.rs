use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::likes::repo_types::Like;

/// Persistence of likes.
#[async_trait]
pub trait EngagementStore: Send + Sync {
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Like>>;

    /// Atomic get-or-create on (user_id, liked_item_id). The flag is true when
    /// this call inserted the row.
    async fn get_or_create(&self, user_id: Uuid, liked_item_id: &str)
        -> anyhow::Result<(Like, bool)>;
}

#[derive(Clone)]
pub struct PgEngagementStore {
    db: PgPool,
}

impl PgEngagementStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EngagementStore for PgEngagementStore {
    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Like>> {
        let rows = sqlx::query_as::<_, Like>(
            r#"
            SELECT id, user_id, liked_item_id, created_at
              FROM likes
             WHERE user_id = $1
             ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list likes by user")?;
        Ok(rows)
    }

    async fn get_or_create(
        &self,
        user_id: Uuid,
        liked_item_id: &str,
    ) -> anyhow::Result<(Like, bool)> {
        // The unique constraint decides who wins a concurrent insert; the loser
        // gets no row back and reads the winner's.
        let inserted = sqlx::query_as::<_, Like>(
            r#"
            INSERT INTO likes (user_id, liked_item_id)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT likes_user_item_key DO NOTHING
            RETURNING id, user_id, liked_item_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(liked_item_id)
        .fetch_optional(&self.db)
        .await
        .context("insert like")?;

        if let Some(like) = inserted {
            return Ok((like, true));
        }

        let existing = sqlx::query_as::<_, Like>(
            r#"
            SELECT id, user_id, liked_item_id, created_at
              FROM likes
             WHERE user_id = $1 AND liked_item_id = $2
            "#,
        )
        .bind(user_id)
        .bind(liked_item_id)
        .fetch_one(&self.db)
        .await
        .context("load existing like")?;
        Ok((existing, false))
    }
}
