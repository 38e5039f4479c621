use anyhow::Context;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::accounts::repo_types::{Identity, NewIdentity, Profile, User};
use crate::db::is_unique_violation;
use crate::error::{AppError, Result};

pub const EMAIL_TAKEN: &str = "User with this email already exists";

const USERS_EMAIL_KEY: &str = "users_email_key";

/// Persistence of users and their profiles.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool>;

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn find_identity_by_email(&self, email: &str) -> anyhow::Result<Option<Identity>>;

    /// Insert the user and its profile atomically.
    ///
    /// Fails with [`AppError::Conflict`] when the email is already registered;
    /// on any failure neither row is kept.
    async fn create_identity(&self, new: NewIdentity) -> Result<Identity>;
}

#[derive(Clone)]
pub struct PgIdentityStore {
    db: PgPool,
}

impl PgIdentityStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(FromRow)]
struct IdentityRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: OffsetDateTime,
    contact_number: Option<String>,
    profile_pic: Option<String>,
}

impl From<IdentityRow> for Identity {
    fn from(r: IdentityRow) -> Self {
        Self {
            profile: Profile {
                user_id: r.id,
                contact_number: r.contact_number,
                profile_pic: r.profile_pic,
            },
            user: User {
                id: r.id,
                username: r.username,
                email: r.email,
                password_hash: r.password_hash,
                created_at: r.created_at,
            },
        }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn email_exists(&self, email: &str) -> anyhow::Result<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)"#)
                .bind(email)
                .fetch_one(&self.db)
                .await
                .context("check email exists")?;
        Ok(exists)
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn find_identity_by_email(&self, email: &str) -> anyhow::Result<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.created_at,
                   p.contact_number, p.profile_pic
              FROM users u
              LEFT JOIN profiles p ON p.user_id = u.id
             WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find identity by email")?;
        Ok(row.map(Identity::from))
    }

    async fn create_identity(&self, new: NewIdentity) -> Result<Identity> {
        let mut tx = self.db.begin().await.context("begin signup tx")?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $1, $2)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&new.email)
        .bind(&new.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, Some(USERS_EMAIL_KEY)) {
                AppError::Conflict(EMAIL_TAKEN.into())
            } else {
                AppError::Internal(anyhow::Error::new(e).context("insert user"))
            }
        })?;

        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, contact_number, profile_pic)
            VALUES ($1, $2, $3)
            RETURNING user_id, contact_number, profile_pic
            "#,
        )
        .bind(user.id)
        .bind(&new.contact_number)
        .bind(&new.profile_pic)
        .fetch_one(&mut *tx)
        .await
        .context("insert profile")?;

        tx.commit().await.context("commit signup tx")?;
        Ok(Identity { user, profile })
    }
}
