use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String, // same as email
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 PHC string, never exposed in JSON
    pub created_at: OffsetDateTime,
}

/// One-to-one profile owned by a user; removed with it (ON DELETE CASCADE).
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub contact_number: Option<String>,
    pub profile_pic: Option<String>, // object key in the media bucket
}

/// A user together with its profile.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
    pub profile: Profile,
}

/// Everything needed to insert a user and its profile in one transaction.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub email: String,
    pub password_hash: String,
    pub contact_number: Option<String>,
    pub profile_pic: Option<String>,
}
