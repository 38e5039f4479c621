use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::repo_types::Identity;
use crate::media::services::media_url_opt;
use crate::storage::StorageClient;

// Missing keys deserialize to "" so absent and empty fields fail the same presence check.

/// Request body for the email existence check.
#[derive(Debug, Deserialize)]
pub struct CheckEmailRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CheckEmailResponse {
    pub exists: bool,
    pub email: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned after signup or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

/// Public view of an identity.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub profile: ProfileResponse,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub contact_number: Option<String>,
    pub profile_pic: Option<String>, // fetchable URL
}

impl UserResponse {
    pub async fn build(
        identity: Identity,
        storage: &dyn StorageClient,
        ttl_secs: u64,
    ) -> anyhow::Result<Self> {
        let Identity { user, profile } = identity;
        let profile_pic =
            media_url_opt(storage, profile.profile_pic.as_deref(), ttl_secs).await?;
        Ok(Self {
            id: user.id,
            username: user.username,
            email: user.email,
            profile: ProfileResponse {
                contact_number: profile.contact_number,
                profile_pic,
            },
        })
    }
}
