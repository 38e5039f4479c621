use tracing::{info, instrument, warn};

use crate::accounts::password::{blocking, hash_password, verify_dummy, verify_password};
use crate::accounts::repo::IdentityStore;
use crate::accounts::repo_types::{Identity, NewIdentity};
use crate::error::{AppError, Result};
use crate::media::services::{discard_media, upload_media, UploadItem, AVATAR_PREFIX};
use crate::storage::StorageClient;

pub const USER_NOT_FOUND: &str = "User not found";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Fields collected from the signup form.
#[derive(Debug, Default)]
pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub contact_number: Option<String>,
    pub profile_pic: Option<UploadItem>,
}

#[instrument(skip(store))]
pub async fn check_email_exists(store: &dyn IdentityStore, email: &str) -> Result<bool> {
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    Ok(store.email_exists(email).await?)
}

/// Create a user and its profile. The avatar, if any, is uploaded first and
/// removed again when the database insert does not go through.
#[instrument(skip(store, storage, input), fields(email = %input.email))]
pub async fn signup(
    store: &dyn IdentityStore,
    storage: &dyn StorageClient,
    input: SignupInput,
) -> Result<Identity> {
    let SignupInput {
        email,
        password,
        contact_number,
        profile_pic,
    } = input;

    if email.is_empty() || password.is_empty() {
        warn!("signup without email or password");
        return Err(AppError::validation("Email and password are required"));
    }

    let password_hash = blocking(move || hash_password(&password)).await?;

    let avatar_key = match profile_pic {
        Some(item) => Some(upload_media(storage, AVATAR_PREFIX, item).await?),
        None => None,
    };

    let new = NewIdentity {
        email,
        password_hash,
        contact_number: contact_number.filter(|c| !c.is_empty()),
        profile_pic: avatar_key.clone(),
    };

    match store.create_identity(new).await {
        Ok(identity) => {
            info!(user_id = %identity.user.id, "user signed up");
            Ok(identity)
        }
        Err(e) => {
            if let Some(key) = avatar_key {
                discard_media(storage, &key).await;
            }
            match &e {
                AppError::Conflict(_) => warn!("email already registered"),
                _ => warn!(error = %e, "signup failed"),
            }
            Err(e)
        }
    }
}

#[instrument(skip(store, password))]
pub async fn login(store: &dyn IdentityStore, email: &str, password: &str) -> Result<Identity> {
    if email.is_empty() || password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let plain = password.to_string();
    let Some(identity) = store.find_identity_by_email(email).await? else {
        blocking(move || {
            verify_dummy(&plain);
            Ok(())
        })
        .await?;
        warn!("login for unknown email");
        return Err(AppError::not_found(USER_NOT_FOUND));
    };

    let hash = identity.user.password_hash.clone();
    let ok = blocking(move || verify_password(&plain, &hash)).await?;
    if !ok {
        warn!(user_id = %identity.user.id, "login invalid password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    info!(user_id = %identity.user.id, "user logged in");
    Ok(identity)
}
