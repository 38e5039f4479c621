use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        rejection::JsonRejection,
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    accounts::{
        dto::{AuthResponse, CheckEmailRequest, CheckEmailResponse, LoginRequest, UserResponse},
        services::{self, SignupInput},
    },
    error::{AppError, Result},
    media::services::UploadItem,
    state::AppState,
};

/// Largest accepted signup form (avatar included).
const MAX_SIGNUP_BODY: usize = 20 * 1024 * 1024; // 20MB

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/check-email/", post(check_email))
        .route("/login/", post(login))
}

pub fn signup_routes() -> Router<AppState> {
    Router::new()
        .route("/signup/", post(signup))
        .layer(DefaultBodyLimit::max(MAX_SIGNUP_BODY))
}

#[instrument(skip(state, payload))]
pub async fn check_email(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CheckEmailRequest>, JsonRejection>,
) -> Result<Json<CheckEmailResponse>> {
    let Json(payload) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let exists = services::check_email_exists(state.identities.as_ref(), &payload.email).await?;
    Ok(Json(CheckEmailResponse {
        exists,
        email: payload.email,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let Json(payload) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let identity =
        services::login(state.identities.as_ref(), &payload.email, &payload.password).await?;
    let user = UserResponse::build(identity, state.storage.as_ref(), state.media_ttl()).await?;
    Ok(Json(AuthResponse {
        message: "Login successful",
        user,
    }))
}

/// POST /signup/ (multipart)
/// Fields: email, password, contact_number?, profile_pic? (file)
#[instrument(skip(state, mp))]
pub async fn signup(
    State(state): State<AppState>,
    mp: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let mp = mp.map_err(|e| AppError::validation(e.body_text()))?;
    let form = read_signup_form(mp).await?;

    let identity =
        services::signup(state.identities.as_ref(), state.storage.as_ref(), form).await?;
    let user = UserResponse::build(identity, state.storage.as_ref(), state.media_ttl()).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully",
            user,
        }),
    ))
}

async fn read_signup_form(mut mp: Multipart) -> Result<SignupInput> {
    let mut form = SignupInput::default();
    while let Some(field) = mp.next_field().await.map_err(bad_form)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("email") => form.email = text(field).await?,
            Some("password") => form.password = text(field).await?,
            Some("contact_number") => form.contact_number = Some(text(field).await?),
            Some("profile_pic") => {
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".into());
                let body = field.bytes().await.map_err(bad_form)?;
                // Browsers send an empty part when no file was chosen.
                if !body.is_empty() {
                    form.profile_pic = Some(UploadItem { body, content_type });
                }
            }
            _ => {}
        }
    }
    Ok(form)
}

async fn text(field: Field<'_>) -> Result<String> {
    field.text().await.map_err(bad_form)
}

fn bad_form(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::validation(e.to_string())
}
