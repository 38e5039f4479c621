use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    properties::dto::PropertyView,
    state::AppState,
};

pub fn property_routes() -> Router<AppState> {
    Router::new()
        .route("/properties/", get(list_properties))
        .route("/properties/:id/", get(get_property))
}

#[instrument(skip(state))]
pub async fn list_properties(State(state): State<AppState>) -> Result<Json<Vec<PropertyView>>> {
    let rows = state.properties.list_all().await?;
    debug!(count = rows.len(), "properties listed");

    let mut out = Vec::with_capacity(rows.len());
    for p in rows {
        out.push(PropertyView::resolve(p, state.storage.as_ref(), state.media_ttl()).await?);
    }
    Ok(Json(out))
}

#[instrument(skip(state))]
pub async fn get_property(
    State(state): State<AppState>,
    path: std::result::Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PropertyView>> {
    let Path(id) = path.map_err(|e| AppError::validation(e.body_text()))?;
    let property = state
        .properties
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Property not found"))?;
    let view = PropertyView::resolve(property, state.storage.as_ref(), state.media_ttl()).await?;
    Ok(Json(view))
}
