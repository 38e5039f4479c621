use serde::Serialize;
use uuid::Uuid;

use crate::media::services::{media_url, media_url_opt};
use crate::properties::repo::Property;
use crate::storage::StorageClient;

/// Property with its media references resolved to URLs.
#[derive(Debug, Serialize)]
pub struct PropertyView {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub price: String,
    pub image: String,
    pub three_d_file: Option<String>,
    pub description: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: String,
}

impl PropertyView {
    pub async fn resolve(
        p: Property,
        storage: &dyn StorageClient,
        ttl_secs: u64,
    ) -> anyhow::Result<Self> {
        let image = media_url(storage, &p.image, ttl_secs).await?;
        let three_d_file = media_url_opt(storage, p.three_d_file.as_deref(), ttl_secs).await?;
        Ok(Self {
            id: p.id,
            name: p.name,
            location: p.location,
            price: p.price,
            image,
            three_d_file,
            description: p.description,
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            area: p.area,
        })
    }
}
