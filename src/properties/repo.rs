use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Catalog entry as stored. `image` and `three_d_file` are media references.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Property {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub price: String, // display string, e.g. "$430,000"
    pub image: String,
    pub three_d_file: Option<String>, // GLB model
    pub description: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub area: String,
    pub created_at: OffsetDateTime,
}

#[async_trait]
pub trait PropertyCatalog: Send + Sync {
    async fn list_all(&self) -> anyhow::Result<Vec<Property>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Property>>;
}

#[derive(Clone)]
pub struct PgPropertyCatalog {
    db: PgPool,
}

impl PgPropertyCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PropertyCatalog for PgPropertyCatalog {
    async fn list_all(&self) -> anyhow::Result<Vec<Property>> {
        let rows = sqlx::query_as::<_, Property>(
            r#"
            SELECT id, name, location, price, image, three_d_file, description,
                   bedrooms, bathrooms, area, created_at
              FROM properties
             ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list properties")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Property>> {
        let row = sqlx::query_as::<_, Property>(
            r#"
            SELECT id, name, location, price, image, three_d_file, description,
                   bedrooms, bathrooms, area, created_at
              FROM properties
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get property")?;
        Ok(row)
    }
}
