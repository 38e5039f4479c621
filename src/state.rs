use crate::accounts::repo::{IdentityStore, PgIdentityStore};
use crate::config::AppConfig;
use crate::db;
use crate::likes::repo::{EngagementStore, PgEngagementStore};
use crate::properties::repo::{PgPropertyCatalog, PropertyCatalog};
use crate::storage::{S3Storage, StorageClient};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub identities: Arc<dyn IdentityStore>,
    pub likes: Arc<dyn EngagementStore>,
    pub properties: Arc<dyn PropertyCatalog>,
    pub storage: Arc<dyn StorageClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = db::connect(&config.database_url).await?;
        db::migrate(&pool).await;

        // Real S3/MinIO
        let storage = Arc::new(S3Storage::connect(&config.storage).await?) as Arc<dyn StorageClient>;

        Ok(Self::from_parts(pool, config, storage))
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>, storage: Arc<dyn StorageClient>) -> Self {
        Self {
            identities: Arc::new(PgIdentityStore::new(db.clone())),
            likes: Arc::new(PgEngagementStore::new(db.clone())),
            properties: Arc::new(PgPropertyCatalog::new(db)),
            config,
            storage,
        }
    }

    /// Lifetime of presigned media URLs, in seconds.
    pub fn media_ttl(&self) -> u64 {
        self.config.storage.url_ttl_secs
    }
}
