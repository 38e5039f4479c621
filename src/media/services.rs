use anyhow::Context;
use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use crate::storage::StorageClient;

/// Bucket prefix for user avatars.
pub const AVATAR_PREFIX: &str = "profile_pics";

/// An uploaded file as received from a multipart field.
#[derive(Debug, Clone)]
pub struct UploadItem {
    pub body: Bytes,
    pub content_type: String,
}

/// Store `item` under `<prefix>/<uuid>.<ext>` and return the object key.
pub async fn upload_media(
    storage: &dyn StorageClient,
    prefix: &str,
    item: UploadItem,
) -> anyhow::Result<String> {
    let ext = ext_from_mime(&item.content_type).unwrap_or("bin");
    let key = format!("{}/{}.{}", prefix, Uuid::new_v4(), ext);
    storage
        .put_object(&key, item.body, &item.content_type)
        .await
        .with_context(|| format!("put_object {}", key))?;
    Ok(key)
}

/// Best-effort removal of an object that is no longer referenced.
pub async fn discard_media(storage: &dyn StorageClient, key: &str) {
    if let Err(e) = storage.delete_object(key).await {
        warn!(error = %e, %key, "failed to remove orphaned media object");
    }
}

/// Resolve a stored reference to a URL the client can fetch.
///
/// References that already are absolute URLs (e.g. seeded CDN links) are
/// returned unchanged; everything else is treated as a bucket key and presigned.
pub async fn media_url(
    storage: &dyn StorageClient,
    reference: &str,
    ttl_secs: u64,
) -> anyhow::Result<String> {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return Ok(reference.to_string());
    }
    storage
        .presign_get(reference, ttl_secs)
        .await
        .with_context(|| format!("presign url for {}", reference))
}

pub async fn media_url_opt(
    storage: &dyn StorageClient,
    reference: Option<&str>,
    ttl_secs: u64,
) -> anyhow::Result<Option<String>> {
    match reference {
        Some(r) if !r.is_empty() => Ok(Some(media_url(storage, r, ttl_secs).await?)),
        _ => Ok(None),
    }
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        "image/gif" => Some("gif"),
        "model/gltf-binary" => Some("glb"),
        _ => None,
    }
}

#[cfg(test)]
mod media_tests {
    use super::*;
    use crate::test_support::FakeStorage;

    #[test]
    fn test_ext_from_mime() {
        assert_eq!(ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/png"), Some("png"));
        assert_eq!(ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(ext_from_mime("model/gltf-binary"), Some("glb"));
        assert_eq!(ext_from_mime("application/octet-stream"), None);
    }

    #[tokio::test]
    async fn upload_uses_prefix_and_extension() {
        let storage = FakeStorage::default();
        let key = upload_media(
            &storage,
            AVATAR_PREFIX,
            UploadItem {
                body: Bytes::from_static(b"\x89PNG"),
                content_type: "image/png".into(),
            },
        )
        .await
        .unwrap();

        assert!(key.starts_with("profile_pics/"));
        assert!(key.ends_with(".png"));
        assert!(storage.contains(&key));
    }

    #[tokio::test]
    async fn media_url_presigns_keys_and_passes_urls_through() {
        let storage = FakeStorage::default();

        let url = media_url(&storage, "property_images/a.jpg", 60).await.unwrap();
        assert!(url.contains("property_images/a.jpg"));

        let external = "https://cdn.example.com/tower.glb";
        assert_eq!(media_url(&storage, external, 60).await.unwrap(), external);

        assert_eq!(media_url_opt(&storage, None, 60).await.unwrap(), None);
        assert_eq!(media_url_opt(&storage, Some(""), 60).await.unwrap(), None);
    }

    #[tokio::test]
    async fn discard_removes_object() {
        let storage = FakeStorage::default();
        storage
            .put_object("profile_pics/x.jpg", Bytes::from_static(b"x"), "image/jpeg")
            .await
            .unwrap();
        discard_media(&storage, "profile_pics/x.jpg").await;
        assert!(!storage.contains("profile_pics/x.jpg"));
    }
}
