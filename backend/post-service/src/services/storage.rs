/// Object storage adapter for post images.
use async_trait::async_trait;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use uuid::Uuid;

use crate::config::S3Config;
use crate::error::{AppError, Result};
use crate::models::ImageUpload;

/// External blob storage for images. Upload returns the public URL the post
/// row stores; delete resolves the storage key back out of that URL.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, image: &ImageUpload, dir: &str) -> Result<String>;
    async fn delete(&self, url: &str) -> Result<()>;
}

/// Build an AWS S3 client from the provided configuration.
pub async fn build_s3_client(config: &S3Config) -> Result<Client> {
    let credentials = Credentials::new(
        &config.access_key_id,
        &config.secret_access_key,
        None,
        None,
        "post-service",
    );

    let shared_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials)
        .load()
        .await;

    let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);
    if let Some(endpoint) = &config.endpoint {
        if !endpoint.trim().is_empty() {
            builder = builder.endpoint_url(endpoint);
        }
    }

    Ok(Client::from_conf(builder.build()))
}

pub struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3BlobStore {
    pub fn new(client: Client, config: &S3Config) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, key: &str) -> String {
        let encoded: Vec<String> = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", self.public_base_url, encoded.join("/"))
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn upload(&self, image: &ImageUpload, dir: &str) -> Result<String> {
        // dir/{uuid}_{original name} keeps uploads collision-free while the
        // original file name stays recoverable from the key.
        let key = format!("{}/{}_{}", dir, Uuid::new_v4(), image.file_name);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(&image.content_type)
            .content_length(image.bytes.len() as i64)
            .body(ByteStream::from(image.bytes.clone()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(bucket = %self.bucket, key = %key, "s3 upload failed: {}", e);
                AppError::UploadFailure(e.to_string())
            })?;

        Ok(self.object_url(&key))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        if url.is_empty() {
            return Ok(());
        }

        let key = extract_key_from_url(url)?;

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(bucket = %self.bucket, key = %key, "s3 delete failed: {}", e);
                AppError::DeleteFailure(e.to_string())
            })?;

        Ok(())
    }
}

/// Extract the storage key from a public object URL: everything after the
/// host, percent-decoded so non-ASCII file names round-trip.
pub fn extract_key_from_url(url: &str) -> Result<String> {
    let without_scheme = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .ok_or_else(|| AppError::UrlParsingFailure(url.to_string()))?;

    let (_, path) = without_scheme
        .split_once('/')
        .ok_or_else(|| AppError::UrlParsingFailure(url.to_string()))?;

    if path.is_empty() {
        return Err(AppError::UrlParsingFailure(url.to_string()));
    }

    let decoded = urlencoding::decode(path)
        .map_err(|_| AppError::UrlParsingFailure(url.to_string()))?;

    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_key_after_host() {
        let key =
            extract_key_from_url("https://bucket.s3.us-east-1.amazonaws.com/post-images/abc_cat.png")
                .unwrap();
        assert_eq!(key, "post-images/abc_cat.png");
    }

    #[test]
    fn percent_decodes_encoded_file_names() {
        let key = extract_key_from_url(
            "https://bucket.s3.amazonaws.com/post-images/abc_%EC%82%AC%EC%A7%84.png",
        )
        .unwrap();
        assert_eq!(key, "post-images/abc_사진.png");
    }

    #[test]
    fn rejects_url_without_scheme() {
        let err = extract_key_from_url("bucket.s3.amazonaws.com/key").unwrap_err();
        assert!(matches!(err, AppError::UrlParsingFailure(_)));
    }

    #[test]
    fn rejects_url_without_path() {
        let err = extract_key_from_url("https://bucket.s3.amazonaws.com").unwrap_err();
        assert!(matches!(err, AppError::UrlParsingFailure(_)));
    }
}
