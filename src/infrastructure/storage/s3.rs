use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{Client, config::Region, config::Credentials, config::BehaviorVersion};
use bytes::Bytes;
use tracing::info;
use url::Url;
use uuid::Uuid;

use super::{file_name_of, FileStorage};

#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    public_url: Url,
}

impl S3Storage {
    pub fn new(
        endpoint: &str,
        bucket: &str,
        access_key: &str,
        secret_key: &str,
        public_url: &str,
    ) -> Result<Self> {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");

        let config = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(endpoint)
            .credentials_provider(credentials)
            .force_path_style(true) // Required for MinIO
            .build();

        let client = Client::from_conf(config);

        // Url::join replaces the last segment unless the base ends with '/'.
        let mut base = public_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let public_url = Url::parse(&base).with_context(|| format!("Invalid public files URL: {public_url}"))?;

        info!(bucket, "S3 storage configured");

        Ok(Self {
            client,
            bucket: bucket.to_string(),
            public_url,
        })
    }

    fn key(container: &str, file_name: &str) -> String {
        format!("{}/{}", container.trim_matches('/'), file_name)
    }
}

#[async_trait]
impl FileStorage for S3Storage {
    async fn save(
        &self,
        content: Bytes,
        extension: &str,
        container: &str,
        content_type: &str,
    ) -> Result<String> {
        let file_name = format!("{}{}", Uuid::new_v4(), extension);
        let key = Self::key(container, &file_name);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(content))
            .send()
            .await
            .map_err(|e| anyhow!("Failed to store {key}: {e}"))?;

        let reference = self.public_url.join(&key)?;
        info!(%reference, "Stored file");
        Ok(reference.to_string())
    }

    async fn delete(&self, reference: &str, container: &str) -> Result<()> {
        let key = Self::key(container, file_name_of(reference));

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to delete {key}: {e}"))?;

        info!(key, "Deleted file");
        Ok(())
    }
}
