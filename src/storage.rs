use async_trait::async_trait;
use aws_sdk_s3 as s3;
use s3::presigning::PresigningConfig;
use std::sync::Arc;
use std::time::Duration;

/// StorageService
///
/// Abstract contract for the object storage layer backing media uploads
/// (course images, mentor avatars, post covers). Handlers depend on this trait
/// so tests can substitute [`MockStorageService`] without touching the network.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Ensures the configured bucket exists. Called at startup in `Env::Local`
    /// to provision the MinIO bucket; a no-op against managed storage.
    async fn ensure_bucket_exists(&self);

    /// Generates a short-lived signed URL that lets a client PUT a file straight
    /// into the bucket. The URL pins both the object key and the content type.
    async fn presigned_upload_url(&self, key: &str, content_type: &str)
    -> Result<String, String>;
}

/// The concrete type used to share the storage service across the application state.
pub type StorageState = Arc<dyn StorageService>;

/// Strips directory navigation segments from a user-supplied key fragment so an
/// uploaded filename can never escape the upload prefix.
pub fn sanitize_key(key: &str) -> String {
    key.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".." && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// S3StorageClient
///
/// Production implementation over the AWS SDK. S3 compatibility means the same
/// client talks to local MinIO and to the managed endpoint in production;
/// path-style addressing is required by both gateways.
#[derive(Clone)]
pub struct S3StorageClient {
    client: s3::Client,
    bucket_name: String,
}

impl S3StorageClient {
    pub async fn new(
        endpoint: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
    ) -> Self {
        let credentials =
            s3::config::Credentials::new(access_key, secret_key, None, None, "static");

        let config = s3::Config::builder()
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .region(s3::config::Region::new(region.to_string()))
            .behavior_version_latest()
            .force_path_style(true)
            .build();

        Self {
            client: s3::Client::from_conf(config),
            bucket_name: bucket.to_string(),
        }
    }
}

#[async_trait]
impl StorageService for S3StorageClient {
    async fn ensure_bucket_exists(&self) {
        // CreateBucket is idempotent; an already-exists error is fine.
        let _ = self
            .client
            .create_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await;
    }

    async fn presigned_upload_url(
        &self,
        key: &str,
        content_type: &str,
    ) -> Result<String, String> {
        // Ten minutes is plenty for a direct browser upload.
        let expires_in = Duration::from_secs(600);

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .presigned(PresigningConfig::expires_in(expires_in).map_err(|e| e.to_string())?)
            .await
            .map_err(|e| e.to_string())?;

        Ok(presigned.uri().to_string())
    }
}

/// MockStorageService
///
/// Deterministic stand-in for tests. Returns a local-style URL so assertions can
/// check key construction without a live bucket.
#[derive(Clone)]
pub struct MockStorageService {
    /// When true, every operation reports a simulated failure.
    pub should_fail: bool,
}

impl MockStorageService {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    pub fn new_failing() -> Self {
        Self { should_fail: true }
    }
}

impl Default for MockStorageService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn ensure_bucket_exists(&self) {}

    async fn presigned_upload_url(
        &self,
        key: &str,
        _content_type: &str,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("mock storage failure".to_string());
        }

        Ok(format!(
            "http://localhost:9000/mock-bucket/{}?signature=fake",
            sanitize_key(key)
        ))
    }
}
