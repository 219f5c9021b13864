use crate::domain::model::S3Settings;
use crate::domain::ports::KeyValueBackend;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::Client as S3Client;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::io;

/// One object per key under `prefix` in `bucket`.
#[derive(Debug, Clone)]
pub struct S3Backend {
    client: S3Client,
    bucket: String,
    prefix: String,
}

impl S3Backend {
    pub fn new(client: S3Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a client from the ambient AWS environment, overridden by `settings`.
    pub async fn from_settings(settings: &S3Settings) -> Self {
        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared)
            .region(Region::new(settings.region.clone()))
            .force_path_style(true);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        Self::new(
            S3Client::from_conf(builder.build()),
            settings.bucket.clone(),
            settings.prefix.clone(),
        )
    }

    fn object_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}/{}", self.prefix, key)
        }
    }

    fn strip_prefix<'a>(&self, object_key: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            Some(object_key)
        } else {
            object_key.strip_prefix(&self.prefix)?.strip_prefix('/')
        }
    }
}

fn s3_error(operation: &str, err: impl Display) -> io::Error {
    io::Error::other(format!("S3 {} failed: {}", operation, err))
}

impl KeyValueBackend for S3Backend {
    async fn read(&self, key: &str) -> io::Result<Option<Vec<u8>>> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(self.object_key(key))
            .send()
            .await;

        match result {
            Ok(resp) => {
                let data = resp
                    .body
                    .collect()
                    .await
                    .map_err(|e| s3_error("read body", e))?;
                Ok(Some(data.into_bytes().to_vec()))
            }
            Err(err) => match err.into_service_error() {
                GetObjectError::NoSuchKey(_) => Ok(None),
                err => Err(s3_error("get_object", err)),
            },
        }
    }

    async fn write(&self, key: &str, value: &[u8]) -> io::Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(self.object_key(key))
            .content_type("application/json")
            .body(value.to_vec().into())
            .send()
            .await
            .map_err(|e| s3_error("put_object", e.into_service_error()))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> io::Result<()> {
        // S3 reports success for missing objects
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(self.object_key(key))
            .send()
            .await
            .map_err(|e| s3_error("delete_object", e.into_service_error()))?;
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> io::Result<BTreeSet<String>> {
        let mut keys = BTreeSet::new();
        let mut continuation: Option<String> = None;

        loop {
            let resp = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(self.object_key(prefix))
                .set_continuation_token(continuation.take())
                .send()
                .await
                .map_err(|e| s3_error("list_objects_v2", e.into_service_error()))?;

            for object in resp.contents() {
                if let Some(key) = object.key().and_then(|k| self.strip_prefix(k)) {
                    keys.insert(key.to_string());
                }
            }

            match resp.next_continuation_token() {
                Some(token) if resp.is_truncated().unwrap_or(false) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(keys)
    }
}
