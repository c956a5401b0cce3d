//! AWS S3 backend for the [`ObjectStore`] seam.

use async_trait::async_trait;
use bytes::Bytes;
use realmsort_core::{FetchedObject, ObjectStore, SortError, SortResult};
use tracing::debug;

/// [`ObjectStore`] implementation backed by the AWS S3 SDK.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    /// Wrap a configured S3 client.
    #[must_use]
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn get_object(&self, bucket: &str, key: &str) -> SortResult<FetchedObject> {
        let output = match self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    return Err(SortError::NoSuchKey {
                        key: key.to_owned(),
                    });
                }
                return Err(SortError::Storage(
                    anyhow::Error::new(service_err)
                        .context(format!("failed to fetch s3://{bucket}/{key}")),
                ));
            }
        };

        let content_encoding = output.content_encoding.clone();
        let body = output.body.collect().await.map_err(|e| {
            SortError::Storage(
                anyhow::Error::new(e).context(format!("failed to read body of s3://{bucket}/{key}")),
            )
        })?;

        debug!(bucket, key, "fetched source object");
        Ok(FetchedObject {
            body: body.into_bytes(),
            content_encoding,
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
        content_encoding: &str,
    ) -> SortResult<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from(body))
            .content_type(content_type)
            .content_encoding(content_encoding)
            .send()
            .await
            .map_err(|e| {
                SortError::Storage(
                    anyhow::Error::new(e.into_service_error())
                        .context(format!("failed to write s3://{bucket}/{key}")),
                )
            })?;

        debug!(bucket, key, "wrote output object");
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> SortResult<()> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                SortError::Storage(
                    anyhow::Error::new(e.into_service_error())
                        .context(format!("failed to delete s3://{bucket}/{key}")),
                )
            })?;

        debug!(bucket, key, "deleted source object");
        Ok(())
    }
}
