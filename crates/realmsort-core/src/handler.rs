//! The orchestrator: drive one notification batch through fetch, split,
//! write, and optional source deletion.

use bytes::Bytes;
use realmsort_model::{BatchOutcome, RecordOutcome, S3Event, S3EventRecord};
use tracing::{debug, info};

use crate::config::SorterConfig;
use crate::error::SortResult;
use crate::split::{BodyEncoding, split_by_realm};
use crate::store::ObjectStore;

/// Content type attached to every output object.
const OUTPUT_CONTENT_TYPE: &str = "text/plain";

/// Content encoding attached to every output object.
const OUTPUT_CONTENT_ENCODING: &str = "gzip";

/// Orchestrates realm demultiplexing for notification batches.
///
/// Holds no mutable state: the configuration is immutable and every
/// invocation creates its own sinks, so concurrent invocations over
/// separate batches are independent by construction.
#[derive(Debug)]
pub struct RealmSorter<S> {
    config: SorterConfig,
    store: S,
}

impl<S: ObjectStore> RealmSorter<S> {
    /// Create a sorter from a loaded configuration and a storage backend.
    pub fn new(config: SorterConfig, store: S) -> Self {
        Self { config, store }
    }

    /// Returns the sorter configuration.
    #[must_use]
    pub fn config(&self) -> &SorterConfig {
        &self.config
    }

    /// Process one notification batch.
    ///
    /// Records are handled sequentially and independently; skipped records
    /// (wrong event source, key outside the source prefix, object already
    /// gone) are omitted from the results. The first fatal storage error
    /// aborts the batch: no partial-success guarantee is made beyond the
    /// output writes that completed before the failure.
    ///
    /// # Errors
    ///
    /// Propagates any storage or decode failure other than a missing
    /// source object.
    pub async fn handle(&self, event: &S3Event) -> SortResult<BatchOutcome> {
        let mut results = Vec::new();
        for record in &event.records {
            if let Some(outcome) = self.process_record(record).await? {
                results.push(outcome);
            }
        }
        Ok(BatchOutcome::from_results(results))
    }

    /// Process a single record. `Ok(None)` means the record was skipped.
    async fn process_record(&self, record: &S3EventRecord) -> SortResult<Option<RecordOutcome>> {
        if !record.is_s3_event() {
            debug!(event_source = %record.event_source, "ignoring non-s3 record");
            return Ok(None);
        }

        let bucket = &record.s3.bucket.name;
        let raw_key = &record.s3.object.key;
        if bucket.is_empty() || raw_key.is_empty() {
            debug!("ignoring record without bucket or key");
            return Ok(None);
        }

        let key = decode_object_key(raw_key);
        if !self.config.source_prefix.is_empty() && !key.starts_with(&self.config.source_prefix) {
            debug!(key = %key, "skipping key outside source prefix");
            return Ok(None);
        }

        let fetched = match self.store.get_object(bucket, &key).await {
            Ok(fetched) => fetched,
            Err(e) if e.is_no_such_key() => {
                // Benign race with a concurrent delete.
                info!(key = %key, "skip missing object");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let encoding = BodyEncoding::detect(&key, fetched.content_encoding.as_deref());
        let split = split_by_realm(&self.config, &fetched.body, encoding)?;

        let mut written: u32 = 0;
        for (realm, data) in &split.outputs {
            if data.is_empty() {
                continue;
            }
            let Some(target) = self.config.target_key(&key, realm) else {
                debug!(realm = %realm, "no destination for realm, skipping write");
                continue;
            };
            self.store
                .put_object(
                    bucket,
                    &target,
                    Bytes::clone(data),
                    OUTPUT_CONTENT_TYPE,
                    OUTPUT_CONTENT_ENCODING,
                )
                .await?;
            written += 1;
        }

        // Write-before-delete: the source survives unless at least one
        // output actually landed.
        if self.config.delete_source && written > 0 {
            self.store.delete_object(bucket, &key).await?;
        }

        info!(
            source = %key,
            bucket = %bucket,
            lines = split.total_lines,
            outputs = written,
            "processed source object"
        );

        Ok(Some(RecordOutcome {
            source: key,
            bucket: bucket.clone(),
            lines: split.total_lines,
            outputs: written,
        }))
    }
}

/// Decode an object key as delivered in S3 notifications: `+` stands for a
/// space, the rest is percent-encoded.
fn decode_object_key(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    percent_encoding::percent_decode_str(&plus_decoded)
        .decode_utf8_lossy()
        .into_owned()
}
