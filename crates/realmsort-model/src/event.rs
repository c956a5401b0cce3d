//! S3 change-notification event shapes.
//!
//! These mirror the JSON S3 publishes for bucket notifications. Every field
//! is defaulted so that partial or unfamiliar records deserialize cleanly
//! instead of failing the whole batch; the orchestrator decides what to
//! skip based on the decoded values.

use serde::{Deserialize, Serialize};

/// Event source tag identifying records produced by S3 bucket notifications.
pub const S3_EVENT_SOURCE: &str = "aws:s3";

/// A batch of S3 change-notification records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Event {
    /// The notification records in this batch.
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

/// One notification record within a batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3EventRecord {
    /// Event source tag; records not tagged `aws:s3` are ignored.
    #[serde(rename = "eventSource", default)]
    pub event_source: String,
    /// Name of the event, e.g. `ObjectCreated:Put`.
    #[serde(rename = "eventName", default)]
    pub event_name: String,
    /// Region the bucket lives in.
    #[serde(rename = "awsRegion", default)]
    pub aws_region: String,
    /// Event timestamp as reported by S3 (RFC 3339).
    #[serde(rename = "eventTime", default, skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    /// The S3 entity (bucket + object) this record refers to.
    #[serde(default)]
    pub s3: S3Entity,
}

/// The `s3` sub-document of a notification record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Entity {
    /// The bucket the changed object belongs to.
    #[serde(default)]
    pub bucket: S3Bucket,
    /// The changed object.
    #[serde(default)]
    pub object: S3ObjectRef,
}

/// Bucket reference within a notification record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Bucket {
    /// The bucket name.
    #[serde(default)]
    pub name: String,
}

/// Object reference within a notification record.
///
/// The `key` is percent-encoded as delivered by S3 (with `+` standing in
/// for spaces); consumers must decode it before use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3ObjectRef {
    /// The percent-encoded object key.
    #[serde(default)]
    pub key: String,
    /// Object size in bytes, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl S3EventRecord {
    /// Whether this record was produced by an S3 bucket notification.
    #[must_use]
    pub fn is_s3_event(&self) -> bool {
        self.event_source == S3_EVENT_SOURCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_EVENT: &str = r#"{
        "Records": [
            {
                "eventSource": "aws:s3",
                "eventName": "ObjectCreated:Put",
                "awsRegion": "eu-central-1",
                "eventTime": "2024-01-01T12:00:00.000Z",
                "s3": {
                    "bucket": { "name": "access-logs" },
                    "object": { "key": "alb/realm/2024/01/01/log.gz", "size": 1234 }
                }
            }
        ]
    }"#;

    #[test]
    fn test_should_deserialize_full_record() {
        let event: S3Event =
            serde_json::from_str(SAMPLE_EVENT).unwrap_or_else(|e| panic!("parse failed: {e}"));
        assert_eq!(event.records.len(), 1);

        let record = &event.records[0];
        assert!(record.is_s3_event());
        assert_eq!(record.event_name, "ObjectCreated:Put");
        assert_eq!(record.s3.bucket.name, "access-logs");
        assert_eq!(record.s3.object.key, "alb/realm/2024/01/01/log.gz");
        assert_eq!(record.s3.object.size, Some(1234));
    }

    #[test]
    fn test_should_tolerate_missing_fields() {
        // A record with nothing but an event source still deserializes;
        // the orchestrator skips it because bucket/key are empty.
        let event: S3Event =
            serde_json::from_str(r#"{"Records": [{"eventSource": "aws:sns"}]}"#)
                .unwrap_or_else(|e| panic!("parse failed: {e}"));
        let record = &event.records[0];
        assert!(!record.is_s3_event());
        assert!(record.s3.bucket.name.is_empty());
        assert!(record.s3.object.key.is_empty());
    }

    #[test]
    fn test_should_tolerate_missing_records() {
        let event: S3Event =
            serde_json::from_str("{}").unwrap_or_else(|e| panic!("parse failed: {e}"));
        assert!(event.records.is_empty());
    }
}
