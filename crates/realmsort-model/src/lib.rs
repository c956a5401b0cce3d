//! Event notification and result DTOs for RealmSort.
//!
//! This crate defines the wire shapes at the two boundaries of the realm
//! sorter: the inbound S3 change-notification batch that triggers an
//! invocation, and the outcome summary returned to the invoking platform.
//! Both are plain serde types with no behavior attached.

mod event;
mod outcome;

pub use event::{S3_EVENT_SOURCE, S3Bucket, S3Entity, S3Event, S3EventRecord, S3ObjectRef};
pub use outcome::{BatchOutcome, RecordOutcome};
