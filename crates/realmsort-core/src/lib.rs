//! Access-log realm demultiplexer core.
//!
//! A source log object mixes lines from multiple logical "realms"
//! (tenants identified by request host). This crate splits one such object
//! into one gzip-compressed output per realm and computes the
//! realm-qualified destination key for each.
//!
//! # Architecture
//!
//! ```text
//! S3 notification batch
//!        |
//!        v
//! RealmSorter (orchestrator, per record)
//!        |
//!        v
//! split_by_realm (line streaming, optional gzip decode)
//!        |
//!        +-- extract_host / resolve_realm  (per-line classification)
//!        |
//!        v
//! RealmSinks (per-realm gzip accumulators)
//!        |
//!        v
//! ObjectStore::put_object at SorterConfig::target_key
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod host;
pub mod key;
pub mod realm;
pub mod sink;
pub mod split;
pub mod store;

pub use config::SorterConfig;
pub use error::{SortError, SortResult};
pub use handler::RealmSorter;
pub use store::{FetchedObject, MemoryStore, ObjectStore};
