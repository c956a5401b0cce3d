//! Invocation outcome DTOs.
//!
//! The field names here are the observable output contract of the sorter
//! (`ok` / `processed` / `results` with per-record `source` / `bucket` /
//! `lines` / `outputs`). Downstream consumers inspect these names, so they
//! must not change.

use serde::{Deserialize, Serialize};

/// Summary for one processed source object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOutcome {
    /// Decoded source object key.
    pub source: String,
    /// Bucket the source object was read from.
    pub bucket: String,
    /// Total number of lines read from the source object.
    pub lines: u64,
    /// Number of output objects written.
    pub outputs: u32,
}

/// Aggregated outcome for one notification batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Always `true` when the batch ran to completion.
    pub ok: bool,
    /// Number of records that were actually processed (skips excluded).
    pub processed: usize,
    /// Per-record summaries, in processing order.
    pub results: Vec<RecordOutcome>,
}

impl BatchOutcome {
    /// Build an outcome from the per-record summaries of a completed batch.
    #[must_use]
    pub fn from_results(results: Vec<RecordOutcome>) -> Self {
        Self {
            ok: true,
            processed: results.len(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_serialize_contract_field_names() {
        let outcome = BatchOutcome::from_results(vec![RecordOutcome {
            source: "alb/realm/default/log.gz".to_owned(),
            bucket: "access-logs".to_owned(),
            lines: 2,
            outputs: 2,
        }]);

        let json = serde_json::to_value(&outcome).unwrap_or_else(|e| panic!("serialize: {e}"));
        assert_eq!(json["ok"], true);
        assert_eq!(json["processed"], 1);
        assert_eq!(json["results"][0]["source"], "alb/realm/default/log.gz");
        assert_eq!(json["results"][0]["bucket"], "access-logs");
        assert_eq!(json["results"][0]["lines"], 2);
        assert_eq!(json["results"][0]["outputs"], 2);
    }

    #[test]
    fn test_should_build_empty_outcome() {
        let outcome = BatchOutcome::from_results(Vec::new());
        assert!(outcome.ok);
        assert_eq!(outcome.processed, 0);
        assert!(outcome.results.is_empty());
    }
}
