//! Per-realm compressed output sinks.
//!
//! One invocation owns one [`RealmSinks`] value. Encoders are created
//! lazily on the first line routed to a realm and live until
//! [`RealmSinks::finish`], which is the single terminal operation: it
//! flushes every gzip trailer and hands back the finished buffers. The
//! compression level is fixed so the same input always produces the same
//! output bytes.

use std::collections::HashMap;
use std::io::Write;

use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;
use tracing::trace;

use crate::error::{SortError, SortResult};

/// Lazily-created gzip accumulators, one per realm.
#[derive(Debug, Default)]
pub struct RealmSinks {
    encoders: HashMap<String, GzEncoder<Vec<u8>>>,
}

impl RealmSinks {
    /// Create an empty sink set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one raw line (terminator included) to a realm's stream.
    ///
    /// Lines are written in arrival order and never reordered or
    /// deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::Compress`] if the encoder rejects the write.
    pub fn write(&mut self, realm: &str, line: &[u8]) -> SortResult<()> {
        let encoder = self.encoders.entry(realm.to_owned()).or_insert_with(|| {
            trace!(realm, "opening output stream");
            GzEncoder::new(Vec::new(), Compression::default())
        });
        encoder.write_all(line).map_err(SortError::Compress)
    }

    /// Close every stream and return the finished buffers.
    ///
    /// Consumes the sinks; realms that never received a line are absent
    /// from the result, so an untouched sink set yields an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`SortError::Compress`] if flushing a gzip trailer fails.
    pub fn finish(self) -> SortResult<HashMap<String, Bytes>> {
        let mut outputs = HashMap::with_capacity(self.encoders.len());
        for (realm, encoder) in self.encoders {
            let buf = encoder.finish().map_err(SortError::Compress)?;
            trace!(realm, compressed_bytes = buf.len(), "closed output stream");
            outputs.insert(realm, Bytes::from(buf));
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::GzDecoder;

    use super::*;

    fn gunzip(data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        GzDecoder::new(data)
            .read_to_end(&mut out)
            .unwrap_or_else(|e| panic!("gunzip failed: {e}"));
        out
    }

    #[test]
    fn test_should_return_empty_map_when_untouched() {
        let sinks = RealmSinks::new();
        let outputs = sinks.finish().unwrap_or_else(|e| panic!("finish failed: {e}"));
        assert!(outputs.is_empty());
    }

    #[test]
    fn test_should_roundtrip_lines_in_order() {
        let mut sinks = RealmSinks::new();
        sinks.write("acme", b"first\n").unwrap_or_else(|e| panic!("write: {e}"));
        sinks.write("acme", b"second\n").unwrap_or_else(|e| panic!("write: {e}"));
        sinks.write("acme", b"third\n").unwrap_or_else(|e| panic!("write: {e}"));

        let outputs = sinks.finish().unwrap_or_else(|e| panic!("finish failed: {e}"));
        assert_eq!(outputs.len(), 1);
        assert_eq!(gunzip(&outputs["acme"]), b"first\nsecond\nthird\n");
    }

    #[test]
    fn test_should_keep_realm_streams_separate() {
        let mut sinks = RealmSinks::new();
        sinks.write("acme", b"a1\n").unwrap_or_else(|e| panic!("write: {e}"));
        sinks.write("globex", b"g1\n").unwrap_or_else(|e| panic!("write: {e}"));
        sinks.write("acme", b"a2\n").unwrap_or_else(|e| panic!("write: {e}"));

        let outputs = sinks.finish().unwrap_or_else(|e| panic!("finish failed: {e}"));
        assert_eq!(outputs.len(), 2);
        assert_eq!(gunzip(&outputs["acme"]), b"a1\na2\n");
        assert_eq!(gunzip(&outputs["globex"]), b"g1\n");
    }

    #[test]
    fn test_should_produce_identical_bytes_for_identical_input() {
        let run = || {
            let mut sinks = RealmSinks::new();
            sinks.write("acme", b"line\n").unwrap_or_else(|e| panic!("write: {e}"));
            sinks
                .finish()
                .unwrap_or_else(|e| panic!("finish failed: {e}"))
                .remove("acme")
                .unwrap_or_else(|| panic!("missing realm"))
        };
        assert_eq!(run(), run());
    }
}
