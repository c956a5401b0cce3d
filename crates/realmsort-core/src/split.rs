//! The demultiplex driver: stream a source body line by line and route
//! each line to its realm's sink.

use std::collections::HashMap;
use std::io::{BufRead, BufReader};

use bytes::Bytes;
use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::config::SorterConfig;
use crate::error::{SortError, SortResult};
use crate::host::extract_host;
use crate::sink::RealmSinks;

/// How the source body is encoded, decided once before streaming begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// The body is gzip-compressed and must be decoded while reading.
    Gzip,
    /// The body is plain line-delimited text.
    Raw,
}

impl BodyEncoding {
    /// Detect the body encoding from the object key and its declared
    /// content encoding.
    #[must_use]
    pub fn detect(key: &str, content_encoding: Option<&str>) -> Self {
        if key.ends_with(".gz") || content_encoding == Some("gzip") {
            Self::Gzip
        } else {
            Self::Raw
        }
    }
}

/// Result of demultiplexing one source object.
#[derive(Debug)]
pub struct SplitResult {
    /// Finished compressed buffer per realm that received at least one line.
    pub outputs: HashMap<String, Bytes>,
    /// Total number of lines read from the source.
    pub total_lines: u64,
}

/// Split a source body into per-realm compressed buffers.
///
/// Each line is counted, classified by request host, and appended verbatim
/// (terminator included) to its realm's sink; a missing final terminator is
/// added so outputs stay line-delimited. Every line lands in exactly one
/// realm. Deterministic for a fixed body and configuration.
///
/// # Errors
///
/// Returns [`SortError::Decode`] when reading or gunzipping the body fails
/// and [`SortError::Compress`] when an output stream fails.
pub fn split_by_realm(
    config: &SorterConfig,
    body: &[u8],
    encoding: BodyEncoding,
) -> SortResult<SplitResult> {
    let mut reader: Box<dyn BufRead + '_> = match encoding {
        // Sources may be concatenations of several gzip members; a plain
        // GzDecoder would stop after the first one.
        BodyEncoding::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(body))),
        BodyEncoding::Raw => Box::new(body),
    };

    let mut sinks = RealmSinks::new();
    let mut total_lines: u64 = 0;
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader.read_until(b'\n', &mut line).map_err(SortError::Decode)?;
        if read == 0 {
            break;
        }
        if line.last() != Some(&b'\n') {
            line.push(b'\n');
        }
        total_lines += 1;

        // Host extraction works on text; undecodable bytes are replaced so
        // the line still routes (to the default realm in the worst case)
        // while the sink receives the original bytes untouched.
        let text = String::from_utf8_lossy(&line);
        let realm = config.resolve_realm(extract_host(&text).as_deref());
        sinks.write(realm, &line)?;
    }

    let outputs = sinks.finish()?;
    debug!(
        total_lines,
        realms = outputs.len(),
        "split source into realm buffers"
    );
    Ok(SplitResult {
        outputs,
        total_lines,
    })
}
