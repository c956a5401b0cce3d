//! RealmSort - split mixed-tenant access-log objects by realm.
//!
//! Reads an S3 change-notification batch (JSON) from a file argument or
//! stdin, demultiplexes each referenced log object into one gzip output
//! per realm, writes the outputs back to S3, and prints the outcome
//! summary as JSON to stdout.
//!
//! # Usage
//!
//! ```text
//! realmsort event.json
//! cat event.json | realmsort
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SOURCE_PREFIX` | `alb/realm/` | Input key prefix; other keys are ignored |
//! | `TARGET_PREFIX` | `alb` | Output key prefix |
//! | `DEFAULT_REALM` | `default` | Realm for unknown/unparsable hosts |
//! | `REALMS` | *(empty = default only)* | Comma-separated realm allow-set |
//! | `DELETE_SOURCE` | `false` | Delete the source after writing outputs |
//! | `S3_ENDPOINT_URL` | *(unset)* | Endpoint override for local stacks |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod s3;

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use realmsort_core::{RealmSorter, SorterConfig};
use realmsort_model::S3Event;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::s3::S3Store;

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Read the log level from the environment.
fn log_level() -> String {
    std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}

/// Read the notification batch JSON from the given file, or stdin when no
/// path was passed.
async fn read_event(path: Option<&str>) -> Result<S3Event> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read event file: {path}"))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read event from stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("failed to parse notification batch JSON")
}

/// Build an S3 client, honoring `S3_ENDPOINT_URL` for local stacks.
async fn build_s3_client() -> aws_sdk_s3::Client {
    let endpoint = std::env::var("S3_ENDPOINT_URL").ok();

    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(url) = &endpoint {
        loader = loader.endpoint_url(url.clone());
    }
    let shared = loader.load().await;

    let mut builder = aws_sdk_s3::config::Builder::from(&shared);
    if endpoint.is_some() {
        // Local stacks generally do not support virtual-hosted addressing.
        builder = builder.force_path_style(true);
    }
    aws_sdk_s3::Client::from_conf(builder.build())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(&log_level())?;

    let config = SorterConfig::from_env();
    info!(
        source_prefix = %config.source_prefix,
        target_prefix = %config.target_prefix,
        default_realm = %config.default_realm,
        realms = config.realms.len(),
        delete_source = config.delete_source,
        "starting realm sorter"
    );

    let path = std::env::args().nth(1);
    let event = read_event(path.as_deref()).await?;

    let client = build_s3_client().await;
    let sorter = RealmSorter::new(config, S3Store::new(client));

    let outcome = sorter
        .handle(&event)
        .await
        .context("notification batch failed")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&outcome).context("failed to serialize outcome")?
    );
    Ok(())
}
