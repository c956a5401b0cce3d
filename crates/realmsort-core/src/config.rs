//! Configuration for the realm sorter.
//!
//! All configuration is driven by environment variables, read once at
//! startup and immutable thereafter.

use std::collections::HashSet;

/// Configuration for one sorter process.
///
/// Prefixes are normalized at construction time: surrounding slashes are
/// stripped and a single trailing `/` is appended when the prefix is
/// non-empty, so key arithmetic never has to deal with doubled or missing
/// separators.
#[derive(Debug, Clone)]
pub struct SorterConfig {
    /// Prefix delimiting the input namespace; only keys under it are processed.
    pub source_prefix: String,
    /// Prefix under which realm-qualified outputs are written.
    pub target_prefix: String,
    /// Realm assigned to lines whose host is unknown or unparsable.
    pub default_realm: String,
    /// The set of realm names that may be used verbatim.
    pub realms: HashSet<String>,
    /// Whether to delete the source object after writing outputs.
    pub delete_source: bool,
}

impl Default for SorterConfig {
    fn default() -> Self {
        let default_realm = "default".to_owned();
        Self {
            source_prefix: normalize_prefix("alb/realm/"),
            target_prefix: normalize_prefix("alb"),
            realms: HashSet::from([default_realm.clone()]),
            default_realm,
            delete_source: false,
        }
    }
}

impl SorterConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `SOURCE_PREFIX`, `TARGET_PREFIX`,
    /// `DEFAULT_REALM`, `REALMS` (comma-separated), `DELETE_SOURCE`.
    /// Unset variables keep their defaults; an empty `REALMS` leaves the
    /// realm set as `{default_realm}`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("SOURCE_PREFIX") {
            config.source_prefix = normalize_prefix(&v);
        }
        if let Ok(v) = std::env::var("TARGET_PREFIX") {
            config.target_prefix = normalize_prefix(&v);
        }
        if let Ok(v) = std::env::var("DEFAULT_REALM") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                config.default_realm = trimmed.to_owned();
            }
        }
        if let Ok(v) = std::env::var("REALMS") {
            config.realms = parse_realms(&v, &config.default_realm);
        } else {
            config.realms = HashSet::from([config.default_realm.clone()]);
        }
        if let Ok(v) = std::env::var("DELETE_SOURCE") {
            config.delete_source = parse_bool(&v);
        }

        config
    }
}

/// Normalize a key prefix: strip surrounding `/`, append one trailing `/`
/// when the result is non-empty.
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}

/// Parse a comma-separated realm list. An empty list collapses to the
/// default realm so resolution always has at least one member to match.
fn parse_realms(raw: &str, default_realm: &str) -> HashSet<String> {
    let realms: HashSet<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    if realms.is_empty() {
        HashSet::from([default_realm.to_owned()])
    } else {
        realms
    }
}

/// Parse a boolean-ish environment value (`1`, `true`, `yes`).
fn parse_bool(raw: &str) -> bool {
    matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
