//! Destination key computation for realm-qualified outputs.

use crate::config::SorterConfig;

impl SorterConfig {
    /// Compute the destination key for `(source_key, realm)`.
    ///
    /// The source prefix is stripped from the front of the key, then any
    /// leading `/`. A leading path segment equal to the default realm is
    /// removed so legacy objects that embedded the default realm in their
    /// path do not end up double-nested. Returns `None` when nothing
    /// remains after stripping, meaning there is no valid destination and
    /// the caller must skip the write.
    ///
    /// Deterministic: the same inputs always map to the same key, so
    /// retried invocations overwrite rather than duplicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use realmsort_core::SorterConfig;
    ///
    /// let config = SorterConfig::default();
    /// assert_eq!(
    ///     config.target_key("alb/realm/2024/01/01/log.gz", "acme").as_deref(),
    ///     Some("alb/acme/2024/01/01/log.gz")
    /// );
    /// assert_eq!(config.target_key("alb/realm/", "acme"), None);
    /// ```
    #[must_use]
    pub fn target_key(&self, source_key: &str, realm: &str) -> Option<String> {
        let mut key = source_key;
        if !self.source_prefix.is_empty() {
            key = key.strip_prefix(self.source_prefix.as_str()).unwrap_or(key);
        }
        key = key.trim_start_matches('/');
        if key.is_empty() {
            return None;
        }

        // Legacy layout shim: a leading default-realm segment is collapsed.
        if let Some((first, rest)) = key.split_once('/') {
            if first == self.default_realm {
                key = rest;
            }
        }

        Some(format!("{}{realm}/{key}", self.target_prefix))
    }
}
