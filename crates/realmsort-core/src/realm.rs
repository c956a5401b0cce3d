//! Realm resolution: map an extracted hostname onto a configured realm.

use crate::config::SorterConfig;

impl SorterConfig {
    /// Resolve the realm for an extracted request host.
    ///
    /// The first host label (up to the first `.`) is used verbatim when it
    /// is a member of the configured realm set; anything else, including a
    /// missing or empty host, resolves to the default realm. Total: always
    /// returns a realm.
    ///
    /// # Examples
    ///
    /// ```
    /// use realmsort_core::SorterConfig;
    ///
    /// let config = SorterConfig::default();
    /// assert_eq!(config.resolve_realm(None), "default");
    /// assert_eq!(config.resolve_realm(Some("unknown.example.com")), "default");
    /// ```
    #[must_use]
    pub fn resolve_realm(&self, host: Option<&str>) -> &str {
        let Some(host) = host.filter(|h| !h.is_empty()) else {
            return &self.default_realm;
        };

        let candidate = host.split('.').next().unwrap_or(host);
        self.realms
            .get(candidate)
            .map_or(&self.default_realm, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn config_with_realms(realms: &[&str]) -> SorterConfig {
        SorterConfig {
            realms: realms.iter().map(|r| (*r).to_owned()).collect(),
            ..SorterConfig::default()
        }
    }

    #[test]
    fn test_should_resolve_known_realm_from_first_label() {
        let config = config_with_realms(&["tenant-a", "tenant-b"]);
        assert_eq!(
            config.resolve_realm(Some("tenant-a.example.com")),
            "tenant-a"
        );
    }

    #[test]
    fn test_should_resolve_unknown_host_to_default() {
        let config = config_with_realms(&["tenant-a", "tenant-b"]);
        assert_eq!(config.resolve_realm(Some("other.example.com")), "default");
    }

    #[test]
    fn test_should_resolve_missing_host_to_default() {
        let config = config_with_realms(&["tenant-a"]);
        assert_eq!(config.resolve_realm(None), "default");
        assert_eq!(config.resolve_realm(Some("")), "default");
    }

    #[test]
    fn test_should_resolve_bare_host_without_dots() {
        let config = config_with_realms(&["tenant-a"]);
        assert_eq!(config.resolve_realm(Some("tenant-a")), "tenant-a");
        assert_eq!(config.resolve_realm(Some("localhost")), "default");
    }

    #[test]
    fn test_should_not_match_realm_on_later_labels() {
        let config = config_with_realms(&["tenant-a"]);
        // The realm name appears as the second label; only the first counts.
        assert_eq!(
            config.resolve_realm(Some("www.tenant-a.example.com")),
            "default"
        );
    }

    #[test]
    fn test_should_resolve_with_empty_realm_set_falling_back() {
        let config = SorterConfig {
            realms: HashSet::new(),
            ..SorterConfig::default()
        };
        assert_eq!(config.resolve_realm(Some("acme.example.com")), "default");
    }
}
