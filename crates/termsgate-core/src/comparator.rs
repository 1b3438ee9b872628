//! Acceptance comparison.
//!
//! Version identifiers are opaque tokens: exact, case-sensitive string
//! equality with no trimming or normalization. An absent accepted version
//! never matches a fetched one.

use termsgate_contracts::policy::{PolicyDescriptor, UserAcceptanceRecord};

/// Return true when the user must (re)accept the policies.
///
/// False only when both accepted versions are present and equal the fetched
/// ones.
pub fn needs_action(descriptor: &PolicyDescriptor, record: &UserAcceptanceRecord) -> bool {
    !(matches(record.accepted_tos_version.as_deref(), &descriptor.tos_version)
        && matches(record.accepted_privacy_version.as_deref(), &descriptor.privacy_version))
}

fn matches(accepted: Option<&str>, latest: &str) -> bool {
    accepted == Some(latest)
}

#[cfg(test)]
mod tests {
    use termsgate_contracts::policy::{PolicyDescriptor, UserAcceptanceRecord};

    use super::needs_action;

    fn record(tos: Option<&str>, privacy: Option<&str>) -> UserAcceptanceRecord {
        UserAcceptanceRecord {
            accepted_tos_version: tos.map(str::to_string),
            accepted_privacy_version: privacy.map(str::to_string),
        }
    }

    #[test]
    fn satisfied_only_when_both_versions_match() {
        let descriptor = PolicyDescriptor::new("2024-01", "2024-02");

        assert!(!needs_action(&descriptor, &record(Some("2024-01"), Some("2024-02"))));
        assert!(needs_action(&descriptor, &record(Some("2024-01"), Some("2024-01"))));
        assert!(needs_action(&descriptor, &record(Some("2023-12"), Some("2024-02"))));
        assert!(needs_action(&descriptor, &record(Some("2023-12"), Some("2023-12"))));
    }

    #[test]
    fn absent_never_matches_present() {
        let descriptor = PolicyDescriptor::new("2024-01", "2024-01");

        assert!(needs_action(&descriptor, &record(None, None)));
        assert!(needs_action(&descriptor, &record(None, Some("2024-01"))));
        assert!(needs_action(&descriptor, &record(Some("2024-01"), None)));
    }

    #[test]
    fn absent_does_not_match_empty_version() {
        let descriptor = PolicyDescriptor::new("", "");

        assert!(needs_action(&descriptor, &UserAcceptanceRecord::empty()));
        assert!(!needs_action(&descriptor, &record(Some(""), Some(""))));
    }

    #[test]
    fn comparison_is_case_and_whitespace_sensitive() {
        let descriptor = PolicyDescriptor::new("v1", "v1");

        assert!(needs_action(&descriptor, &record(Some("V1"), Some("v1"))));
        assert!(needs_action(&descriptor, &record(Some("v1 "), Some("v1"))));
        assert!(needs_action(&descriptor, &record(Some("v1"), Some(" v1"))));
    }

    #[test]
    fn accepting_the_descriptor_satisfies_it() {
        let descriptor = PolicyDescriptor::new("t-7", "p-3");
        assert!(!needs_action(&descriptor, &record(Some("t-7"), Some("p-3"))));
    }
}
