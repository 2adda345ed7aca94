/// Category name used by the dump for notifier credentials.
pub const NOTIFIER_CATEGORY: &str = "NOTIFIER";
/// Path segment the target service expects for notifier credentials.
pub const NOTIFY_SEGMENT: &str = "notify";

/// Resolve the category name the target service knows a dump category by.
///
/// Only the exact, case-sensitive `NOTIFIER` is renamed.
pub fn effective_category(raw: &str) -> &str {
    if raw == NOTIFIER_CATEGORY {
        NOTIFY_SEGMENT
    } else {
        raw
    }
}

/// URL path segment for a raw dump category.
pub fn path_segment(raw: &str) -> String {
    effective_category(raw).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_is_renamed() {
        assert_eq!(effective_category("NOTIFIER"), "notify");
        assert_eq!(path_segment("NOTIFIER"), "notify");
    }

    #[test]
    fn rename_is_case_sensitive() {
        assert_eq!(effective_category("Notifier"), "Notifier");
        assert_eq!(path_segment("Notifier"), "notifier");
        assert_eq!(path_segment("notifier"), "notifier");
    }

    #[test]
    fn other_categories_are_lowercased() {
        for (raw, want) in [
            ("K8S", "k8s"),
            ("REPO", "repo"),
            ("SSH", "ssh"),
            ("VCS", "vcs"),
            ("GenericCreds", "genericcreds"),
        ] {
            assert_eq!(path_segment(raw), want);
        }
    }
}
