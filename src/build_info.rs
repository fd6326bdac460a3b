//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string printed by `--version`.
pub fn version_line() -> String {
    format!(
        "snake-arcade {} ({}, {}, {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT,
        BUILD_PROFILE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        // Should be 7 chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_build_date_format() {
        // YYYY-MM-DD unless overridden by CI
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_version_line_mentions_package_version() {
        let line = version_line();
        assert!(line.starts_with("snake-arcade "));
        assert!(line.contains(env!("CARGO_PKG_VERSION")));
        assert!(line.contains(BUILD_COMMIT));
    }
}
