//! Blocked pattern table.
//!
//! Parameter paths used by the Spring4Shell (CVE-2022-22965) exploit to
//! reach the Tomcat access-log valve through `class.module.classLoader`.
//!
//! The first entry is a prefix of every other entry, so it alone decides
//! every match. The longer entries are kept so the table documents the full
//! set of exploit parameters.

/// Substrings that mark a request as malicious, in evaluation order.
pub static BLOCKED_PATTERNS: [&str; 6] = [
    "class.module.classLoader",
    "class.module.classLoader.resources.context.parent.pipeline.first.pattern",
    "class.module.classLoader.resources.context.parent.pipeline.first.suffix",
    "class.module.classLoader.resources.context.parent.pipeline.first.directory",
    "class.module.classLoader.resources.context.parent.pipeline.first.prefix",
    "class.module.classLoader.resources.context.parent.pipeline.first.fileDateFormat",
];

/// Returns true if any blocked pattern occurs anywhere in `data`.
///
/// Comparison is byte-exact and case-sensitive.
pub fn contains_blocked_pattern(data: &str) -> bool {
    BLOCKED_PATTERNS.iter().any(|pattern| data.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pattern_matches_itself() {
        for pattern in BLOCKED_PATTERNS {
            assert!(contains_blocked_pattern(pattern), "{pattern} should match");
        }
    }

    #[test]
    fn test_pattern_embedded_in_text() {
        assert!(contains_blocked_pattern(
            "a=1&class.module.classLoader.resources.context.parent.pipeline.first.suffix=.jsp"
        ));
        assert!(contains_blocked_pattern("xxclass.module.classLoaderxx"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!contains_blocked_pattern("Class.Module.ClassLoader"));
        assert!(!contains_blocked_pattern("class.module.classloader"));
    }

    #[test]
    fn test_clean_input() {
        assert!(!contains_blocked_pattern(""));
        assert!(!contains_blocked_pattern("x=hello"));
        // Percent-encoded payloads are not decoded.
        assert!(!contains_blocked_pattern("class%2Emodule%2EclassLoader"));
        // Truncated prefix is not enough.
        assert!(!contains_blocked_pattern("class.module.classLoade"));
    }

    #[test]
    fn test_first_pattern_prefixes_the_rest() {
        let first = BLOCKED_PATTERNS[0];
        assert!(BLOCKED_PATTERNS[1..].iter().all(|p| p.starts_with(first)));
    }
}
