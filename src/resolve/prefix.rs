//! Decomposition of symbolic driver paths.

/// Characters treated as path separators in raw driver paths.
pub const SEPARATORS: &[char] = &['\\', '/'];

/// Recognised leading token of a raw driver path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathPrefix {
    /// `System32`: relative to the system binaries folder
    System32,
    /// `SystemRoot`: relative to the Windows folder
    SystemRoot,
    /// `??`: NT object-manager alias for an already fully qualified path
    NtLiteral,
}

impl PathPrefix {
    /// Match a prefix token, ignoring ASCII case.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "system32" => Some(Self::System32),
            "systemroot" => Some(Self::SystemRoot),
            "??" => Some(Self::NtLiteral),
            _ => None,
        }
    }
}

/// Split a raw path into its prefix token and remainder.
///
/// Leading and trailing separators are dropped first; the split happens at
/// the first separator left. Returns `None` when there is none.
#[must_use]
pub fn split_prefix(raw: &str) -> Option<(&str, &str)> {
    raw.trim_matches(SEPARATORS).split_once(SEPARATORS)
}

/// Non-empty components of a remainder, in order.
pub fn components(remainder: &str) -> impl Iterator<Item = &str> {
    remainder.split(SEPARATORS).filter(|part| !part.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(PathPrefix::parse("SYSTEM32"), Some(PathPrefix::System32));
        assert_eq!(PathPrefix::parse("SystemRoot"), Some(PathPrefix::SystemRoot));
        assert_eq!(PathPrefix::parse("systemroot"), Some(PathPrefix::SystemRoot));
        assert_eq!(PathPrefix::parse("??"), Some(PathPrefix::NtLiteral));
        assert_eq!(PathPrefix::parse("Windows"), None);
        assert_eq!(PathPrefix::parse("C:"), None);
    }

    #[test]
    fn test_split_trims_outer_separators() {
        assert_eq!(
            split_prefix("\\SystemRoot\\System32\\drivers\\x.sys\\"),
            Some(("SystemRoot", "System32\\drivers\\x.sys"))
        );
        assert_eq!(
            split_prefix("\\??\\C:\\temp\\x.sys"),
            Some(("??", "C:\\temp\\x.sys"))
        );
        assert_eq!(split_prefix("system32/drivers/x.sys"), Some(("system32", "drivers/x.sys")));
    }

    #[test]
    fn test_split_without_separator() {
        assert_eq!(split_prefix("bare"), None);
        assert_eq!(split_prefix("\\bare\\"), None);
        assert_eq!(split_prefix(""), None);
        assert_eq!(split_prefix("\\\\"), None);
    }

    #[test]
    fn test_components_skip_empty_parts() {
        let parts: Vec<_> = components("drivers\\\\x.sys").collect();
        assert_eq!(parts, vec!["drivers", "x.sys"]);
    }
}
