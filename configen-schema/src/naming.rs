//! Identifier normalization.

/// Converts a schema member name into a CamelCase type identifier.
///
/// The name is split on underscores; each segment gets its first letter
/// capitalized and is otherwise left untouched, so already capitalized
/// names pass through unchanged. Empty segments are dropped.
///
/// ```
/// use configen_schema::naming::normalize;
///
/// assert_eq!(normalize("test_var"), "TestVar");
/// assert_eq!(normalize("TestVar"), "TestVar");
/// assert_eq!(normalize(""), "");
/// ```
#[must_use]
pub fn normalize(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    for segment in name.trim().split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}

/// Returns true if `name` can be used verbatim as a member identifier.
///
/// Accepts ASCII letters, digits and underscores, not starting with a digit,
/// and requires at least one non-underscore character.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') && name.chars().any(|c| c != '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("t"), "T");
        assert_eq!(normalize("test"), "Test");
        assert_eq!(normalize("test_var"), "TestVar");
        assert_eq!(normalize("Test_Var"), "TestVar");
        assert_eq!(normalize("TestVar"), "TestVar");
    }

    #[test]
    fn test_normalize_skips_empty_segments() {
        assert_eq!(normalize("a__b"), "AB");
        assert_eq!(normalize("_private"), "Private");
        assert_eq!(normalize("trailing_"), "Trailing");
    }

    #[test]
    fn test_normalize_keeps_inner_case() {
        assert_eq!(normalize("http_URL"), "HttpURL");
        assert_eq!(normalize("value2_x"), "Value2X");
    }

    #[test]
    fn test_is_valid_identifier() {
        assert!(is_valid_identifier("small_val"));
        assert!(is_valid_identifier("_x"));
        assert!(is_valid_identifier("Value2"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("__"));
        assert!(!is_valid_identifier("2fast"));
        assert!(!is_valid_identifier("with-dash"));
        assert!(!is_valid_identifier("with.dot"));
    }
}
