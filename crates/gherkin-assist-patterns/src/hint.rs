//! Placeholder type-hint helpers used during regex compilation.

const FLOAT: &str = r"(?i:(?:[+-]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][+-]?\d+)?|nan|inf|infinity))";

/// Translate a placeholder type hint into a regular-expression fragment.
///
/// Both Rust numeric types and Cucumber expression parameter types are
/// understood. Unknown or missing hints match any text lazily.
///
/// # Examples
/// ```
/// use gherkin_assist_patterns::get_type_pattern;
/// assert_eq!(get_type_pattern(Some("u32")), r"\d+");
/// assert_eq!(get_type_pattern(Some("int")), r"[+-]?\d+");
/// assert_eq!(get_type_pattern(Some("word")), r"[^\s]+");
/// assert_eq!(get_type_pattern(None), ".+?");
/// ```
#[must_use]
pub fn get_type_pattern(type_hint: Option<&str>) -> &'static str {
    match type_hint {
        Some("u8" | "u16" | "u32" | "u64" | "u128" | "usize") => r"\d+",
        Some(
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "int" | "byte" | "short" | "long"
            | "biginteger",
        ) => r"[+-]?\d+",
        Some("f32" | "f64" | "float" | "double" | "bigdecimal") => FLOAT,
        Some("word") => r"[^\s]+",
        Some("string") => r#"(?:"[^"]*"|'[^']*')"#,
        _ => r".+?",
    }
}

/// Whether `name` is one of the Cucumber expression parameter types.
///
/// A placeholder written as `{int}` names its type rather than an argument,
/// so the compiler treats such names as type hints.
pub(crate) fn is_cucumber_type(name: &str) -> bool {
    matches!(
        name,
        "int"
            | "float"
            | "word"
            | "string"
            | "byte"
            | "short"
            | "long"
            | "double"
            | "biginteger"
            | "bigdecimal"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("u64"), r"\d+")]
    #[case(Some("i32"), r"[+-]?\d+")]
    #[case(Some("long"), r"[+-]?\d+")]
    #[case(Some("f64"), FLOAT)]
    #[case(Some("double"), FLOAT)]
    #[case(Some("String"), r".+?")]
    #[case(None, r".+?")]
    fn maps_hints_to_fragments(#[case] hint: Option<&str>, #[case] expected: &str) {
        assert_eq!(get_type_pattern(hint), expected);
    }

    #[test]
    fn recognises_cucumber_type_names() {
        assert!(is_cucumber_type("int"));
        assert!(is_cucumber_type("string"));
        assert!(!is_cucumber_type("count"));
    }
}
