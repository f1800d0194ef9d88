/// Remove the backslash escapes of a field reference
pub fn unescape_field(col: &str) -> String {
    let mut unescaped = String::with_capacity(col.len());
    let mut chars = col.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                unescaped.push(next);
                continue;
            }
        }
        unescaped.push(ch);
    }
    unescaped
}

/// Split a field reference into its nested access path.
///
/// `"a.b"` addresses property `b` of column `a`, while `"a\\.b"` is the single
/// column `a.b`. Bracket access (`"a['b']"`) is kept verbatim on the preceding
/// segment.
pub fn field_path(field: &str) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = String::new();
    let mut chars = field.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '.' => path.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    path.push(current);
    path
}

#[cfg(test)]
mod tests {
    use crate::escape::{field_path, unescape_field};

    #[test]
    fn test_unescape() {
        let col = r#"\'foo\'_\._\"bar\""#;
        let unescaped = unescape_field(col);
        assert_eq!(unescaped, "'foo'_._\"bar\"")
    }

    #[test]
    fn test_field_path() {
        assert_eq!(field_path("a.b"), vec!["a", "b"]);
        assert_eq!(field_path(r"a\.b"), vec!["a.b"]);
        assert_eq!(field_path("price"), vec!["price"]);
    }
}
