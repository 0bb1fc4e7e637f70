use std::path::Path;

/// Extract filename from a file path
///
/// Returns the filename component of a path, or "Unknown" if it can't be extracted.
pub fn extract_filename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Lower-cased extension of a file name, if any.
pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Escape text for use inside a double-quoted HTML attribute.
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + value.len() / 8);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Parse "start..end" char offsets.
pub fn parse_range(range: &str) -> Option<(usize, usize)> {
    let (start, end) = range.split_once("..")?;
    Some((start.trim().parse().ok()?, end.trim().parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_filename() {
        assert_eq!(extract_filename("/home/user/site/index.html"), "index.html");
        assert_eq!(extract_filename("App.jsx"), "App.jsx");
        assert_eq!(extract_filename(""), "Unknown");
        assert_eq!(extract_filename("/"), "Unknown");
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("App.TSX").as_deref(), Some("tsx"));
        assert_eq!(extension_of("Makefile"), None);
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(
            escape_attribute(r#"<a href="x?a=1&b=2">"#),
            "&lt;a href=&quot;x?a=1&amp;b=2&quot;&gt;"
        );
        assert_eq!(escape_attribute("مرحبا 'x'"), "مرحبا 'x'");
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("3..10"), Some((3, 10)));
        assert_eq!(parse_range(" 0 .. 2 "), Some((0, 2)));
        assert_eq!(parse_range("3-10"), None);
        assert_eq!(parse_range("a..b"), None);
    }
}
