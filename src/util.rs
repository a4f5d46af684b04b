//! Text helpers shared by the parser and the extractor.

use std::borrow::Cow;

/// The HTML5 "ASCII whitespace" set used when stripping attribute values:
/// space, tab, line feed, form feed and carriage return.
const HTML_WHITESPACE: &[char] = &[' ', '\t', '\n', '\u{000C}', '\r'];

/// Strip leading and trailing HTML whitespace.
///
/// Only the five HTML5 whitespace characters are removed. Internal
/// whitespace, and other Unicode spaces such as U+00A0, are left untouched.
///
/// ```
/// use linkscan::strip_html_whitespace;
///
/// assert_eq!(strip_html_whitespace("  \t/a b/\r\n"), "/a b/");
/// assert_eq!(strip_html_whitespace("\u{a0}x"), "\u{a0}x");
/// ```
pub fn strip_html_whitespace(value: &str) -> &str {
    value.trim_matches(HTML_WHITESPACE)
}

// ============================================================================
// Encoding Detection
// ============================================================================

/// Decode bytes to a string, handling various encodings.
///
/// 1. UTF-8 (BOM handled by encoding_rs)
/// 2. The hinted encoding, if UTF-8 was malformed
/// 3. Windows-1252, which is what browsers assume for legacy pages
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        log::debug!("input is not UTF-8, decoding as {}", encoding.name());
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    log::debug!("input is not UTF-8, falling back to windows-1252");
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Number of leading bytes searched for an encoding declaration. HTML
/// requires `<meta charset>` to appear within the first 1024 bytes.
const PRESCAN_LEN: usize = 1024;

/// Find a declared character encoding near the start of a document.
///
/// Recognises `<meta charset="...">`, the `charset=` parameter of a
/// `<meta http-equiv="Content-Type">` content value, and XHTML's
/// `<?xml encoding="..."?>`. Only text inside those tags is considered.
pub fn extract_encoding_hint(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(PRESCAN_LEN)];

    if let Some(decl) = tags(prefix, b"<?xml").next()
        && let Some(value) = value_after(decl, b"encoding")
    {
        return Some(value);
    }

    tags(prefix, b"<meta").find_map(|tag| value_after(tag, b"charset"))
}

/// Every tag starting with `open`, from `open` up to the closing `>` (or
/// the end of the input).
fn tags<'a>(bytes: &'a [u8], open: &'a [u8]) -> impl Iterator<Item = &'a [u8]> + 'a {
    let mut rest = bytes;
    std::iter::from_fn(move || {
        let start = find_ascii_ci(rest, open)?;
        let tag = &rest[start..];
        let end = tag.iter().position(|&b| b == b'>').unwrap_or(tag.len());
        rest = &tag[end..];
        Some(&tag[..end])
    })
}

/// Position of `needle` in `haystack`, ignoring ASCII case.
fn find_ascii_ci(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

fn skip_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// Read the (optionally quoted) value of the first `key = value` pair in
/// `tag`. Whitespace is allowed around `=`.
fn value_after<'a>(tag: &'a [u8], key: &[u8]) -> Option<&'a str> {
    let mut search = tag;
    let rest = loop {
        let pos = find_ascii_ci(search, key)?;
        search = &search[pos + key.len()..];
        if let Some(rest) = skip_whitespace(search).strip_prefix(b"=") {
            break skip_whitespace(rest);
        }
    };
    let (&first, tail) = rest.split_first()?;

    let value = if first == b'"' || first == b'\'' {
        let end = tail.iter().position(|&b| b == first)?;
        &tail[..end]
    } else {
        let end = rest
            .iter()
            .position(|&b| b.is_ascii_whitespace() || matches!(b, b'"' | b'\'' | b';' | b'>' | b'/'))
            .unwrap_or(rest.len());
        &rest[..end]
    };

    std::str::from_utf8(value)
        .ok()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_strip_removes_only_html_whitespace() {
        assert_eq!(strip_html_whitespace(" \t\n\u{000C}\rx\r\n"), "x");
        assert_eq!(strip_html_whitespace("a  b"), "a  b");
        assert_eq!(strip_html_whitespace(""), "");
        assert_eq!(strip_html_whitespace("   "), "");
        // Vertical tab is not HTML whitespace
        assert_eq!(strip_html_whitespace("\u{000B}x"), "\u{000B}x");
    }

    #[test]
    fn test_decode_utf8_borrows() {
        let bytes = "caf\u{e9}".as_bytes();
        assert!(matches!(decode_text(bytes, None), Cow::Borrowed("caf\u{e9}")));
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        assert_eq!(decode_text(b"caf\xe9", None), "caf\u{e9}");
    }

    #[test]
    fn test_decode_uses_hint() {
        // 0xA4 is the euro sign in ISO-8859-15 but a currency sign in 1252
        assert_eq!(decode_text(b"\xa4", Some("iso-8859-15")), "\u{20ac}");
    }

    #[test]
    fn test_meta_charset_hint() {
        let html = br#"<html><head><meta charset="iso-8859-15"><title>x</title>"#;
        assert_eq!(extract_encoding_hint(html), Some("iso-8859-15"));

        let unquoted = b"<META CHARSET=koi8-r>";
        assert_eq!(extract_encoding_hint(unquoted), Some("koi8-r"));
    }

    #[test]
    fn test_http_equiv_charset_hint() {
        let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=shift_jis">"#;
        assert_eq!(extract_encoding_hint(html), Some("shift_jis"));
    }

    #[test]
    fn test_xml_declaration_hint() {
        let xhtml = br#"<?xml version="1.0" encoding='windows-1251'?><html/>"#;
        assert_eq!(extract_encoding_hint(xhtml), Some("windows-1251"));
    }

    #[test]
    fn test_meta_charset_with_spaces_around_equals() {
        let html = br#"<meta charset = "iso-8859-15">"#;
        assert_eq!(extract_encoding_hint(html), Some("iso-8859-15"));
    }

    #[test]
    fn test_charset_outside_meta_is_ignored() {
        let html = br#"<meta name="x" content="y"><body>charset=bogus</body>"#;
        assert_eq!(extract_encoding_hint(html), None);

        // A later <meta> is still found
        let html = br#"<meta name="x"><p>charset=bogus</p><meta charset="koi8-r">"#;
        assert_eq!(extract_encoding_hint(html), Some("koi8-r"));
    }

    #[test]
    fn test_no_hint() {
        assert_eq!(extract_encoding_hint(b"<html><body>hi</body></html>"), None);
        assert_eq!(extract_encoding_hint(b""), None);
    }

    proptest! {
        #[test]
        fn prop_strip_is_idempotent(s in "[ \t\n\r\u{000C}a-z/.]{0,24}") {
            let once = strip_html_whitespace(&s);
            prop_assert_eq!(strip_html_whitespace(once), once);
        }

        #[test]
        fn prop_strip_preserves_inner_text(
            lead in "[ \t\n\r\u{000C}]{0,6}",
            inner in "[a-z]([a-z \t]{0,10}[a-z])?",
            trail in "[ \t\n\r\u{000C}]{0,6}"
        ) {
            let padded = format!("{}{}{}", lead, inner, trail);
            prop_assert_eq!(strip_html_whitespace(&padded), inner.as_str());
        }
    }
}
