//! Declaration-name decoding shared by both extraction modes.
//!
//! A name is read from a string literal (quotes stripped, common escapes
//! decoded) or from a template literal, in which case only the literal head
//! before the first `${` is kept. Anything else yields an empty name.

/// Decode the raw source text of a literal argument into a display name.
pub fn literal_name(raw: &str) -> String {
    match raw.chars().next() {
        Some('`') => template_head(raw),
        Some('"') | Some('\'') => string_value(raw),
        _ => String::new(),
    }
}

/// Contents of a `'...'` or `"..."` literal with escapes decoded.
pub fn string_value(raw: &str) -> String {
    let inner = strip_delimiters(raw, raw.chars().next().unwrap_or('"'));
    unescape(inner)
}

/// Literal text of a template string up to its first interpolation.
pub fn template_head(raw: &str) -> String {
    let body = raw.strip_prefix('`').unwrap_or(raw);
    let head = match find_interpolation(body) {
        Some(idx) => &body[..idx],
        None => body.strip_suffix('`').unwrap_or(body),
    };
    unescape(head)
}

fn strip_delimiters(raw: &str, quote: char) -> &str {
    let inner = raw.strip_prefix(quote).unwrap_or(raw);
    inner.strip_suffix(quote).unwrap_or(inner)
}

/// Byte index of the first unescaped `${`.
fn find_interpolation(body: &str) -> Option<usize> {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'$' if bytes.get(i + 1) == Some(&b'{') => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn unescape(s: &str) -> String {
    if !s.contains('\\') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            // Line continuation
            Some('\n') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_strings() {
        assert_eq!(literal_name("'hello'"), "hello");
        assert_eq!(literal_name("\"hello world\""), "hello world");
        assert_eq!(literal_name("''"), "");
    }

    #[test]
    fn decodes_escapes() {
        assert_eq!(literal_name(r#"'it\'s'"#), "it's");
        assert_eq!(literal_name(r#""say \"hi\"""#), "say \"hi\"");
        assert_eq!(literal_name(r"'a\\b'"), "a\\b");
        assert_eq!(literal_name(r"'tab\there'"), "tab\there");
    }

    #[test]
    fn template_without_interpolation() {
        assert_eq!(literal_name("`plain`"), "plain");
    }

    #[test]
    fn template_keeps_head_only() {
        assert_eq!(literal_name("`renders ${name} twice`"), "renders ");
        assert_eq!(literal_name("`${x} first`"), "");
        assert_eq!(literal_name(r"`cost \${x}`"), "cost ${x}");
    }

    #[test]
    fn non_literal_is_empty() {
        assert_eq!(literal_name("name"), "");
        assert_eq!(literal_name("42"), "");
        assert_eq!(literal_name(""), "");
    }
}
