//! Minimal HTML scanning and escaping.
//!
//! Scanning is plain string search (no HTML parser dependency). Tag and attribute
//! names are matched ASCII case-insensitively; values keep their original case.

/// Iterates over the raw text of every `<tag ...>` opening tag in `html`.
pub fn tags<'a>(html: &'a str, tag_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    let lower = html.to_ascii_lowercase();
    let needle = format!("<{}", tag_name.to_ascii_lowercase());
    let mut search_from = 0;

    std::iter::from_fn(move || loop {
        let start = search_from + lower.get(search_from..)?.find(&needle)?;
        let after_name = start + needle.len();

        // `<img` must not match `<imgx`
        let boundary_ok = lower
            .as_bytes()
            .get(after_name)
            .is_some_and(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/');

        let end = match lower[start..].find('>') {
            Some(pos) => start + pos,
            None => return None,
        };
        search_from = end + 1;

        if boundary_ok {
            return Some(&html[start..=end]);
        }
    })
}

/// Extracts the value of a quoted attribute from a single tag (case-preserving).
///
/// The attribute name must be preceded by whitespace, so `src` does not match
/// inside `data-src`.
pub fn attr_value<'a>(tag: &'a str, attr_name: &str) -> Option<&'a str> {
    let lower = tag.to_ascii_lowercase();
    let prefix = format!("{}=", attr_name.to_ascii_lowercase());
    let mut search_from = 0;

    while let Some(pos) = lower[search_from..].find(&prefix) {
        let attr_start = search_from + pos;
        search_from = attr_start + prefix.len();

        let preceded_by_space = attr_start > 0
            && lower.as_bytes()[attr_start - 1].is_ascii_whitespace();
        if !preceded_by_space {
            continue;
        }

        let rest = &tag[search_from..];
        let quote = *rest.as_bytes().first()?;
        if quote != b'"' && quote != b'\'' {
            return None;
        }
        let inner = &rest[1..];
        let end = inner.find(quote as char)?;
        return Some(&inner[..end]);
    }

    None
}

/// Iterates over the values of `attr_name` on every opening tag, whatever its name.
pub fn tags_with_attr<'a>(html: &'a str, attr_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    let mut search_from = 0;

    std::iter::from_fn(move || loop {
        let start = search_from + html.get(search_from..)?.find('<')?;
        let end = start + html[start..].find('>')?;
        search_from = end + 1;

        let tag = &html[start..=end];
        // Closing tags, comments, doctypes
        if tag[1..].starts_with(['/', '!']) {
            continue;
        }
        if let Some(value) = attr_value(tag, attr_name) {
            return Some(value);
        }
    })
}

/// Returns the first non-blank `attr` value found on any `<tag_name>` in `html`.
pub fn first_attr(html: &str, tag_name: &str, attr_name: &str) -> Option<String> {
    tags(html, tag_name)
        .filter_map(|tag| attr_value(tag, attr_name))
        .find(|v| !v.trim().is_empty())
        .map(str::to_owned)
}

/// Escapes text for element content and double-quoted attribute values.
pub fn escape(s: &str) -> String {
    html_escape::encode_double_quoted_attribute(s).into_owned()
}
