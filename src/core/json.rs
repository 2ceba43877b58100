//! JSON and text helpers for generated script fragments
//!
//! Option objects and literals are written with `", "` and `": "` separators so
//! generated documents stay byte-comparable with existing golden files. Object
//! keys keep the order of the serialized value; pass a `BTreeMap` for sorted keys.

use crate::{MapError, Result};
use serde::Serialize;
use std::io;

/// `serde_json` formatter using `", "` and `": "` separators
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize `value` as single-line JSON with spaced separators
pub fn to_string_spaced<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buffer = Vec::with_capacity(64);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|e| MapError::ParseError(e.to_string()))
}

/// Quote `text` as a JavaScript string literal safe to embed in a `<script>`
/// block: `<` is written as `\u003c` so the text cannot close the block.
pub fn js_string(text: &str) -> Result<String> {
    Ok(serde_json::to_string(text)?.replace('<', "\\u003c"))
}

/// Escape `&`, `<`, `>`, `"` and `'` for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_spaced_separators() {
        let value = json!({"maxZoom": 5, "padding": [10, 20]});
        assert_eq!(
            to_string_spaced(&value).unwrap(),
            r#"{"maxZoom": 5, "padding": [10, 20]}"#
        );
        assert_eq!(to_string_spaced(&json!([[10, 10], [20, 20]])).unwrap(), "[[10, 10], [20, 20]]");
        assert_eq!(to_string_spaced(&json!({})).unwrap(), "{}");
        assert_eq!(to_string_spaced(&json!([])).unwrap(), "[]");
    }

    #[test]
    fn test_sorted_keys_are_stable() {
        let mut options = BTreeMap::new();
        options.insert("paddingTopLeft", json!([1, 2]));
        options.insert("maxZoom", json!(7));

        let first = to_string_spaced(&options).unwrap();
        let second = to_string_spaced(&options).unwrap();
        assert_eq!(first, r#"{"maxZoom": 7, "paddingTopLeft": [1, 2]}"#);
        assert_eq!(first, second);
    }

    #[test]
    fn test_js_string() {
        assert_eq!(js_string("Portland, OR").unwrap(), "\"Portland, OR\"");
        assert_eq!(js_string("say \"hi\"\n").unwrap(), r#""say \"hi\"\n""#);
        assert_eq!(
            js_string("a</script><b>").unwrap(),
            r#""a\u003c/script>\u003cb>""#
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>Tom & "Jerry's"</b>"#),
            "&lt;b&gt;Tom &amp; &#34;Jerry&#39;s&#34;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
