//! Struct tag items.
//!
//! A Go struct tag is a sequence of `key:"value"` pairs. Injection works on
//! these pairs rather than on raw text, so that injecting `json:"id"` into
//! `json:"name" xml:"name"` replaces the json entry in place and keeps
//! the rest.

use std::{fmt, sync::LazyLock};

use regex::Regex;

static TAG_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\w.\-]+):"((?:[^"\\]|\\.)*)""#).expect("tag item pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagItem {
    pub key: String,
    /// Value including its surrounding quotes.
    pub value: String,
}

/// Ordered tag items of one struct tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagItems(Vec<TagItem>);

impl TagItems {
    /// Collect every `key:"value"` pair in `tag`. Anything else is dropped.
    pub fn parse(tag: &str) -> Self {
        let items = TAG_ITEM
            .captures_iter(tag)
            .map(|caps| TagItem {
                key: caps[1].to_string(),
                value: format!("\"{}\"", &caps[2]),
            })
            .collect();
        Self(items)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|item| item.key.as_str())
    }

    /// Merge `other` into these items.
    ///
    /// Keys present in both take the value from `other` at their original
    /// position; keys only in `other` are appended in their order.
    pub fn merge(&self, other: &TagItems) -> TagItems {
        let mut pending: Vec<&TagItem> = other.0.iter().collect();
        let mut merged = Vec::with_capacity(self.0.len() + other.0.len());

        for item in &self.0 {
            match pending.iter().position(|new| new.key == item.key) {
                Some(idx) => merged.push(pending.remove(idx).clone()),
                None => merged.push(item.clone()),
            }
        }
        merged.extend(pending.into_iter().cloned());

        TagItems(merged)
    }
}

impl fmt::Display for TagItems {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", item.key, item.value)?;
        }
        Ok(())
    }
}

/// Delimiter style of a tag literal in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// `` `json:"id"` ``
    Raw,
    /// `"json:\"id\""`
    Interpreted,
}

/// Decode the content of a tag literal, without its delimiters.
///
/// Returns None for an interpreted literal with an escape Go would reject,
/// or one that decodes to invalid UTF-8.
pub fn literal_content(literal: &str, kind: LiteralKind) -> Option<String> {
    let inner = literal.get(1..literal.len().saturating_sub(1))?;
    match kind {
        LiteralKind::Raw => Some(inner.replace('\r', "")),
        LiteralKind::Interpreted => unquote(inner),
    }
}

/// Render tag content as a Go string literal.
///
/// Raw literals are preferred; content a raw literal cannot carry (a
/// backtick, a carriage return or another control character besides tab)
/// falls back to an interpreted literal.
pub fn render_literal(content: &str) -> String {
    let needs_quoting = content
        .chars()
        .any(|c| c == '`' || (c.is_control() && c != '\t'));
    if !needs_quoting {
        return format!("`{}`", content);
    }
    let mut out = String::with_capacity(content.len() + 2);
    out.push('"');
    for c in content.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && (c as u32) < 0x80 => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decode the body of an interpreted Go string literal.
///
/// `\x` and octal escapes produce single bytes, so the decoding works on
/// bytes and validates UTF-8 at the end.
fn unquote(inner: &str) -> Option<String> {
    let bytes = inner.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let escape = *bytes.get(i + 1)?;
        i += 2;
        match escape {
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            b'\\' | b'"' | b'\'' => out.push(escape),
            b'0'..=b'7' => {
                let value = parse_digits(inner.get(i - 1..i + 2)?, 8)?;
                out.push(u8::try_from(value).ok()?);
                i += 2;
            }
            b'x' => {
                let value = parse_digits(inner.get(i..i + 2)?, 16)?;
                out.push(u8::try_from(value).ok()?);
                i += 2;
            }
            b'u' | b'U' => {
                let len = if escape == b'u' { 4 } else { 8 };
                let code = parse_digits(inner.get(i..i + len)?, 16)?;
                let c = char::from_u32(code)?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                i += len;
            }
            _ => return None,
        }
    }

    String::from_utf8(out).ok()
}

/// Digits only; `from_str_radix` alone would also take a leading sign.
fn parse_digits(digits: &str, radix: u32) -> Option<u32> {
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}
