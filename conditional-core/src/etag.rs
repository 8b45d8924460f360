//! Entity-tag grammar and comparison functions.
//!
//! Implements the `entity-tag` production of
//! [RFC 7232 §2.3](https://tools.ietf.org/html/rfc7232#section-2.3):
//!
//! ```text
//! entity-tag = [ weak ] opaque-tag
//! weak       = %x57.2F ; "W/", case-sensitive
//! opaque-tag = DQUOTE *etagc DQUOTE
//! etagc      = %x21 / %x23-7E / obs-text
//! ```
//!
//! Header lists (`If-Match`, `If-None-Match`) are consumed one token at a time
//! with [`ETagList`]. Scanning is lenient: the first malformed token ends the
//! list instead of producing an error.

use std::fmt;
use std::iter::FusedIterator;

use thiserror::Error;

const WEAK_PREFIX: &str = "W/";

/// Error returned by [`EntityTag::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEntityTag {
    /// The input does not start with a well-formed entity tag.
    #[error("malformed entity tag")]
    Malformed,
    /// A well-formed entity tag was followed by more input.
    #[error("unexpected characters after entity tag: {0:?}")]
    TrailingCharacters(String),
}

/// A syntactically valid entity tag borrowed from a header value.
///
/// The wrapped string includes the optional `W/` prefix and both quotes,
/// exactly as it appeared on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityTag<'a>(&'a str);

impl<'a> EntityTag<'a> {
    /// Parses a complete entity tag.
    ///
    /// Surrounding whitespace is ignored; anything else after the closing
    /// quote is rejected.
    ///
    /// ```
    /// use conditional_core::EntityTag;
    ///
    /// let tag = EntityTag::parse("W/\"v1\"").unwrap();
    /// assert!(tag.is_weak());
    /// assert_eq!(tag.opaque(), "v1");
    ///
    /// assert!(EntityTag::parse("v1").is_err());
    /// assert!(EntityTag::parse("\"v1\" \"v2\"").is_err());
    /// ```
    pub fn parse(value: &'a str) -> Result<Self, InvalidEntityTag> {
        let (tag, remainder) = scan(value).ok_or(InvalidEntityTag::Malformed)?;
        if !remainder.is_empty() {
            return Err(InvalidEntityTag::TrailingCharacters(remainder.to_owned()));
        }
        Ok(tag)
    }

    /// The tag as it appeared on the wire, prefix and quotes included.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Returns `true` for `W/"..."` tags.
    pub fn is_weak(&self) -> bool {
        self.0.starts_with(WEAK_PREFIX)
    }

    /// Returns `true` for tags without the `W/` prefix.
    pub fn is_strong(&self) -> bool {
        !self.is_weak()
    }

    /// The opaque content between the quotes.
    pub fn opaque(&self) -> &'a str {
        let quoted = self.0.strip_prefix(WEAK_PREFIX).unwrap_or(self.0);
        &quoted[1..quoted.len() - 1]
    }

    /// Strong comparison against a response validator. See [`strong_match`].
    pub fn strong_match(&self, other: &str) -> bool {
        strong_match(self.0, other)
    }

    /// Weak comparison against a response validator. See [`weak_match`].
    pub fn weak_match(&self, other: &str) -> bool {
        weak_match(self.0, other)
    }
}

impl fmt::Display for EntityTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl AsRef<str> for EntityTag<'_> {
    fn as_ref(&self) -> &str {
        self.0
    }
}

/// Scans one entity tag from the start of `value`.
///
/// Leading and trailing whitespace is trimmed first. On success returns the
/// tag and whatever follows its closing quote. Returns `None` when `value`
/// does not start with a well-formed tag; callers treat that as the end of
/// input rather than as an error.
///
/// ```
/// use conditional_core::scan;
///
/// let (tag, rest) = scan("\"et1\" \"et2\"").unwrap();
/// assert_eq!(tag.as_str(), "\"et1\"");
/// assert_eq!(rest, " \"et2\"");
///
/// assert!(scan("bad").is_none());
/// ```
pub fn scan(value: &str) -> Option<(EntityTag<'_>, &str)> {
    let value = trim_ows(value);
    let bytes = value.as_bytes();
    let start = if value.starts_with(WEAK_PREFIX) {
        WEAK_PREFIX.len()
    } else {
        0
    };
    if bytes.len() < start + 2 || bytes[start] != b'"' {
        return None;
    }

    for (i, &c) in bytes.iter().enumerate().skip(start + 1) {
        match c {
            b'"' => return Some((EntityTag(&value[..=i]), &value[i + 1..])),
            c if is_etagc(c) => {}
            _ => return None,
        }
    }
    None
}

/// Strong comparison (RFC 7232 §2.3.2).
///
/// Both sides must be identical and `tag` must be a non-empty strong tag.
/// A weak tag never strongly matches anything, itself included.
pub fn strong_match(tag: &str, other: &str) -> bool {
    tag == other && tag.starts_with('"')
}

/// Weak comparison (RFC 7232 §2.3.2).
///
/// Equal once a leading `W/` is stripped from both sides. Two empty strings
/// are weakly equal.
pub fn weak_match(tag: &str, other: &str) -> bool {
    strip_weak(tag) == strip_weak(other)
}

/// One element of an `If-Match` / `If-None-Match` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListItem<'a> {
    /// The `*` wildcard.
    Any,
    /// An entity tag.
    Tag(EntityTag<'a>),
}

/// Iterator over the elements of a comma-separated entity-tag list.
///
/// Empty elements are skipped. Iteration ends at the end of input or at the
/// first token that is neither `*` nor a well-formed entity tag.
///
/// ```
/// use conditional_core::{ETagList, ListItem};
///
/// let items: Vec<_> = ETagList::new("\"a\", ,W/\"b\", *").collect();
/// assert_eq!(items.len(), 3);
/// assert_eq!(items[2], ListItem::Any);
///
/// // Garbage truncates the list.
/// assert_eq!(ETagList::new("\"a\", oops, \"b\"").count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ETagList<'a> {
    rest: &'a str,
}

impl<'a> ETagList<'a> {
    /// Creates an iterator over `value`.
    pub fn new(value: &'a str) -> Self {
        Self { rest: value }
    }
}

impl<'a> Iterator for ETagList<'a> {
    type Item = ListItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = trim_ows(self.rest);
            match rest.as_bytes().first() {
                None => break,
                Some(b',') => self.rest = &rest[1..],
                Some(b'*') => {
                    self.rest = &rest[1..];
                    return Some(ListItem::Any);
                }
                Some(_) => match scan(rest) {
                    Some((tag, remainder)) => {
                        self.rest = remainder;
                        return Some(ListItem::Tag(tag));
                    }
                    None => break,
                },
            }
        }
        self.rest = "";
        None
    }
}

impl FusedIterator for ETagList<'_> {}

fn strip_weak(tag: &str) -> &str {
    tag.strip_prefix(WEAK_PREFIX).unwrap_or(tag)
}

fn is_etagc(c: u8) -> bool {
    c == 0x21 || (0x23..=0x7E).contains(&c) || c >= 0x80
}

fn trim_ows(value: &str) -> &str {
    value.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_rejects_bad_tags() {
        assert_eq!(scan("bad"), None);
        assert_eq!(scan(""), None);
        assert_eq!(scan("\""), None);
        assert_eq!(scan("W/"), None);
        assert_eq!(scan("W/x"), None);
        assert_eq!(scan("\"unterminated"), None);
        assert_eq!(scan("\"has space\""), None);
        assert_eq!(scan("\"ctl\x07\""), None);
    }

    #[test]
    fn scan_strong_tag() {
        let (tag, rest) = scan("\"strong\"").unwrap();
        assert_eq!(tag.as_str(), "\"strong\"");
        assert!(tag.is_strong());
        assert_eq!(rest, "");
    }

    #[test]
    fn scan_weak_tag() {
        let (tag, rest) = scan("W/\"weak\"").unwrap();
        assert_eq!(tag.as_str(), "W/\"weak\"");
        assert!(tag.is_weak());
        assert_eq!(tag.opaque(), "weak");
        assert_eq!(rest, "");
    }

    #[test]
    fn scan_multiple_tags() {
        let (tag, rest) = scan("\"et1\" \"et2\"").unwrap();
        assert_eq!(tag.as_str(), "\"et1\"");
        assert_eq!(rest, " \"et2\"");

        let (tag, rest) = scan(rest).unwrap();
        assert_eq!(tag.as_str(), "\"et2\"");
        assert_eq!(rest, "");
    }

    #[test]
    fn scan_accepts_empty_and_obs_text_tags() {
        assert_eq!(scan("\"\"").unwrap().0.opaque(), "");
        assert_eq!(scan("  \"caf\u{e9}\"  ").unwrap().0.as_str(), "\"caf\u{e9}\"");
    }

    #[test]
    fn strong_comparison() {
        assert!(strong_match("\"strong\"", "\"strong\""));

        assert!(!strong_match("", ""));
        assert!(!strong_match("W/\"weak\"", "W/\"weak\""));
        assert!(!strong_match("W/\"weak\"", "\"weak\""));
        assert!(!strong_match("\"a\"", "\"b\""));
    }

    #[test]
    fn weak_comparison() {
        assert!(weak_match("\"strong\"", "\"strong\""));
        assert!(weak_match("W/\"weak\"", "W/\"weak\""));
        assert!(weak_match("W/\"weak\"", "\"weak\""));
        assert!(weak_match("\"x\"", "W/\"x\""));

        assert!(!weak_match("W/\"weak\"", "W/\"other\""));
        assert!(!weak_match("\"strong\"", "\"other\""));
    }

    // Both sides absent is a weak match on purpose: a missing validator on
    // either side compares as the empty string.
    #[test]
    fn weak_comparison_of_two_empty_tags_matches() {
        assert!(weak_match("", ""));
    }

    #[test]
    fn parse_requires_single_tag() {
        assert_eq!(EntityTag::parse(" \"v\" ").unwrap().as_str(), "\"v\"");
        assert_eq!(EntityTag::parse("v"), Err(InvalidEntityTag::Malformed));
        assert_eq!(
            EntityTag::parse("\"v\", \"w\""),
            Err(InvalidEntityTag::TrailingCharacters(", \"w\"".to_owned()))
        );
    }

    #[test]
    fn list_skips_empty_entries() {
        let items: Vec<_> = ETagList::new(" , \"a\",,\"b\" ,").collect();
        assert_eq!(
            items,
            vec![
                ListItem::Tag(EntityTag("\"a\"")),
                ListItem::Tag(EntityTag("\"b\"")),
            ]
        );
    }

    #[test]
    fn list_stops_at_garbage() {
        let mut items = ETagList::new("\"a\" junk \"b\"");
        assert_eq!(items.next(), Some(ListItem::Tag(EntityTag("\"a\""))));
        assert_eq!(items.next(), None);
        assert_eq!(items.next(), None);
    }

    #[test]
    fn list_yields_wildcard() {
        let items: Vec<_> = ETagList::new("*").collect();
        assert_eq!(items, vec![ListItem::Any]);
    }
}
