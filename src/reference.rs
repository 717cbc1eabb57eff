//! Reference specification parsing.
//!
//! A reference specification ("spec") is a URI reference of the form
//!
//! ```text
//! [scheme://[userinfo@]host/path[?query]]#fragment
//! [scheme:opaque[?query]]#fragment
//! ```
//!
//! where everything except `#fragment` is optional. The part before `#`
//! identifies a document (the *document key* handed to providers); the
//! fragment is a JSON Pointer into that document.
//!
//! # Example
//!
//! ```
//! use jsref::Reference;
//!
//! let reference = Reference::parse("file:///schemas/user.json#/properties/id").unwrap();
//! assert_eq!(reference.scheme(), Some("file"));
//! assert_eq!(reference.document_key(), "file:///schemas/user.json");
//! assert_eq!(reference.pointer(), "/properties/id");
//! ```

use std::fmt;

use crate::error::{ResolveError, Result};

/// A parsed reference specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    scheme: Option<String>,
    authority: Option<String>,
    path: String,
    query: Option<String>,
    fragment: Option<String>,
    pointer: String,
}

impl Reference {
    /// Parse a reference specification.
    ///
    /// A spec without a scheme and without `#` (for example `foo`) is a
    /// relative document reference: the whole text is the document key and
    /// the pointer is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MalformedSpec`] for ASCII control characters,
    /// a missing or invalid scheme, a space in the authority, or invalid
    /// percent-escapes. Spaces elsewhere (path, query, fragment) are kept.
    pub fn parse(spec: &str) -> Result<Self> {
        let malformed = |message: &str| ResolveError::MalformedSpec {
            spec: spec.to_string(),
            message: message.to_string(),
        };

        if spec.chars().any(|c| c.is_ascii_control()) {
            return Err(malformed("contains a control character"));
        }

        let (rest, fragment) = match spec.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment)),
            None => (spec, None),
        };

        let (scheme, rest) = split_scheme(rest).map_err(malformed)?;

        let (authority, rest) = match rest.strip_prefix("//") {
            Some(after) => {
                let end = after.find(['/', '?']).unwrap_or(after.len());
                let authority = &after[..end];
                if authority.contains(' ') {
                    return Err(malformed("invalid character ' ' in host name"));
                }
                (Some(authority), &after[end..])
            }
            None => (None, rest),
        };

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };

        for component in [Some(path), query, authority].into_iter().flatten() {
            percent_decode(component).map_err(malformed)?;
        }

        let pointer = match fragment {
            Some(fragment) => percent_decode(fragment).map_err(malformed)?,
            None => String::new(),
        };

        Ok(Self {
            scheme: scheme.map(str::to_string),
            authority: authority.map(str::to_string),
            path: path.to_string(),
            query: query.map(str::to_string),
            fragment: fragment.map(str::to_string),
            pointer,
        })
    }

    /// The URI scheme, if any (as written, not lowercased).
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Whether the scheme matches `scheme`, ignoring ASCII case.
    pub fn has_scheme(&self, scheme: &str) -> bool {
        self.scheme
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(scheme))
    }

    /// The authority (`[userinfo@]host[:port]`), if a `//` was present.
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// The raw path (or opaque part).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The path with percent-escapes decoded.
    pub fn decoded_path(&self) -> String {
        // Validated during parsing.
        percent_decode(&self.path).unwrap_or_else(|_| self.path.clone())
    }

    /// The raw query, if a `?` was present.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The raw fragment, if a `#` was present.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// The decoded JSON Pointer carried by the fragment.
    pub fn pointer(&self) -> &str {
        &self.pointer
    }

    /// Everything except the fragment, as written.
    ///
    /// Providers look documents up by this key. Two specs that differ only
    /// in their fragment share a document key.
    pub fn document_key(&self) -> String {
        let mut key = String::new();
        if let Some(scheme) = &self.scheme {
            key.push_str(scheme);
            key.push(':');
        }
        if let Some(authority) = &self.authority {
            key.push_str("//");
            key.push_str(authority);
        }
        key.push_str(&self.path);
        if let Some(query) = &self.query {
            key.push('?');
            key.push_str(query);
        }
        key
    }

    /// Whether the spec addresses a document other than the current one.
    pub fn is_external(&self) -> bool {
        self.scheme.is_some()
            || self.authority.is_some()
            || !self.path.is_empty()
            || self.query.is_some()
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.document_key())?;
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

/// Splits `scheme:` off the front of a fragment-less reference.
fn split_scheme(input: &str) -> std::result::Result<(Option<&str>, &str), &'static str> {
    let Some(colon) = input.find(':') else {
        return Ok((None, input));
    };

    // A ':' after the first '/' or '?' belongs to the path or query.
    if input[..colon].contains(['/', '?']) {
        return Ok((None, input));
    }

    if colon == 0 {
        return Err("missing protocol scheme");
    }

    let candidate = &input[..colon];
    let mut chars = candidate.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if !valid {
        return Err("first path segment in URL cannot contain colon");
    }

    Ok((Some(candidate), &input[colon + 1..]))
}

/// Decodes `%XX` escapes, rejecting malformed escapes and invalid UTF-8.
fn percent_decode(input: &str) -> std::result::Result<String, &'static str> {
    if !input.contains('%') {
        return Ok(input.to_string());
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).and_then(|b| (*b as char).to_digit(16));
            let lo = bytes.get(i + 2).and_then(|b| (*b as char).to_digit(16));
            match (hi, lo) {
                (Some(hi), Some(lo)) => out.push((hi * 16 + lo) as u8),
                _ => return Err("invalid percent-escape"),
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).map_err(|_| "percent-escape decodes to invalid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_fragment() {
        let r = Reference::parse("#/foo/0").unwrap();
        assert_eq!(r.scheme(), None);
        assert_eq!(r.document_key(), "");
        assert_eq!(r.pointer(), "/foo/0");
        assert!(!r.is_external());
    }

    #[test]
    fn lone_hash_is_whole_document() {
        let r = Reference::parse("#").unwrap();
        assert_eq!(r.fragment(), Some(""));
        assert_eq!(r.pointer(), "");
        assert!(!r.is_external());
    }

    #[test]
    fn relative_name_with_fragment() {
        let r = Reference::parse("obj2#/sub").unwrap();
        assert_eq!(r.path(), "obj2");
        assert_eq!(r.document_key(), "obj2");
        assert_eq!(r.pointer(), "/sub");
        assert!(r.is_external());
    }

    #[test]
    fn bare_identifier_is_a_document_key() {
        let r = Reference::parse("foo").unwrap();
        assert_eq!(r.document_key(), "foo");
        assert_eq!(r.fragment(), None);
        assert_eq!(r.pointer(), "");
    }

    #[test]
    fn hierarchical_uri() {
        let r =
            Reference::parse("https://user@example.com:8080/schemas/a.json?v=2#/defs/x").unwrap();
        assert_eq!(r.scheme(), Some("https"));
        assert_eq!(r.authority(), Some("user@example.com:8080"));
        assert_eq!(r.path(), "/schemas/a.json");
        assert_eq!(r.query(), Some("v=2"));
        assert_eq!(
            r.document_key(),
            "https://user@example.com:8080/schemas/a.json?v=2"
        );
        assert_eq!(r.pointer(), "/defs/x");
    }

    #[test]
    fn file_uri_with_empty_authority() {
        let r = Reference::parse("file:///obj2#/sub").unwrap();
        assert!(r.has_scheme("FILE"));
        assert_eq!(r.authority(), Some(""));
        assert_eq!(r.path(), "/obj2");
        assert_eq!(r.document_key(), "file:///obj2");
    }

    #[test]
    fn opaque_uri() {
        let r = Reference::parse("urn:example:schema?x=1#/a").unwrap();
        assert_eq!(r.scheme(), Some("urn"));
        assert_eq!(r.authority(), None);
        assert_eq!(r.path(), "example:schema");
        assert_eq!(r.document_key(), "urn:example:schema?x=1");
    }

    #[test]
    fn colon_after_slash_is_path() {
        let r = Reference::parse("dir/a:b.json#/x").unwrap();
        assert_eq!(r.scheme(), None);
        assert_eq!(r.path(), "dir/a:b.json");
    }

    #[test]
    fn fragment_is_percent_decoded() {
        let r = Reference::parse("#/a%20b/c%7Ed").unwrap();
        assert_eq!(r.fragment(), Some("/a%20b/c%7Ed"));
        assert_eq!(r.pointer(), "/a b/c~d");
    }

    #[test]
    fn decoded_path() {
        let r = Reference::parse("file:///my%20docs/a.json").unwrap();
        assert_eq!(r.decoded_path(), "/my docs/a.json");
    }

    #[test]
    fn display_round_trips_spec() {
        for spec in ["obj2#/sub", "file:///obj2#/sub", "#", "foo", "http://h/p?q#/x"] {
            assert_eq!(Reference::parse(spec).unwrap().to_string(), spec);
        }
    }

    #[test]
    fn rejects_missing_scheme() {
        let err = Reference::parse("://example.com/x#/a").unwrap_err();
        assert!(err.to_string().contains("missing protocol scheme"));
    }

    #[test]
    fn rejects_invalid_scheme() {
        assert!(Reference::parse("1abc:def#/a").is_err());
        assert!(Reference::parse("a b:c").is_err());
    }

    #[test]
    fn rejects_bad_escapes() {
        assert!(matches!(
            Reference::parse("#/foo%zz"),
            Err(ResolveError::MalformedSpec { .. })
        ));
        assert!(Reference::parse("obj%2#/a").is_err());
        assert!(Reference::parse("#/%ff").is_err());
    }

    #[test]
    fn rejects_control_characters() {
        assert!(Reference::parse("obj\n2#/a").is_err());
    }

    #[test]
    fn rejects_ascii_control_characters_only() {
        assert!(Reference::parse("#/a\u{7f}").is_err());
        assert!(Reference::parse("#/a\tb").is_err());

        let r = Reference::parse("#/a\u{85}b").unwrap();
        assert_eq!(r.pointer(), "/a\u{85}b");
    }

    #[test]
    fn spaces_outside_authority_are_kept() {
        let r = Reference::parse("#/a b").unwrap();
        assert_eq!(r.pointer(), "/a b");

        let r = Reference::parse("my docs/a.json?q=x y#/k").unwrap();
        assert_eq!(r.path(), "my docs/a.json");
        assert_eq!(r.query(), Some("x y"));
    }

    #[test]
    fn rejects_space_in_host() {
        assert!(Reference::parse("http://exa mple.com/a").is_err());
    }
}
