//! URI value type
//!
//! A five-component URI (`scheme`, `authority`, `path`, `query`, `fragment`)
//! parsed with the RFC 3986 Appendix B expression and validated strictly.
//!
//! Components are kept exactly as written: nothing is percent-decoded on the
//! way in and nothing is re-encoded on the way out, so `Uri::parse(s)?.to_string()`
//! gives back `s` for every URI whose authority marker is implied by its
//! components (see [`Uri::has_authority_marker`]).
//!
//! # Example
//! ```
//! use urilex::Uri;
//!
//! let uri = Uri::parse("file:///c%3A/src/main.js?x#L10").unwrap();
//! assert_eq!(uri.scheme(), "file");
//! assert_eq!(uri.authority(), "");
//! assert_eq!(uri.path(), "/c%3A/src/main.js");
//! assert_eq!(uri.query(), "x");
//! assert_eq!(uri.fragment(), "L10");
//! ```

use crate::error::{Error, Result, UriErrorKind};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// RFC 3986 Appendix B
static URI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$")
        .expect("URI regex is valid")
});

static SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*$").expect("scheme regex is valid"));

// Two or more scheme characters: `c:` is a drive, not a scheme.
static URI_STRING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]+:").expect("URI string regex is valid")
});

/// An immutable URI
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Uri {
    scheme: String,
    authority: String,
    path: String,
    query: String,
    fragment: String,
}

impl Uri {
    /// Parse a URI string, rejecting anything that is not an absolute URI
    pub fn parse(input: &str) -> Result<Self> {
        let caps = URI_REGEX
            .captures(input)
            .ok_or_else(|| Error::invalid_uri(input, UriErrorKind::MissingScheme))?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());

        let uri = Uri {
            scheme: group(1).to_string(),
            authority: group(2).to_string(),
            path: group(3).to_string(),
            query: group(4).to_string(),
            fragment: group(5).to_string(),
        };
        uri.validate(input, caps.get(2).is_some())?;
        Ok(uri)
    }

    /// Build a URI from raw components without validation
    pub fn from_parts(
        scheme: impl Into<String>,
        authority: impl Into<String>,
        path: impl Into<String>,
        query: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            authority: authority.into(),
            path: path.into(),
            query: query.into(),
            fragment: fragment.into(),
        }
    }

    fn validate(&self, input: &str, has_authority: bool) -> Result<()> {
        if self.scheme.is_empty() {
            return Err(Error::invalid_uri(input, UriErrorKind::MissingScheme));
        }
        if !SCHEME_REGEX.is_match(&self.scheme) {
            return Err(Error::invalid_uri(input, UriErrorKind::InvalidScheme));
        }
        if has_authority {
            if !self.path.is_empty() && !self.path.starts_with('/') {
                return Err(Error::invalid_uri(input, UriErrorKind::AuthorityPath));
            }
        } else if self.path.starts_with("//") {
            return Err(Error::invalid_uri(input, UriErrorKind::DoubleSlashPath));
        }
        Ok(())
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Whether the display form carries `//` after the scheme.
    ///
    /// True when the authority is non-empty, or for `file` URIs, which are
    /// always written with an (possibly empty) authority.
    pub fn has_authority_marker(&self) -> bool {
        !self.authority.is_empty() || self.scheme.eq_ignore_ascii_case("file")
    }

    pub fn with_scheme(&self, scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            ..self.clone()
        }
    }

    pub fn with_authority(&self, authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
            ..self.clone()
        }
    }

    pub fn with_path(&self, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..self.clone()
        }
    }

    pub fn with_query(&self, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..self.clone()
        }
    }

    pub fn with_fragment(&self, fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            ..self.clone()
        }
    }

    /// Resolve a single reference against this URI
    pub fn resolve(&self, part: impl Into<crate::resolve::UriPart>) -> Result<Uri> {
        let part: crate::resolve::UriPart = part.into();
        crate::resolve::resolve_uri(self, [part])
    }

    /// This URI with its path lexically reduced
    pub fn normalize(&self) -> Uri {
        crate::resolve::normalize_uri(self)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme)?;
        if self.has_authority_marker() {
            write!(f, "//{}", self.authority)?;
        }
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }
        Ok(())
    }
}

impl FromStr for Uri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uri::parse(s)
    }
}

impl Serialize for Uri {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Uri::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Whether `text` starts with a scheme and so names an absolute URI
/// rather than a relative reference.
pub fn is_uri_string(text: &str) -> bool {
    URI_STRING_REGEX.is_match(text)
}

/// Decode `%XX` escapes. Malformed escapes are kept as written and invalid
/// UTF-8 is replaced.
pub fn percent_decode(s: &str) -> String {
    if !s.contains('%') {
        return s.to_string();
    }
    let mut result = Vec::with_capacity(s.len());
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(h), Some(l)) = (hex_to_nibble(bytes[i + 1]), hex_to_nibble(bytes[i + 2])) {
                result.push((h << 4) | l);
                i += 3;
                continue;
            }
        }
        result.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&result).into_owned()
}

fn hex_to_nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components() {
        let uri = Uri::parse("http://user@host:8080/a/b?q=1#frag").unwrap();
        assert_eq!(uri.scheme(), "http");
        assert_eq!(uri.authority(), "user@host:8080");
        assert_eq!(uri.path(), "/a/b");
        assert_eq!(uri.query(), "q=1");
        assert_eq!(uri.fragment(), "frag");
    }

    #[test]
    fn test_display_round_trip() {
        for text in [
            "file:///a/b/",
            "file:///c%3A/x",
            "http://a/b?c#d",
            "foo:a/b/.",
            "bar:",
            "urn:isbn:0451450523",
            "untitled:Untitled-1",
        ] {
            assert_eq!(Uri::parse(text).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_file_scheme_keeps_authority_marker() {
        let uri = Uri::parse("file://").unwrap();
        assert_eq!(uri.path(), "");
        assert!(uri.has_authority_marker());
        assert_eq!(uri.to_string(), "file://");
    }

    #[test]
    fn test_strict_rejections() {
        let missing = Uri::parse("/just/a/path").unwrap_err();
        assert!(matches!(missing, Error::InvalidUri { kind: UriErrorKind::MissingScheme, .. }));

        let scheme = Uri::parse("1abc:/x").unwrap_err();
        assert!(matches!(scheme, Error::InvalidUri { kind: UriErrorKind::InvalidScheme, .. }));
    }

    #[test]
    fn test_with_overrides() {
        let uri = Uri::parse("http://a/b?c#d").unwrap();
        let changed = uri.with_authority("x").with_query("").with_fragment("");
        assert_eq!(changed.to_string(), "http://x/b");
        assert_eq!(uri.to_string(), "http://a/b?c#d");

        let file = uri.with_scheme("file").with_authority("");
        assert_eq!(file.to_string(), "file:///b?c#d");
        assert_eq!(file.with_scheme("untitled").to_string(), "untitled:/b?c#d");
    }

    #[test]
    fn test_is_uri_string() {
        assert!(is_uri_string("file:///a"));
        assert!(is_uri_string("bar:"));
        assert!(is_uri_string("git+ssh://host/x"));
        assert!(!is_uri_string("c:/windows"));
        assert!(!is_uri_string("../a:b"));
        assert!(!is_uri_string("//host/a"));
        assert!(!is_uri_string("?q"));
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("a%20b"), "a b");
        assert_eq!(percent_decode("%3a%3A"), "::");
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
        assert_eq!(percent_decode("caf%C3%A9"), "café");
    }

    #[test]
    fn test_serde_as_string() {
        let uri = Uri::parse("file:///a/b").unwrap();
        let json = serde_json::to_string(&uri).unwrap();
        assert_eq!(json, "\"file:///a/b\"");
        let back: Uri = serde_json::from_str(&json).unwrap();
        assert_eq!(back, uri);
        assert!(serde_json::from_str::<Uri>("\"no scheme\"").is_err());
    }
}
