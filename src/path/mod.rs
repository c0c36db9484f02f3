//! Lexical URI path handling
//!
//! Splits URI paths into a root marker plus segments and collapses `.` and
//! `..` segments without touching any filesystem.
//!
//! # Roots
//!
//! The first element of a [`PathParts`] is always the root marker:
//!
//! | Root     | Meaning                                        |
//! |----------|------------------------------------------------|
//! | `""`     | empty path                                     |
//! | `"/"`    | POSIX root                                     |
//! | `"/C:/"` | DOS drive, canonical form (uppercase, literal `:`) |
//!
//! A drive may be written `c:`, `c|`, `c%3a` or `c%7c` (any case), with or
//! without a leading and trailing separator. Every spelling is rewritten to
//! the canonical four-character root.
//!
//! # Example
//! ```
//! use urilex::path::{reduce_path, split_uri_path};
//!
//! let parts = split_uri_path("/c%3a/a").unwrap();
//! assert_eq!(parts.as_slice(), ["/C:/", "a"]);
//! assert_eq!(reduce_path("/a/b/../c/.").unwrap(), "/a/c/");
//! ```

use crate::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::LazyLock;

const DRIVE_MARKER: &str = r"(?-u:[a-z])(?::|\||%3a|%7c)";

static ROOT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:[\\/](?:{DRIVE_MARKER}[\\/]?)?|{DRIVE_MARKER}[\\/]?)"
    ))
    .expect("root regex is valid")
});

static DOT_SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:\.|%2e){1,2}$").expect("dot segment regex is valid"));

static DOT_DOT_SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:\.|%2e){2}$").expect("dot-dot segment regex is valid"));

static CANONICAL_DRIVE_ROOT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[A-Z]:/").expect("drive root regex is valid"));

/// The parts of the empty path: `[""]`
pub static EMPTY_PATH: LazyLock<PathParts> = LazyLock::new(|| PathParts(vec![String::new()]));

/// The parts of the POSIX root: `["/"]`
pub static POSIX_ROOT_PATH: LazyLock<PathParts> =
    LazyLock::new(|| PathParts(vec!["/".to_string()]));

/// A root marker followed by path segments
///
/// Segments may be empty (a trailing empty segment keeps a trailing slash)
/// and, before reduction, may be `.` or `..` in any of their spellings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PathParts(Vec<String>);

impl PathParts {
    /// Build parts from a root marker and segments
    pub fn new(root: impl Into<String>, segments: impl IntoIterator<Item = String>) -> Self {
        let mut parts = vec![root.into()];
        parts.extend(segments);
        Self(parts)
    }

    /// The root marker
    pub fn root(&self) -> &str {
        &self.0[0]
    }

    /// Everything after the root marker
    pub fn segments(&self) -> &[String] {
        &self.0[1..]
    }

    /// Whether the root marker denotes `/` or a drive
    pub fn is_rooted(&self) -> bool {
        !self.root().is_empty()
    }

    /// The parts as a plain slice, root first
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// These parts without their last segment. The root is never removed.
    pub fn dirname(&self) -> PathParts {
        let keep = self.0.len().saturating_sub(1).max(1);
        PathParts(self.0[..keep].to_vec())
    }

    /// Join back into a path string
    pub fn join(&self) -> String {
        join_path_parts(&self.0)
    }
}

impl Deref for PathParts {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for PathParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

impl From<Vec<String>> for PathParts {
    /// An empty vector becomes [`EMPTY_PATH`].
    fn from(parts: Vec<String>) -> Self {
        if parts.is_empty() {
            EMPTY_PATH.clone()
        } else {
            Self(parts)
        }
    }
}

/// Join a root marker and segments into a path string.
///
/// The root already carries its separator, so only the segments are
/// joined with `/`.
pub fn join_path_parts(parts: &[String]) -> String {
    match parts.split_first() {
        None => String::new(),
        Some((root, segments)) => {
            let mut path = root.clone();
            path.push_str(&segments.join("/"));
            path
        }
    }
}

/// Split a URI path into a root marker and segments.
///
/// Fails with [`Error::MalformedPath`] if the path is non-empty and starts
/// with neither a separator nor a drive letter.
pub fn split_uri_path(path: &str) -> Result<PathParts> {
    if path.is_empty() {
        return Ok(EMPTY_PATH.clone());
    }
    if path == "/" || path == "\\" {
        return Ok(POSIX_ROOT_PATH.clone());
    }

    let matched = ROOT_REGEX
        .find(path)
        .ok_or_else(|| Error::malformed_path(path))?;
    let root = canonical_root(matched.as_str());
    let rest = &path[matched.end()..];

    let mut parts = vec![root];
    if !rest.is_empty() {
        parts.extend(rest.split(['/', '\\']).map(str::to_string));
    }
    Ok(PathParts(parts))
}

/// Rewrite any drive spelling to `/X:/`; a lone separator becomes `/`.
fn canonical_root(root: &str) -> String {
    if root.len() == 1 {
        return "/".to_string();
    }
    let bytes = root.as_bytes();
    let letter = if bytes[0] == b'/' || bytes[0] == b'\\' {
        bytes[1]
    } else {
        bytes[0]
    };
    format!("/{}:/", (letter & !0x20) as char)
}

/// Whether a segment is `.` or `..` in any spelling
pub fn is_dot_segment(segment: &str) -> bool {
    DOT_SEGMENT_REGEX.is_match(segment)
}

fn is_dot_dot_segment(segment: &str) -> bool {
    DOT_DOT_SEGMENT_REGEX.is_match(segment)
}

/// Collapse `.` and `..` segments.
///
/// Returns `Cow::Borrowed(parts)` when there was nothing to collapse. A
/// `..` at the root is dropped. When the last segment processed was `.`
/// or `..`, an empty segment is appended so that the joined path keeps a
/// trailing slash.
pub fn reduce_path_parts(parts: &PathParts) -> Cow<'_, PathParts> {
    if parts.len() == 1 && (parts.root().is_empty() || parts.root() == "/") {
        return Cow::Borrowed(parts);
    }

    let mut output: Vec<String> = Vec::with_capacity(parts.len());
    output.push(parts.root().to_string());

    let mut changed = false;
    let mut last_was_dot = false;
    for segment in parts.segments() {
        if is_dot_dot_segment(segment) {
            if output.len() > 1 {
                output.pop();
            }
            changed = true;
            last_was_dot = true;
        } else if is_dot_segment(segment) {
            changed = true;
            last_was_dot = true;
        } else {
            output.push(segment.clone());
            last_was_dot = false;
        }
    }

    if !changed {
        return Cow::Borrowed(parts);
    }
    if last_was_dot {
        output.push(String::new());
    }
    Cow::Owned(PathParts(output))
}

/// Quick check for a path that reduction would leave untouched: a canonical
/// root, no backslashes, and no dot segments.
pub fn is_reduced_path_fast(path: &str) -> bool {
    if path.is_empty() || path == "/" {
        return true;
    }
    if !path.starts_with('/') || path.contains('\\') {
        return false;
    }
    if let Some(root) = ROOT_REGEX.find(path) {
        if root.len() > 1 && !CANONICAL_DRIVE_ROOT_REGEX.is_match(path) {
            return false;
        }
    }
    !path[1..].split('/').any(is_dot_segment)
}

/// Reduce a path string.
///
/// Already-reduced paths are returned as is; everything else goes through
/// [`split_uri_path`] and [`reduce_path_parts`], which also canonicalizes
/// drive roots and turns backslashes into slashes.
pub fn reduce_path(path: &str) -> Result<String> {
    if is_reduced_path_fast(path) {
        return Ok(path.to_string());
    }
    let parts = split_uri_path(path)?;
    Ok(reduce_path_parts(&parts).join())
}

/// Whether a path starts with a separator or a drive marker
pub fn is_rooted_path(path: &str) -> bool {
    path.starts_with('/') || path.starts_with('\\') || ROOT_REGEX.is_match(path)
}
