//! Shortest reference from one URI to another

use super::normalize_uri;
use crate::path::{is_rooted_path, split_uri_path, PathParts};
use crate::uri::Uri;
use tracing::trace;

/// Compute a reference that resolves against `from` to give `to`.
///
/// Both URIs are normalized first. Falls back to the full form of `to`
/// whenever no shorter reference exists (different schemes, opaque paths).
/// An empty string means the two URIs are equal.
pub fn relative_uri_fragment(from: &Uri, to: &Uri) -> String {
    let from = normalize_uri(from);
    let to = normalize_uri(to);

    if from.scheme() != to.scheme() {
        trace!(from = %from, to = %to, "schemes differ");
        return to.to_string();
    }

    if from.authority() != to.authority() {
        if !to.path().is_empty() && !to.path().starts_with('/') {
            return to.to_string();
        }
        let reference = format!("//{}{}", to.authority(), to.path());
        return with_suffix(reference, &to);
    }

    if from.path() != to.path() {
        return path_reference(&from, &to).unwrap_or_else(|| {
            trace!(from = %from, to = %to, "no relative path");
            to.to_string()
        });
    }

    if from.query() != to.query() {
        if !to.query().is_empty() {
            return with_suffix(String::new(), &to);
        }
        return same_document_reference(&to);
    }

    if from.fragment() != to.fragment() {
        if !to.fragment().is_empty() {
            return format!("#{}", to.fragment());
        }
        return same_document_reference(&to);
    }

    String::new()
}

/// Segments leading from the directory of `from` to `to`.
///
/// The result climbs with `..` out of the part of `from`'s directory not
/// shared with `to`'s directory, then descends into the rest of `to`. It
/// always ends with `to`'s final segment. Returns `None` when the two
/// paths do not share a root.
pub fn relative_path_parts(from: &PathParts, to: &PathParts) -> Option<Vec<String>> {
    let from_dir = from.dirname();
    let to_dir = to.dirname();

    let common = from_dir
        .iter()
        .zip(to_dir.iter())
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return None;
    }

    let mut parts = vec!["..".to_string(); from_dir.len() - common];
    parts.extend(to[common..].iter().cloned());
    Some(parts)
}

fn path_reference(from: &Uri, to: &Uri) -> Option<String> {
    if !from.path().starts_with('/') || !to.path().starts_with('/') {
        return None;
    }
    let from_parts = split_uri_path(from.path()).ok()?;
    let to_parts = split_uri_path(to.path()).ok()?;

    let reference = match relative_path_parts(&from_parts, &to_parts) {
        Some(parts) => format_relative_path(&parts),
        // `//` would be read as an authority
        None if to.path().starts_with("//") => return None,
        None => to.path().to_string(),
    };
    Some(with_suffix(reference, to))
}

/// Join relative segments so the result cannot be mistaken for an
/// absolute path, a scheme, or an empty reference.
fn format_relative_path(parts: &[String]) -> String {
    let joined = parts.join("/");
    if joined.is_empty() {
        return ".".to_string();
    }
    let first = parts.first().map_or("", String::as_str);
    if joined.starts_with('/') || first.contains(':') || is_rooted_path(first) {
        return format!("./{joined}");
    }
    joined
}

/// A path reference to the document `to` names, used to drop a query or
/// fragment that a bare `?`/`#` reference cannot clear.
fn same_document_reference(to: &Uri) -> String {
    if !to.path().starts_with('/') {
        return to.to_string();
    }
    let last = to.path().rsplit('/').next().unwrap_or_default();
    let reference = format_relative_path(&[last.to_string()]);
    with_suffix(reference, to)
}

fn with_suffix(mut reference: String, uri: &Uri) -> String {
    if !uri.query().is_empty() {
        reference.push('?');
        reference.push_str(uri.query());
    }
    if !uri.fragment().is_empty() {
        reference.push('#');
        reference.push_str(uri.fragment());
    }
    reference
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve_uri;
    use pretty_assertions::assert_eq;

    fn relative(from: &str, to: &str) -> String {
        relative_uri_fragment(&Uri::parse(from).unwrap(), &Uri::parse(to).unwrap())
    }

    fn parts(path: &str) -> PathParts {
        split_uri_path(path).unwrap()
    }

    #[test]
    fn test_relative_path_parts() {
        assert_eq!(
            relative_path_parts(&parts("/a/b/c"), &parts("/a/d/e")).unwrap(),
            ["..", "d", "e"]
        );
        assert_eq!(relative_path_parts(&parts("/a/b"), &parts("/a/c")).unwrap(), ["c"]);
        assert_eq!(
            relative_path_parts(&parts("/a/b/c"), &parts("/a/b")).unwrap(),
            ["..", "b"]
        );
        assert_eq!(
            relative_path_parts(&parts("/a/b"), &parts("/a/")).unwrap(),
            [""]
        );
        assert!(relative_path_parts(&parts("/C:/a"), &parts("/D:/a")).is_none());
    }

    #[test]
    fn test_relative_equal() {
        assert_eq!(relative("file:///a/b", "file:///a/./b"), "");
    }

    #[test]
    fn test_relative_scheme_differs() {
        assert_eq!(relative("file:///a", "http://h/a"), "http://h/a");
    }

    #[test]
    fn test_relative_authority_differs() {
        assert_eq!(relative("http://a/x", "http://b/y?q#f"), "//b/y?q#f");
        assert_eq!(relative("file://host/x", "file:///x"), "///x");
    }

    #[test]
    fn test_relative_paths() {
        assert_eq!(relative("file:///a/b/c", "file:///a/d"), "../d");
        assert_eq!(relative("file:///a/b", "file:///a/c"), "c");
        assert_eq!(relative("file:///a/b", "file:///a/"), ".");
        assert_eq!(relative("file:///a/b/c", "file:///a/"), "../");
        assert_eq!(relative("file:///a/b", "file:///"), "..");
        assert_eq!(relative("file:///a/b/c", "file:///"), "../..");
        assert_eq!(relative("file:///a/x", "file:///a/b:c"), "./b:c");
        assert_eq!(relative("file:///a/x", "file:///a//b"), ".//b");
        assert_eq!(relative("file:///a/x", "file:///a/c|"), "./c|");
        assert_eq!(relative("file:///a/x", "file:///a/c%3a"), "./c%3a");
        assert_eq!(relative("file:///a/x", "file:///a/b%7Cx/y"), "./b%7Cx/y");
        assert_eq!(relative("file:///a/b/x", "file:///a/c%7C"), "../c%7C");
        assert_eq!(relative("file:///C:/a", "file:///D:/b"), "/D:/b");
    }

    #[test]
    fn test_relative_opaque_paths() {
        assert_eq!(relative("foo:a/b", "foo:a/c"), "foo:a/c");
    }

    #[test]
    fn test_relative_query_and_fragment() {
        assert_eq!(relative("http://h/a?x", "http://h/a?y#z"), "?y#z");
        assert_eq!(relative("http://h/a?x#y", "http://h/a?x#z"), "#z");
        assert_eq!(relative("http://h/a?x", "http://h/a"), "a");
        assert_eq!(relative("http://h/a/#x", "http://h/a/"), ".");
        assert_eq!(relative("http://h/a?q#x", "http://h/a?q"), "a?q");
        assert_eq!(relative("http://h/a/c|?q", "http://h/a/c|"), "./c|");
    }

    #[test]
    fn test_relative_round_trip() {
        let uris = [
            "file:///a/b/c",
            "file:///a/b/",
            "file:///a/",
            "file:///",
            "file:///a/d/e.js",
            "file:///a/x:y",
            "file:///a//b",
            "file:///a/c|",
            "file:///a/c%3a",
            "file:///a/c%7C?q",
            "file:///C:/w/x",
            "file:///D:/",
            "file://host/a/b",
            "file:///a/b/c?q",
            "file:///a/b/c#f",
            "file:///a/b/c?q#f",
        ];
        for from in uris {
            for to in uris {
                let from = Uri::parse(from).unwrap();
                let to = Uri::parse(to).unwrap();
                let fragment = relative_uri_fragment(&from, &to);
                let resolved = resolve_uri(&from, [fragment.as_str()]).unwrap();
                assert_eq!(
                    resolved.to_string(),
                    normalize_uri(&to).to_string(),
                    "{from} -> {to} via {fragment:?}"
                );
            }
        }
    }
}
