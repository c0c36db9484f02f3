//! Shared test helpers for integration tests

use urilex::{resolve_uri, Uri};

/// Parse a URI that the test knows to be valid
#[allow(dead_code)]
pub fn uri(text: &str) -> Uri {
    Uri::parse(text).unwrap_or_else(|e| panic!("bad test URI {text:?}: {e}"))
}

/// Resolve string parts against a base and return the display form
#[allow(dead_code)]
pub fn resolve_str(base: &str, parts: &[&str]) -> String {
    resolve_uri(&uri(base), parts.iter().copied())
        .map(|u| u.to_string())
        .unwrap_or_else(|e| format!("Error: {}", e))
}

/// Split a path into owned strings for easy comparison
#[allow(dead_code)]
pub fn split_str(path: &str) -> Vec<String> {
    urilex::split_uri_path(path)
        .map(|p| p.into_vec())
        .unwrap_or_else(|e| vec![format!("Error: {}", e)])
}
