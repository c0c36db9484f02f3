//! URI reference resolution
//!
//! [`resolve_uri`] combines a base URI with any number of references,
//! following the RFC 3986 §5.2 transform with lexical path reduction from
//! [`crate::path`]:
//!
//! - a part that is a full URI (see [`is_uri_string`]) replaces the base,
//! - a network-path reference (`//host/...`) replaces authority and path,
//! - a path replaces or merges with the current path,
//! - a query or fragment replaces the current one.
//!
//! Only rooted paths are reduced. Opaque paths such as the `a/b/.` in
//! `foo:a/b/.` are carried through verbatim.
//!
//! # Example
//! ```
//! use urilex::{resolve_uri, Uri};
//!
//! let base = Uri::parse("file:///a/b/").unwrap();
//! let resolved = resolve_uri(&base, ["../../c"]).unwrap();
//! assert_eq!(resolved.to_string(), "file:///c");
//! ```

mod common;
mod relative;

pub use common::compute_common_base_directory;
pub use relative::{relative_path_parts, relative_uri_fragment};

use crate::error::Result;
use crate::path::{is_rooted_path, reduce_path};
use crate::uri::{is_uri_string, Uri};
use tracing::{debug, trace};

/// Scheme used to parse relative references into components
const REFERENCE_SCHEME: &str = "urilex-ref";

/// One reference handed to [`resolve_uri`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriPart {
    /// A URI reference in string form, absolute or relative
    Str(String),
    /// An already-parsed URI, which always replaces the base
    Uri(Uri),
}

impl From<&str> for UriPart {
    fn from(s: &str) -> Self {
        UriPart::Str(s.to_string())
    }
}

impl From<String> for UriPart {
    fn from(s: String) -> Self {
        UriPart::Str(s)
    }
}

impl From<&String> for UriPart {
    fn from(s: &String) -> Self {
        UriPart::Str(s.clone())
    }
}

impl From<Uri> for UriPart {
    fn from(uri: Uri) -> Self {
        UriPart::Uri(uri)
    }
}

impl From<&Uri> for UriPart {
    fn from(uri: &Uri) -> Self {
        UriPart::Uri(uri.clone())
    }
}

/// Components carried from part to part during resolution
struct Target {
    base: Uri,
    authority: String,
    path: String,
    query: String,
    fragment: String,
}

impl Target {
    fn from_base(base: Uri) -> Self {
        let path = reduce_uri_path(base.path(), base.has_authority_marker());
        Self {
            authority: base.authority().to_string(),
            query: base.query().to_string(),
            fragment: base.fragment().to_string(),
            path,
            base,
        }
    }

    fn apply_reference(&mut self, reference: &str) -> Result<()> {
        let local = Uri::parse(&format!("{REFERENCE_SCHEME}:{reference}"))?;

        if reference.starts_with("//") {
            trace!(reference, "network-path reference");
            self.authority = local.authority().to_string();
            self.path = reduce_uri_path(local.path(), true);
            self.query = local.query().to_string();
            self.fragment = local.fragment().to_string();
        } else if !local.path().is_empty() {
            if !is_rooted_path(&self.path) || is_rooted_path(local.path()) {
                trace!(reference, "path reference replaces path");
                self.path = reduce_uri_path(local.path(), false);
            } else {
                trace!(reference, base = %self.path, "path reference merges with path");
                let dir_end = self.path.rfind(['/', '\\']).map_or(0, |i| i + 1);
                let merged = format!("{}{}", &self.path[..dir_end], local.path());
                self.path = reduce_uri_path(&merged, false);
            }
            self.query = local.query().to_string();
            self.fragment = local.fragment().to_string();
        } else if !local.query().is_empty() {
            self.query = local.query().to_string();
            self.fragment = local.fragment().to_string();
        } else if !local.fragment().is_empty() {
            self.fragment = local.fragment().to_string();
        }
        Ok(())
    }

    fn finish(self) -> Uri {
        Uri::from_parts(
            self.base.scheme(),
            self.authority,
            self.path,
            self.query,
            self.fragment,
        )
    }
}

/// Resolve `parts` against `base`, left to right.
///
/// Fails only if a string part names an absolute URI that does not pass
/// strict parsing.
pub fn resolve_uri<I>(base: &Uri, parts: I) -> Result<Uri>
where
    I: IntoIterator,
    I::Item: Into<UriPart>,
{
    let mut target = Target::from_base(base.clone());

    for part in parts {
        match part.into() {
            UriPart::Uri(uri) => {
                debug!(uri = %uri, "URI part replaces base");
                target = Target::from_base(uri);
            }
            UriPart::Str(text) if is_uri_string(&text) => {
                debug!(uri = %text, "absolute URI string replaces base");
                target = Target::from_base(Uri::parse(&text)?);
            }
            UriPart::Str(text) => target.apply_reference(&text)?,
        }
    }

    Ok(target.finish())
}

/// `uri` with its path reduced and everything else untouched
pub fn normalize_uri(uri: &Uri) -> Uri {
    let path = reduce_uri_path(uri.path(), uri.has_authority_marker());
    if path == uri.path() {
        uri.clone()
    } else {
        uri.with_path(path)
    }
}

/// Reduce a URI path if it is rooted. An empty path under an authority
/// becomes `/`.
fn reduce_uri_path(path: &str, has_authority_marker: bool) -> String {
    if path.is_empty() {
        return if has_authority_marker { "/" } else { "" }.to_string();
    }
    if !is_rooted_path(path) {
        return path.to_string();
    }
    match reduce_path(path) {
        Ok(reduced) => reduced,
        Err(err) => {
            debug!(path, %err, "path left unreduced");
            path.to_string()
        }
    }
}
