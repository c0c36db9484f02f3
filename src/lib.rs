//! Urilex: lexical URI reference resolution
//!
//! Urilex resolves URI references the way RFC 3986 §5.2 describes, entirely
//! at the string level, with extra care for paths that editor tooling meets
//! in `file:` URIs: Windows drive letters in any of their spellings
//! (`c:`, `C|`, `c%3A`, `c%7c`), backslash separators, and percent-encoded
//! dot segments.
//!
//! # Features
//!
//! - **Path reduction**: `.` and `..` collapse lexically, trailing slashes survive
//! - **Drive normalization**: every drive spelling becomes `/X:/`
//! - **Reference resolution**: scheme, authority, path, query and fragment overrides
//! - **Relative references**: the shortest reference from one URI to another
//! - **Common base directory**: the deepest directory shared by a set of URIs
//! - **Range map**: containment queries over source ranges
//!
//! # Quick Start
//!
//! ```
//! use urilex::{relative_uri_fragment, resolve_uri, Uri};
//!
//! fn main() -> urilex::Result<()> {
//!     let base = Uri::parse("file:///c%3A/src/lib/")?;
//!     let target = resolve_uri(&base, ["../main.js"])?;
//!     assert_eq!(target.to_string(), "file:///C:/src/main.js");
//!
//!     let back = relative_uri_fragment(&target, &base);
//!     assert_eq!(back, "lib/");
//!     Ok(())
//! }
//! ```
//!
//! # Module Overview
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`uri`] | [`Uri`] value type, strict parsing, [`is_uri_string`](uri::is_uri_string) |
//! | [`path`] | [`PathParts`](path::PathParts), splitting and reduction |
//! | [`resolve`] | [`resolve_uri`], [`relative_uri_fragment`], [`compute_common_base_directory`] |
//! | [`range_map`] | [`RangeMap`](range_map::RangeMap) over source positions |

pub mod path;
pub mod range_map;
pub mod resolve;
pub mod uri;

mod error;

pub use error::{messages, Error, Result, UriErrorKind};
pub use path::{reduce_path, split_uri_path, PathParts};
pub use resolve::{
    compute_common_base_directory, normalize_uri, relative_uri_fragment, resolve_uri, UriPart,
};
pub use uri::Uri;

/// Urilex version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
