//! Deepest directory shared by a set of URIs

use super::normalize_uri;
use crate::path::{join_path_parts, split_uri_path};
use crate::uri::{percent_decode, Uri};
use tracing::debug;

/// Find the deepest directory containing every URI in `uris`.
///
/// The result has the scheme and authority of the first URI, a path ending
/// in `/`, and no query or fragment. Segments are compared after percent
/// decoding; the result keeps the spelling of the first URI.
///
/// Returns `None` for an empty input, when schemes or authorities
/// disagree, when a path is not rooted, or when the paths share no root.
pub fn compute_common_base_directory<'a, I>(uris: I) -> Option<Uri>
where
    I: IntoIterator<Item = &'a Uri>,
{
    let mut uris = uris.into_iter();
    let first = normalize_uri(uris.next()?);
    let mut candidate = split_uri_path(first.path()).ok()?.dirname().into_vec();
    if candidate[0].is_empty() {
        return None;
    }

    for uri in uris {
        let uri = normalize_uri(uri);
        if uri.scheme() != first.scheme() || uri.authority() != first.authority() {
            debug!(first = %first, other = %uri, "scheme or authority differs");
            return None;
        }

        let dir = split_uri_path(uri.path()).ok()?.dirname();
        let shared = candidate
            .iter()
            .zip(dir.iter())
            .take_while(|(a, b)| a == b || percent_decode(a) == percent_decode(b))
            .count();
        if shared == 0 {
            debug!(first = %first, other = %uri, "no common root");
            return None;
        }
        if shared < candidate.len() {
            debug!(uri = %uri, depth = shared, "common base truncated");
            candidate.truncate(shared);
        }
    }

    let mut path = join_path_parts(&candidate);
    if !path.ends_with('/') {
        path.push('/');
    }
    Some(Uri::from_parts(first.scheme(), first.authority(), path, "", ""))
}
