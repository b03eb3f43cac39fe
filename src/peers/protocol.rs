//! Peer Wire Protocol
//!
//! A value is requested with `GET {base_path}{group}/{key}`, each segment
//! percent-escaped on its own. The body of a successful response is the raw
//! value with content type `application/octet-stream`.
//!
//! | Outcome | Status |
//! |---|---|
//! | value found or loaded | `200 OK` |
//! | unknown group | `404 Not Found` |
//! | empty key, bad prefix, missing segment | `400 Bad Request` |
//! | load failure | `500 Internal Server Error` |

use url::Url;

use crate::error::CacheError;

/// Prefix under which peers serve each other.
pub const DEFAULT_BASE_PATH: &str = "/_geecache/";
/// Virtual nodes per peer on the hash ring.
pub const DEFAULT_REPLICAS: usize = 50;
/// Content type of a value response.
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";

/// Normalises a base path to start and end with `/`.
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Builds the URL of `group`/`key` on the peer at `base_url`
/// (e.g. `http://10.0.0.2:8008/_geecache/`).
pub fn value_url(base_url: &str, group: &str, key: &str) -> Result<Url, CacheError> {
    let invalid = |reason: String| CacheError::InvalidPeerAddress {
        peer: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("address cannot carry a path".to_string()))?
        .pop_if_empty()
        .push(group)
        .push(key);

    Ok(url)
}
