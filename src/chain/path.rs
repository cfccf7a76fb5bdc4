//! Request path segmentation for chain dispatch.

/// Split a request path into its chain segments.
///
/// The query string and the empty segment produced by the leading slash are
/// dropped up front, so the returned list starts at the first key and
/// alternates key, value, key, value.
pub fn chain_segments(path: &str) -> Vec<&str> {
    let path = path.split_once('?').map_or(path, |(before, _)| before);
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return Vec::new();
    }
    path.split('/').collect()
}

/// The key/value pair at a zero-based chain position.
///
/// Pair `i` always starts at segment offset `2 * i`: two segments are
/// consumed per completed pair, so the offset is derived from the pair count
/// alone. Returns `None` once segments run out, including the truncated case
/// of a trailing key with no value to pair with.
pub fn pair_at<'a>(segments: &[&'a str], position: usize) -> Option<(&'a str, &'a str)> {
    let offset = position * 2;
    match (segments.get(offset), segments.get(offset + 1)) {
        (Some(key), Some(value)) => Some((*key, *value)),
        _ => None,
    }
}
