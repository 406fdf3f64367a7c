//! Human-readable display helpers
//!
//! Free functions over raw attribute values; all of them accept the
//! absent case, since any attribute may be missing from an export.

/// Track size in megabytes, rounded to two decimals
pub fn size_mb(bytes: Option<i64>) -> Option<f64> {
    bytes.map(|b| (b as f64 / 1e6 * 100.0).round() / 100.0)
}

/// Track size as a label, with an "unknown" sentinel for absent sizes
pub fn size_label(bytes: Option<i64>) -> String {
    match size_mb(bytes) {
        Some(mb) => format!("{:.2} MB", mb),
        None => "unknown".to_string(),
    }
}

/// Track duration in whole seconds from a millisecond count, zero when absent
pub fn total_seconds(millis: Option<i64>) -> i64 {
    millis.map_or(0, |ms| ms / 1000)
}

/// 0-5 star rating from the raw 0-100 rating, absent left unchanged
pub fn star_rating(rating: Option<i64>) -> Option<f64> {
    rating.map(|r| r as f64 / 100.0 * 5.0)
}

/// Filesystem path from a track's file URL.
///
/// Drops the scheme and host, drops the leading slash and percent-decodes,
/// so `file://localhost/Users/me/My%20Music/song.mp3` becomes
/// `Users/me/My Music/song.mp3`.
pub fn track_path(url: &str) -> String {
    let rest = url.strip_prefix("file://").unwrap_or(url);
    let path = match rest.find('/') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };

    urlencoding::decode(path)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
