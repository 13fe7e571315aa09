/// Query parameter appended to refreshed image URLs
pub const CACHE_BUST_PARAM: &str = "t";

/// Appends `t=<millis>` so the browser (or any cache) refetches the image.
/// Works on relative URLs such as `/media/profile_pics/user_1.png`.
pub fn cache_busted_url(url: &str, millis: i64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", url, separator, CACHE_BUST_PARAM, millis)
}
