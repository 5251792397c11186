// URL matchers - recognise video links and pull out platform ids
//
// Pure functions, no I/O. A non-match just means "not this platform".

use regex::Regex;

use super::models::{Platform, VideoReference};

lazy_static::lazy_static! {
    // Specific youtu.be shapes come before the bare short link, which would
    // otherwise capture "v/ID" or "watch" as the id.
    static ref YOUTUBE_PATTERNS: Vec<Regex> = [
        r#"(?i)youtube\.com/embed/([^"&? ]+)"#,
        r#"(?i)youtube\.com/v/([^"&? ]+)"#,
        r#"(?i)youtube\.com/watch\?v=([^"&? ]+)"#,
        r#"(?i)youtube\.com/\?v=([^"&? ]+)"#,
        r#"(?i)youtu\.be/v/([^"&? ]+)"#,
        r#"(?i)youtu\.be/watch\?v=([^"&? ]+)"#,
        r#"(?i)youtu\.be/\?v=([^"&? ]+)"#,
        r#"(?i)youtu\.be/([^"&? ]+)"#,
        r#"(?i)youtube-nocookie\.com/embed/([^"&? ]+)"#,
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref KALTURA_ENTRY_RE: Regex =
        Regex::new(r"(?i)\bkaltura\b.*\bentry_id=(.{10})").unwrap();
    static ref KALTURA_PARTNER_RE: Regex = Regex::new(r"(?i)partner_id/(.{7})").unwrap();
}

impl Platform {
    /// Try to recognise `url` as a video hosted on this platform
    pub fn match_url(&self, url: &str) -> Option<VideoReference> {
        match self {
            Self::YouTube => match_youtube(url),
            Self::Kaltura => match_kaltura(url),
        }
    }
}

/// First matching platform, in `Platform::ALL` order
pub fn match_any(url: &str) -> Option<VideoReference> {
    Platform::ALL.iter().find_map(|p| p.match_url(url))
}

/// YouTube video id from any of the known embed/watch/short-link shapes
pub fn match_youtube(url: &str) -> Option<VideoReference> {
    let url = url.trim();
    YOUTUBE_PATTERNS
        .iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| VideoReference::youtube(m.as_str()))
}

/// Kaltura entry id and partner id; both must be present
pub fn match_kaltura(url: &str) -> Option<VideoReference> {
    let url = url.trim();
    let entry_id = KALTURA_ENTRY_RE.captures(url)?.get(1)?.as_str().trim();
    let partner_id = KALTURA_PARTNER_RE.captures(url)?.get(1)?.as_str().trim();

    if entry_id.is_empty() || partner_id.is_empty() {
        return None;
    }
    Some(VideoReference::kaltura(entry_id, partner_id))
}
