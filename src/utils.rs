use std::sync::LazyLock;

use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::warning;

static PLAYLIST_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"playlist/([a-zA-Z0-9]+)").expect("valid playlist url pattern"));

static BARE_PLAYLIST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{22}$").expect("valid playlist id pattern"));

/// Extracts a playlist id from user input.
///
/// A `playlist/<id>` segment (share links, open.spotify.com URLs, `spotify:`
/// URIs rewritten by the browser) wins. Otherwise the trimmed input itself is
/// used as the id. Blank input yields `None`.
pub fn extract_playlist_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(caps) = PLAYLIST_URL.captures(input) {
        return Some(caps[1].to_string());
    }

    if !is_bare_playlist_id(input) {
        warning!(
            "'{}' doesn't look like a playlist id, using it as is.",
            input
        );
    }
    Some(input.to_string())
}

/// True for a 22 character alphanumeric Spotify id.
pub fn is_bare_playlist_id(input: &str) -> bool {
    BARE_PLAYLIST_ID.is_match(input)
}

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Digest of a function name and its arguments, used as memoization key.
pub fn memo_key(function: &str, args: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(function.as_bytes());
    for arg in args {
        // separator keeps ("ab", "c") and ("a", "bc") apart
        hasher.update([0u8]);
        hasher.update(arg.as_bytes());
    }
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Escapes text for embedding in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
