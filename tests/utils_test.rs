use sporlboard::utils::*;

#[test]
fn test_extract_playlist_id_from_share_link() {
    let url = "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123";
    assert_eq!(
        extract_playlist_id(url),
        Some("37i9dQZF1DXcBWIGoYBM5M".to_string())
    );
}

#[test]
fn test_extract_playlist_id_from_embed_link() {
    let url = "https://open.spotify.com/embed/playlist/6i0LNQ0QCzlFGx2lZXxSdj";
    assert_eq!(
        extract_playlist_id(url),
        Some("6i0LNQ0QCzlFGx2lZXxSdj".to_string())
    );
}

#[test]
fn test_extract_playlist_id_bare_id() {
    assert_eq!(
        extract_playlist_id("37i9dQZF1DXcBWIGoYBM5M"),
        Some("37i9dQZF1DXcBWIGoYBM5M".to_string())
    );
}

#[test]
fn test_extract_playlist_id_trims_whitespace() {
    assert_eq!(
        extract_playlist_id("  37i9dQZF1DXcBWIGoYBM5M \n"),
        Some("37i9dQZF1DXcBWIGoYBM5M".to_string())
    );
}

#[test]
fn test_extract_playlist_id_blank_input() {
    assert_eq!(extract_playlist_id(""), None);
    assert_eq!(extract_playlist_id("   "), None);
}

#[test]
fn test_extract_playlist_id_falls_back_to_input() {
    // Anything that isn't a link is passed through and left to the API
    assert_eq!(extract_playlist_id("not-an-id"), Some("not-an-id".to_string()));
}

#[test]
fn test_is_bare_playlist_id() {
    assert!(is_bare_playlist_id("37i9dQZF1DXcBWIGoYBM5M"));
    assert!(!is_bare_playlist_id("37i9dQZF1DXcBWIGoYBM5"));
    assert!(!is_bare_playlist_id("37i9dQZF1DXcBWIGoYBM5M1"));
    assert!(!is_bare_playlist_id("37i9dQZF1DXcBWIGoYBM-M"));
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_memo_key_is_deterministic() {
    let a = memo_key("fetch_playlist", &["abc", "user"]);
    let b = memo_key("fetch_playlist", &["abc", "user"]);

    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_memo_key_distinguishes_arguments() {
    let base = memo_key("fetch_playlist", &["abc", "user"]);

    assert_ne!(base, memo_key("fetch_playlist", &["abc", "global"]));
    assert_ne!(base, memo_key("resolve_genres", &["abc", "user"]));
    assert_ne!(
        memo_key("f", &["ab", "c"]),
        memo_key("f", &["a", "bc"])
    );
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
    );
    assert_eq!(escape_html("plain"), "plain");
}
