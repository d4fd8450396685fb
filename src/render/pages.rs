use std::fmt::Write;

use crate::{
    analysis::{AnalysisReport, Overlap},
    render::{charts, format_delta, format_max, format_mean},
    utils::escape_html,
};

/// Spotify wordmark shown in the header.
pub const LOGO_URL: &str =
    "https://storage.googleapis.com/pr-newsroom-wp/1/2018/11/Spotify_Logo_CMYK_Green.png";

const STYLE: &str = r#"
body{font-family:-apple-system,"Segoe UI",Helvetica,Arial,sans-serif;margin:0;color:#191414;background:#fff;display:flex;}
aside{width:240px;min-height:100vh;background:#f4f4f4;padding:24px 18px;box-sizing:border-box;}
aside .warn{background:#fff4d6;border-radius:6px;padding:8px 10px;margin-top:12px;}
main{flex:1;padding:28px 48px;max-width:980px;}
.logo{width:130px;margin:0 0 -8px -8px;}
.title{font-size:2.6rem;color:#1DB954;font-weight:700;margin:0;}
.sub{font-size:1.15rem;color:#191414;margin:4px 0 24px;}
form{display:flex;gap:8px;margin-bottom:16px;}
form input{flex:1;padding:10px;font-size:1rem;border:1px solid #ccc;border-radius:6px;}
form button,.button{background:#1DB954;color:#fff;border:0;border-radius:20px;padding:10px 22px;font-size:1rem;text-decoration:none;cursor:pointer;}
.metrics{display:flex;gap:16px;margin:12px 0;}
.metric{flex:1;text-align:center;}
.metric .label{font-size:.9rem;color:#555;}
.metric .value{font-size:1.7rem;color:#1DB954;}
.note{background:#e8f4fd;border-radius:6px;padding:10px 12px;}
.error{background:#fde8e8;border-radius:6px;padding:10px 12px;}
hr{border:0;border-top:1px solid #ddd;margin:28px 0;}
.chart text{font-size:12px;fill:#191414;}
.chart .chart-title{font-size:14px;font-weight:600;}
"#;

/// Wraps `body` into the full page with header and usage sidebar.
pub fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Playlist Wrapped</title>
<style>{STYLE}</style>
</head>
<body>
<aside>
<h3>How to use this app</h3>
<ol>
<li>Open the playlist on Spotify.</li>
<li>Click <strong>Share → Copy link</strong>.</li>
<li>Paste above and click <strong>Analyze</strong>.</li>
</ol>
<div class="warn">Playlist must be public.</div>
</aside>
<main>
<img class="logo" src="{LOGO_URL}" alt="Spotify">
<h1 class="title">Playlist Wrapped 🎧</h1>
<p class="sub">Your personal playlist insights → vs. the curator's playlist → vs. the world</p>
{body}
</main>
</body>
</html>"#
    )
}

/// Shown while no token is cached. Nothing else renders until the user
/// completed the login.
pub fn login_page() -> String {
    layout(
        r#"<p>Log in so the dashboard can read playlists on your behalf.</p>
<p><a class="button" href="/login">🔐 Login with Spotify</a></p>"#,
    )
}

/// Static page served on every route when the credentials are incomplete.
pub fn credentials_error_page(message: &str) -> String {
    layout(&format!(
        r#"<div class="error"><strong>Configuration error.</strong> {}</div>
<p>Set the client id, client secret and redirect URI of your Spotify application in the environment or in <code>secrets.env</code>, then restart.</p>"#,
        escape_html(message)
    ))
}

pub fn message_page(title: &str, message: &str) -> String {
    layout(&format!(
        r#"<h2>{}</h2><p>{}</p><p><a href="/">Back to the dashboard</a></p>"#,
        escape_html(title),
        escape_html(message)
    ))
}

fn form(input: &str) -> String {
    format!(
        r#"<form method="get" action="/analyze">
<input type="text" name="playlist" placeholder="🔗 Paste your Spotify playlist link or ID" value="{}">
<button type="submit">▶️ Analyze</button>
</form>"#,
        escape_html(input)
    )
}

/// The empty dashboard, optionally with a hint above the form.
pub fn form_page(input: &str, notice: Option<&str>) -> String {
    let mut body = form(input);
    if let Some(notice) = notice {
        let _ = write!(body, r#"<p class="note">{}</p>"#, escape_html(notice));
    }
    layout(&body)
}

fn metric(label: &str, value: &str) -> String {
    format!(
        r#"<div class="metric"><div class="label">{}</div><div class="value">{}</div></div>"#,
        escape_html(label),
        escape_html(value)
    )
}

fn shared_tracks(overlap: &Overlap, heading: &str, pop_label: &str, empty_note: &str) -> String {
    if overlap.is_empty() {
        return format!(r#"<p class="note">{}</p>"#, escape_html(empty_note));
    }

    let mut html = format!("<h3>{}</h3><ul>", escape_html(heading));
    for t in &overlap.top_shared {
        let _ = write!(
            html,
            "<li><strong>{}</strong> – {} ({} {})</li>",
            escape_html(&t.track_name),
            escape_html(&t.artist_name),
            pop_label,
            t.popularity
        );
    }
    html.push_str("</ul>");
    html
}

/// The full analysis of one playlist.
pub fn report_page(input: &str, report: &AnalysisReport) -> String {
    let mut body = form(input);

    body.push_str("<hr><h2>🪞 Your Playlist Snapshot</h2><div class=\"metrics\">");
    body.push_str(&metric("Total tracks", &report.summary.count.to_string()));
    body.push_str(&metric(
        "Average popularity",
        &format_mean(report.summary.mean_popularity),
    ));
    body.push_str(&metric(
        "Top popularity",
        &format_max(report.summary.max_popularity),
    ));
    body.push_str("</div>");

    body.push_str("<h3>🔥 Your Top 5 Most Popular Songs</h3><ol>");
    for t in &report.top_tracks {
        let _ = write!(
            body,
            "<li><strong>{}</strong> – {} (popularity {})</li>",
            escape_html(&t.track_name),
            escape_html(&t.artist_name),
            t.popularity
        );
    }
    body.push_str("</ol>");

    body.push_str("<h3>🎧 Your Top Genres</h3><div class=\"metrics\">");
    for g in &report.top_genres {
        body.push_str(&metric(&g.genre, &g.count.to_string()));
    }
    body.push_str("</div>");

    body.push_str("<hr><h2>⚖️ You vs. the Curator</h2><div class=\"metrics\">");
    body.push_str(&metric(
        "Shared songs",
        &report.curator_overlap.shared_count.to_string(),
    ));
    body.push_str(&metric(
        "Shared genres",
        &report.shared_genres_with_curator.to_string(),
    ));
    body.push_str("</div>");
    body.push_str(&shared_tracks(
        &report.curator_overlap,
        "Songs you both have",
        "pop",
        "No overlap with the curator's playlist – you're unique!",
    ));

    body.push_str("<hr><h2>🌍 You vs. Global Hits</h2><div class=\"metrics\">");
    body.push_str(&metric(
        "Shared with Global",
        &report.global_overlap.shared_count.to_string(),
    ));
    body.push_str(&metric(
        "Average popularity vs. Global",
        &format_delta(report.popularity_delta),
    ));
    body.push_str("</div>");
    body.push_str(&shared_tracks(
        &report.global_overlap,
        "Your songs that are world hits",
        "global pop",
        "You're discovering outside the mainstream – nice!",
    ));

    body.push_str("<hr><h2>📊 Big Picture Charts</h2>");
    body.push_str("<h3>Popularity Distribution</h3>");
    body.push_str(&charts::kde_chart(&report.distributions));
    body.push_str("<h3>Artist Similarity Heat-map</h3>");
    body.push_str(&charts::similarity_heatmap(&report.similarity));

    layout(&body)
}
