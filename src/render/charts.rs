use std::fmt::Write;

use crate::{
    analysis::{Distribution, SimilarityMatrix},
    render::format_similarity,
    utils::escape_html,
};

const KDE_WIDTH: f64 = 880.0;
const KDE_HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 52.0;

const CELL: f64 = 72.0;
const HEATMAP_LABEL_WIDTH: f64 = 130.0;
const HEATMAP_TOP: f64 = 36.0;

/// matplotlib's "Greens" colour map, light to dark.
const GREENS: [(u8, u8, u8); 9] = [
    (0xf7, 0xfc, 0xf5),
    (0xe5, 0xf5, 0xe0),
    (0xc7, 0xe9, 0xc0),
    (0xa1, 0xd9, 0x9b),
    (0x74, 0xc4, 0x76),
    (0x41, 0xab, 0x5d),
    (0x23, 0x8b, 0x45),
    (0x00, 0x6d, 0x2c),
    (0x00, 0x44, 0x1b),
];

/// Colour of `t` (clamped to 0..=1) on the green ramp as `#rrggbb`.
pub fn greens(t: f64) -> String {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (GREENS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(GREENS.len() - 2);
    let frac = scaled - i as f64;
    let (a, b) = (GREENS[i], GREENS[i + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(a.0, b.0),
        mix(a.1, b.1),
        mix(a.2, b.2)
    )
}

/// Filled density curves of the popularity distributions on shared axes.
///
/// Playlists without a curve (too few tracks, all equally popular) are
/// listed in the legend but draw nothing. When no playlist has a curve a
/// short note is rendered instead of the axes.
pub fn kde_chart(distributions: &[Distribution]) -> String {
    let curves: Vec<_> = distributions
        .iter()
        .filter_map(|d| d.curve.as_ref().map(|c| (d.source, c)))
        .collect();

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart" viewBox="0 0 {w} {h}" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" role="img">"#,
        w = KDE_WIDTH,
        h = KDE_HEIGHT
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="22" text-anchor="middle" class="chart-title">Kernel Density Estimate (KDE)</text>"#,
        x = KDE_WIDTH / 2.0
    );

    if curves.is_empty() {
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{y}" text-anchor="middle">Not enough tracks for a density estimate.</text></svg>"#,
            x = KDE_WIDTH / 2.0,
            y = KDE_HEIGHT / 2.0
        );
        return svg;
    }

    let x_min = curves
        .iter()
        .map(|(_, c)| c.x_range().0)
        .fold(f64::INFINITY, f64::min);
    let x_max = curves
        .iter()
        .map(|(_, c)| c.x_range().1)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_max = curves
        .iter()
        .map(|(_, c)| c.max_density())
        .fold(0.0, f64::max)
        * 1.05;

    let plot_w = KDE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = KDE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let base_y = MARGIN_TOP + plot_h;
    let sx = |x: f64| MARGIN_LEFT + (x - x_min) / (x_max - x_min) * plot_w;
    let sy = |y: f64| base_y - y / y_max * plot_h;

    // axes
    let _ = write!(
        svg,
        r##"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="#555"/><line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="#555"/>"##,
        l = MARGIN_LEFT,
        r = MARGIN_LEFT + plot_w,
        t = MARGIN_TOP,
        b = base_y
    );

    let first_tick = (x_min / 20.0).ceil() as i64 * 20;
    let mut tick = first_tick;
    while (tick as f64) <= x_max {
        let x = sx(tick as f64);
        let _ = write!(
            svg,
            r##"<line x1="{x:.1}" y1="{b}" x2="{x:.1}" y2="{b2}" stroke="#555"/><text x="{x:.1}" y="{ty}" text-anchor="middle" class="tick">{tick}</text>"##,
            b = base_y,
            b2 = base_y + 5.0,
            ty = base_y + 18.0
        );
        tick += 20;
    }

    for i in 0..=4 {
        let value = y_max * i as f64 / 4.0;
        let y = sy(value);
        let _ = write!(
            svg,
            r##"<line x1="{l2}" y1="{y:.1}" x2="{l}" y2="{y:.1}" stroke="#555"/><text x="{tx}" y="{ty:.1}" text-anchor="end" class="tick">{value:.3}</text>"##,
            l = MARGIN_LEFT,
            l2 = MARGIN_LEFT - 5.0,
            tx = MARGIN_LEFT - 8.0,
            ty = y + 4.0
        );
    }

    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" text-anchor="middle" class="axis-label">Popularity Score</text>"#,
        x = MARGIN_LEFT + plot_w / 2.0,
        y = KDE_HEIGHT - 10.0
    );
    let _ = write!(
        svg,
        r#"<text x="16" y="{y}" text-anchor="middle" transform="rotate(-90 16 {y})" class="axis-label">Density</text>"#,
        y = MARGIN_TOP + plot_h / 2.0
    );

    for (source, curve) in &curves {
        let mut path = format!("M{:.1},{:.1}", sx(curve.points[0].0), base_y);
        for (x, y) in &curve.points {
            let _ = write!(path, " L{:.1},{:.1}", sx(*x), sy(*y));
        }
        let _ = write!(
            path,
            " L{:.1},{:.1} Z",
            sx(curve.points[curve.points.len() - 1].0),
            base_y
        );
        let _ = write!(
            svg,
            r#"<path d="{path}" fill="{c}" fill-opacity="0.4" stroke="{c}" stroke-width="1.8"/>"#,
            c = source.colour()
        );
    }

    for (i, d) in distributions.iter().enumerate() {
        let y = MARGIN_TOP + 8.0 + i as f64 * 20.0;
        let x = KDE_WIDTH - MARGIN_RIGHT - 170.0;
        let _ = write!(
            svg,
            r#"<rect x="{x}" y="{ry}" width="14" height="10" fill="{c}" fill-opacity="0.6"/><text x="{tx}" y="{ty}" class="legend">{name}</text>"#,
            ry = y - 9.0,
            c = d.source.colour(),
            tx = x + 20.0,
            ty = y,
            name = escape_html(d.source.display_name())
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Heat-map of the artist similarity matrix with a masked diagonal.
pub fn similarity_heatmap(matrix: &SimilarityMatrix) -> String {
    let size = matrix.sources.len() as f64;
    let width = HEATMAP_LABEL_WIDTH + CELL * size + 16.0;
    let height = HEATMAP_TOP + CELL * size + 60.0;
    let (lo, hi) = matrix.display_range();

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart" viewBox="0 0 {width} {height}" width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg" role="img">"#
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="22" text-anchor="middle" class="chart-title">Similarity (artists)</text>"#,
        x = HEATMAP_LABEL_WIDTH + CELL * size / 2.0
    );

    for (i, row_source) in matrix.sources.iter().enumerate() {
        let y = HEATMAP_TOP + CELL * i as f64;
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{ty}" text-anchor="end" class="tick">{name}</text>"#,
            x = HEATMAP_LABEL_WIDTH - 8.0,
            ty = y + CELL / 2.0 + 4.0,
            name = escape_html(row_source.display_name())
        );

        for j in 0..matrix.sources.len() {
            let Some(value) = matrix.display_value(i, j) else {
                continue;
            };
            let t = if hi > lo { (value - lo) / (hi - lo) } else { 0.5 };
            let x = HEATMAP_LABEL_WIDTH + CELL * j as f64;
            let text_colour = if t > 0.6 { "#ffffff" } else { "#191414" };
            let _ = write!(
                svg,
                r##"<rect x="{x}" y="{y}" width="{CELL}" height="{CELL}" fill="{fill}" stroke="#ffffff" stroke-width="1"/><text x="{tx}" y="{ty}" text-anchor="middle" fill="{text_colour}" class="cell">{label}</text>"##,
                fill = greens(t),
                tx = x + CELL / 2.0,
                ty = y + CELL / 2.0 + 5.0,
                label = format_similarity(Some(value))
            );
        }
    }

    for (j, col_source) in matrix.sources.iter().enumerate() {
        let x = HEATMAP_LABEL_WIDTH + CELL * j as f64 + CELL / 2.0;
        let y = HEATMAP_TOP + CELL * size + 18.0;
        let _ = write!(
            svg,
            r#"<text x="{x}" y="{y}" text-anchor="middle" class="tick">{name}</text>"#,
            name = escape_html(short_name(col_source.display_name()))
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Column labels only get one cell of room.
fn short_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}
