use std::fmt::Write;

use crate::render::camera::ViewTransform;
use crate::render::style::{ScoreClass, Theme};
use crate::render::surface::{Frame, LabelAnchor};

const TITLE: &str = "Comment Thread Visualization";
const DESCRIPTION: &str = "Hover over nodes to see comments. Use mouse wheel to zoom, drag to pan.";
const HINT: &str = "Tip: Higher scoring comments have larger circles. Color indicates sentiment.";
const ACTIVE_COLOR: &str = "var(--bs-warning, #ffc107)";
const TOOLTIP_WIDTH: f64 = 280.0;
const TOOLTIP_LINE: f64 = 16.0;
const CONTROL_RADIUS: f64 = 18.0;
// Characters per tooltip row at font-size 11 inside TOOLTIP_WIDTH.
const TOOLTIP_WRAP: usize = 44;

/// XML-escapes text. Control characters XML cannot carry are dropped.
pub fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c < ' ' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Greedy word wrap on whitespace; words longer than `max_chars` are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_len = 0;
    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        for chunk in chars.chunks(max_chars) {
            if row_len > 0 && row_len + 1 + chunk.len() > max_chars {
                rows.push(std::mem::take(&mut row));
                row_len = 0;
            }
            if row_len > 0 {
                row.push(' ');
                row_len += 1;
            }
            row.extend(chunk);
            row_len += chunk.len();
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Vertical cubic link from parent to child.
pub fn link_path(source: (f64, f64), target: (f64, f64)) -> String {
    let mid = (source.1 + target.1) / 2.0;
    format!(
        "M{:.2},{:.2}C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
        source.0, source.1, source.0, mid, target.0, mid, target.0, target.1
    )
}

pub fn write_document(frame: &Frame, theme: Theme, transform: &ViewTransform) -> String {
    let (w, h) = (frame.outer_width, frame.outer_height);
    let mut s = String::with_capacity(4096 + frame.nodes.len() * 512);

    let _ = write!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="{h}" viewBox="0 0 {w} {h}" preserveAspectRatio="xMidYMid meet" data-theme="{theme}">
<style>
.link {{ fill: none; stroke: {link}; stroke-opacity: 0.6; }}
.link-active {{ stroke: {ACTIVE_COLOR}; stroke-opacity: 1; }}
.node circle {{ stroke: {bg}; stroke-width: 1.5px; }}
.node circle.node-active {{ stroke: {ACTIVE_COLOR}; stroke-width: 3px; }}
text {{ fill: {fg}; font-family: sans-serif; }}
</style>
<rect class="background" width="{w}" height="{h}" fill="{bg}"/>
"#,
        theme = theme.as_str(),
        link = theme.link(),
        bg = theme.background(),
        fg = theme.foreground(),
    );

    let _ = writeln!(s, r#"<g class="viewport" transform="{}">"#, transform.svg_attr());
    render_header(&mut s, frame);
    render_links(&mut s, frame);
    render_nodes(&mut s, frame);
    render_hint(&mut s, frame);
    render_legend(&mut s, frame);
    s.push_str("</g>\n");

    render_zoom_controls(&mut s, frame);
    render_tooltip(&mut s, frame, theme);
    s.push_str("</svg>\n");
    s
}

fn render_header(s: &mut String, frame: &Frame) {
    let cx = frame.inner_width / 2.0;
    let _ = write!(
        s,
        r#"<text class="visualization-title" x="{cx}" y="-30" text-anchor="middle" font-size="16" font-weight="500">{TITLE}</text>
<text x="{cx}" y="-10" text-anchor="middle" font-size="12" opacity="0.7">{DESCRIPTION}</text>
"#
    );
}

fn render_links(s: &mut String, frame: &Frame) {
    s.push_str("<g class=\"links\">\n");
    for e in &frame.edges {
        let class = if e.active { "link link-active" } else { "link" };
        let _ = writeln!(
            s,
            r#"<path class="{class}" d="{d}" stroke-width="{w:.3}" data-source="{src}" data-target="{dst}"/>"#,
            d = e.path,
            w = e.width,
            src = esc(&frame.nodes[e.source].id),
            dst = esc(&frame.nodes[e.target].id),
        );
    }
    s.push_str("</g>\n");
}

fn render_nodes(s: &mut String, frame: &Frame) {
    s.push_str("<g class=\"nodes\">\n");
    for n in &frame.nodes {
        let circle_class = if n.active {
            format!("{} node-active", n.class.css_class())
        } else {
            n.class.css_class().to_string()
        };
        let anchor = match n.anchor {
            LabelAnchor::Start => "start",
            LabelAnchor::End => "end",
        };
        let weight = if n.is_root { "bold" } else { "normal" };
        let _ = write!(
            s,
            r#"<g class="node" id="{id}" transform="translate({x:.2}, {y:.2})">
<circle class="{circle_class}" r="{r:.3}" fill="{fill}"/>
<text dy=".35em" x="{dx}" text-anchor="{anchor}" font-size="11" font-weight="{weight}">{label}<title>{full}</title></text>
</g>
"#,
            id = esc(&n.dom_id()),
            x = n.x,
            y = n.y,
            r = n.radius,
            fill = n.class.color(),
            dx = n.label_dx(),
            label = esc(&n.label),
            full = esc(&n.full_author),
        );
    }
    s.push_str("</g>\n");
}

fn render_hint(s: &mut String, frame: &Frame) {
    let _ = writeln!(
        s,
        r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="12" opacity="0.6">{HINT}</text>"#,
        x = frame.inner_width / 2.0,
        y = frame.inner_height + 30.0,
    );
}

// Always lists every class, whether or not a node uses it.
fn render_legend(s: &mut String, frame: &Frame) {
    let _ = writeln!(
        s,
        r#"<g class="legend" transform="translate({x}, 20)">
<text x="0" y="-10" font-size="12" font-weight="bold">Score Legend</text>"#,
        x = frame.inner_width - 100.0,
    );
    for (i, class) in ScoreClass::ALL.iter().enumerate() {
        let _ = writeln!(
            s,
            r#"<g class="legend-item {css}" transform="translate(0, {y})"><circle r="6" fill="{fill}"/><text x="12" y="4" font-size="10">{label}</text></g>"#,
            css = class.css_class(),
            y = i * 20,
            fill = class.color(),
            label = esc(class.legend_label()),
        );
    }
    s.push_str("</g>\n");
}

fn render_zoom_controls(s: &mut String, frame: &Frame) {
    let cx = frame.outer_width - 10.0 - CONTROL_RADIUS;
    let bottom = frame.outer_height - 10.0 - CONTROL_RADIUS;
    let controls = [("reset", "⌂"), ("zoom-out", "−"), ("zoom-in", "+")];
    s.push_str("<g class=\"zoom-controls\">\n");
    for (i, (action, glyph)) in controls.iter().enumerate() {
        let cy = bottom - i as f64 * (2.0 * CONTROL_RADIUS + 5.0);
        let _ = writeln!(
            s,
            r#"<g class="zoom-control" data-action="{action}"><circle cx="{cx}" cy="{cy}" r="{CONTROL_RADIUS}" fill="var(--bs-primary, #0d6efd)"/><text x="{cx}" y="{cy}" dy=".35em" text-anchor="middle" font-size="16" style="fill: #ffffff">{glyph}</text></g>"#,
        );
    }
    s.push_str("</g>\n");
}

fn render_tooltip(s: &mut String, frame: &Frame, theme: Theme) {
    let tip = &frame.tooltip;
    let Some(content) = &tip.content else {
        return;
    };
    let rows: Vec<String> = content
        .lines()
        .iter()
        .flat_map(|line| wrap_text(line, TOOLTIP_WRAP))
        .collect();
    let height = TOOLTIP_LINE * (rows.len() as f64 + 1.0);
    let _ = writeln!(
        s,
        r#"<g class="node-info" opacity="{o}" transform="translate({x:.2}, {y:.2})">
<rect width="{TOOLTIP_WIDTH}" height="{height}" rx="8" fill="{bg}" fill-opacity="0.9" stroke="{link}"/>"#,
        o = tip.opacity(),
        x = tip.x,
        y = tip.y,
        bg = theme.background(),
        link = theme.link(),
    );
    if let Some((head, rest)) = rows.split_first() {
        let _ = writeln!(
            s,
            r#"<text x="10" y="{TOOLTIP_LINE}" font-size="11" font-weight="bold">{}</text>"#,
            esc(head),
        );
        if !rest.is_empty() {
            let _ = write!(
                s,
                r#"<text x="10" y="{}" font-size="11">"#,
                TOOLTIP_LINE * 2.0
            );
            for (i, row) in rest.iter().enumerate() {
                let dy = if i == 0 { 0.0 } else { TOOLTIP_LINE };
                let _ = write!(s, r#"<tspan x="10" dy="{dy}">{}</tspan>"#, esc(row));
            }
            s.push_str("</text>\n");
        }
    }
    s.push_str("</g>\n");
}
