use threadviz_core::ThreadNode;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::render::style::{display_author, points_label, truncate_body};

pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, -10.0);

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub author: String,
    pub points: String,
    pub timestamp: String,
    pub body: String,
}

impl TooltipContent {
    pub fn for_node(node: &ThreadNode) -> Self {
        Self {
            author: display_author(node.author.as_deref()).to_string(),
            points: points_label(node.score),
            timestamp: format_timestamp(node.created_at),
            body: truncate_body(&node.body),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("{}  ({})", self.author, self.points),
            self.timestamp.clone(),
            self.body.clone(),
        ]
    }
}

/// Seconds since epoch rendered in UTC; out-of-range values show the epoch.
pub fn format_timestamp(secs: f64) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    let secs = if secs.is_finite() { secs.trunc() as i64 } else { 0 };
    let dt = OffsetDateTime::from_unix_timestamp(secs).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    dt.format(&format)
        .unwrap_or_else(|_| "1970-01-01 00:00:00 UTC".to_string())
}

/// Overlay drawn next to the pointer while a node is hovered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipOverlay {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
    pub content: Option<TooltipContent>,
}

impl TooltipOverlay {
    pub fn show(&mut self, content: TooltipContent, pointer: (f64, f64)) {
        self.visible = true;
        self.x = pointer.0 + TOOLTIP_OFFSET.0;
        self.y = pointer.1 + TOOLTIP_OFFSET.1;
        self.content = Some(content);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn opacity(&self) -> f64 {
        if self.visible {
            0.95
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(author: Option<&str>, score: i64, body: &str) -> ThreadNode {
        ThreadNode {
            id: "c1".to_string(),
            author: author.map(str::to_string),
            body: body.to_string(),
            score,
            created_at: 1_700_000_000.0,
            depth: 1,
            children: Vec::new(),
        }
    }

    #[test]
    fn content_formats_author_points_and_time() {
        let content = TooltipContent::for_node(&node(Some("bob"), 1, "hi"));
        assert_eq!(content.author, "bob");
        assert_eq!(content.points, "1 point");
        assert_eq!(content.timestamp, "2023-11-14 22:13:20 UTC");
        assert_eq!(content.body, "hi");
        assert_eq!(content.lines()[0], "bob  (1 point)");
    }

    #[test]
    fn anonymous_and_long_body() {
        let body = "x".repeat(450);
        let content = TooltipContent::for_node(&node(None, 3, &body));
        assert_eq!(content.author, "Anonymous");
        assert_eq!(content.points, "3 points");
        assert_eq!(content.body.len(), 303);
        assert!(content.body.ends_with("..."));
    }

    #[test]
    fn malformed_timestamps_fall_back_to_epoch() {
        assert_eq!(format_timestamp(0.0), "1970-01-01 00:00:00 UTC");
        assert_eq!(format_timestamp(f64::NAN), "1970-01-01 00:00:00 UTC");
        assert_eq!(format_timestamp(1e300), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn overlay_sits_next_to_pointer() {
        let mut overlay = TooltipOverlay::default();
        assert_eq!(overlay.opacity(), 0.0);
        overlay.show(TooltipContent::for_node(&node(Some("a"), 2, "")), (100.0, 50.0));
        assert_eq!((overlay.x, overlay.y), (110.0, 40.0));
        assert_eq!(overlay.opacity(), 0.95);
        overlay.hide();
        assert!(!overlay.visible);
    }
}
