use serde::{Deserialize, Serialize};

pub const HIGH_SCORE: i64 = 10;
pub const LOW_SCORE: i64 = 0;

pub const BASE_RADIUS: f64 = 5.0;
pub const MAX_RADIUS: f64 = 15.0;
pub const MIN_EDGE_WIDTH: f64 = 1.0;
pub const MAX_EDGE_WIDTH: f64 = 3.0;

pub const LABEL_MAX_CHARS: usize = 15;
pub const LABEL_KEEP_CHARS: usize = 12;
pub const BODY_MAX_CHARS: usize = 300;
pub const ELLIPSIS: &str = "...";
pub const ANONYMOUS: &str = "Anonymous";

/// Three-way score bucket shared by node fills and the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreClass {
    High,
    Normal,
    Low,
}

impl ScoreClass {
    pub const ALL: [ScoreClass; 3] = [ScoreClass::High, ScoreClass::Normal, ScoreClass::Low];

    pub fn from_score(score: i64) -> Self {
        if score >= HIGH_SCORE {
            Self::High
        } else if score <= LOW_SCORE {
            Self::Low
        } else {
            Self::Normal
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::High => "var(--bs-success, #198754)",
            Self::Normal => "var(--bs-primary, #0d6efd)",
            Self::Low => "var(--bs-danger, #dc3545)",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::High => "score-high",
            Self::Normal => "score-normal",
            Self::Low => "score-low",
        }
    }

    pub fn legend_label(self) -> &'static str {
        match self {
            Self::High => "High Score (≥10)",
            Self::Normal => "Normal Score (1-9)",
            Self::Low => "Low/Negative Score (≤0)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Light => "#ffffff",
            Self::Dark => "#212529",
        }
    }

    pub fn foreground(self) -> &'static str {
        match self {
            Self::Light => "#212529",
            Self::Dark => "#dee2e6",
        }
    }

    pub fn link(self) -> &'static str {
        match self {
            Self::Light => "#adb5bd",
            Self::Dark => "#6c757d",
        }
    }
}

pub fn node_radius(score: i64) -> f64 {
    let factor = if score > 0 {
        (score as f64 + 1.0).log10()
    } else {
        0.0
    };
    (BASE_RADIUS + factor).clamp(BASE_RADIUS, MAX_RADIUS)
}

/// Stroke width of the edge leading into a node with `score`.
pub fn edge_width(score: i64) -> f64 {
    (score.max(1) as f64 + 1.0)
        .log10()
        .clamp(MIN_EDGE_WIDTH, MAX_EDGE_WIDTH)
}

pub fn display_author(author: Option<&str>) -> &str {
    match author {
        Some(name) if !name.is_empty() => name,
        _ => ANONYMOUS,
    }
}

pub fn node_label(author: Option<&str>) -> String {
    let author = display_author(author);
    if author.chars().count() > LABEL_MAX_CHARS {
        let kept: String = author.chars().take(LABEL_KEEP_CHARS).collect();
        format!("{kept}{ELLIPSIS}")
    } else {
        author.to_string()
    }
}

pub fn truncate_body(body: &str) -> String {
    if body.chars().count() > BODY_MAX_CHARS {
        let kept: String = body.chars().take(BODY_MAX_CHARS).collect();
        format!("{kept}{ELLIPSIS}")
    } else {
        body.to_string()
    }
}

pub fn points_label(score: i64) -> String {
    if score == 1 {
        "1 point".to_string()
    } else {
        format!("{score} points")
    }
}
