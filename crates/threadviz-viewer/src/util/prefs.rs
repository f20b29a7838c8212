use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TrackError;
use crate::render::style::Theme;
use crate::util::config::project_dirs;

pub const ALL_SUBREDDITS: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedKeyword {
    pub text: String,
    pub subreddit: String,
}

impl TrackedKeyword {
    fn same_as(&self, text: &str, subreddit: &str) -> bool {
        self.text.to_lowercase() == text.to_lowercase()
            && self.subreddit.to_lowercase() == subreddit.to_lowercase()
    }
}

/// User state kept between runs: tracked items and the theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub tracked_subreddits: Vec<String>,
    pub tracked_keywords: Vec<TrackedKeyword>,
    pub theme: Theme,
}

impl Preferences {
    pub fn add_subreddit(&mut self, name: &str) -> Result<(), TrackError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackError::Empty);
        }
        let lower = name.to_lowercase();
        if self
            .tracked_subreddits
            .iter()
            .any(|s| s.to_lowercase() == lower)
        {
            return Err(TrackError::AlreadyTracked(name.to_string()));
        }
        self.tracked_subreddits.push(name.to_string());
        Ok(())
    }

    pub fn remove_subreddit(&mut self, name: &str) -> bool {
        let name = name.trim();
        let before = self.tracked_subreddits.len();
        self.tracked_subreddits.retain(|s| s != name);
        self.tracked_subreddits.len() != before
    }

    /// An empty subreddit means every subreddit.
    pub fn add_keyword(&mut self, text: &str, subreddit: &str) -> Result<(), TrackError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TrackError::Empty);
        }
        let subreddit = match subreddit.trim() {
            "" => ALL_SUBREDDITS,
            s => s,
        };
        if self.tracked_keywords.iter().any(|k| k.same_as(text, subreddit)) {
            return Err(TrackError::AlreadyTracked(format!("{text} in r/{subreddit}")));
        }
        self.tracked_keywords.push(TrackedKeyword {
            text: text.to_string(),
            subreddit: subreddit.to_string(),
        });
        Ok(())
    }

    pub fn remove_keyword(&mut self, text: &str, subreddit: &str) -> bool {
        let text = text.trim();
        let subreddit = match subreddit.trim() {
            "" => ALL_SUBREDDITS,
            s => s,
        };
        let before = self.tracked_keywords.len();
        self.tracked_keywords
            .retain(|k| !(k.text == text && k.subreddit == subreddit));
        self.tracked_keywords.len() != before
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }
}

fn prefs_file_path() -> Option<PathBuf> {
    Some(project_dirs()?.data_dir().join("prefs.toml"))
}

pub fn load_or_default() -> Preferences {
    let Some(path) = prefs_file_path() else {
        return Preferences::default();
    };
    load_or_default_from_path(&path)
}

pub(crate) fn load_or_default_from_path(path: &Path) -> Preferences {
    let Ok(contents) = fs::read_to_string(path) else {
        return Preferences::default();
    };
    toml::from_str(&contents).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "unreadable preferences, using defaults");
        Preferences::default()
    })
}

pub fn save(prefs: &Preferences) -> anyhow::Result<()> {
    let Some(path) = prefs_file_path() else {
        return Err(anyhow::anyhow!("no data directory available"));
    };
    save_to_path(prefs, &path)
}

pub(crate) fn save_to_path(prefs: &Preferences, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create data directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(prefs).context("failed to serialize preferences")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write preferences {}", path.display()))?;
    Ok(())
}
