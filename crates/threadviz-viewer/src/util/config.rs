use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::util::ids::PostId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub api_base_url: String,
    pub thread_endpoint: String,
    pub post_id_param: String,
    pub comment_limit: u32,
    pub request_timeout_secs: u64,
    pub container_width: f64,
    pub output_path: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            thread_endpoint: "/api/comment/thread".to_string(),
            post_id_param: "post_id".to_string(),
            comment_limit: 50,
            request_timeout_secs: 20,
            container_width: 1200.0,
            output_path: PathBuf::from("thread.svg"),
        }
    }
}

impl ViewerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn thread_url(&self, post: &PostId) -> anyhow::Result<Url> {
        let base = Url::parse(&self.api_base_url)
            .with_context(|| format!("invalid api base url {}", self.api_base_url))?;
        let mut url = base
            .join(&self.thread_endpoint)
            .with_context(|| format!("invalid thread endpoint {}", self.thread_endpoint))?;
        url.query_pairs_mut()
            .append_pair(&self.post_id_param, post.as_str())
            .append_pair("limit", &self.comment_limit.to_string());
        Ok(url)
    }
}

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "threadviz")
}

fn config_file_path() -> Option<PathBuf> {
    Some(project_dirs()?.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

pub(crate) fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    let Ok(contents) = fs::read_to_string(path) else {
        return ViewerConfig::default();
    };
    toml::from_str(&contents).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "unreadable viewer config, using defaults");
        ViewerConfig::default()
    })
}

pub fn save(cfg: &ViewerConfig) -> anyhow::Result<()> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)
}

pub(crate) fn save_to_path(cfg: &ViewerConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize viewer config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write viewer config {}", path.display()))?;
    Ok(())
}
