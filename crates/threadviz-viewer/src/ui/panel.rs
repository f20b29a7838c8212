use threadviz_core::PostRecord;

use crate::render::style::display_author;

pub const NO_CONTENT: &str = "(No content)";

/// Read-only post summary shown next to the thread tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetails {
    pub title: String,
    pub author: String,
    pub score: i64,
    pub num_comments: i64,
    pub content: String,
}

impl PostDetails {
    pub fn from_post(post: &PostRecord) -> Self {
        let content = if post.selftext.is_empty() {
            NO_CONTENT.to_string()
        } else {
            post.selftext.clone()
        };
        Self {
            title: post.title.clone(),
            author: display_author(post.author.as_deref()).to_string(),
            score: post.score,
            num_comments: post.num_comments,
            content,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            format!("by {}", self.author),
            format!("score: {}", self.score),
            format!("comments: {}", self.num_comments),
            String::new(),
            self.content.clone(),
        ]
    }
}
