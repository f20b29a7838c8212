use crate::{CommentRecord, PostRecord};

/// One post or comment in a thread. The root is the post itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadNode {
    pub id: String,
    pub author: Option<String>,
    pub body: String,
    pub score: i64,
    pub created_at: f64,
    pub depth: usize,
    pub children: Vec<ThreadNode>,
}

impl ThreadNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    pub fn max_depth(&self) -> usize {
        self.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Pre-order walk; children are visited in received order.
    pub fn iter(&self) -> ThreadNodes<'_> {
        ThreadNodes { stack: vec![self] }
    }
}

pub struct ThreadNodes<'a> {
    stack: Vec<&'a ThreadNode>,
}

impl<'a> Iterator for ThreadNodes<'a> {
    type Item = &'a ThreadNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Builds the thread tree rooted at the post. The root label is the post
/// title; self-text stays with the post record.
pub fn build_thread(post: &PostRecord, comments: &[CommentRecord]) -> ThreadNode {
    ThreadNode {
        id: post.id.clone(),
        author: post.author.clone(),
        body: post.title.clone(),
        score: post.score,
        created_at: post.created_at,
        depth: 0,
        children: comments.iter().map(|c| build_comment(c, 1)).collect(),
    }
}

fn build_comment(comment: &CommentRecord, depth: usize) -> ThreadNode {
    ThreadNode {
        id: comment.id.clone(),
        author: comment.author.clone(),
        body: comment.body.clone(),
        score: comment.score,
        created_at: comment.created_at,
        depth,
        children: comment
            .children
            .iter()
            .map(|c| build_comment(c, depth + 1))
            .collect(),
    }
}
