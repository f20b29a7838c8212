use std::fmt;

use crate::error::ThreadError;

const MIN_ID_LEN: usize = 6;
const MAX_ID_LEN: usize = 8;
const COMMENTS_SEGMENT: &str = "comments/";

/// Validated post id, as accepted by the thread endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostId(String);

impl PostId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accepts a bare 6-8 character alphanumeric id or any URL containing
/// `comments/<id>`. Runs before any network call.
pub fn extract_post_id(input: &str) -> Result<PostId, ThreadError> {
    let trimmed = input.trim();
    let is_id_char = |c: char| c.is_ascii_alphanumeric();

    if (MIN_ID_LEN..=MAX_ID_LEN).contains(&trimmed.len()) && trimmed.chars().all(is_id_char) {
        return Ok(PostId(trimmed.to_string()));
    }

    for (at, _) in trimmed.match_indices(COMMENTS_SEGMENT) {
        let rest = &trimmed[at + COMMENTS_SEGMENT.len()..];
        let run = rest.chars().take_while(|c| is_id_char(*c)).count();
        if run >= MIN_ID_LEN {
            // ASCII run, so char count equals byte length
            return Ok(PostId(rest[..run.min(MAX_ID_LEN)].to_string()));
        }
    }

    Err(ThreadError::MalformedInput(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_ids_are_accepted() {
        assert_eq!(extract_post_id("abc123").expect("6").as_str(), "abc123");
        assert_eq!(extract_post_id("  1a2B3c4D ").expect("8").as_str(), "1a2B3c4D");
    }

    #[test]
    fn ids_are_pulled_out_of_urls() {
        let url = "https://www.reddit.com/r/rust/comments/1abcxyz/some_title/";
        assert_eq!(extract_post_id(url).expect("url").as_str(), "1abcxyz");

        // runs longer than 8 keep the first 8 characters
        let long = "https://redd.it/r/x/comments/abcdefghij/";
        assert_eq!(extract_post_id(long).expect("long").as_str(), "abcdefgh");

        // a short first match does not hide a later valid one
        let twice = "/comments/ab/comments/zzzzzz";
        assert_eq!(extract_post_id(twice).expect("twice").as_str(), "zzzzzz");
    }

    #[test]
    fn malformed_input_is_rejected() {
        for bad in ["", "abc", "abc-123", "abcdefghijk", "https://x/comments/abc/", "comments/"] {
            assert!(
                matches!(extract_post_id(bad), Err(ThreadError::MalformedInput(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
