use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

mod thread;

pub use thread::{build_thread, ThreadNode, ThreadNodes};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPost")]
pub struct PostRecord {
    pub id: String,
    pub author: Option<String>,
    pub title: String,
    pub score: i64,
    #[serde(rename = "createdAt")]
    pub created_at: f64,
    #[serde(rename = "numComments")]
    pub num_comments: i64,
    pub selftext: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawComment")]
pub struct CommentRecord {
    pub id: String,
    pub author: Option<String>,
    pub body: String,
    pub score: i64,
    #[serde(rename = "createdAt")]
    pub created_at: f64,
    pub children: Vec<CommentRecord>,
}

/// Response body of the comment-thread endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadPayload {
    pub post: PostRecord,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub comments: Vec<CommentRecord>,
}

/// Body the backend sends alongside a non-success status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

// Both key spellings decode into their own slot; the camelCase one wins
// when both carry a usable number.
#[derive(Deserialize)]
struct RawPost {
    id: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    title: String,
    #[serde(default)]
    score: Option<Value>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<Value>,
    #[serde(rename = "created_utc", default)]
    created_utc: Option<Value>,
    #[serde(rename = "numComments", default)]
    num_comments_camel: Option<Value>,
    #[serde(rename = "num_comments", default)]
    num_comments_snake: Option<Value>,
    #[serde(default, deserialize_with = "nullable_string")]
    selftext: String,
}

impl From<RawPost> for PostRecord {
    fn from(raw: RawPost) -> Self {
        Self {
            id: raw.id,
            author: raw.author,
            title: raw.title,
            score: first_i64(&[raw.score]),
            created_at: first_f64(&[raw.created_at, raw.created_utc]),
            num_comments: first_i64(&[raw.num_comments_camel, raw.num_comments_snake]),
            selftext: raw.selftext,
        }
    }
}

#[derive(Deserialize)]
struct RawComment {
    id: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    body: String,
    #[serde(default)]
    score: Option<Value>,
    #[serde(rename = "createdAt", default)]
    created_at: Option<Value>,
    #[serde(rename = "created_utc", default)]
    created_utc: Option<Value>,
    #[serde(default, deserialize_with = "nullable_vec")]
    children: Vec<CommentRecord>,
}

impl From<RawComment> for CommentRecord {
    fn from(raw: RawComment) -> Self {
        Self {
            id: raw.id,
            author: raw.author,
            body: raw.body,
            score: first_i64(&[raw.score]),
            created_at: first_f64(&[raw.created_at, raw.created_utc]),
            children: raw.children,
        }
    }
}

// Malformed numbers decode to zero instead of failing the whole payload.
fn value_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

fn value_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| value_f64(value).map(|f| f as i64)),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .or_else(|| value_f64(value).map(|f| f as i64)),
        _ => None,
    }
}

fn first_f64(candidates: &[Option<Value>]) -> f64 {
    candidates
        .iter()
        .flatten()
        .find_map(value_f64)
        .unwrap_or(0.0)
}

fn first_i64(candidates: &[Option<Value>]) -> i64 {
    candidates
        .iter()
        .flatten()
        .find_map(value_i64)
        .unwrap_or(0)
}

fn nullable_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn nullable_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_key_spelling() {
        let payload: ThreadPayload = serde_json::from_value(json!({
            "post": {
                "id": "abc123",
                "author": "alice",
                "title": "Hello",
                "score": 42,
                "created_utc": 1000.5,
                "num_comments": 3,
                "selftext": ""
            },
            "comments": []
        }))
        .expect("decode payload");

        assert_eq!(payload.post.created_at, 1000.5);
        assert_eq!(payload.post.num_comments, 3);
        assert!(payload.comments.is_empty());
    }

    #[test]
    fn decodes_camel_case_spelling() {
        let post: PostRecord = serde_json::from_value(json!({
            "id": "p1",
            "author": "alice",
            "title": "Hello",
            "score": 42,
            "createdAt": 1000,
            "numComments": 1,
            "selftext": "body"
        }))
        .expect("decode post");

        assert_eq!(post.created_at, 1000.0);
        assert_eq!(post.num_comments, 1);
        assert_eq!(post.selftext, "body");
    }

    #[test]
    fn malformed_numbers_decode_to_zero() {
        let comment: CommentRecord = serde_json::from_value(json!({
            "id": "c1",
            "author": null,
            "body": null,
            "score": "lots",
            "createdAt": {"nested": true},
            "children": null
        }))
        .expect("decode comment");

        assert_eq!(comment.score, 0);
        assert_eq!(comment.created_at, 0.0);
        assert_eq!(comment.author, None);
        assert_eq!(comment.body, "");
        assert!(comment.children.is_empty());
    }

    #[test]
    fn numeric_strings_and_floats_are_accepted() {
        let comment: CommentRecord = serde_json::from_value(json!({
            "id": "c1",
            "score": " 17 ",
            "created_utc": "1700000000.25",
        }))
        .expect("decode comment");
        assert_eq!(comment.score, 17);
        assert_eq!(comment.created_at, 1_700_000_000.25);

        let comment: CommentRecord = serde_json::from_value(json!({
            "id": "c2",
            "score": 3.9,
        }))
        .expect("decode comment");
        assert_eq!(comment.score, 3);
    }

    #[test]
    fn both_key_spellings_in_one_payload() {
        let payload: ThreadPayload = serde_json::from_str(
            r#"{"post":{"id":"abc123","title":"t","createdAt":1,"created_utc":2,
                "numComments":"n/a","num_comments":4},
                "comments":[{"id":"c1","createdAt":null,"created_utc":7,"children":[]}]}"#,
        )
        .expect("decode payload");

        assert_eq!(payload.post.created_at, 1.0);
        assert_eq!(payload.post.num_comments, 4);
        assert_eq!(payload.comments[0].created_at, 7.0);
    }

    #[test]
    fn serialized_records_decode_back() {
        let post: PostRecord = serde_json::from_value(json!({
            "id": "p1", "title": "Hello", "score": 5, "created_utc": 10, "num_comments": 2
        }))
        .expect("decode post");
        let encoded = serde_json::to_string(&post).expect("encode post");
        assert!(encoded.contains("\"createdAt\":10.0"));
        let decoded: PostRecord = serde_json::from_str(&encoded).expect("decode again");
        assert_eq!(decoded, post);
    }

    #[test]
    fn missing_comments_key_is_empty_thread() {
        let payload: ThreadPayload = serde_json::from_value(json!({
            "post": { "id": "p1", "title": "t" }
        }))
        .expect("decode payload");
        assert!(payload.comments.is_empty());
        assert_eq!(payload.post.score, 0);
        assert_eq!(payload.post.author, None);
    }

    #[test]
    fn error_body_without_message() {
        let body: ErrorBody = serde_json::from_str("{}").expect("decode error body");
        assert_eq!(body.error, None);
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Post ID is required"}"#).expect("decode error body");
        assert_eq!(body.error.as_deref(), Some("Post ID is required"));
    }
}
