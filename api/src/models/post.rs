use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Author;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub author_id: Uuid,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PostCounts {
    pub comments: usize,
    pub likes: usize,
}

/// A post joined with its author, counts and the viewer's like state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub author: Author,
    pub counts: PostCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liked_by_me: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PostSort {
    #[default]
    Newest,
    Oldest,
    MostCommented,
}

impl PostSort {
    /// Unknown values fall back to newest-first.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("oldest") => PostSort::Oldest,
            Some("most_commented") => PostSort::MostCommented,
            _ => PostSort::Newest,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostQuery {
    /// Case-insensitive match on content or author name.
    pub search: Option<String>,
    pub sort: PostSort,
    /// 1-based.
    pub page: usize,
    pub limit: usize,
    pub viewer: Option<Uuid>,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort: PostSort::Newest,
            page: 1,
            limit: 10,
            viewer: None,
        }
    }
}
