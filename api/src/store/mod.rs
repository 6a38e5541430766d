use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Comment, CommentView, NewComment, NewPost, NewUser, Post, PostQuery, PostView, ProfileUpdate,
    User,
};

mod memory;

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),
    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),
    #[error("store failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence seam for the application.
///
/// Implementations own the uniqueness constraints (user email, one like per
/// user and post); callers never lock around them.
#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn create_user(&self, user: NewUser) -> StoreResult<User>;
    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn update_user(&self, id: Uuid, update: ProfileUpdate) -> StoreResult<User>;
    async fn count_users(&self) -> StoreResult<usize>;

    // Posts
    async fn create_post(&self, post: NewPost) -> StoreResult<Post>;
    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>>;
    async fn post_view(&self, id: i64, viewer: Option<Uuid>) -> StoreResult<Option<PostView>>;
    /// Returns the requested page and the total number of matches.
    async fn list_posts(&self, query: &PostQuery) -> StoreResult<(Vec<PostView>, usize)>;
    async fn update_post(&self, id: i64, content: String) -> StoreResult<Post>;
    /// Also removes the post's comments and likes.
    async fn delete_post(&self, id: i64) -> StoreResult<Post>;

    // Comments
    async fn create_comment(&self, comment: NewComment) -> StoreResult<Comment>;
    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>>;
    /// Comments of one post, oldest first.
    async fn list_comments(&self, post_id: i64) -> StoreResult<Vec<CommentView>>;
    async fn update_comment(&self, id: i64, content: String) -> StoreResult<Comment>;
    async fn delete_comment(&self, id: i64) -> StoreResult<Comment>;

    // Likes
    async fn has_liked(&self, user_id: Uuid, post_id: i64) -> StoreResult<bool>;
    /// Fails with `Conflict` when the pair already exists.
    async fn insert_like(&self, user_id: Uuid, post_id: i64) -> StoreResult<()>;
    /// Returns whether a row was removed.
    async fn delete_like(&self, user_id: Uuid, post_id: i64) -> StoreResult<bool>;
}
