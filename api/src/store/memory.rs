use std::{
    cmp::Reverse,
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{DashMap, mapref::entry::Entry};
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    Author, Comment, CommentView, Like, NewComment, NewPost, NewUser, Post, PostCounts, PostQuery,
    PostSort, PostView, ProfileUpdate, User,
};

/// Process-local store built on `DashMap`.
///
/// Each table is its own map; uniqueness checks go through the entry API so
/// they are atomic per key. Users get random v4 ids; posts, comments and likes
/// come from per-table sequences starting at 1.
#[derive(Debug)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    email_index: DashMap<String, Uuid>, // Quick Lookup by Email
    posts: DashMap<i64, Post>,
    comments: DashMap<i64, Comment>,
    likes: DashMap<(Uuid, i64), Like>, // keyed by (user_id, post_id)
    post_seq: AtomicI64,
    comment_seq: AtomicI64,
    like_seq: AtomicI64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            email_index: DashMap::new(),
            posts: DashMap::new(),
            comments: DashMap::new(),
            likes: DashMap::new(),
            post_seq: AtomicI64::new(1),
            comment_seq: AtomicI64::new(1),
            like_seq: AtomicI64::new(1),
        }
    }

    fn author(&self, user_id: Uuid) -> StoreResult<Author> {
        self.users
            .get(&user_id)
            .map(|user| Author::from(user.value()))
            .ok_or_else(|| StoreError::Backend(format!("author {} is missing", user_id)))
    }

    fn counts(&self, post_id: i64) -> PostCounts {
        PostCounts {
            comments: self
                .comments
                .iter()
                .filter(|c| c.post_id == post_id)
                .count(),
            likes: self.likes.iter().filter(|l| l.post_id == post_id).count(),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let id = match self.email_index.entry(user.email.clone()) {
            Entry::Occupied(_) => {
                return Err(StoreError::Conflict("User already exists".to_string()));
            }
            Entry::Vacant(slot) => {
                let id = Uuid::new_v4();
                slot.insert(id);
                id
            }
        };

        let now = Utc::now();
        let user = User {
            id,
            name: user.name,
            email: user.email,
            hashed_password: user.hashed_password,
            bio: None,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let Some(id) = self.email_index.get(email).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.users.get(&id).map(|u| u.value().clone()))
    }

    async fn update_user(&self, id: Uuid, update: ProfileUpdate) -> StoreResult<User> {
        let current_email = self
            .users
            .get(&id)
            .map(|u| u.email.clone())
            .ok_or(StoreError::NotFound("User"))?;

        if let Some(email) = update.email.as_ref().filter(|e| **e != current_email) {
            match self.email_index.entry(email.clone()) {
                Entry::Occupied(_) => {
                    return Err(StoreError::Conflict("Email already in use".to_string()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.email_index.remove(&current_email);
        }

        let mut user = self.users.get_mut(&id).ok_or(StoreError::NotFound("User"))?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(bio) = update.bio {
            user.bio = Some(bio);
        }
        user.updated_at = Utc::now();
        Ok(user.value().clone())
    }

    async fn count_users(&self) -> StoreResult<usize> {
        Ok(self.users.len())
    }

    async fn create_post(&self, post: NewPost) -> StoreResult<Post> {
        if !self.users.contains_key(&post.author_id) {
            return Err(StoreError::NotFound("User"));
        }

        let now = Utc::now();
        let post = Post {
            id: self.post_seq.fetch_add(1, Ordering::Relaxed),
            author_id: post.author_id,
            content: post.content,
            media_url: post.media_url,
            media_type: post.media_type,
            created_at: now,
            updated_at: now,
        };
        self.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_post(&self, id: i64) -> StoreResult<Option<Post>> {
        Ok(self.posts.get(&id).map(|p| p.value().clone()))
    }

    async fn post_view(&self, id: i64, viewer: Option<Uuid>) -> StoreResult<Option<PostView>> {
        let Some(post) = self.posts.get(&id).map(|p| p.value().clone()) else {
            return Ok(None);
        };

        Ok(Some(PostView {
            author: self.author(post.author_id)?,
            counts: self.counts(post.id),
            liked_by_me: viewer.map(|user_id| self.likes.contains_key(&(user_id, post.id))),
            post,
        }))
    }

    async fn list_posts(&self, query: &PostQuery) -> StoreResult<(Vec<PostView>, usize)> {
        let mut comment_counts: HashMap<i64, usize> = HashMap::new();
        for comment in self.comments.iter() {
            *comment_counts.entry(comment.post_id).or_default() += 1;
        }
        let mut like_counts: HashMap<i64, usize> = HashMap::new();
        let mut liked: HashSet<i64> = HashSet::new();
        for like in self.likes.iter() {
            *like_counts.entry(like.post_id).or_default() += 1;
            if Some(like.user_id) == query.viewer {
                liked.insert(like.post_id);
            }
        }

        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut views: Vec<PostView> = self
            .posts
            .iter()
            .filter_map(|entry| {
                let post = entry.value();
                let author = self.users.get(&post.author_id).map(|u| Author::from(u.value()))?;
                if let Some(needle) = &needle {
                    let hit = post.content.to_lowercase().contains(needle)
                        || author.name.to_lowercase().contains(needle);
                    if !hit {
                        return None;
                    }
                }
                Some(PostView {
                    counts: PostCounts {
                        comments: comment_counts.get(&post.id).copied().unwrap_or(0),
                        likes: like_counts.get(&post.id).copied().unwrap_or(0),
                    },
                    liked_by_me: query.viewer.map(|_| liked.contains(&post.id)),
                    post: post.clone(),
                    author,
                })
            })
            .collect();

        match query.sort {
            PostSort::Newest => {
                views.sort_by_key(|v| Reverse((v.post.created_at, v.post.id)));
            }
            PostSort::Oldest => {
                views.sort_by_key(|v| (v.post.created_at, v.post.id));
            }
            PostSort::MostCommented => {
                views.sort_by_key(|v| Reverse((v.counts.comments, v.post.created_at, v.post.id)));
            }
        }

        let total = views.len();
        let limit = query.limit.max(1);
        let start = query.page.max(1).saturating_sub(1).saturating_mul(limit);
        let page = views.into_iter().skip(start).take(limit).collect();

        Ok((page, total))
    }

    async fn update_post(&self, id: i64, content: String) -> StoreResult<Post> {
        let mut post = self.posts.get_mut(&id).ok_or(StoreError::NotFound("Post"))?;
        post.content = content;
        post.updated_at = Utc::now();
        Ok(post.value().clone())
    }

    async fn delete_post(&self, id: i64) -> StoreResult<Post> {
        let (_, post) = self.posts.remove(&id).ok_or(StoreError::NotFound("Post"))?;
        self.comments.retain(|_, c| c.post_id != id);
        self.likes.retain(|(_, post_id), _| *post_id != id);
        Ok(post)
    }

    async fn create_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        if !self.posts.contains_key(&comment.post_id) {
            return Err(StoreError::NotFound("Post"));
        }

        let now = Utc::now();
        let comment = Comment {
            id: self.comment_seq.fetch_add(1, Ordering::Relaxed),
            post_id: comment.post_id,
            author_id: comment.author_id,
            parent_id: comment.parent_id,
            content: comment.content,
            created_at: now,
            updated_at: now,
        };
        self.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>> {
        Ok(self.comments.get(&id).map(|c| c.value().clone()))
    }

    async fn list_comments(&self, post_id: i64) -> StoreResult<Vec<CommentView>> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .map(|c| c.value().clone())
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));

        comments
            .into_iter()
            .map(|comment| {
                Ok(CommentView {
                    author: self.author(comment.author_id)?,
                    comment,
                })
            })
            .collect()
    }

    async fn update_comment(&self, id: i64, content: String) -> StoreResult<Comment> {
        let mut comment = self
            .comments
            .get_mut(&id)
            .ok_or(StoreError::NotFound("Comment"))?;
        comment.content = content;
        comment.updated_at = Utc::now();
        Ok(comment.value().clone())
    }

    async fn delete_comment(&self, id: i64) -> StoreResult<Comment> {
        self.comments
            .remove(&id)
            .map(|(_, comment)| comment)
            .ok_or(StoreError::NotFound("Comment"))
    }

    async fn has_liked(&self, user_id: Uuid, post_id: i64) -> StoreResult<bool> {
        Ok(self.likes.contains_key(&(user_id, post_id)))
    }

    async fn insert_like(&self, user_id: Uuid, post_id: i64) -> StoreResult<()> {
        match self.likes.entry((user_id, post_id)) {
            Entry::Occupied(_) => Err(StoreError::Conflict("Post already liked".to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Like {
                    id: self.like_seq.fetch_add(1, Ordering::Relaxed),
                    user_id,
                    post_id,
                    created_at: Utc::now(),
                });
                Ok(())
            }
        }
    }

    async fn delete_like(&self, user_id: Uuid, post_id: i64) -> StoreResult<bool> {
        Ok(self.likes.remove(&(user_id, post_id)).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            hashed_password: "hash".to_string(),
        }
    }

    fn new_post(author_id: Uuid, content: &str) -> NewPost {
        NewPost {
            author_id,
            content: content.to_string(),
            media_url: None,
            media_type: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        store.create_user(new_user("Ann", "ann@example.com")).await.unwrap();

        let err = store
            .create_user(new_user("Other Ann", "ann@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn profile_email_change_moves_the_index() {
        let store = MemoryStore::new();
        let ann = store.create_user(new_user("Ann", "ann@example.com")).await.unwrap();
        store.create_user(new_user("Bob", "bob@example.com")).await.unwrap();

        let taken = ProfileUpdate {
            email: Some("bob@example.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            store.update_user(ann.id, taken).await,
            Err(StoreError::Conflict(_))
        ));

        let update = ProfileUpdate {
            email: Some("ann@new.example".to_string()),
            bio: Some("hello".to_string()),
            ..Default::default()
        };
        let updated = store.update_user(ann.id, update).await.unwrap();
        assert_eq!(updated.bio.as_deref(), Some("hello"));
        assert!(store.find_user_by_email("ann@example.com").await.unwrap().is_none());
        assert_eq!(
            store.find_user_by_email("ann@new.example").await.unwrap().map(|u| u.id),
            Some(ann.id)
        );
    }

    #[tokio::test]
    async fn like_pair_is_unique() {
        let store = MemoryStore::new();
        let ann = store.create_user(new_user("Ann", "ann@example.com")).await.unwrap();
        let post = store.create_post(new_post(ann.id, "hi")).await.unwrap();

        store.insert_like(ann.id, post.id).await.unwrap();
        assert!(matches!(
            store.insert_like(ann.id, post.id).await,
            Err(StoreError::Conflict(_))
        ));
        assert!(store.has_liked(ann.id, post.id).await.unwrap());
        assert!(store.delete_like(ann.id, post.id).await.unwrap());
        assert!(!store.delete_like(ann.id, post.id).await.unwrap());
    }

    #[tokio::test]
    async fn listing_searches_sorts_and_paginates() {
        let store = MemoryStore::new();
        let ann = store.create_user(new_user("Ann", "ann@example.com")).await.unwrap();
        let bob = store.create_user(new_user("Bob", "bob@example.com")).await.unwrap();

        let first = store.create_post(new_post(ann.id, "Rust is fun")).await.unwrap();
        let second = store.create_post(new_post(bob.id, "Gardening notes")).await.unwrap();
        let third = store.create_post(new_post(ann.id, "more RUST")).await.unwrap();

        store
            .create_comment(NewComment {
                post_id: second.id,
                author_id: ann.id,
                parent_id: None,
                content: "nice".to_string(),
            })
            .await
            .unwrap();

        let (page, total) = store.list_posts(&PostQuery::default()).await.unwrap();
        assert_eq!(total, 3);
        let ids: Vec<i64> = page.iter().map(|v| v.post.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        let query = PostQuery {
            search: Some("rust".to_string()),
            sort: PostSort::Oldest,
            ..Default::default()
        };
        let (page, total) = store.list_posts(&query).await.unwrap();
        assert_eq!(total, 2);
        assert_eq!(page[0].post.id, first.id);

        let query = PostQuery {
            search: Some("bob".to_string()),
            ..Default::default()
        };
        let (page, _) = store.list_posts(&query).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].post.id, second.id);

        let query = PostQuery {
            sort: PostSort::MostCommented,
            page: 1,
            limit: 1,
            ..Default::default()
        };
        let (page, total) = store.list_posts(&query).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].post.id, second.id);
        assert_eq!(page[0].counts.comments, 1);

        let query = PostQuery {
            page: 5,
            ..Default::default()
        };
        let (page, total) = store.list_posts(&query).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn deleting_a_post_cascades() {
        let store = MemoryStore::new();
        let ann = store.create_user(new_user("Ann", "ann@example.com")).await.unwrap();
        let post = store.create_post(new_post(ann.id, "bye")).await.unwrap();
        let comment = store
            .create_comment(NewComment {
                post_id: post.id,
                author_id: ann.id,
                parent_id: None,
                content: "c".to_string(),
            })
            .await
            .unwrap();
        store.insert_like(ann.id, post.id).await.unwrap();

        store.delete_post(post.id).await.unwrap();

        assert!(store.find_post(post.id).await.unwrap().is_none());
        assert!(store.find_comment(comment.id).await.unwrap().is_none());
        assert!(!store.has_liked(ann.id, post.id).await.unwrap());
    }
}
