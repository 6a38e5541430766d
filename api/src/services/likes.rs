use tracing::info;
use uuid::Uuid;

use crate::{
    errors::ApiError,
    store::{Store, StoreError},
};

/// Flips the caller's like on a post and returns the new state.
///
/// The (user, post) uniqueness lives in the store; losing an insert race to a
/// concurrent toggle still leaves the post liked.
pub async fn toggle_like(store: &dyn Store, user_id: Uuid, post_id: i64) -> Result<bool, ApiError> {
    if store.find_user(user_id).await?.is_none() {
        return Err(ApiError::NotFound("User"));
    }
    if store.find_post(post_id).await?.is_none() {
        return Err(ApiError::NotFound("Post"));
    }

    if store.has_liked(user_id, post_id).await? {
        store.delete_like(user_id, post_id).await?;
        info!("Post {} unliked by user {}", post_id, user_id);
        return Ok(false);
    }

    match store.insert_like(user_id, post_id).await {
        Ok(()) | Err(StoreError::Conflict(_)) => {
            info!("Post {} liked by user {}", post_id, user_id);
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}
