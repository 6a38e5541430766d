use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::Identity,
    errors::ApiError,
    models::{Comment, Post},
};

/// Entities that only their author may edit or delete.
pub trait Owned {
    const KIND: &'static str;

    fn id(&self) -> i64;
    fn owner_id(&self) -> Uuid;
}

impl Owned for Post {
    const KIND: &'static str = "Post";

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}

impl Owned for Comment {
    const KIND: &'static str = "Comment";

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}

/// Gate for mutations: a missing target is `NotFound`, someone else's target
/// is `Forbidden`. Only an `Ok` may be mutated.
pub fn authorize<T: Owned>(target: Option<T>, actor: &Identity) -> Result<T, ApiError> {
    let target = target.ok_or(ApiError::NotFound(T::KIND))?;

    if target.owner_id() != actor.id {
        warn!(
            "User {} tried to modify {} {} owned by {}",
            actor.id,
            T::KIND,
            target.id(),
            target.owner_id()
        );
        return Err(ApiError::Forbidden);
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn actor(n: u128) -> Identity {
        Identity {
            id: Uuid::from_u128(n),
            name: "someone".to_string(),
            email: format!("user{}@example.com", n),
        }
    }

    fn post(author: u128) -> Post {
        Post {
            id: 5,
            author_id: Uuid::from_u128(author),
            content: "hello".to_string(),
            media_url: None,
            media_type: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_passes() {
        let post = authorize(Some(post(1)), &actor(1)).unwrap();
        assert_eq!(post.id, 5);
    }

    #[test]
    fn non_owner_is_forbidden() {
        assert!(matches!(
            authorize(Some(post(1)), &actor(2)),
            Err(ApiError::Forbidden)
        ));
    }

    #[test]
    fn missing_target_is_not_found() {
        assert!(matches!(
            authorize::<Comment>(None, &actor(1)),
            Err(ApiError::NotFound("Comment"))
        ));
    }
}
