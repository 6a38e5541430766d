mod comment;
mod health;
mod post;
mod user;

use crate::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router() -> Router<AppState> {
    Router::new()
        // Public routes (no auth required)
        .route("/health", get(health::health_check))
        .route("/auth/signup", post(user::signup))
        .route("/auth/login", post(user::login))
        .route("/auth/logout", post(user::logout))
        // Protected routes (auth required)
        .route("/auth/me", get(user::get_current_user))
        .route("/users/profile", put(user::update_profile))
        .route("/posts", get(post::get_posts).post(post::create_post))
        .route(
            "/posts/{id}",
            get(post::get_post)
                .put(post::update_post)
                .delete(post::delete_post),
        )
        .route("/posts/{id}/like", post(post::like_post))
        .route(
            "/posts/{id}/comments",
            get(comment::get_comments).post(comment::create_comment),
        )
        .route(
            "/comments/{id}",
            put(comment::update_comment).delete(comment::delete_comment),
        )
}
