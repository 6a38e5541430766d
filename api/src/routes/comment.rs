use crate::{
    AppState,
    auth::AuthUser,
    dto::{CreateCommentRequest, UpdateContentRequest, ValidatedJson},
    errors::ApiError,
    models::{Comment, CommentView, NewComment},
    services::{CommentNode, MAX_THREAD_DEPTH, authorize, build_comment_tree, thread_depth},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use tracing::info;

/// GET /posts/:id/comments
/// Response: reply forest, newest threads first
pub async fn get_comments(
    State(state): State<AppState>,
    WithRejection(Path(post_id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<Json<Vec<CommentNode<CommentView>>>, ApiError> {
    if state.store.find_post(post_id).await?.is_none() {
        return Err(ApiError::NotFound("Post"));
    }

    let comments = state.store.list_comments(post_id).await?;

    Ok(Json(build_comment_tree(comments)))
}

/// POST /posts/:id/comments
/// Body: { "content": "...", "parentId"?: 1 }
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    WithRejection(Path(post_id), _): WithRejection<Path<i64>, ApiError>,
    ValidatedJson(payload): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentView>), ApiError> {
    if state.store.find_post(post_id).await?.is_none() {
        return Err(ApiError::NotFound("Post"));
    }

    // A reply must hang off a comment of the same post.
    if let Some(parent_id) = payload.parent_id {
        let parent = state
            .store
            .find_comment(parent_id)
            .await?
            .filter(|p| p.post_id == post_id)
            .ok_or_else(|| {
                ApiError::Validation("Parent comment does not belong to this post".into())
            })?;

        if thread_depth(state.store.as_ref(), &parent).await? >= MAX_THREAD_DEPTH {
            return Err(ApiError::Validation(format!(
                "Replies cannot be nested deeper than {} levels",
                MAX_THREAD_DEPTH
            )));
        }
    }

    let author = state
        .store
        .find_user(identity.id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let comment = state
        .store
        .create_comment(NewComment {
            post_id,
            author_id: identity.id,
            parent_id: payload.parent_id,
            content: payload.content,
        })
        .await?;

    info!(
        "Comment created: {} on post {} by user {}",
        comment.id, post_id, identity.id
    );

    Ok((
        StatusCode::CREATED,
        Json(CommentView {
            comment,
            author: (&author).into(),
        }),
    ))
}

/// PUT /comments/:id
/// Body: { "content": "..." }
pub async fn update_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
    ValidatedJson(payload): ValidatedJson<UpdateContentRequest>,
) -> Result<Json<Comment>, ApiError> {
    let comment = authorize(state.store.find_comment(id).await?, &identity)?;

    let comment = state.store.update_comment(comment.id, payload.content).await?;

    info!("Comment updated: {} by user {}", id, identity.id);

    Ok(Json(comment))
}

/// DELETE /comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<Json<Comment>, ApiError> {
    let comment = authorize(state.store.find_comment(id).await?, &identity)?;

    let comment = state.store.delete_comment(comment.id).await?;

    info!("Comment deleted: {} by user {}", id, identity.id);

    Ok(Json(comment))
}
