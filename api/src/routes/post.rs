use crate::{
    AppState,
    auth::{AuthUser, MaybeAuthUser},
    dto::{
        CreatePostRequest, LikeResponse, ListPostsParams, Pagination, PostListResponse,
        UpdateContentRequest, ValidatedJson,
    },
    errors::ApiError,
    models::{NewPost, Post, PostQuery, PostSort, PostView},
    services::{authorize, toggle_like},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use tracing::info;

const MAX_PAGE_SIZE: usize = 100;

/// POST /posts
/// Body: { "content": "...", "mediaUrl"?: "...", "mediaType"?: "..." }
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(payload): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostView>), ApiError> {
    let post = state
        .store
        .create_post(NewPost {
            author_id: identity.id,
            content: payload.content,
            media_url: payload.media_url,
            media_type: payload.media_type,
        })
        .await?;

    info!("Post created: {} by user {}", post.id, identity.id);

    let view = state
        .store
        .post_view(post.id, Some(identity.id))
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /posts?search=&sort=newest|oldest|most_commented&page=1&limit=10
pub async fn get_posts(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    WithRejection(Query(params), _): WithRejection<Query<ListPostsParams>, ApiError>,
) -> Result<Json<PostListResponse>, ApiError> {
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, MAX_PAGE_SIZE);

    let query = PostQuery {
        search: params.search,
        sort: PostSort::parse(params.sort.as_deref()),
        page,
        limit,
        viewer: viewer.map(|v| v.id),
    };

    let (posts, total) = state.store.list_posts(&query).await?;

    Ok(Json(PostListResponse {
        posts,
        pagination: Pagination::new(total, page, limit),
    }))
}

/// GET /posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<Json<PostView>, ApiError> {
    let view = state
        .store
        .post_view(id, viewer.map(|v| v.id))
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    Ok(Json(view))
}

/// PUT /posts/:id
/// Body: { "content": "..." }
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
    ValidatedJson(payload): ValidatedJson<UpdateContentRequest>,
) -> Result<Json<Post>, ApiError> {
    let post = authorize(state.store.find_post(id).await?, &identity)?;

    let post = state.store.update_post(post.id, payload.content).await?;

    info!("Post updated: {} by user {}", id, identity.id);

    Ok(Json(post))
}

/// DELETE /posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<Json<Post>, ApiError> {
    let post = authorize(state.store.find_post(id).await?, &identity)?;

    let post = state.store.delete_post(post.id).await?;

    info!("Post deleted: {} by user {}", id, identity.id);

    Ok(Json(post))
}

/// POST /posts/:id/like
pub async fn like_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<Json<LikeResponse>, ApiError> {
    let liked = toggle_like(state.store.as_ref(), identity.id, id).await?;

    Ok(Json(LikeResponse { liked }))
}
