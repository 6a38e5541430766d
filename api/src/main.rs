use social_api::{AppState, Config, app, store::MemoryStore};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_api=info,tower_http=info".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let addr = config.bind_addr.clone();

    // Create application state
    let state = AppState::new(Arc::new(MemoryStore::new()), config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("API Endpoints:");
    info!("  GET    /health                - Health check");
    info!("  POST   /auth/signup           - Create account");
    info!("  POST   /auth/login            - Login");
    info!("  POST   /auth/logout           - Clear session cookie");
    info!("  GET    /auth/me               - Current user (auth)");
    info!("  PUT    /users/profile         - Edit profile (auth)");
    info!("  GET    /posts                 - List posts (search, sort, paginated)");
    info!("  POST   /posts                 - Create post (auth)");
    info!("  GET    /posts/:id             - Get specific post");
    info!("  PUT    /posts/:id             - Edit post (auth, owner only)");
    info!("  DELETE /posts/:id             - Delete post (auth, owner only)");
    info!("  POST   /posts/:id/like        - Toggle like (auth)");
    info!("  GET    /posts/:id/comments    - Comment threads");
    info!("  POST   /posts/:id/comments    - Comment or reply (auth)");
    info!("  PUT    /comments/:id          - Edit comment (auth, owner only)");
    info!("  DELETE /comments/:id          - Delete comment (auth, owner only)");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
