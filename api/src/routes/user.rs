use crate::{
    AppState,
    auth::{AuthUser, Identity, create_token, removal_cookie, session_cookie},
    dto::{
        AuthResponse, LoginRequest, MeResponse, MessageResponse, SignupRequest,
        UpdateProfileRequest, UserResponse, ValidatedJson,
    },
    errors::ApiError,
    models::{NewUser, ProfileUpdate, User},
};
use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use bcrypt::{hash, verify};
use tracing::info;

/// POST /auth/signup
/// Body: { "name": "...", "email": "...", "password": "..." }
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>), ApiError> {
    if state.store.find_user_by_email(&payload.email).await?.is_some() {
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let hashed_password = hash_password(payload.password, state.config.bcrypt_cost).await?;

    // The store re-checks the email, so a racing signup still gets a 409.
    let user = state
        .store
        .create_user(NewUser {
            name: payload.name,
            email: payload.email,
            hashed_password,
        })
        .await?;

    info!("New user registered: {}", user.email);

    let (jar, body) = start_session(&state, jar, user)?;
    Ok((StatusCode::CREATED, jar, body))
}

/// POST /auth/login
/// Body: { "email": "...", "password": "..." }
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let user = state
        .store
        .find_user_by_email(&payload.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(payload.password, user.hashed_password.clone()).await? {
        return Err(ApiError::InvalidCredentials);
    }

    info!("User logged in: {}", user.email);

    start_session(&state, jar, user)
}

/// POST /auth/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.add(removal_cookie()),
        Json(MessageResponse {
            message: "Logged out",
        }),
    )
}

/// GET /auth/me
/// Cookie: token=<jwt>
pub async fn get_current_user(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<MeResponse>, ApiError> {
    let user = state
        .store
        .find_user(identity.id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(MeResponse { user: user.into() }))
}

/// PUT /users/profile
/// Body: { "name"?: "...", "email"?: "...", "bio"?: "..." }
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .store
        .update_user(
            identity.id,
            ProfileUpdate {
                name: payload.name,
                email: payload.email,
                bio: payload.bio,
            },
        )
        .await?;

    info!("Profile updated for user {}", user.id);

    Ok(Json(user.into()))
}

fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: User,
) -> Result<(CookieJar, Json<AuthResponse>), ApiError> {
    let identity = Identity::from(&user);
    let token = create_token(
        &identity,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;

    Ok((
        jar.add(session_cookie(token.clone(), &state.config)),
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| ApiError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))
}

async fn verify_password(password: String, hashed: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || verify(password, &hashed))
        .await
        .map_err(|e| ApiError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))
}
