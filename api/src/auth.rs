use crate::{config::Config, errors::ApiError, models::User, states::AppState};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Name of the HTTP-only cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (user ID)
    pub name: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// The verified caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

impl TryFrom<Claims> for Identity {
    type Error = TokenError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims.sub.parse().map_err(|_| TokenError::Malformed)?;
        Ok(Self {
            id,
            name: claims.name,
            email: claims.email,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("no token supplied")]
    Missing,
    #[error("token is malformed")]
    Malformed,
    #[error("token has expired")]
    Expired,
    #[error("token signature is invalid")]
    BadSignature,
}

pub fn create_token(identity: &Identity, secret: &str, ttl_hours: i64) -> Result<String, ApiError> {
    let now = Utc::now();
    let expiration = TimeDelta::try_hours(ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| ApiError::Internal("Failed to calculate expiration".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: identity.id.to_string(),
        name: identity.name.clone(),
        email: identity.email.clone(),
        iat: now.timestamp() as usize,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Token Creation failed: {}", e)))
}

/// Checks signature and expiry, keeping the failure reason.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if token.is_empty() {
        return Err(TokenError::Missing);
    }

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        _ => TokenError::Malformed,
    })
}

/// Collapses every verification failure into "no identity".
pub fn identity_from_token(token: Option<&str>, secret: &str) -> Option<Identity> {
    let result = token
        .ok_or(TokenError::Missing)
        .and_then(|token| verify_token(token, secret))
        .and_then(Identity::try_from);

    match result {
        Ok(identity) => Some(identity),
        Err(reason) => {
            debug!("Rejected token: {}", reason);
            None
        }
    }
}

/// Tokens presented by a request: the session cookie first, then a bearer header.
pub fn tokens_from_headers(headers: &HeaderMap) -> Vec<String> {
    let jar = CookieJar::from_headers(headers);
    let cookie = jar.get(TOKEN_COOKIE).map(|c| c.value().to_string());

    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);

    cookie.into_iter().chain(bearer).collect()
}

/// The first presented token that verifies wins, so a stale cookie does not
/// shadow a valid bearer header.
pub fn identity_from_headers(headers: &HeaderMap, secret: &str) -> Option<Identity> {
    let tokens = tokens_from_headers(headers);
    if tokens.is_empty() {
        return identity_from_token(None, secret);
    }
    tokens
        .iter()
        .find_map(|token| identity_from_token(Some(token.as_str()), secret))
}

// A verified token only counts while its subject still exists in the store.
async fn resolve_caller(parts: &Parts, state: &AppState) -> Result<Option<Identity>, ApiError> {
    let Some(identity) = identity_from_headers(&parts.headers, &state.config.jwt_secret) else {
        return Ok(None);
    };

    match state.store.find_user(identity.id).await? {
        Some(user) => Ok(Some(Identity::from(&user))),
        None => {
            debug!("Rejected token for unknown user {}", identity.id);
            Ok(None)
        }
    }
}

pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(time::Duration::seconds(
            config.token_ttl_hours.saturating_mul(3600),
        ))
        .build()
}

/// Expired, empty session cookie; sent on logout.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((TOKEN_COOKIE, ""))
        .http_only(true)
        .path("/")
        .build();
    cookie.make_removal();
    cookie
}

/// Extractor for routes that require a signed-in caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_caller(parts, state)
            .await?
            .map(AuthUser)
            .ok_or(ApiError::Unauthorized)
    }
}

/// Extractor for routes that personalise their output when a caller is known.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Identity>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_caller(parts, state).await.map(MaybeAuthUser)
    }
}
