//! Bearer-token extractors.
//!
//! Every token is resolved to a live account on each request: a structurally
//! valid, unexpired token of a deactivated or deleted user is rejected with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use ritmofit_auth_types::bearer::bearer_token;
use ritmofit_auth_types::token::validate_access_token;
use ritmofit_domain::user::Role;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Resolve a raw bearer token to the live user it was issued for.
pub async fn authenticate<R: UserRepository>(
    users: &R,
    jwt_secret: &str,
    token: Option<&str>,
) -> Result<User, ApiError> {
    let token = token.ok_or(ApiError::InvalidToken)?;
    let info = validate_access_token(token, jwt_secret).map_err(|e| {
        tracing::debug!(error = %e, "rejected access token");
        ApiError::InvalidToken
    })?;
    let user = users
        .find_by_id(info.user_id)
        .await?
        .ok_or(ApiError::InvalidToken)?;
    if !user.is_live() {
        return Err(ApiError::InvalidToken);
    }
    Ok(user)
}

/// Any authenticated, live user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    // Values are pulled out of `parts` synchronously so the returned future
    // borrows nothing from the request.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(&parts.headers).map(str::to_owned);
        let users = state.user_repo();
        let secret = state.jwt_secret.clone();

        async move {
            let user = authenticate(&users, &secret, token.as_deref()).await?;
            Ok(Self(user))
        }
    }
}

/// An authenticated admin. Other roles get 403.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let auth = AuthUser::from_request_parts(parts, state);
        async move {
            let AuthUser(user) = auth.await?;
            if !user.role.is_admin() {
                return Err(ApiError::Forbidden);
            }
            Ok(Self(user))
        }
    }
}

/// An authenticated admin or instructor.
#[derive(Debug, Clone)]
pub struct RequireStaff(pub User);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let auth = AuthUser::from_request_parts(parts, state);
        async move {
            let AuthUser(user) = auth.await?;
            if user.role == Role::Socio {
                return Err(ApiError::Forbidden);
            }
            Ok(Self(user))
        }
    }
}
