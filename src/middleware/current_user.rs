use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::api::{response::ApiError, AppState};
use crate::models::User;
use crate::repositories::UserRepository;

/// Header carrying the id of the user authenticated by the upstream proxy.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller. Rejects the request with 401 when the header is
/// missing, malformed, or names an unknown user.
pub struct CurrentUser(pub User);

/// The caller when one is identified. A missing header is anonymous; a bad
/// one is still rejected.
pub struct MaybeUser(pub Option<User>);

/// An authenticated superuser. Other users get 403.
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_user(parts, state).await? {
            Some(user) => Ok(Self(user)),
            None => Err(ApiError::new(
                StatusCode::UNAUTHORIZED,
                "Authentication required",
            )),
        }
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_user(parts, state).await?))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if !user.is_superuser {
            warn!("User {} denied access to admin route {}", user.id, parts.uri.path());
            return Err(ApiError::new(StatusCode::FORBIDDEN, "Administrator access required"));
        }

        Ok(Self(user))
    }
}

async fn resolve_user(parts: &Parts, state: &AppState) -> Result<Option<User>, ApiError> {
    let Some(user_id) = extract_user_id(parts)? else {
        return Ok(None);
    };

    match UserRepository::new(&state.pool).find_by_id(user_id).await {
        Ok(Some(user)) => {
            debug!("Request from user {}", user.id);
            Ok(Some(user))
        }
        Ok(None) => {
            warn!("Request names unknown user {}", user_id);
            Err(ApiError::new(StatusCode::UNAUTHORIZED, "Unknown user"))
        }
        Err(err) => {
            error!("Failed to fetch user {}: {}", user_id, err);
            Err(StatusCode::INTERNAL_SERVER_ERROR.into())
        }
    }
}

fn extract_user_id(parts: &Parts) -> Result<Option<Uuid>, ApiError> {
    let Some(value) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse::<Uuid>().ok())
        .map(Some)
        .ok_or_else(|| {
            warn!("Malformed {} header", USER_ID_HEADER);
            ApiError::new(StatusCode::UNAUTHORIZED, "Malformed user id")
        })
}
