//! Request extractors for the session and host headers and validated JSON bodies.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppError, state::SharedState};

/// Header carrying the session identifier issued by a previous response.
pub const SESSION_ID_HEADER: &str = "x-session-id";
/// Header carrying the host passphrase.
pub const ADMIN_PASSPHRASE_HEADER: &str = "x-admin-passphrase";

/// Session targeted by the request. A request without the header opens a new session.
#[derive(Debug, Clone, Copy)]
pub struct SessionHeader(pub Uuid);

impl<S> FromRequestParts<S> for SessionHeader
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(SESSION_ID_HEADER) else {
            return Ok(Self(Uuid::new_v4()));
        };

        value
            .to_str()
            .ok()
            .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
            .map(Self)
            .ok_or_else(|| AppError::BadRequest("malformed `X-Session-Id` header".into()))
    }
}

/// Whether the request carries the configured host passphrase.
#[derive(Debug, Clone, Copy)]
pub struct HostAccess(pub bool);

impl FromRequestParts<SharedState> for HostAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get(ADMIN_PASSPHRASE_HEADER)
            .and_then(|value| value.to_str().ok());
        Ok(Self(state.is_host(provided)))
    }
}

/// JSON body that has been deserialized and validated. Both failures surface as a 400 [`AppError`].
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await?;
        payload.validate()?;
        Ok(Self(payload))
    }
}
