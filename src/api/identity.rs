//! Acting-user resolution.
//!
//! Authentication happens upstream; by the time a request reaches us the
//! caller's identity is carried in `X-User-Id`. Recipe routes refuse to run
//! without it, since every read is visibility-scoped to that user.

use axum::{extract::Request, middleware::Next, response::Response};

use super::ApiError;
use crate::constants::USER_ID_HEADER;
use crate::domain::UserId;

pub async fn identity_middleware(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let user = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(UserId::new)
        .ok_or_else(|| ApiError::unauthorized(format!("Missing {USER_ID_HEADER} header")))?;

    tracing::debug!(user = %user, "Resolved acting user");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
