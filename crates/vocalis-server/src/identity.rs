use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use vocalis_auth::{IdentityResolver, extract_bearer};
use vocalis_core::UserIdentity;

use crate::error::ApiError;

/// Require a bearer credential the auth service accepts
///
/// On success the resolved [`UserIdentity`] is inserted as an
/// `Arc<UserIdentity>` request extension.
pub async fn require_identity(
    State(resolver): State<IdentityResolver>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity: Result<Arc<UserIdentity>, _> = match extract_bearer(request.headers()) {
        Ok(token) => resolver.resolve(token).await,
        Err(e) => Err(e),
    };

    match identity {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %request.uri().path(), "authentication failed");
            ApiError::from(e).into_response()
        }
    }
}
