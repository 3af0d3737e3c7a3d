/// Token-required guard
///
/// Runs before every protected task route. It reads the bearer token from
/// the `Authorization` header, validates it with the auth authority, and
/// inserts the resulting [`VerifiedIdentity`] into the request extensions.
/// When validation fails the handler never runs.
///
/// | Outcome | Response |
/// |---|---|
/// | header missing or blank | 401 "missing token" |
/// | authority answered non-2xx | 403 "invalid or expired token" |
/// | authority unreachable or timed out | 502 naming `auth_service` |
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use taskgate_shared::auth::identity::VerifiedIdentity;
/// use taskgate_tasks::{app::AppState, middleware::token_required::token_required};
///
/// async fn whoami(Extension(identity): Extension<VerifiedIdentity>) -> String {
///     identity.username
/// }
///
/// # fn example(state: AppState) -> Router {
/// Router::new()
///     .route("/whoami", get(whoami))
///     .route_layer(middleware::from_fn_with_state(state.clone(), token_required))
///     .with_state(state)
/// # }
/// ```

use crate::{app::AppState, client::AuthClientError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use taskgate_shared::{auth::bearer::token_from_headers, error::ApiError};
use tracing::{debug, warn};

pub async fn token_required(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = token_from_headers(req.headers())
        .ok_or_else(|| ApiError::Unauthorized("missing token".to_string()))?
        .to_string();

    let identity = match state.auth.validate(&token).await {
        Ok(identity) => identity,
        Err(AuthClientError::Rejected(status)) => {
            debug!(status = %status, "Auth authority rejected token");
            return Err(AuthClientError::Rejected(status).into());
        }
        Err(err) => {
            warn!(
                error = %err,
                url = %state.auth.validate_url(),
                "Token validation could not reach auth authority"
            );
            return Err(err.into());
        }
    };

    debug!(user_id = identity.user_id, username = %identity.username, "Token validated");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
