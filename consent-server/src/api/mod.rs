pub(crate) mod consent;
pub(crate) mod health;

use crate::state::AppState;
use axum::Router;

/// Combines all API routes into a single router. None of the routes
/// carry authentication; the relay trusts its network placement.
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(consent::router())
}
