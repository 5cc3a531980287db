//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use widgethub_app::ports::WidgetRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the widget API under [`crate::api::PREFIX`] and adds `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<WR>(state: AppState<WR>) -> Router
where
    WR: WidgetRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest(crate::api::PREFIX, crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
