//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod widgets;

use axum::Router;
use axum::routing::{get, post, put};

use widgethub_app::ports::WidgetRepository;

use crate::state::AppState;

/// Mount point of [`routes`] in the top-level router.
pub const PREFIX: &str = "/rest";

/// Build the `/rest` sub-router.
pub fn routes<WR>() -> Router<AppState<WR>>
where
    WR: WidgetRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/widgets", get(widgets::list::<WR>))
        .route("/widget", post(widgets::create::<WR>))
        .route(
            "/widget/{id}",
            get(widgets::get::<WR>)
                .put(widgets::update::<WR>)
                .delete(widgets::delete::<WR>),
        )
        .route("/proper/widget/{id}", put(widgets::update_checked::<WR>))
}
