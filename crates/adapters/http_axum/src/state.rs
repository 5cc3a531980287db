//! Shared application state for axum handlers.

use std::sync::Arc;

use widgethub_app::ports::WidgetRepository;
use widgethub_app::services::widget_service::WidgetService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need to
/// be `Clone`; only the `Arc` wrapper is cloned.
pub struct AppState<WR> {
    /// Widget CRUD service.
    pub widget_service: Arc<WidgetService<WR>>,
}

impl<WR> Clone for AppState<WR> {
    fn clone(&self) -> Self {
        Self {
            widget_service: Arc::clone(&self.widget_service),
        }
    }
}

impl<WR> AppState<WR>
where
    WR: WidgetRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(widget_service: WidgetService<WR>) -> Self {
        Self {
            widget_service: Arc::new(widget_service),
        }
    }
}
