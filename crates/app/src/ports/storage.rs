//! Storage port: repository trait for widget persistence.

use std::future::Future;

use widgethub_domain::error::WidgetHubError;
use widgethub_domain::id::WidgetId;
use widgethub_domain::version::Version;
use widgethub_domain::widget::{Widget, WidgetChanges};

/// Repository for persisting and querying [`Widget`]s.
///
/// Implementations own their storage handle; nothing here is global.
pub trait WidgetRepository {
    /// Store a new widget, assigning a fresh id and [`Version::INITIAL`].
    ///
    /// Any `id` or `version` already set on `widget` is ignored. Ids are never
    /// reused, even after the widget that held them is deleted.
    fn create(&self, widget: Widget) -> impl Future<Output = Result<Widget, WidgetHubError>> + Send;

    /// Get a widget by its identifier.
    fn get_by_id(
        &self,
        id: WidgetId,
    ) -> impl Future<Output = Result<Option<Widget>, WidgetHubError>> + Send;

    /// Get all widgets, ordered by id.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Widget>, WidgetHubError>> + Send;

    /// Apply `changes` to the stored widget `id`, atomically checking that
    /// its stored version still equals `expected`.
    ///
    /// On success the stored version becomes `expected.next()` and the stored
    /// copy is returned. Of several concurrent callers holding the same
    /// `expected`, at most one succeeds.
    ///
    /// Fails with [`WidgetHubError::NotFound`] when `id` is unknown and
    /// [`WidgetHubError::Conflict`] when `expected` is stale.
    fn update(
        &self,
        id: WidgetId,
        expected: Version,
        changes: WidgetChanges,
    ) -> impl Future<Output = Result<Widget, WidgetHubError>> + Send;

    /// Delete a widget. Deleting an unknown id is not an error.
    fn delete(&self, id: WidgetId) -> impl Future<Output = Result<(), WidgetHubError>> + Send;
}
