//! Widget service: use-cases for managing widgets.

use widgethub_domain::error::{NotFoundError, WidgetHubError};
use widgethub_domain::id::WidgetId;
use widgethub_domain::version::Version;
use widgethub_domain::widget::{Widget, WidgetChanges};

use crate::ports::WidgetRepository;

/// What the caller believes about the stored version before an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// Only update if the stored version is exactly this one.
    Version(Version),
    /// Update whatever version is currently stored.
    Any,
}

/// Application service for widget CRUD operations.
pub struct WidgetService<R> {
    repo: R,
}

impl<R: WidgetRepository> WidgetService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Look up a widget by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: WidgetId) -> Result<Option<Widget>, WidgetHubError> {
        self.repo.get_by_id(id).await
    }

    /// Look up a widget by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetHubError::NotFound`] when no widget with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_widget(&self, id: WidgetId) -> Result<Widget, WidgetHubError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// List all widgets in id order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn find_all(&self) -> Result<Vec<Widget>, WidgetHubError> {
        self.repo.get_all().await
    }

    /// Create or update a widget.
    ///
    /// A widget without an id is created at [`Version::INITIAL`]. A widget
    /// with an id is treated as an update whose expected version is
    /// `widget.version`.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetHubError::Validation`] if invariants fail,
    /// [`WidgetHubError::NotFound`] or [`WidgetHubError::Conflict`] for an
    /// update against a missing or newer record, or a storage error.
    #[tracing::instrument(
        skip(self, widget),
        fields(widget_id = ?widget.id, widget_name = %widget.name)
    )]
    pub async fn save(&self, widget: Widget) -> Result<Widget, WidgetHubError> {
        widget.validate()?;
        match widget.id {
            None => {
                let created = self.repo.create(widget).await?;
                tracing::info!(widget_id = ?created.id, "widget created");
                Ok(created)
            }
            Some(id) => {
                let changes = WidgetChanges {
                    name: widget.name,
                    description: widget.description,
                };
                self.apply_update(id, widget.version, changes).await
            }
        }
    }

    /// Update the editable fields of widget `id` under `precondition`.
    ///
    /// With [`Precondition::Version`] the comparison happens inside the
    /// repository's atomic update, so a stale version can never overwrite a
    /// newer one. With [`Precondition::Any`] the currently stored version is
    /// read and swapped against, re-reading whenever another writer got in
    /// between, so it never reports a conflict.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetHubError::Validation`] if `changes` are invalid,
    /// [`WidgetHubError::NotFound`] if `id` is unknown,
    /// [`WidgetHubError::Conflict`] if the stored version differs from the
    /// one given in [`Precondition::Version`], or a storage error.
    #[tracing::instrument(skip(self, changes))]
    pub async fn update_widget(
        &self,
        id: WidgetId,
        changes: WidgetChanges,
        precondition: Precondition,
    ) -> Result<Widget, WidgetHubError> {
        changes.validate()?;
        match precondition {
            Precondition::Version(expected) => self.apply_update(id, expected, changes).await,
            Precondition::Any => self.update_current(id, changes).await,
        }
    }

    /// Delete a widget by id. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, id: WidgetId) -> Result<(), WidgetHubError> {
        self.repo.delete(id).await?;
        tracing::info!("widget deleted");
        Ok(())
    }

    async fn apply_update(
        &self,
        id: WidgetId,
        expected: Version,
        changes: WidgetChanges,
    ) -> Result<Widget, WidgetHubError> {
        match self.repo.update(id, expected, changes).await {
            Ok(updated) => {
                tracing::info!(version = %updated.version, "widget updated");
                Ok(updated)
            }
            Err(WidgetHubError::Conflict(err)) => {
                tracing::warn!(
                    expected = %err.expected,
                    actual = %err.actual,
                    "stale widget version"
                );
                Err(err.into())
            }
            Err(err) => Err(err),
        }
    }

    async fn update_current(
        &self,
        id: WidgetId,
        changes: WidgetChanges,
    ) -> Result<Widget, WidgetHubError> {
        loop {
            let current = self.get_widget(id).await?.version;
            match self.repo.update(id, current, changes.clone()).await {
                Ok(updated) => {
                    tracing::info!(version = %updated.version, "widget updated");
                    return Ok(updated);
                }
                // Another writer committed after the read; retry on top of it.
                Err(WidgetHubError::Conflict(err)) => {
                    tracing::debug!(
                        expected = %err.expected,
                        actual = %err.actual,
                        "widget changed during update, retrying"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn not_found(id: WidgetId) -> NotFoundError {
    NotFoundError {
        entity: "Widget",
        id: id.to_string(),
    }
}
