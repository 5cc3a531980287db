//! Widget: the single resource managed by widgethub.

use crate::error::{ValidationError, WidgetHubError};
use crate::id::WidgetId;
use crate::version::Version;

/// A named widget with an optimistic-locking version.
///
/// `id` is `None` until the widget has been persisted once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub id: Option<WidgetId>,
    pub name: String,
    pub description: String,
    pub version: Version,
}

impl Widget {
    /// Create a builder for constructing a [`Widget`].
    #[must_use]
    pub fn builder() -> WidgetBuilder {
        WidgetBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetHubError::Validation`] when `name` or `description`
    /// is blank.
    pub fn validate(&self) -> Result<(), WidgetHubError> {
        validate_text(&self.name, &self.description)
    }
}

/// The caller-editable part of a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetChanges {
    pub name: String,
    pub description: String,
}

impl WidgetChanges {
    /// Check the same invariants [`Widget::validate`] checks.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetHubError::Validation`] when `name` or `description`
    /// is blank.
    pub fn validate(&self) -> Result<(), WidgetHubError> {
        validate_text(&self.name, &self.description)
    }
}

fn validate_text(name: &str, description: &str) -> Result<(), WidgetHubError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription.into());
    }
    Ok(())
}

/// Step-by-step builder for [`Widget`].
#[derive(Debug, Default)]
pub struct WidgetBuilder {
    id: Option<WidgetId>,
    name: Option<String>,
    description: Option<String>,
    version: Option<Version>,
}

impl WidgetBuilder {
    #[must_use]
    pub fn id(mut self, id: WidgetId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Consume the builder, validate, and return a [`Widget`].
    ///
    /// # Errors
    ///
    /// Returns [`WidgetHubError::Validation`] if `name` or `description` is
    /// missing or blank.
    pub fn build(self) -> Result<Widget, WidgetHubError> {
        let widget = Widget {
            id: self.id,
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            version: self.version.unwrap_or_default(),
        };
        widget.validate()?;
        Ok(widget)
    }
}
