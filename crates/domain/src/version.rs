//! Optimistic-locking version counter.
//!
//! A stored widget starts at [`Version::INITIAL`] and every successful update
//! moves it to [`Version::next`]. The value doubles as the HTTP entity tag.

use crate::id::define_positive;

define_positive!(
    /// Monotonic revision number of a stored [`Widget`](crate::widget::Widget).
    Version,
    InvalidVersion
);

impl Version {
    /// Version assigned on first save.
    pub const INITIAL: Self = Self(1);

    /// The version an update will produce.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::INITIAL
    }
}
