//! Typed numeric newtypes.
//!
//! Widget identifiers are assigned by the persistence layer, so unlike a
//! random key they can only be *wrapped*, never generated here.

macro_rules! define_positive {
    ($(#[doc = $doc:expr])* $name:ident, $invalid:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw value, rejecting zero and negatives.
            ///
            /// # Errors
            ///
            #[doc = concat!(
                "Returns [`ValidationError::",
                stringify!($invalid),
                "`](crate::error::ValidationError) when `value < 1`."
            )]
            pub fn new(value: i64) -> Result<Self, $crate::error::ValidationError> {
                if value < 1 {
                    return Err($crate::error::ValidationError::$invalid(value.to_string()));
                }
                Ok(Self(value))
            }

            /// Access the inner value.
            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = $crate::error::ValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<i64>()
                    .map_err(|_| $crate::error::ValidationError::$invalid(s.to_string()))
                    .and_then(Self::new)
            }
        }
    };
}

pub(crate) use define_positive;

define_positive!(
    /// Unique identifier for a [`Widget`](crate::widget::Widget).
    WidgetId,
    InvalidId
);
