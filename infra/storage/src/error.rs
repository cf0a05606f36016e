use std::borrow::Cow;

/// Boxed error produced by a [`Codec`](crate::Codec) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A specialized [`StoreError`] enum of this crate.
#[shelf_derive::shelf_error]
pub enum StoreError {
    #[error("Missing collection - no place to save record{}", format_context(.context))]
    MissingCollection { context: Option<Cow<'static, str>> },

    #[error("Missing resource - unable to save record (no name){}", format_context(.context))]
    MissingResource { context: Option<Cow<'static, str>> },

    #[error("Invalid {kind} name '{name}'{}: names must be a single path segment", format_context(.context))]
    InvalidName {
        kind: &'static str,
        name: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Not found{}: {path}", format_context(.context))]
    NotFound { path: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Serialization failure{}: {source}", format_context(.context))]
    Serialization { source: BoxError, context: Option<Cow<'static, str>> },

    #[error("Filesystem I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}

impl StoreError {
    /// Returns `true` when the error reports a missing collection or resource.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
