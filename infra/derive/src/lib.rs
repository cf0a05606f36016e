#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Shelf infrastructure crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! shelf-derive = { path = "../infra/derive" }
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for declaring a crate's error enum.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to `Result<T, ErrorName>` and to `Result<T, Source>` for every wrapped source type.
/// * **Conversions**: Implements `From<Source>` for variants that wrap a `source` field,
///   so upstream errors propagate with `?`.
/// * **Formatting helper**: Emits a private `format_context` function for use inside
///   `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with **named-field** variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. A variant with a `source` field (or a field marked `#[source]`/`#[from]`)
///    must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use shelf_derive::shelf_error;
/// use std::borrow::Cow;
///
/// #[shelf_error]
/// pub enum StoreError {
///     #[error("Resource not found{}: {path}", format_context(.context))]
///     NotFound { path: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
/// }
///
/// fn touch(path: &std::path::Path) -> Result<(), StoreError> {
///     std::fs::write(path, b"").context("Touching marker file")?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn shelf_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
