//! Foundation types for the rebind engine.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Interned file identifiers
//! - [`FqName`] - Fully-qualified names (root-relative dotted paths)
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//!
//! This module has NO dependencies on other rebind modules.

mod file_id;
mod fqn;

pub use file_id::FileId;
pub use fqn::{FqName, KEYWORDS, ROOT_PREFIX, is_plain_identifier, unquote};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
