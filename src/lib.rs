//! # rebind
//!
//! Reference resolution and rebinding engine for a dot-qualified source
//! language: resolve a name occurrence to its declarations, rename it in
//! place, or rewrite it against a fully qualified name and shorten the
//! result back once imports allow it.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → rename, bind-to-fq-name, shortening queue
//!   ↓
//! resolve   → reference engine, binding oracle seam, extensions
//!   ↓
//! syntax    → node factory, mutable tree edits, qualified-element
//!   ↓         navigation, access classification
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → primitives (FileId, FqName, TextRange)
//! ```
//!
//! Semantic binding is not implemented here: hosts supply it through
//! [`resolve::BindingOracle`] and drive the engines through
//! [`ide::Refactoring`].

/// Foundation types: FileId, FqName, text ranges
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Syntax services: factory, mutable edits, qualified-element navigation
pub mod syntax;

/// Resolution: reference engine, oracle seam, extensions, project model
pub mod resolve;

/// Refactoring operations: rename, requalification, shortening
pub mod ide;

// Re-export foundation types
pub use base::{FileId, FqName, TextRange, TextSize};

// Re-export the main entry points
pub use ide::{ExecutionContext, RefactorError, RefactorResult, Refactoring, ShorteningMode};
pub use resolve::{BindingOracle, DeclarationId, SimpleNameReference};
