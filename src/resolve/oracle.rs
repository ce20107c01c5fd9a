//! The binding oracle surface.
//!
//! Semantic binding and type resolution live in the host environment; the
//! engine sees them through [`BindingOracle`]. Declaration targets are
//! opaque handles; the oracle answers questions about them per call and the
//! engine caches nothing.

use crate::base::{FileId, FqName};
use crate::parser::SyntaxNode;
use crate::parser::ast::NameRef;

/// Opaque handle to a declaration known to the oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclarationId(pub u32);

/// What kind of declaration a handle stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Function,
    Property,
    Getter,
    Setter,
    /// A (possibly destructured) parameter binding.
    Parameter,
    Type,
    Package,
}

/// A raw resolution target as returned by the oracle, before accessor
/// decomposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawTarget {
    /// A plain declaration, passed through unchanged.
    Declaration(DeclarationId),
    /// A property-style target that decomposes into accessors depending on
    /// how the reference uses it.
    Property {
        property: DeclarationId,
        getter: Option<DeclarationId>,
        setter: Option<DeclarationId>,
    },
}

/// How much of the surrounding body the oracle should resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BodyResolveMode {
    #[default]
    Full,
    Partial,
}

/// Opaque resolution context token handed through to the oracle.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResolutionContext {
    pub mode: BodyResolveMode,
}

impl ResolutionContext {
    pub fn partial() -> Self {
        Self {
            mode: BodyResolveMode::Partial,
        }
    }
}

/// Black-box binding/type-resolution subsystem provided by the host.
pub trait BindingOracle {
    /// Resolve a reference occurrence to its raw targets. An empty result
    /// is a legitimate terminal state (unresolved reference), not an error.
    fn resolve_reference_targets(
        &self,
        reference: &NameRef,
        context: &ResolutionContext,
    ) -> Vec<RawTarget>;

    /// The fully-qualified name of a declaration, when it has one.
    fn fq_name_of(&self, declaration: DeclarationId) -> Option<FqName>;

    /// Resolve a fully-qualified name to the declarations visible at the
    /// given position in the tree.
    fn resolve_fq_name_at(&self, fq_name: &FqName, position: &SyntaxNode) -> Vec<DeclarationId>;

    /// The file a declaration lives in, when known.
    fn declaration_file(&self, declaration: DeclarationId) -> Option<FileId>;

    fn kind_of(&self, declaration: DeclarationId) -> DeclKind;

    /// Whether the declaration is a top-level member (importable by name).
    fn is_top_level(&self, declaration: DeclarationId) -> bool;

    /// Unwrap import-introduced wrappers (e.g. a callable imported from an
    /// object) down to the importable declaration.
    fn importable_declaration(&self, declaration: DeclarationId) -> DeclarationId {
        declaration
    }
}
