//! Resolution layer: the oracle seam, the reference engine, the extension
//! registry and the project inclusion model.

pub mod engine;
pub mod extensions;
pub mod oracle;
pub mod project;

pub use engine::{can_be_reference_to, import_alias, resolve_targets, SimpleNameReference};
pub use extensions::{ExtensionRegistry, ReferenceExtension};
pub use oracle::{
    BindingOracle, BodyResolveMode, DeclKind, DeclarationId, RawTarget, ResolutionContext,
};
pub use project::ProjectModel;
