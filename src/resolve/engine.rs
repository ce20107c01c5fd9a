//! Reference resolution.
//!
//! Resolves a named reference occurrence to declaration targets, applying
//! accessor decomposition for property-style targets and the coarse
//! candidate filter. The oracle does the semantic work; this module owns
//! the decomposition and filtering policy.

use tracing::debug;

use crate::base::FileId;
use crate::parser::ast::{AstNode, ImportAlias, NameRef, SourceFile};
use crate::syntax::read_write_access;

use super::oracle::{BindingOracle, DeclarationId, RawTarget, ResolutionContext};
use super::project::ProjectModel;

/// A reference occurrence: a name node at one textual location, together
/// with the file it lives in. Transient — created for a single
/// resolve/rename/rewrite call.
#[derive(Debug, Clone)]
pub struct SimpleNameReference {
    name_ref: NameRef,
    file: FileId,
}

impl SimpleNameReference {
    pub fn new(name_ref: NameRef, file: FileId) -> Self {
        Self { name_ref, file }
    }

    pub fn name_ref(&self) -> &NameRef {
        &self.name_ref
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    /// The referenced name, quoting stripped.
    pub fn name(&self) -> String {
        self.name_ref.name()
    }

    /// The source file node this reference is attached to, when the tree
    /// root is a file.
    pub fn source_file(&self) -> Option<SourceFile> {
        self.name_ref.syntax().ancestors().last().and_then(SourceFile::cast)
    }
}

/// Resolve a reference to declaration targets.
///
/// Property-style raw targets are decomposed by access kind: the getter
/// when access includes read, the setter when access includes write, the
/// raw property only when neither accessor applies. The result is never a
/// partial decomposition, and is empty exactly when the oracle found
/// nothing.
pub fn resolve_targets(
    oracle: &dyn BindingOracle,
    reference: &SimpleNameReference,
    context: &ResolutionContext,
) -> Vec<DeclarationId> {
    let mut targets = Vec::new();
    for raw in oracle.resolve_reference_targets(reference.name_ref(), context) {
        match raw {
            RawTarget::Declaration(declaration) => targets.push(declaration),
            RawTarget::Property {
                property,
                getter,
                setter,
            } => {
                let access = read_write_access(reference.name_ref());
                let size_before = targets.len();
                if access.is_read() {
                    if let Some(getter) = getter {
                        targets.push(getter);
                    }
                }
                if access.is_write() {
                    if let Some(setter) = setter {
                        targets.push(setter);
                    }
                }
                if targets.len() == size_before {
                    targets.push(property);
                }
            }
        }
    }
    debug!(reference = %reference.name(), count = targets.len(), "resolved reference");
    targets
}

/// Coarse candidate filter: the candidate lives in the same file, or the
/// reference's file is inside project or library sources. An inclusion
/// policy used for pruning, not a correctness guarantee.
pub fn can_be_reference_to(
    oracle: &dyn BindingOracle,
    project: &ProjectModel,
    reference: &SimpleNameReference,
    candidate: DeclarationId,
) -> bool {
    oracle.declaration_file(candidate) == Some(reference.file())
        || project.is_in_project_or_lib_source(reference.file())
}

/// Find an import alias this reference goes through, if any.
///
/// The current file must have an import aliased to the referenced name,
/// and the reference's own resolved target (importable-unwrapped) must be
/// among the alias's resolved candidates — this guards against coincidental
/// name collisions between an unrelated alias and the reference.
pub fn import_alias(
    oracle: &dyn BindingOracle,
    reference: &SimpleNameReference,
) -> Option<ImportAlias> {
    let name = reference.name();
    let file = reference.source_file()?;
    let import = file.find_import_by_alias(&name)?;
    let fq_name = import.imported_fq_name();
    if fq_name.is_root() {
        return None;
    }

    let imported: Vec<DeclarationId> = oracle
        .resolve_fq_name_at(&fq_name, import.syntax())
        .into_iter()
        .map(|declaration| oracle.importable_declaration(declaration))
        .collect();

    let own_targets = resolve_targets(oracle, reference, &ResolutionContext::partial());
    let goes_through_alias = own_targets
        .into_iter()
        .map(|declaration| oracle.importable_declaration(declaration))
        .any(|declaration| imported.contains(&declaration));

    if goes_through_alias {
        import.alias()
    } else {
        debug!(%name, "alias name matches but targets differ; not an alias reference");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::FqName;
    use crate::parser::SyntaxNode;
    use crate::parser::parse_expression;
    use crate::resolve::oracle::DeclKind;

    struct PropertyOracle;

    impl BindingOracle for PropertyOracle {
        fn resolve_reference_targets(
            &self,
            _reference: &NameRef,
            _context: &ResolutionContext,
        ) -> Vec<RawTarget> {
            vec![RawTarget::Property {
                property: DeclarationId(1),
                getter: Some(DeclarationId(2)),
                setter: Some(DeclarationId(3)),
            }]
        }

        fn fq_name_of(&self, _: DeclarationId) -> Option<FqName> {
            None
        }

        fn resolve_fq_name_at(&self, _: &FqName, _: &SyntaxNode) -> Vec<DeclarationId> {
            Vec::new()
        }

        fn declaration_file(&self, _: DeclarationId) -> Option<FileId> {
            None
        }

        fn kind_of(&self, _: DeclarationId) -> DeclKind {
            DeclKind::Property
        }

        fn is_top_level(&self, _: DeclarationId) -> bool {
            false
        }
    }

    fn reference_in(input: &str, name: &str) -> SimpleNameReference {
        let root = parse_expression(input).syntax();
        let name_ref = root
            .descendants()
            .filter_map(NameRef::cast)
            .find(|n| n.name() == name)
            .unwrap();
        SimpleNameReference::new(name_ref, FileId::new(0))
    }

    #[test]
    fn read_only_reference_gets_getter() {
        let reference = reference_in("foo(x)", "x");
        let targets = resolve_targets(&PropertyOracle, &reference, &ResolutionContext::default());
        assert_eq!(targets, vec![DeclarationId(2)]);
    }

    #[test]
    fn write_only_reference_gets_setter() {
        let reference = reference_in("x = y", "x");
        let targets = resolve_targets(&PropertyOracle, &reference, &ResolutionContext::default());
        assert_eq!(targets, vec![DeclarationId(3)]);
    }

    #[test]
    fn read_write_reference_gets_both() {
        let reference = reference_in("x += y", "x");
        let targets = resolve_targets(&PropertyOracle, &reference, &ResolutionContext::default());
        assert_eq!(targets, vec![DeclarationId(2), DeclarationId(3)]);
    }
}
