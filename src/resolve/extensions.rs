//! Pluggable reference extensions.
//!
//! Externally registered resolvers/renamers generalize resolution to
//! reference kinds the core does not know about (cross-language bridges and
//! the like). They are queried in registration order; the first match wins.
//! A misbehaving extension is contained, logged, and skipped so the tree is
//! never left partially rewritten on its account.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::warn;

use crate::parser::SyntaxNode;
use crate::parser::ast::NameRef;
use crate::syntax::SyntaxFactory;

use super::oracle::DeclarationId;

/// A pluggable resolver/renamer registered by the host.
pub trait ReferenceExtension {
    /// Whether `reference` is a reference to `candidate` by this
    /// extension's rules. Existence check, not enumeration.
    fn is_reference_to(&self, _reference: &NameRef, _candidate: DeclarationId) -> bool {
        false
    }

    /// Produce a custom replacement node for a rename, or `None` to defer
    /// to the default behavior.
    fn handle_rename(
        &self,
        _reference: &NameRef,
        _factory: &SyntaxFactory,
        _new_name: &str,
    ) -> Option<SyntaxNode> {
        None
    }

    /// Name used in log messages.
    fn name(&self) -> &str {
        "unnamed"
    }
}

/// Ordered list of registered extensions.
#[derive(Default, Clone)]
pub struct ExtensionRegistry {
    extensions: Vec<Arc<dyn ReferenceExtension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, extension: Arc<dyn ReferenceExtension>) {
        self.extensions.push(extension);
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// First-match-wins existence check across all extensions.
    pub fn is_reference_to(&self, reference: &NameRef, candidate: DeclarationId) -> bool {
        for extension in &self.extensions {
            let result = catch_unwind(AssertUnwindSafe(|| {
                extension.is_reference_to(reference, candidate)
            }));
            match result {
                Ok(true) => return true,
                Ok(false) => {}
                Err(_) => {
                    warn!(extension = extension.name(), "extension panicked in is_reference_to; skipping");
                }
            }
        }
        false
    }

    /// First non-null custom rename replacement, if any extension offers one.
    pub fn handle_rename(
        &self,
        reference: &NameRef,
        factory: &SyntaxFactory,
        new_name: &str,
    ) -> Option<SyntaxNode> {
        for extension in &self.extensions {
            let result = catch_unwind(AssertUnwindSafe(|| {
                extension.handle_rename(reference, factory, new_name)
            }));
            match result {
                Ok(Some(node)) => return Some(node),
                Ok(None) => {}
                Err(_) => {
                    warn!(extension = extension.name(), "extension panicked in handle_rename; skipping");
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("len", &self.extensions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::AstNode;
    use crate::parser::parse_expression;

    struct Panicking;
    impl ReferenceExtension for Panicking {
        fn is_reference_to(&self, _: &NameRef, _: DeclarationId) -> bool {
            panic!("misbehaving extension")
        }
        fn name(&self) -> &str {
            "panicking"
        }
    }

    struct Matching;
    impl ReferenceExtension for Matching {
        fn is_reference_to(&self, _: &NameRef, candidate: DeclarationId) -> bool {
            candidate == DeclarationId(7)
        }
    }

    fn some_ref() -> NameRef {
        parse_expression("x")
            .syntax()
            .descendants()
            .find_map(NameRef::cast)
            .unwrap()
    }

    #[test]
    fn panicking_extension_is_skipped() {
        let mut registry = ExtensionRegistry::new();
        registry.register(Arc::new(Panicking));
        registry.register(Arc::new(Matching));
        let reference = some_ref();
        assert!(registry.is_reference_to(&reference, DeclarationId(7)));
        assert!(!registry.is_reference_to(&reference, DeclarationId(8)));
    }

    #[test]
    fn empty_registry_matches_nothing() {
        let registry = ExtensionRegistry::new();
        assert!(!registry.is_reference_to(&some_ref(), DeclarationId(0)));
    }
}
