//! Factory for detached, mutable syntax nodes built from text.
//!
//! Every engine that needs a replacement node goes through here. The
//! returned nodes come from a fresh parse, are `clone_for_update`-mutable,
//! and are detached so they can be spliced into any mutable tree.

use tracing::debug;

use crate::base::FqName;
use crate::parser::ast::{AstNode, ImportDirective, NameRef};
use crate::parser::{
    Parse, SyntaxKind, SyntaxNode, SyntaxToken, parse, parse_expression, parse_name, parse_type,
};

/// Builds detached mutable nodes from rendered text.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntaxFactory;

impl SyntaxFactory {
    pub fn new() -> Self {
        Self
    }

    /// Parse `text` as an expression. `None` when the text does not parse
    /// cleanly — the caller treats that as an internal consistency failure.
    pub fn expr(&self, text: &str) -> Option<SyntaxNode> {
        extract_single(parse_expression(text), text)
    }

    /// Parse `text` as a type.
    pub fn ty(&self, text: &str) -> Option<SyntaxNode> {
        extract_single(parse_type(text), text)
    }

    /// Build a NAME_REF node for a (possibly backtick-quoted) name.
    pub fn name_ref(&self, text: &str) -> Option<NameRef> {
        extract_single(parse_name(text), text).and_then(NameRef::cast)
    }

    /// Build an `import` directive for the given fully-qualified name.
    pub fn import_directive(&self, fq_name: &FqName) -> Option<ImportDirective> {
        let text = format!("import {fq_name}");
        let parse = parse(&text);
        if !parse.ok() {
            debug!(?text, errors = ?parse.errors, "factory input did not parse");
            return None;
        }
        let root = parse.syntax().clone_for_update();
        let directive = root
            .children()
            .find(|n| n.kind() == SyntaxKind::IMPORT_DIRECTIVE)?;
        directive.detach();
        ImportDirective::cast(directive)
    }

    /// Build a standalone whitespace token.
    pub fn whitespace(&self, text: &str) -> Option<SyntaxToken> {
        if !text.chars().all(|c| c.is_ascii_whitespace()) {
            return None;
        }
        let root = parse(text).syntax().clone_for_update();
        root.first_token().filter(|t| t.kind() == SyntaxKind::WHITESPACE)
    }

    /// Build a newline token, the separator used when inserting directives.
    pub fn newline(&self) -> Option<SyntaxToken> {
        self.whitespace("\n")
    }
}

fn extract_single(parse: Parse, text: &str) -> Option<SyntaxNode> {
    if !parse.ok() {
        debug!(?text, errors = ?parse.errors, "factory input did not parse");
        return None;
    }
    let root = parse.syntax().clone_for_update();
    let node = root.first_child()?;
    node.detach();
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expr_is_detached_and_mutable() {
        let factory = SyntaxFactory::new();
        let node = factory.expr("a.b.c").unwrap();
        assert!(node.parent().is_none());
        assert_eq!(node.kind(), SyntaxKind::DOT_EXPR);
        assert_eq!(node.text().to_string(), "a.b.c");
    }

    #[test]
    fn bad_input_is_rejected() {
        let factory = SyntaxFactory::new();
        assert!(factory.expr("a.)").is_none());
        assert!(factory.name_ref("a.b").is_none());
        assert!(factory.whitespace("x").is_none());
    }

    #[test]
    fn name_ref_accepts_quoting() {
        let factory = SyntaxFactory::new();
        let name = factory.name_ref("`import`").unwrap();
        assert_eq!(name.name(), "import");
    }

    #[test]
    fn import_directive_renders_fq_name() {
        let factory = SyntaxFactory::new();
        let directive = factory
            .import_directive(&FqName::from_dotted("a.b.c"))
            .unwrap();
        assert_eq!(directive.imported_fq_name().to_string(), "a.b.c");
        assert_eq!(directive.syntax().text().to_string(), "import a.b.c");
    }
}
