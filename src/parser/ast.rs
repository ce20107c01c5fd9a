//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.

use crate::base::{FqName, unquote};

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

/// Kinds that form expressions. OPERATION_REF is deliberately excluded so
/// binary-expression operand accessors skip the operator node.
pub fn is_expr_kind(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::NAME_REF
            | SyntaxKind::DOT_EXPR
            | SyntaxKind::CALL_EXPR
            | SyntaxKind::CALLABLE_REF
            | SyntaxKind::THIS_EXPR
            | SyntaxKind::SUPER_EXPR
            | SyntaxKind::BIN_EXPR
            | SyntaxKind::PAREN_EXPR
            | SyntaxKind::LITERAL_EXPR
    )
}

fn expr_children(node: &SyntaxNode) -> impl Iterator<Item = SyntaxNode> + '_ {
    node.children().filter(|n| is_expr_kind(n.kind()))
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn package_directive(&self) -> Option<PackageDirective> {
        self.0.children().find_map(PackageDirective::cast)
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportDirective> + '_ {
        self.0.children().filter_map(ImportDirective::cast)
    }

    /// Top-level expressions, in order.
    pub fn expressions(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        expr_children(&self.0)
    }

    /// Find the import whose alias text equals `name`.
    pub fn find_import_by_alias(&self, name: &str) -> Option<ImportDirective> {
        self.imports()
            .find(|import| import.alias().is_some_and(|a| a.name() == name))
    }
}

// ============================================================================
// Directives
// ============================================================================

ast_node!(PackageDirective, PACKAGE_DIRECTIVE);

impl PackageDirective {
    pub fn fq_name(&self) -> FqName {
        path_fq_name(&self.0)
    }
}

ast_node!(ImportDirective, IMPORT_DIRECTIVE);

impl ImportDirective {
    /// The imported path, without the alias.
    pub fn imported_fq_name(&self) -> FqName {
        path_fq_name(&self.0)
    }

    pub fn alias(&self) -> Option<ImportAlias> {
        self.0.children().find_map(ImportAlias::cast)
    }
}

/// Collect the direct NAME_REF children of a directive into an FqName.
/// The alias name lives inside IMPORT_ALIAS, so it is not picked up here.
fn path_fq_name(node: &SyntaxNode) -> FqName {
    let segments = node
        .children()
        .filter_map(NameRef::cast)
        .map(|name| smol_str::SmolStr::new(name.name()))
        .collect();
    FqName::new(segments)
}

ast_node!(ImportAlias, IMPORT_ALIAS);

impl ImportAlias {
    pub fn name_ref(&self) -> Option<NameRef> {
        self.0.children().find_map(NameRef::cast)
    }

    pub fn name(&self) -> String {
        self.name_ref().map(|n| n.name().to_string()).unwrap_or_default()
    }
}

// ============================================================================
// References
// ============================================================================

/// A simple name in reference position. Covers both NAME_REF (identifiers,
/// `this`/`super` instance references) and OPERATION_REF (operator tokens in
/// operation position).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameRef(SyntaxNode);

impl AstNode for NameRef {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::NAME_REF | SyntaxKind::OPERATION_REF)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        if Self::can_cast(node.kind()) {
            Some(Self(node))
        } else {
            None
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl NameRef {
    /// The name (or operator) token.
    pub fn name_token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia())
    }

    /// Raw token text, quoting included.
    pub fn text(&self) -> String {
        self.name_token()
            .map(|t| t.text().to_string())
            .unwrap_or_default()
    }

    /// The referenced name with quoting stripped.
    pub fn name(&self) -> String {
        unquote(&self.text()).to_string()
    }

    /// Whether this reference occupies an operator-symbol position.
    pub fn is_operation(&self) -> bool {
        self.0.kind() == SyntaxKind::OPERATION_REF
            || self.name_token().is_some_and(|t| t.kind().is_operator())
    }

    /// Whether this is the instance reference of a `this`/`super` expression.
    pub fn is_instance_receiver(&self) -> bool {
        self.0.parent().is_some_and(|p| {
            matches!(p.kind(), SyntaxKind::THIS_EXPR | SyntaxKind::SUPER_EXPR)
        })
    }
}

// ============================================================================
// Expressions
// ============================================================================

ast_node!(DotExpr, DOT_EXPR);

impl DotExpr {
    pub fn receiver(&self) -> Option<SyntaxNode> {
        expr_children(&self.0).next()
    }

    pub fn selector(&self) -> Option<SyntaxNode> {
        expr_children(&self.0).nth(1)
    }

    /// The name reference of the selector: the selector itself when it is a
    /// name, or a selector call's callee.
    pub fn selector_name_ref(&self) -> Option<NameRef> {
        let selector = self.selector()?;
        match selector.kind() {
            SyntaxKind::NAME_REF => NameRef::cast(selector),
            SyntaxKind::CALL_EXPR => CallExpr::cast(selector)?.callee(),
            _ => None,
        }
    }
}

ast_node!(CallExpr, CALL_EXPR);

impl CallExpr {
    pub fn callee(&self) -> Option<NameRef> {
        self.0.children().find_map(NameRef::cast)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }
}

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        expr_children(&self.0)
    }
}

ast_node!(CallableRef, CALLABLE_REF);

impl CallableRef {
    /// The receiver expression, if any (`recv` in `recv::name`).
    pub fn receiver(&self) -> Option<SyntaxNode> {
        let reference = self.reference()?;
        expr_children(&self.0).find(|n| n != reference.syntax())
    }

    /// The referenced name (`name` in `recv::name`): the NAME_REF after `::`.
    pub fn reference(&self) -> Option<NameRef> {
        let mut seen_colons = false;
        for element in self.0.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Token(t) if t.kind() == SyntaxKind::COLON_COLON => {
                    seen_colons = true;
                }
                rowan::NodeOrToken::Node(n) if seen_colons => {
                    if let Some(name) = NameRef::cast(n) {
                        return Some(name);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

ast_node!(ThisExpr, THIS_EXPR);
ast_node!(SuperExpr, SUPER_EXPR);

ast_node!(BinExpr, BIN_EXPR);

impl BinExpr {
    pub fn lhs(&self) -> Option<SyntaxNode> {
        expr_children(&self.0).next()
    }

    pub fn rhs(&self) -> Option<SyntaxNode> {
        expr_children(&self.0).nth(1)
    }

    pub fn op_ref(&self) -> Option<NameRef> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::OPERATION_REF)
            .and_then(NameRef::cast)
    }

    pub fn op_kind(&self) -> Option<SyntaxKind> {
        self.op_ref()?.name_token().map(|t| t.kind())
    }
}

ast_node!(ParenExpr, PAREN_EXPR);

impl ParenExpr {
    pub fn inner(&self) -> Option<SyntaxNode> {
        expr_children(&self.0).next()
    }
}

// ============================================================================
// Types
// ============================================================================

ast_node!(UserType, USER_TYPE);

impl UserType {
    pub fn qualifier(&self) -> Option<UserType> {
        self.0.children().find_map(UserType::cast)
    }

    pub fn reference(&self) -> Option<NameRef> {
        self.0.children().find_map(NameRef::cast)
    }

    pub fn type_args(&self) -> Option<TypeArgList> {
        self.0.children().find_map(TypeArgList::cast)
    }
}

ast_node!(TypeArgList, TYPE_ARG_LIST);

impl TypeArgList {
    pub fn types(&self) -> impl Iterator<Item = UserType> + '_ {
        self.0.children().filter_map(UserType::cast)
    }
}
