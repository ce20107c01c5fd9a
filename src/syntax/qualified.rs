//! Qualified-element navigation.
//!
//! A reference participates in a maximal syntactic unit — the "qualified
//! element" — such as the whole `a.b.C` rather than the bare `C`. Rewrites
//! operate on that enclosing element so the qualifier chain stays
//! consistent. Because qualified chains nest to the left, a single parent
//! step from the reference reaches the maximal element.

use crate::parser::ast::{AstNode, CallExpr, CallableRef, DotExpr, NameRef, ParenExpr, UserType};
use crate::parser::{SyntaxKind, SyntaxNode};

/// The maximal expression/type the reference participates in as part of a
/// qualified chain: the enclosing dot expression when the reference (or its
/// call) is the selector, the enclosing user type when the reference is its
/// name, otherwise the reference itself (or its call).
pub fn qualified_element(name_ref: &NameRef) -> SyntaxNode {
    let base = call_base(name_ref);
    match base.parent() {
        Some(parent) if parent.kind() == SyntaxKind::DOT_EXPR => {
            let is_selector = DotExpr::cast(parent.clone())
                .and_then(|dot| dot.selector())
                .is_some_and(|selector| selector == base);
            if is_selector { parent } else { base }
        }
        Some(parent) if parent.kind() == SyntaxKind::USER_TYPE => {
            let is_reference = UserType::cast(parent.clone())
                .and_then(|user| user.reference())
                .is_some_and(|reference| reference.syntax() == &base);
            if is_reference { parent } else { base }
        }
        _ => base,
    }
}

/// Like [`qualified_element`], but a callable reference whose name part is
/// this reference counts as the enclosing element too.
pub fn qualified_element_or_callable_ref(name_ref: &NameRef) -> SyntaxNode {
    if let Some(parent) = name_ref.syntax().parent() {
        if parent.kind() == SyntaxKind::CALLABLE_REF {
            let is_reference = CallableRef::cast(parent.clone())
                .and_then(|cref| cref.reference())
                .is_some_and(|reference| reference.syntax() == name_ref.syntax());
            if is_reference {
                return parent;
            }
        }
    }
    qualified_element(name_ref)
}

/// A reference's callee position extends to the call expression.
fn call_base(name_ref: &NameRef) -> SyntaxNode {
    let node = name_ref.syntax().clone();
    match node.parent() {
        Some(parent) if parent.kind() == SyntaxKind::CALL_EXPR => {
            let is_callee = CallExpr::cast(parent.clone())
                .and_then(|call| call.callee())
                .is_some_and(|callee| callee.syntax() == &node);
            if is_callee { parent } else { node }
        }
        _ => node,
    }
}

/// The name reference that acts as the selector of a qualified element:
/// a dot expression's selector name, a call's callee, a user type's
/// reference, or the name itself.
pub fn qualified_element_selector(node: &SyntaxNode) -> Option<NameRef> {
    match node.kind() {
        SyntaxKind::NAME_REF | SyntaxKind::OPERATION_REF => NameRef::cast(node.clone()),
        SyntaxKind::CALL_EXPR => CallExpr::cast(node.clone())?.callee(),
        SyntaxKind::DOT_EXPR => DotExpr::cast(node.clone())?.selector_name_ref(),
        SyntaxKind::USER_TYPE => UserType::cast(node.clone())?.reference(),
        _ => None,
    }
}

/// Strip redundant parentheses by navigation (no tree edit): `((a.b))`
/// yields the inner `a.b` node.
pub fn safe_deparenthesize(node: &SyntaxNode) -> SyntaxNode {
    let mut current = node.clone();
    while current.kind() == SyntaxKind::PAREN_EXPR {
        match ParenExpr::cast(current.clone()).and_then(|paren| paren.inner()) {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}
