//! Operator conventions.
//!
//! Each overloadable operator token corresponds to a named method. Renaming
//! the target of an operator reference first rewrites the operator
//! expression into explicit call form, so the rename has an identifier to
//! swap.

use crate::parser::SyntaxKind;
use crate::parser::ast::{AstNode, BinExpr, NameRef};
use crate::syntax::{SyntaxFactory, edit, qualified_element_selector};

use super::error::{RefactorError, RefactorResult};

/// The method name an operator token desugars to, when it has one.
pub fn operation_name(kind: SyntaxKind) -> Option<&'static str> {
    match kind {
        SyntaxKind::PLUS => Some("plus"),
        SyntaxKind::MINUS => Some("minus"),
        SyntaxKind::STAR => Some("times"),
        SyntaxKind::SLASH => Some("div"),
        SyntaxKind::EQ_EQ => Some("equals"),
        SyntaxKind::BANG_EQ => Some("notEquals"),
        SyntaxKind::PLUS_EQ => Some("plusAssign"),
        SyntaxKind::MINUS_EQ => Some("minusAssign"),
        _ => None,
    }
}

/// Rewrite a binary operator expression into explicit call form in place:
/// `a + b` becomes `a.plus(b)`. Returns the spliced call chain and the
/// callee name node inside it.
pub fn convert_to_call(bin: &BinExpr) -> RefactorResult<NameRef> {
    let kind = bin
        .op_kind()
        .ok_or(RefactorError::InvalidOperation("operator expression has no operator token"))?;
    let name = operation_name(kind)
        .ok_or(RefactorError::InvalidOperation("operator has no call form"))?;
    let lhs = bin
        .lhs()
        .ok_or_else(|| RefactorError::inconsistent("operator expression without left operand"))?;
    let rhs = bin
        .rhs()
        .ok_or_else(|| RefactorError::inconsistent("operator expression without right operand"))?;

    let text = format!("{}.{}({})", lhs.text(), name, rhs.text());
    let factory = SyntaxFactory::new();
    let call = factory
        .expr(&text)
        .ok_or_else(|| RefactorError::inconsistent(format!("call form does not parse: {text}")))?;
    let call = edit::replace(bin.syntax(), call)
        .ok_or_else(|| RefactorError::inconsistent("operator expression is detached"))?;
    qualified_element_selector(&call)
        .ok_or_else(|| RefactorError::inconsistent("converted call has no callee"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn find_bin(input: &str) -> BinExpr {
        parse_expression(input)
            .syntax()
            .clone_for_update()
            .descendants()
            .find_map(BinExpr::cast)
            .unwrap()
    }

    #[test]
    fn plus_becomes_plus_call() {
        let bin = find_bin("a + b");
        let root = bin.syntax().ancestors().last().unwrap();
        let callee = convert_to_call(&bin).unwrap();
        assert_eq!(callee.name(), "plus");
        assert_eq!(root.text().to_string(), "a.plus(b)");
    }

    #[test]
    fn augmented_assignment_becomes_assign_call() {
        let bin = find_bin("a += b.c");
        let root = bin.syntax().ancestors().last().unwrap();
        convert_to_call(&bin).unwrap();
        assert_eq!(root.text().to_string(), "a.plusAssign(b.c)");
    }

    #[test]
    fn plain_assignment_has_no_call_form() {
        let bin = find_bin("a = b");
        assert!(matches!(
            convert_to_call(&bin),
            Err(RefactorError::InvalidOperation(_))
        ));
    }
}
