//! In-place rename of a reference occurrence.
//!
//! The tree being edited must be mutable (`clone_for_update`). The default
//! path swaps only the name node, leaving any qualifier chain intact; an
//! extension-provided replacement and the operator-to-call conversion
//! replace larger subtrees. Renaming to an empty name collapses the
//! qualified element instead of producing an empty identifier.

use tracing::debug;

use crate::base::{FqName, unquote};
use crate::parser::SyntaxNode;
use crate::parser::ast::{AstNode, BinExpr, DotExpr, NameRef};
use crate::parser::SyntaxKind;
use crate::resolve::{
    BindingOracle, DeclKind, ExtensionRegistry, ResolutionContext, SimpleNameReference,
    resolve_targets,
};
use crate::syntax::{SyntaxFactory, edit, qualified_element};

use super::error::{RefactorError, RefactorResult};
use super::operators;

/// Rename the reference occurrence to `new_name` (which may carry backtick
/// quoting). Returns the node that now stands for the reference: the new
/// name node, the converted call's callee, or the collapse survivor.
pub fn rename(
    oracle: &dyn BindingOracle,
    extensions: &ExtensionRegistry,
    reference: &SimpleNameReference,
    new_name: &str,
) -> RefactorResult<SyntaxNode> {
    let name_ref = reference.name_ref().clone();
    let token = name_ref
        .name_token()
        .ok_or(RefactorError::InvalidOperation("reference has no name token"))?;
    let factory = SyntaxFactory::new();

    let stripped = unquote(new_name);
    if stripped.is_empty() {
        return collapse_qualified(&name_ref, &factory);
    }

    // Destructuring position references keep their shape when the target
    // declaration is renamed to a positional accessor name.
    if is_positional_accessor_name(stripped) && resolves_to_parameter(oracle, reference) {
        debug!(name = stripped, "rename to positional accessor on a parameter; keeping reference");
        return Ok(name_ref.syntax().clone());
    }

    if let Some(replacement) = extensions.handle_rename(&name_ref, &factory, new_name) {
        return edit::replace(name_ref.syntax(), replacement)
            .ok_or_else(|| RefactorError::inconsistent("reference is detached"));
    }

    if name_ref.is_operation() {
        if !token.kind().is_operator() {
            return Err(RefactorError::InvalidOperation(
                "operator has no named form to rename",
            ));
        }
        let bin = name_ref
            .syntax()
            .parent()
            .and_then(BinExpr::cast)
            .ok_or_else(|| {
                RefactorError::inconsistent("operator reference outside a binary expression")
            })?;
        let callee = operators::convert_to_call(&bin)?;
        return swap_name(&callee, stripped, &factory);
    }

    swap_name(&name_ref, stripped, &factory)
}

/// Replace just the name node, rendering backtick quoting when the new
/// name collides with a keyword or is not a plain identifier.
fn swap_name(target: &NameRef, name: &str, factory: &SyntaxFactory) -> RefactorResult<SyntaxNode> {
    let rendered = FqName::render_segment(name);
    let replacement = factory
        .name_ref(&rendered)
        .ok_or_else(|| RefactorError::inconsistent(format!("new name does not parse: {rendered}")))?;
    edit::replace(target.syntax(), replacement.syntax().clone())
        .ok_or_else(|| RefactorError::inconsistent("reference is detached"))
}

/// Empty new name: drop the named part. `a.b` collapses to its receiver
/// `a`; a qualified type keeps the qualifier and refers to its companion.
fn collapse_qualified(name_ref: &NameRef, factory: &SyntaxFactory) -> RefactorResult<SyntaxNode> {
    let qualified = qualified_element(name_ref);
    match qualified.kind() {
        SyntaxKind::DOT_EXPR => {
            let receiver = DotExpr::cast(qualified.clone())
                .and_then(|dot| dot.receiver())
                .ok_or_else(|| RefactorError::inconsistent("dot expression without receiver"))?;
            receiver.detach();
            edit::replace(&qualified, receiver)
                .ok_or_else(|| RefactorError::inconsistent("qualified element is detached"))
        }
        SyntaxKind::USER_TYPE => {
            let companion = factory
                .name_ref("Companion")
                .ok_or_else(|| RefactorError::inconsistent("companion name does not parse"))?;
            edit::replace(name_ref.syntax(), companion.syntax().clone())
                .ok_or_else(|| RefactorError::inconsistent("reference is detached"))
        }
        _ => Ok(qualified),
    }
}

/// `component1`, `component2`, ... with no leading zero.
fn is_positional_accessor_name(name: &str) -> bool {
    let Some(digits) = name.strip_prefix("component") else {
        return false;
    };
    !digits.is_empty() && !digits.starts_with('0') && digits.bytes().all(|b| b.is_ascii_digit())
}

fn resolves_to_parameter(oracle: &dyn BindingOracle, reference: &SimpleNameReference) -> bool {
    resolve_targets(oracle, reference, &ResolutionContext::default())
        .into_iter()
        .any(|declaration| oracle.kind_of(declaration) == DeclKind::Parameter)
}
