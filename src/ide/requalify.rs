//! Binding references to fully qualified names.
//!
//! `bind_to_fq_name` rewrites the qualified element around a reference so
//! it spells the given fully qualified name, preserving call arguments and
//! type arguments, then hands the result to the shortening machinery. This
//! is the mechanism behind "move declaration" and "change package"
//! refactorings: every reference is first made fully explicit, then
//! shortened back where the short name is visible.

use tracing::debug;

use crate::base::{FileId, FqName};
use crate::parser::SyntaxKind;
use crate::parser::ast::{AstNode, CallExpr, CallableRef, ImportDirective, NameRef, UserType};
use crate::parser::SyntaxNode;
use crate::resolve::{BindingOracle, DeclarationId, ProjectModel, SimpleNameReference};
use crate::syntax::{
    SyntaxFactory, edit, qualified_element_or_callable_ref, qualified_element_selector,
    safe_deparenthesize,
};

use super::error::{RefactorError, RefactorResult};
use super::shorten::{ExecutionContext, ShorteningMode, ShorteningQueue, shorten_element};

/// Rewrite the reference to spell `fq_name`, then shorten per `mode`.
///
/// Returns the name node that stands for the reference afterwards. Some
/// positions cannot be qualified and come back unchanged: a root name, an
/// operator position, and the name inside a `this`/`super` expression.
/// References inside import or package directives are rewritten but never
/// shortened.
#[allow(clippy::too_many_arguments)]
pub fn bind_to_fq_name(
    oracle: &dyn BindingOracle,
    project: &ProjectModel,
    queue: &ShorteningQueue,
    execution: ExecutionContext,
    reference: &SimpleNameReference,
    fq_name: &FqName,
    mode: ShorteningMode,
    target: Option<DeclarationId>,
) -> RefactorResult<SyntaxNode> {
    let name_ref = reference.name_ref().clone();
    if fq_name.is_root() {
        return Ok(name_ref.syntax().clone());
    }
    let is_identifier = name_ref
        .name_token()
        .is_some_and(|token| token.kind().is_name_token());
    if !is_identifier || name_ref.is_instance_receiver() {
        return Ok(name_ref.syntax().clone());
    }

    let fq_to_write = if project.requires_root_prefix(reference.file(), fq_name) {
        fq_name.with_root_prefix()
    } else {
        fq_name.clone()
    };
    debug!(reference = %name_ref.name(), fq_name = %fq_to_write, "binding reference");

    let new_name =
        change_qualified_name(oracle, queue, reference.file(), &name_ref, &fq_to_write, target)?;
    let new_qualified = qualified_element_or_callable_ref(&new_name);

    if mode == ShorteningMode::NoShortening {
        return Ok(new_name.syntax().clone());
    }
    let in_directive = new_name.syntax().ancestors().any(|ancestor| {
        matches!(
            ancestor.kind(),
            SyntaxKind::IMPORT_DIRECTIVE | SyntaxKind::PACKAGE_DIRECTIVE
        )
    });
    if in_directive {
        return Ok(new_name.syntax().clone());
    }

    if mode == ShorteningMode::ForcedShortening || execution == ExecutionContext::Background {
        shorten_element(oracle, &new_qualified);
    } else {
        queue.add_request(reference.file(), new_qualified);
    }
    Ok(new_name.syntax().clone())
}

/// Rewrite the reference to point at `declaration`, using its fully
/// qualified name from the oracle and the default (delayed) shortening.
pub fn bind_to_declaration(
    oracle: &dyn BindingOracle,
    project: &ProjectModel,
    queue: &ShorteningQueue,
    execution: ExecutionContext,
    reference: &SimpleNameReference,
    declaration: DeclarationId,
) -> RefactorResult<SyntaxNode> {
    let fq_name = oracle
        .fq_name_of(declaration)
        .ok_or(RefactorError::InvalidOperation(
            "declaration has no fully qualified name",
        ))?;
    bind_to_fq_name(
        oracle,
        project,
        queue,
        execution,
        reference,
        &fq_name,
        ShorteningMode::default(),
        Some(declaration),
    )
}

/// Replace the reference's qualified element with one spelling `fq_name`,
/// preserving call arguments and type arguments. Returns the name node in
/// the rewritten element that corresponds to the original reference.
fn change_qualified_name(
    oracle: &dyn BindingOracle,
    queue: &ShorteningQueue,
    file: FileId,
    name_ref: &NameRef,
    fq_name: &FqName,
    target: Option<DeclarationId>,
) -> RefactorResult<NameRef> {
    if fq_name.is_root() {
        return Err(RefactorError::inconsistent("cannot bind to the root name"));
    }
    let short = fq_name
        .short_name()
        .ok_or_else(|| RefactorError::inconsistent("fully qualified name without a short name"))?;
    let short = FqName::render_segment(short);
    let factory = SyntaxFactory::new();
    let parent = name_ref.syntax().parent();

    // Directive paths are flat; rebinding any segment rewrites the whole
    // path, keeping an import alias if present.
    if let Some(node) = &parent {
        if matches!(
            node.kind(),
            SyntaxKind::IMPORT_DIRECTIVE | SyntaxKind::PACKAGE_DIRECTIVE
        ) {
            return rebind_directive_path(node, fq_name);
        }
    }

    // A callable reference to a top-level declaration cannot spell the
    // package as its receiver; strip the receiver and import the target
    // so the bare name resolves.
    if let Some(node) = &parent {
        if is_callable_ref_name(name_ref, node) {
            if let Some(target) = target {
                let importable = oracle.importable_declaration(target);
                if oracle.is_top_level(importable) {
                    queue.add_import_request(file, name_ref.syntax(), importable);
                    let replacement = factory.expr(&format!("::{short}")).ok_or_else(|| {
                        RefactorError::inconsistent("bare callable reference does not parse")
                    })?;
                    let replaced = edit::replace(node, replacement).ok_or_else(|| {
                        RefactorError::inconsistent("callable reference is detached")
                    })?;
                    return CallableRef::cast(replaced)
                        .and_then(|cref| cref.reference())
                        .ok_or_else(|| {
                            RefactorError::inconsistent("rewritten callable reference has no name")
                        });
                }
            }
        }
    }

    // A qualified type whose qualifier carries its own type arguments
    // cannot be rebuilt from flat text; requalify the qualifier in place
    // and leave this name alone.
    if !fq_name.is_one_segment() {
        if let Some(user) = parent.clone().and_then(UserType::cast) {
            if let Some(qualifier) = user.qualifier() {
                if qualifier.type_args().is_some() {
                    if let Some(qualifier_ref) = qualifier.reference() {
                        change_qualified_name(
                            oracle,
                            queue,
                            file,
                            &qualifier_ref,
                            &fq_name.parent(),
                            target,
                        )?;
                        return Ok(name_ref.clone());
                    }
                }
            }
        }
    }

    // A short-form rewrite of a top-level declaration only resolves once
    // the file imports it; defer that import to the shortening pass.
    if let Some(target) = target {
        let importable = oracle.importable_declaration(target);
        if fq_name.is_one_segment() && oracle.is_top_level(importable) {
            queue.add_import_request(file, name_ref.syntax(), importable);
        }
    }

    let mut parent_delimiter = ".";
    let fq_name_base = match &parent {
        Some(node) if is_callee_of(name_ref, node) => {
            let copy = node.clone_subtree().clone_for_update();
            let callee = CallExpr::cast(copy.clone())
                .and_then(|call| call.callee())
                .ok_or_else(|| RefactorError::inconsistent("call expression without callee"))?;
            let short_ref = factory
                .name_ref(&short)
                .ok_or_else(|| RefactorError::inconsistent("short name does not parse"))?;
            edit::replace(callee.syntax(), short_ref.syntax().clone())
                .ok_or_else(|| RefactorError::inconsistent("copied callee is detached"))?;
            copy.text().to_string()
        }
        Some(node) if is_callable_ref_name(name_ref, node) => {
            parent_delimiter = "";
            let copy = node.clone_subtree().clone_for_update();
            let copy_ref = CallableRef::cast(copy.clone())
                .ok_or_else(|| RefactorError::inconsistent("copied callable reference lost its kind"))?;
            if let Some(receiver) = copy_ref.receiver() {
                edit::remove(&receiver);
            }
            let copy_name = copy_ref
                .reference()
                .ok_or_else(|| RefactorError::inconsistent("callable reference without a name"))?;
            let short_ref = factory
                .name_ref(&short)
                .ok_or_else(|| RefactorError::inconsistent("short name does not parse"))?;
            edit::replace(copy_name.syntax(), short_ref.syntax().clone())
                .ok_or_else(|| RefactorError::inconsistent("copied name is detached"))?;
            copy.text().to_string()
        }
        _ => short.clone(),
    };

    let text = if fq_name.is_one_segment() {
        fq_name_base
    } else {
        format!("{}{}{}", fq_name.parent(), parent_delimiter, fq_name_base)
    };

    let element_to_replace = qualified_element_or_callable_ref(name_ref);
    let new_element = if element_to_replace.kind() == SyntaxKind::USER_TYPE {
        let type_args = UserType::cast(element_to_replace.clone())
            .and_then(|user| user.type_args())
            .map(|args| args.syntax().text().to_string())
            .unwrap_or_default();
        let type_text = format!("{text}{type_args}");
        let replacement = factory.ty(&type_text).ok_or_else(|| {
            RefactorError::inconsistent(format!("rewritten type does not parse: {type_text}"))
        })?;
        edit::replace(&element_to_replace, replacement)
            .ok_or_else(|| RefactorError::inconsistent("qualified element is detached"))?
    } else {
        let replacement = factory.expr(&text).ok_or_else(|| {
            RefactorError::inconsistent(format!("rewritten expression does not parse: {text}"))
        })?;
        let replaced = edit::replace(&element_to_replace, replacement)
            .ok_or_else(|| RefactorError::inconsistent("qualified element is detached"))?;
        safe_deparenthesize(&replaced)
    };

    let selector = if new_element.kind() == SyntaxKind::CALLABLE_REF {
        CallableRef::cast(new_element.clone()).and_then(|cref| cref.reference())
    } else {
        qualified_element_selector(&new_element)
    };
    selector.ok_or_else(|| {
        RefactorError::inconsistent(format!(
            "no selector in rewritten element: {}",
            new_element.text()
        ))
    })
}

/// Replace an import or package directive with one spelling `fq_name`,
/// returning the last segment of the new path.
fn rebind_directive_path(directive: &SyntaxNode, fq_name: &FqName) -> RefactorResult<NameRef> {
    let text = match directive.kind() {
        SyntaxKind::IMPORT_DIRECTIVE => {
            let alias = ImportDirective::cast(directive.clone())
                .and_then(|d| d.alias())
                .map(|alias| format!(" as {}", alias.syntax().text()))
                .unwrap_or_default();
            format!("import {fq_name}{alias}")
        }
        _ => format!("package {fq_name}"),
    };
    let parsed = crate::parser::parse(&text);
    if !parsed.ok() {
        return Err(RefactorError::inconsistent(format!(
            "rewritten directive does not parse: {text}"
        )));
    }
    let root = parsed.syntax().clone_for_update();
    let fresh = root
        .children()
        .find(|n| n.kind() == directive.kind())
        .ok_or_else(|| RefactorError::inconsistent("rewritten directive lost its kind"))?;
    fresh.detach();
    let fresh = edit::replace(directive, fresh)
        .ok_or_else(|| RefactorError::inconsistent("directive is detached"))?;
    fresh
        .children()
        .filter_map(NameRef::cast)
        .last()
        .ok_or_else(|| RefactorError::inconsistent("rewritten directive has no path"))
}

fn is_callee_of(name_ref: &NameRef, node: &SyntaxNode) -> bool {
    CallExpr::cast(node.clone())
        .and_then(|call| call.callee())
        .is_some_and(|callee| callee.syntax() == name_ref.syntax())
}

fn is_callable_ref_name(name_ref: &NameRef, node: &SyntaxNode) -> bool {
    CallableRef::cast(node.clone())
        .and_then(|cref| cref.reference())
        .is_some_and(|reference| reference.syntax() == name_ref.syntax())
}
