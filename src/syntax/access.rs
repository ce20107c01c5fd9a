//! Read/write access classification for references.
//!
//! Purely syntactic: a reference whose maximal qualified expression sits on
//! the left of an assignment is a write; on the left of an augmented
//! assignment it is a read-write; everything else is a read.

use crate::parser::ast::{AstNode, BinExpr, NameRef};
use crate::parser::SyntaxKind;

use super::qualified::qualified_element;

/// How a reference accesses its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

impl Access {
    pub fn is_read(self) -> bool {
        matches!(self, Access::Read | Access::ReadWrite)
    }

    pub fn is_write(self) -> bool {
        matches!(self, Access::Write | Access::ReadWrite)
    }
}

/// Classify the access kind of a reference occurrence.
pub fn read_write_access(name_ref: &NameRef) -> Access {
    let qualified = qualified_element(name_ref);
    let Some(parent) = qualified.parent() else {
        return Access::Read;
    };
    if parent.kind() != SyntaxKind::BIN_EXPR {
        return Access::Read;
    }
    let Some(bin) = BinExpr::cast(parent) else {
        return Access::Read;
    };
    if bin.lhs().as_ref() != Some(&qualified) {
        return Access::Read;
    }
    match bin.op_kind() {
        Some(SyntaxKind::EQ) => Access::Write,
        Some(SyntaxKind::PLUS_EQ) | Some(SyntaxKind::MINUS_EQ) => Access::ReadWrite,
        _ => Access::Read,
    }
}
