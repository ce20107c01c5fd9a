//! Mutable syntax tree editing.
//!
//! Thin helpers over rowan's mutable-tree API (`clone_for_update`,
//! `splice_children`, `detach`). All helpers either fully succeed or leave
//! the tree unmodified; a half-spliced parent is never observable.

use crate::parser::{SyntaxElement, SyntaxNode, SyntaxToken};

/// Whether the node still lives in a tree (has not been detached or
/// replaced away by a previous edit).
pub fn is_attached(node: &SyntaxNode) -> bool {
    node.parent().is_some()
}

/// Replace `old` with `new` in old's parent.
///
/// `new` must be a detached node from a mutable tree (as produced by
/// [`crate::syntax::SyntaxFactory`]). Returns the inserted node, or `None`
/// when `old` is not attached to a tree.
pub fn replace(old: &SyntaxNode, new: SyntaxNode) -> Option<SyntaxNode> {
    let parent = old.parent()?;
    let index = old.index();
    new.detach();
    parent.splice_children(index..index + 1, vec![SyntaxElement::Node(new.clone())]);
    Some(new)
}

/// Remove `node` from its parent. No-op when already detached.
pub fn remove(node: &SyntaxNode) {
    if node.parent().is_some() {
        node.detach();
    }
}

/// An insertion point in a mutable tree.
#[derive(Debug, Clone)]
pub enum Position {
    /// Before the first child of the node.
    FirstChildOf(SyntaxNode),
    /// Immediately after the element.
    After(SyntaxElement),
    /// Immediately before the element.
    Before(SyntaxElement),
}

impl Position {
    pub fn after_node(node: &SyntaxNode) -> Position {
        Position::After(SyntaxElement::Node(node.clone()))
    }

    pub fn after_token(token: &SyntaxToken) -> Position {
        Position::After(SyntaxElement::Token(token.clone()))
    }

    fn place(&self) -> Option<(SyntaxNode, usize)> {
        match self {
            Position::FirstChildOf(node) => Some((node.clone(), 0)),
            Position::After(element) => {
                let parent = element.parent()?;
                Some((parent, element.index() + 1))
            }
            Position::Before(element) => {
                let parent = element.parent()?;
                Some((parent, element.index()))
            }
        }
    }
}

/// Insert detached elements at the given position.
///
/// Returns false (and changes nothing) when the position's anchor is no
/// longer attached.
pub fn insert_all(position: Position, elements: Vec<SyntaxElement>) -> bool {
    let Some((parent, index)) = position.place() else {
        return false;
    };
    for element in &elements {
        if let SyntaxElement::Node(node) = element {
            node.detach();
        }
    }
    parent.splice_children(index..index, elements);
    true
}

/// Insert a single detached element.
pub fn insert(position: Position, element: SyntaxElement) -> bool {
    insert_all(position, vec![element])
}
