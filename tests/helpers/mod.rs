//! Shared fixtures for integration tests.
//!
//! `FixtureOracle` is a table-driven [`BindingOracle`]: tests declare
//! named declarations, bind reference names to targets, and mark short
//! names as visible, then drive the engines against real parsed trees.

#![allow(dead_code)]

use rebind::base::{FileId, FqName};
use rebind::parser::ast::{AstNode, NameRef};
use rebind::parser::{SyntaxNode, parse, parse_expression};
use rebind::resolve::{
    BindingOracle, DeclKind, DeclarationId, RawTarget, ResolutionContext, SimpleNameReference,
};
use rustc_hash::{FxHashMap, FxHashSet};

pub struct Declaration {
    pub id: DeclarationId,
    pub fq_name: FqName,
    pub kind: DeclKind,
    pub file: FileId,
    pub top_level: bool,
}

#[derive(Default)]
pub struct FixtureOracle {
    declarations: Vec<Declaration>,
    bindings: FxHashMap<String, Vec<RawTarget>>,
    visible: FxHashSet<String>,
    next_id: u32,
}

impl FixtureOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `fq_name` and bind its short name to the new declaration.
    pub fn declare(
        &mut self,
        fq_name: &str,
        kind: DeclKind,
        file: FileId,
        top_level: bool,
    ) -> DeclarationId {
        let id = DeclarationId(self.next_id);
        self.next_id += 1;
        let fq_name = FqName::from_dotted(fq_name);
        if let Some(short) = fq_name.short_name() {
            self.bindings
                .entry(short.to_string())
                .or_default()
                .push(RawTarget::Declaration(id));
        }
        self.declarations.push(Declaration {
            id,
            fq_name,
            kind,
            file,
            top_level,
        });
        id
    }

    /// Bind a reference name to an explicit raw target, overriding the
    /// short-name default.
    pub fn bind(&mut self, name: &str, target: RawTarget) {
        self.bindings.insert(name.to_string(), vec![target]);
    }

    /// Make the short name of `declaration` resolve unqualified.
    pub fn make_visible(&mut self, declaration: DeclarationId) {
        if let Some(short) = self
            .declaration(declaration)
            .and_then(|d| d.fq_name.short_name())
        {
            self.visible.insert(short.to_string());
        }
    }

    fn declaration(&self, id: DeclarationId) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.id == id)
    }
}

impl BindingOracle for FixtureOracle {
    fn resolve_reference_targets(
        &self,
        reference: &NameRef,
        _context: &ResolutionContext,
    ) -> Vec<RawTarget> {
        self.bindings
            .get(&reference.name())
            .cloned()
            .unwrap_or_default()
    }

    fn fq_name_of(&self, declaration: DeclarationId) -> Option<FqName> {
        self.declaration(declaration).map(|d| d.fq_name.clone())
    }

    fn resolve_fq_name_at(&self, fq_name: &FqName, _position: &SyntaxNode) -> Vec<DeclarationId> {
        let mut found: Vec<DeclarationId> = self
            .declarations
            .iter()
            .filter(|d| &d.fq_name == fq_name)
            .map(|d| d.id)
            .collect();
        if fq_name.is_one_segment() {
            if let Some(short) = fq_name.short_name() {
                if self.visible.contains(short.as_str()) {
                    found.extend(
                        self.declarations
                            .iter()
                            .filter(|d| d.fq_name.short_name() == Some(short))
                            .map(|d| d.id),
                    );
                }
            }
        }
        found.dedup();
        found
    }

    fn declaration_file(&self, declaration: DeclarationId) -> Option<FileId> {
        self.declaration(declaration).map(|d| d.file)
    }

    fn kind_of(&self, declaration: DeclarationId) -> DeclKind {
        self.declaration(declaration)
            .map(|d| d.kind)
            .unwrap_or(DeclKind::Function)
    }

    fn is_top_level(&self, declaration: DeclarationId) -> bool {
        self.declaration(declaration)
            .map(|d| d.top_level)
            .unwrap_or(false)
    }
}

/// Parse a full file into a mutable tree.
pub fn parse_file(input: &str) -> SyntaxNode {
    let parsed = parse(input);
    assert!(parsed.ok(), "fixture does not parse: {:?}", parsed.errors);
    parsed.syntax().clone_for_update()
}

/// Parse a single expression into a mutable tree (the file root).
pub fn parse_expr(input: &str) -> SyntaxNode {
    let parsed = parse_expression(input);
    assert!(parsed.ok(), "fixture does not parse: {:?}", parsed.errors);
    parsed.syntax().clone_for_update()
}

/// Find a reference by name, skipping import and package directive paths.
pub fn find_name(root: &SyntaxNode, name: &str) -> NameRef {
    use rebind::parser::SyntaxKind;
    root.descendants()
        .filter_map(NameRef::cast)
        .filter(|n| {
            n.syntax().ancestors().all(|a| {
                !matches!(
                    a.kind(),
                    SyntaxKind::IMPORT_DIRECTIVE | SyntaxKind::PACKAGE_DIRECTIVE
                )
            })
        })
        .find(|n| n.name() == name)
        .unwrap_or_else(|| panic!("no reference named {name}"))
}

pub fn find_operation(root: &SyntaxNode) -> NameRef {
    root.descendants()
        .filter_map(NameRef::cast)
        .find(|n| n.is_operation())
        .expect("no operation reference")
}

pub fn reference(root: &SyntaxNode, name: &str, file: FileId) -> SimpleNameReference {
    SimpleNameReference::new(find_name(root, name), file)
}
