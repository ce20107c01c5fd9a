//! Reference shortening.
//!
//! A qualified-name rewrite first binds references to their fully qualified
//! form; shortening back to the short name happens afterwards, either
//! immediately or through a queue drained in one batch pass. The queue also
//! carries deferred import requests: declarations that must gain an import
//! directive so their short form becomes visible.

use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::base::{FileId, FqName};
use crate::parser::SyntaxKind;
use crate::parser::ast::{AstNode, SourceFile, UserType};
use crate::parser::{SyntaxElement, SyntaxNode};
use crate::resolve::{BindingOracle, DeclarationId, RawTarget, ResolutionContext};
use crate::syntax::{SyntaxFactory, edit, qualified_element_selector};

/// When a rewrite's results are shortened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShorteningMode {
    /// Leave the fully qualified form in place.
    NoShortening,
    /// Queue the element; a later [`ShorteningQueue::process`] pass
    /// shortens it.
    #[default]
    DelayedShortening,
    /// Shorten immediately as part of the rewrite.
    ForcedShortening,
}

/// Whether the caller drives an interactive session (a queue flush will
/// happen later) or a background batch (nobody will flush for us).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    #[default]
    Interactive,
    Background,
}

/// A queued element awaiting shortening.
#[derive(Debug, Clone)]
pub struct ShorteningRequest {
    pub file: FileId,
    pub node: SyntaxNode,
}

/// Imports deferred for one file, anchored to a node of that file's tree
/// so the directives can be inserted even when no shortening request
/// touches the file.
#[derive(Debug, Clone)]
struct ImportRequests {
    context: SyntaxNode,
    declarations: Vec<DeclarationId>,
}

/// Queue of shortening work, shared across rewrites and drained in one
/// pass. Interior mutability keeps the facade usable behind a shared
/// reference from several rewrite calls.
#[derive(Default)]
pub struct ShorteningQueue {
    requests: Mutex<Vec<ShorteningRequest>>,
    import_requests: Mutex<IndexMap<FileId, ImportRequests>>,
}

impl ShorteningQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_request(&self, file: FileId, node: SyntaxNode) {
        self.requests.lock().push(ShorteningRequest { file, node });
    }

    /// Defer an import of `declaration` into `file`; the import directive
    /// is inserted when the queue is processed. `context` is any node of
    /// the file's tree; the request anchors to the tree root so later
    /// edits below it cannot orphan the request.
    pub fn add_import_request(
        &self,
        file: FileId,
        context: &SyntaxNode,
        declaration: DeclarationId,
    ) {
        let root = context
            .ancestors()
            .last()
            .unwrap_or_else(|| context.clone());
        let mut map = self.import_requests.lock();
        let entry = map.entry(file).or_insert_with(|| ImportRequests {
            context: root,
            declarations: Vec::new(),
        });
        if !entry.declarations.contains(&declaration) {
            entry.declarations.push(declaration);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.requests.lock().is_empty() && self.import_requests.lock().is_empty()
    }

    /// Drain the queue: flush pending imports into each touched file, then
    /// shorten every queued element whose short form is justified. Returns
    /// the number of elements shortened. Processing an empty queue, or the
    /// same queue twice, is a no-op — nodes detached by earlier edits are
    /// skipped.
    pub fn process(&self, oracle: &dyn BindingOracle) -> usize {
        let requests: Vec<ShorteningRequest> = std::mem::take(&mut *self.requests.lock());
        let mut shortened = 0;
        for request in requests {
            if !edit::is_attached(&request.node) {
                continue;
            }
            if let Some(imports) = self.import_requests.lock().shift_remove(&request.file) {
                flush_imports(oracle, &request.node, &imports.declarations);
            }
            if shorten_element(oracle, &request.node) {
                shortened += 1;
            }
        }
        // Files touched only by import requests still get their
        // directives.
        let pending: IndexMap<FileId, ImportRequests> =
            std::mem::take(&mut *self.import_requests.lock());
        for imports in pending.into_values() {
            flush_imports(oracle, &imports.context, &imports.declarations);
        }
        shortened
    }
}

impl std::fmt::Debug for ShorteningQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShorteningQueue")
            .field("requests", &self.requests.lock().len())
            .field("import_requests", &self.import_requests.lock().len())
            .finish()
    }
}

/// Insert import directives for the requested declarations at the end of
/// the file's import list, skipping imports the file already has.
fn flush_imports(oracle: &dyn BindingOracle, position: &SyntaxNode, imports: &[DeclarationId]) {
    let Some(file) = position.ancestors().last().and_then(SourceFile::cast) else {
        return;
    };
    let factory = SyntaxFactory::new();
    for &declaration in imports {
        let Some(fq_name) = oracle.fq_name_of(declaration) else {
            continue;
        };
        if file.imports().any(|import| import.imported_fq_name() == fq_name) {
            continue;
        }
        let Some(directive) = factory.import_directive(&fq_name) else {
            continue;
        };
        let Some(newline) = factory.newline() else {
            continue;
        };
        let anchor = file
            .imports()
            .last()
            .map(|import| import.syntax().clone())
            .or_else(|| file.package_directive().map(|pkg| pkg.syntax().clone()));
        let position = match anchor {
            Some(anchor) => edit::Position::after_node(&anchor),
            None => edit::Position::FirstChildOf(file.syntax().clone()),
        };
        debug!(%fq_name, "inserting deferred import");
        edit::insert_all(
            position,
            vec![
                SyntaxElement::Token(newline),
                SyntaxElement::Node(directive.syntax().clone()),
            ],
        );
    }
}

/// Shorten one qualified element in place when its short form is
/// justified: the short name already resolves to the same declaration at
/// this position, or the file imports the element's fully qualified name.
pub fn shorten_element(oracle: &dyn BindingOracle, node: &SyntaxNode) -> bool {
    if node
        .ancestors()
        .any(|ancestor| ancestor.kind() == SyntaxKind::IMPORT_DIRECTIVE)
    {
        return false;
    }
    let Some(selector) = qualified_element_selector(node) else {
        return false;
    };
    let Some(target) = first_target(oracle, &selector) else {
        return false;
    };
    let Some(fq_name) = oracle.fq_name_of(target) else {
        return false;
    };
    if fq_name.is_one_segment() || fq_name.is_root() {
        return false;
    }

    let importable = oracle.importable_declaration(target);
    let short = FqName::from_dotted(selector.text().as_str());
    let short_is_visible = oracle
        .resolve_fq_name_at(&short, node)
        .into_iter()
        .map(|declaration| oracle.importable_declaration(declaration))
        .any(|declaration| declaration == importable);
    let file_imports_it = node
        .ancestors()
        .last()
        .and_then(SourceFile::cast)
        .is_some_and(|file| {
            file.imports()
                .any(|import| import.imported_fq_name() == fq_name)
        });
    if !short_is_visible && !file_imports_it {
        return false;
    }

    let Some(replacement) = short_form(node) else {
        return false;
    };
    debug!(%fq_name, "shortening qualified reference");
    edit::replace(node, replacement).is_some()
}

/// Build the detached short form of a qualified element: the selector part
/// of a dot chain, or the named part (with type arguments) of a qualified
/// type.
fn short_form(node: &SyntaxNode) -> Option<SyntaxNode> {
    let factory = SyntaxFactory::new();
    match node.kind() {
        SyntaxKind::DOT_EXPR => {
            let selector = crate::parser::ast::DotExpr::cast(node.clone())?.selector()?;
            factory.expr(&selector.text().to_string())
        }
        SyntaxKind::USER_TYPE => {
            let user = UserType::cast(node.clone())?;
            let name = user.reference()?.text();
            let text = match user.type_args() {
                Some(args) => format!("{}{}", name, args.syntax().text()),
                None => name,
            };
            factory.ty(&text)
        }
        _ => None,
    }
}

fn first_target(oracle: &dyn BindingOracle, selector: &crate::parser::ast::NameRef) -> Option<DeclarationId> {
    oracle
        .resolve_reference_targets(selector, &ResolutionContext::default())
        .into_iter()
        .map(|raw| match raw {
            RawTarget::Declaration(declaration) => declaration,
            RawTarget::Property { property, .. } => property,
        })
        .next()
}
