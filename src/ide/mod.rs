//! IDE-facing refactoring operations: rename, qualified-name rewriting,
//! and reference shortening, built on the resolve layer.

pub mod error;
pub mod operators;
pub mod rename;
pub mod requalify;
pub mod shorten;

pub use error::{RefactorError, RefactorResult};
pub use shorten::{ExecutionContext, ShorteningMode, ShorteningQueue, ShorteningRequest};

use crate::base::FqName;
use crate::parser::SyntaxNode;
use crate::parser::ast::ImportAlias;
use crate::resolve::{
    BindingOracle, DeclarationId, ExtensionRegistry, ProjectModel, ResolutionContext,
    SimpleNameReference,
};

/// Entry point tying the engines together for one refactoring session.
///
/// Holds the host-provided oracle plus the session state the engines
/// share: the project model, the extension registry and the shortening
/// queue. All reference arguments must come from mutable trees
/// (`clone_for_update`) for the mutating operations.
pub struct Refactoring<'a> {
    oracle: &'a dyn BindingOracle,
    project: ProjectModel,
    extensions: ExtensionRegistry,
    queue: ShorteningQueue,
    execution: ExecutionContext,
}

impl<'a> Refactoring<'a> {
    pub fn new(oracle: &'a dyn BindingOracle) -> Self {
        Self {
            oracle,
            project: ProjectModel::new(),
            extensions: ExtensionRegistry::new(),
            queue: ShorteningQueue::new(),
            execution: ExecutionContext::default(),
        }
    }

    pub fn with_project(mut self, project: ProjectModel) -> Self {
        self.project = project;
        self
    }

    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_execution(mut self, execution: ExecutionContext) -> Self {
        self.execution = execution;
        self
    }

    pub fn queue(&self) -> &ShorteningQueue {
        &self.queue
    }

    /// Resolve a reference to its declaration targets. Empty means
    /// unresolved, not failed.
    pub fn resolve(&self, reference: &SimpleNameReference) -> Vec<DeclarationId> {
        crate::resolve::resolve_targets(self.oracle, reference, &ResolutionContext::default())
    }

    pub fn can_be_reference_to(
        &self,
        reference: &SimpleNameReference,
        candidate: DeclarationId,
    ) -> bool {
        crate::resolve::can_be_reference_to(self.oracle, &self.project, reference, candidate)
    }

    pub fn is_reference_to_via_extension(
        &self,
        reference: &SimpleNameReference,
        candidate: DeclarationId,
    ) -> bool {
        self.extensions
            .is_reference_to(reference.name_ref(), candidate)
    }

    pub fn import_alias(&self, reference: &SimpleNameReference) -> Option<ImportAlias> {
        crate::resolve::import_alias(self.oracle, reference)
    }

    /// Rename the reference occurrence in place.
    pub fn rename(
        &self,
        reference: &SimpleNameReference,
        new_name: &str,
    ) -> RefactorResult<SyntaxNode> {
        rename::rename(self.oracle, &self.extensions, reference, new_name)
    }

    /// Rewrite the reference to spell the given fully qualified name.
    /// `target`, when known, enables the deferred-import paths: bare
    /// top-level names and callable references to top-level declarations
    /// gain an import instead of a qualifier.
    pub fn bind_to_fq_name(
        &self,
        reference: &SimpleNameReference,
        fq_name: &FqName,
        mode: ShorteningMode,
        target: Option<DeclarationId>,
    ) -> RefactorResult<SyntaxNode> {
        requalify::bind_to_fq_name(
            self.oracle,
            &self.project,
            &self.queue,
            self.execution,
            reference,
            fq_name,
            mode,
            target,
        )
    }

    /// Rewrite the reference to point at the given declaration.
    pub fn bind_to_declaration(
        &self,
        reference: &SimpleNameReference,
        declaration: DeclarationId,
    ) -> RefactorResult<SyntaxNode> {
        requalify::bind_to_declaration(
            self.oracle,
            &self.project,
            &self.queue,
            self.execution,
            reference,
            declaration,
        )
    }

    /// Drain the shortening queue in one batch pass.
    pub fn process_shortening(&self) -> usize {
        self.queue.process(self.oracle)
    }
}

impl std::fmt::Debug for Refactoring<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refactoring")
            .field("extensions", &self.extensions)
            .field("queue", &self.queue)
            .field("execution", &self.execution)
            .finish()
    }
}
