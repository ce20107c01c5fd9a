//! Coarse project model.
//!
//! The engine needs two policy answers from the host project: whether a
//! file belongs to project or library sources (candidate pruning), and
//! whether a qualified name written in a file must carry the explicit root
//! marker because a local scope shadows its first segment.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use crate::base::{FileId, FqName};

#[derive(Debug, Default, Clone)]
pub struct ProjectModel {
    project_files: FxHashSet<FileId>,
    library_files: FxHashSet<FileId>,
    /// Per file: root-package names shadowed by a local scope. A qualified
    /// name starting with one of these needs the root prefix to resolve
    /// root-relative.
    shadowed_roots: FxHashMap<FileId, FxHashSet<SmolStr>>,
}

impl ProjectModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_project_file(&mut self, file: FileId) {
        self.project_files.insert(file);
    }

    pub fn add_library_file(&mut self, file: FileId) {
        self.library_files.insert(file);
    }

    pub fn add_shadowed_root(&mut self, file: FileId, name: impl Into<SmolStr>) {
        self.shadowed_roots.entry(file).or_default().insert(name.into());
    }

    /// Inclusion policy used to prune irrelevant candidates before
    /// expensive resolution. Not a correctness guarantee.
    pub fn is_in_project_or_lib_source(&self, file: FileId) -> bool {
        self.project_files.contains(&file) || self.library_files.contains(&file)
    }

    /// Whether `fq_name`, written in `file`, must be prefixed with the
    /// explicit root marker to resolve root-relative.
    pub fn requires_root_prefix(&self, file: FileId, fq_name: &FqName) -> bool {
        let Some(first) = fq_name.segments().first() else {
            return false;
        };
        self.shadowed_roots
            .get(&file)
            .is_some_and(|names| names.contains(first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inclusion_policy() {
        let mut project = ProjectModel::new();
        project.add_project_file(FileId::new(1));
        project.add_library_file(FileId::new(2));
        assert!(project.is_in_project_or_lib_source(FileId::new(1)));
        assert!(project.is_in_project_or_lib_source(FileId::new(2)));
        assert!(!project.is_in_project_or_lib_source(FileId::new(3)));
    }

    #[test]
    fn root_prefix_policy() {
        let mut project = ProjectModel::new();
        let file = FileId::new(1);
        project.add_shadowed_root(file, "a");
        assert!(project.requires_root_prefix(file, &FqName::from_dotted("a.b")));
        assert!(!project.requires_root_prefix(file, &FqName::from_dotted("b.a")));
        assert!(!project.requires_root_prefix(file, &FqName::ROOT));
        assert!(!project.requires_root_prefix(FileId::new(2), &FqName::from_dotted("a.b")));
    }
}
