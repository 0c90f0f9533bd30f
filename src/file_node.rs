use crate::utils::{format_size, format_time};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// What kind of entry a node stands for. Decided once when the node is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Directory,
    /// A directory carrying a bundle extension (`Foo.app`), pre-listed with its parent
    Bundle,
}

impl NodeKind {
    pub fn is_expandable(self) -> bool {
        matches!(self, NodeKind::Directory | NodeKind::Bundle)
    }
}

/// Extensions that turn a directory into a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRules {
    extensions: Vec<String>,
}

impl BundleRules {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(Into::into)
                .map(|ext: String| ext.trim_start_matches('.').to_string())
                .filter(|ext| !ext.is_empty())
                .collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| self.extensions.iter().any(|known| known == ext))
    }

    /// Pure classification from the path and the result of a directory check
    pub fn classify(&self, path: &Path, is_dir: bool) -> NodeKind {
        match (is_dir, self.matches(path)) {
            (true, true) => NodeKind::Bundle,
            (true, false) => NodeKind::Directory,
            (false, _) => NodeKind::File,
        }
    }
}

impl Default for BundleRules {
    fn default() -> Self {
        Self::new(["app", "bundle"])
    }
}

/// A snapshot of one file system entry in the browser tree
#[derive(Debug, Clone)]
pub struct FileNode {
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
    /// Byte length for files, `None` for directories and bundles
    pub size: Option<u64>,
    pub modified_time: Option<SystemTime>,
    pub children: Vec<FileNode>,
    /// Set once a listing of this node has been attempted, successful or not
    pub children_loaded: bool,
}

impl FileNode {
    pub fn new(path: PathBuf, kind: NodeKind, size: Option<u64>, mtime: Option<SystemTime>) -> Self {
        let name = display_name(&path);
        let size = if kind == NodeKind::File { size } else { None };
        Self {
            name,
            path,
            kind,
            size,
            modified_time: mtime,
            children: vec![],
            children_loaded: false,
        }
    }

    pub fn is_expandable(&self) -> bool {
        self.kind.is_expandable()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Walks an index path down from this node
    pub fn descendant(&self, at: &[usize]) -> Option<&FileNode> {
        match at.split_first() {
            None => Some(self),
            Some((first, rest)) => self.children.get(*first)?.descendant(rest),
        }
    }

    pub fn descendant_mut(&mut self, at: &[usize]) -> Option<&mut FileNode> {
        match at.split_first() {
            None => Some(self),
            Some((first, rest)) => self.children.get_mut(*first)?.descendant_mut(rest),
        }
    }

    pub fn size_label(&self) -> String {
        match self.size {
            Some(size) => format_size(size),
            None => "--".to_string(),
        }
    }

    pub fn date_label(&self) -> String {
        self.modified_time
            .map(format_time)
            .unwrap_or_else(|| "--".to_string())
    }
}

/// Final path component, or the whole path for roots like `/`
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_requires_directory_for_bundle() {
        let rules = BundleRules::default();
        assert_eq!(rules.classify(Path::new("/x/App.app"), true), NodeKind::Bundle);
        assert_eq!(rules.classify(Path::new("/x/App.bundle"), true), NodeKind::Bundle);
        assert_eq!(rules.classify(Path::new("/x/notes.app"), false), NodeKind::File);
        assert_eq!(rules.classify(Path::new("/x/src"), true), NodeKind::Directory);
    }

    #[test]
    fn bundle_extension_is_case_sensitive() {
        let rules = BundleRules::new([".app"]);
        assert_eq!(rules.extensions(), ["app".to_string()]);
        assert!(rules.matches(Path::new("Foo.app")));
        assert!(!rules.matches(Path::new("Foo.APP")));
        assert!(!rules.matches(Path::new("app")));
    }

    #[test]
    fn directories_suppress_size() {
        let dir = FileNode::new(PathBuf::from("/tmp/d"), NodeKind::Directory, Some(4096), None);
        assert_eq!(dir.size, None);
        assert_eq!(dir.size_label(), "--");
        assert_eq!(dir.date_label(), "--");
        assert!(dir.is_expandable());
        assert!(!dir.children_loaded);

        let file = FileNode::new(PathBuf::from("/tmp/f.txt"), NodeKind::File, Some(10), None);
        assert_eq!(file.name, "f.txt");
        assert_eq!(file.size_label(), "10 B");
        assert!(!file.is_expandable());
    }

    #[test]
    fn descendant_follows_index_path() {
        let mut root = FileNode::new(PathBuf::from("/a"), NodeKind::Directory, None, None);
        let mut b = FileNode::new(PathBuf::from("/a/b"), NodeKind::Directory, None, None);
        b.children.push(FileNode::new(PathBuf::from("/a/b/c"), NodeKind::File, Some(1), None));
        root.children.push(b);

        assert_eq!(root.descendant(&[0, 0]).map(|n| n.name.as_str()), Some("c"));
        assert!(root.descendant(&[0, 1]).is_none());
        assert!(root.descendant(&[3]).is_none());
        assert_eq!(root.descendant(&[]).map(|n| n.name.as_str()), Some("a"));
    }

    #[test]
    fn root_path_names_itself() {
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
