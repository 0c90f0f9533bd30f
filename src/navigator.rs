use crate::{
    error::BrowseError,
    file_node::{BundleRules, FileNode},
    fs::{AlertQueue, AlertSink, FileSystem, LocalFs, Opener, SystemOpener},
    history::History,
    scanner::{list_dir, load_children, Preload},
    utils::{normalize_path, parent_path},
};
use std::path::Path;

/// The navigator wired to the real file system and OS
pub type LocalNavigator = Navigator<LocalFs, SystemOpener, AlertQueue>;

/// Tracks the visited locations and owns the tree listed for the current one.
///
/// Every operation runs to completion before returning. Whenever the current
/// location changes its listing fully replaces the previous root nodes.
pub struct Navigator<F, O, S> {
    fs: F,
    opener: O,
    alerts: S,
    rules: BundleRules,
    history: History,
    root_nodes: Vec<FileNode>,
    generation: u64,
}

impl<F: FileSystem, O: Opener, S: AlertSink> Navigator<F, O, S> {
    pub fn new(fs: F, opener: O, alerts: S, rules: BundleRules) -> Self {
        Self {
            fs,
            opener,
            alerts,
            rules,
            history: History::new(),
            root_nodes: Vec::new(),
            generation: 0,
        }
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.history.current()
    }

    pub fn root_nodes(&self) -> &[FileNode] {
        &self.root_nodes
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Whether `go_up` would move anywhere
    pub fn can_go_up(&self) -> bool {
        self.current_path().and_then(parent_path).is_some()
    }

    pub fn rules(&self) -> &BundleRules {
        &self.rules
    }

    pub fn alerts(&self) -> &S {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut S {
        &mut self.alerts
    }

    /// Bumped every time the root nodes are replaced
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Node at an index path from the root listing
    pub fn node(&self, at: &[usize]) -> Option<&FileNode> {
        let (first, rest) = at.split_first()?;
        self.root_nodes.get(*first)?.descendant(rest)
    }

    /// Goes to a new location, dropping any forward history.
    ///
    /// The location is committed even when it cannot be listed; the view is
    /// then empty and the failure goes to the alert sink.
    pub fn navigate_to(&mut self, path: impl AsRef<Path>) {
        let path = normalize_path(path.as_ref());
        log::info!("Navigating to {}", path.display());
        self.history.visit(path.clone());
        self.load_root(&path);
    }

    pub fn go_back(&mut self) {
        if let Some(path) = self.history.back().map(Path::to_path_buf) {
            log::info!("Back to {}", path.display());
            self.load_root(&path);
        }
    }

    pub fn go_forward(&mut self) {
        if let Some(path) = self.history.forward().map(Path::to_path_buf) {
            log::info!("Forward to {}", path.display());
            self.load_root(&path);
        }
    }

    /// Navigates to the parent location. No-op at a file system root.
    pub fn go_up(&mut self) {
        let Some(parent) = self.current_path().and_then(parent_path) else {
            return;
        };
        self.navigate_to(parent);
    }

    /// Lists the current location again without touching history
    pub fn refresh(&mut self) {
        if let Some(path) = self.current_path().map(Path::to_path_buf) {
            self.load_root(&path);
        }
    }

    /// Loads the children of an expandable node on first request.
    ///
    /// A failed listing is logged and leaves the node empty but loaded, so it
    /// is not retried. Returns the node's children, or `None` when `at` does
    /// not name an expandable node.
    pub fn expand(&mut self, at: &[usize]) -> Option<&[FileNode]> {
        let Self { fs, rules, root_nodes, .. } = self;
        let (first, rest) = at.split_first()?;
        let node = root_nodes.get_mut(*first)?.descendant_mut(rest)?;
        if !node.is_expandable() {
            return None;
        }
        if !node.children_loaded {
            match load_children(&*fs, node, &*rules, Preload::Bundles) {
                Ok(()) => log::debug!("Expanded {}", node.path.display()),
                Err(e) => log::warn!("Expansion failed: {}", e),
            }
        }
        Some(node.children.as_slice())
    }

    /// Enters directories and bundles, opens anything else with the OS
    pub fn activate(&mut self, at: &[usize]) {
        let Some(node) = self.node(at) else {
            return;
        };
        let path = node.path.clone();
        if node.is_expandable() {
            self.navigate_to(path);
            return;
        }
        log::info!("Opening {}", path.display());
        if let Err(source) = self.opener.open(&path) {
            let err = BrowseError::Open { path, source };
            log::warn!("{}", err);
            self.alerts.alert(err.to_string());
        }
    }

    fn load_root(&mut self, path: &Path) {
        self.root_nodes.clear();
        self.generation += 1;
        match list_dir(&self.fs, path, &self.rules, Preload::Bundles) {
            Ok(nodes) => self.root_nodes = nodes,
            Err(e) => {
                log::warn!("{}", e);
                self.alerts.alert(e.to_string());
            }
        }
    }
}
