use crate::{
    file_node::FileNode,
    fs::{AlertQueue, FileSystem, LocalFs, Opener, SystemOpener},
    navigator::Navigator,
};
use ratatui::widgets::ListState;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

/// One visible line of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Index path from the root listing
    pub at: Vec<usize>,
    pub depth: usize,
}

/// Application State
pub struct App<F = LocalFs, O = SystemOpener> {
    pub nav: Navigator<F, O, AlertQueue>,
    pub state: ListState,
    /// Nodes the user unfolded in the current tree
    pub expanded: HashSet<PathBuf>,
    pub rows: Vec<Row>,
    pub status_message: Option<String>,
    pub show_help: bool,
    /// Alert currently shown in the popup
    pub alert: Option<String>,
    seen_generation: u64,
}

impl<F: FileSystem, O: Opener> App<F, O> {
    pub fn new(mut nav: Navigator<F, O, AlertQueue>, start: &Path) -> Self {
        nav.navigate_to(start);
        let mut app = Self {
            nav,
            state: ListState::default(),
            expanded: HashSet::new(),
            rows: Vec::new(),
            status_message: None,
            show_help: false,
            alert: None,
            seen_generation: 0,
        };
        app.sync();
        app
    }

    /// Picks up a replaced tree and any pending alert after a navigator call
    fn sync(&mut self) {
        let generation = self.nav.generation();
        if generation != self.seen_generation {
            self.seen_generation = generation;
            self.expanded.clear();
            self.rebuild_rows();
            self.select_first();
        } else {
            self.rebuild_rows();
            if let Some(i) = self.state.selected()
                && i >= self.rows.len()
            {
                self.state.select(self.rows.len().checked_sub(1));
            }
        }
        if self.alert.is_none() {
            self.alert = self.nav.alerts_mut().pop();
        }
    }

    fn rebuild_rows(&mut self) {
        let mut rows = Vec::new();
        let mut prefix = Vec::new();
        collect_rows(self.nav.root_nodes(), &self.expanded, &mut prefix, &mut rows);
        self.rows = rows;
    }

    fn select_first(&mut self) {
        if self.rows.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
    }

    pub fn current_path(&self) -> PathBuf {
        self.nav
            .current_path()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    pub fn node(&self, row: &Row) -> Option<&FileNode> {
        self.nav.node(&row.at)
    }

    pub fn selected_row(&self) -> Option<&Row> {
        self.state.selected().and_then(|i| self.rows.get(i))
    }

    pub fn selected_node(&self) -> Option<&FileNode> {
        self.selected_row().and_then(|row| self.node(row))
    }

    pub fn is_expanded(&self, node: &FileNode) -> bool {
        self.expanded.contains(&node.path)
    }

    pub fn next(&mut self) {
        let len = self.rows.len();
        let i = match self.state.selected() {
            Some(i) => {
                if len > 0 && i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        if len > 0 {
            self.state.select(Some(i));
        }
    }

    pub fn previous(&mut self) {
        let len = self.rows.len();
        let i = match self.state.selected() {
            Some(0) | None => len.saturating_sub(1),
            Some(i) => i - 1,
        };
        if len > 0 {
            self.state.select(Some(i));
        }
    }

    pub fn page_down(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let page_size = 10;
        let i = match self.state.selected() {
            Some(i) => (i + page_size).min(self.rows.len() - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let page_size = 10;
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(page_size),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn go_to_first(&mut self) {
        self.select_first();
    }

    pub fn go_to_last(&mut self) {
        if !self.rows.is_empty() {
            self.state.select(Some(self.rows.len() - 1));
        }
    }

    /// Unfold the selected directory, listing it on first use
    pub fn expand_selected(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };
        let Some(children) = self.nav.expand(&row.at) else {
            return;
        };
        if children.is_empty() {
            self.status_message = Some("Empty or unreadable directory".to_string());
        }
        if let Some(path) = self.nav.node(&row.at).map(|n| n.path.clone()) {
            self.expanded.insert(path);
        }
        self.sync();
    }

    /// Fold the selected directory, or jump to its parent row
    pub fn collapse_selected(&mut self) {
        let Some(row) = self.selected_row().cloned() else {
            return;
        };
        let path = self.node(&row).map(|n| n.path.clone());
        if let Some(path) = path
            && self.expanded.remove(&path)
        {
            self.sync();
            return;
        }
        if let Some((_, parent)) = row.at.split_last()
            && !parent.is_empty()
            && let Some(i) = self.rows.iter().position(|r| r.at == parent)
        {
            self.state.select(Some(i));
        }
    }

    pub fn toggle_selected(&mut self) {
        match self.selected_node().map(|node| self.is_expanded(node)) {
            Some(true) => self.collapse_selected(),
            Some(false) => self.expand_selected(),
            None => {}
        }
    }

    /// Enter a directory or bundle, open a file
    pub fn activate_selected(&mut self) {
        if let Some(row) = self.selected_row().cloned() {
            self.nav.activate(&row.at);
            self.sync();
        }
    }

    pub fn go_back(&mut self) {
        self.nav.go_back();
        self.sync();
    }

    pub fn go_forward(&mut self) {
        self.nav.go_forward();
        self.sync();
    }

    pub fn go_up(&mut self) {
        self.nav.go_up();
        self.sync();
    }

    /// List the current location again
    pub fn refresh(&mut self) {
        self.nav.refresh();
        self.sync();
        self.status_message = Some("Refresh complete!".to_string());
    }

    /// Closes the popup and shows the next queued alert, if any
    pub fn dismiss_alert(&mut self) {
        self.alert = self.nav.alerts_mut().pop();
    }
}

fn collect_rows(
    nodes: &[FileNode],
    expanded: &HashSet<PathBuf>,
    prefix: &mut Vec<usize>,
    rows: &mut Vec<Row>,
) {
    for (i, node) in nodes.iter().enumerate() {
        prefix.push(i);
        rows.push(Row {
            at: prefix.clone(),
            depth: prefix.len() - 1,
        });
        if node.is_expandable() && expanded.contains(&node.path) {
            collect_rows(&node.children, expanded, prefix, rows);
        }
        prefix.pop();
    }
}
