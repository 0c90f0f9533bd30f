use std::path::{Path, PathBuf};

/// Browser-style list of visited locations with a cursor.
///
/// Visiting a new location while not at the newest entry drops every entry
/// after the cursor. Moving back or forward only moves the cursor.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<PathBuf>,
    position: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `None` until the first visit
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn current(&self) -> Option<&Path> {
        self.position
            .and_then(|i| self.entries.get(i))
            .map(PathBuf::as_path)
    }

    /// Records a new location, pruning the forward branch
    pub fn visit(&mut self, path: PathBuf) {
        if let Some(i) = self.position {
            self.entries.truncate(i + 1);
        }
        self.entries.push(path);
        self.position = Some(self.entries.len() - 1);
    }

    pub fn can_go_back(&self) -> bool {
        self.position.is_some_and(|i| i > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        self.position.is_some_and(|i| i + 1 < self.entries.len())
    }

    /// Moves the cursor one step back and returns the location there
    pub fn back(&mut self) -> Option<&Path> {
        if !self.can_go_back() {
            return None;
        }
        self.position = self.position.map(|i| i - 1);
        self.current()
    }

    /// Moves the cursor one step forward and returns the location there
    pub fn forward(&mut self) -> Option<&Path> {
        if !self.can_go_forward() {
            return None;
        }
        self.position = self.position.map(|i| i + 1);
        self.current()
    }
}
