//! Services the navigator consumes: directory enumeration and metadata,
//! launching files with the OS default handler, and user-facing alerts.

use std::{
    collections::VecDeque,
    fs, io,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// Enumeration and metadata service. Every call may fail independently.
pub trait FileSystem {
    /// Immediate entries of `path`, in no particular order
    fn list_entries(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    fn is_dir(&self, path: &Path) -> io::Result<bool>;

    fn file_size(&self, path: &Path) -> io::Result<u64>;

    fn modified_time(&self, path: &Path) -> io::Result<Option<SystemTime>>;
}

/// Hands a file to whatever the OS opens it with
pub trait Opener {
    fn open(&mut self, path: &Path) -> io::Result<()>;
}

/// Receives human-readable error text meant for the user
pub trait AlertSink {
    fn alert(&mut self, message: String);
}

/// The real file system through `std::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn list_entries(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry_result in fs::read_dir(path)? {
            match entry_result {
                Ok(entry) => entries.push(entry.path()),
                Err(e) => log::warn!("Skipping unreadable entry in {}: {}", path.display(), e),
            }
        }
        Ok(entries)
    }

    // Separate stat per query so each one fails on its own
    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        fs::metadata(path).map(|m| m.is_dir())
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        fs::metadata(path).map(|m| m.len())
    }

    fn modified_time(&self, path: &Path) -> io::Result<Option<SystemTime>> {
        fs::metadata(path).map(|m| m.modified().ok())
    }
}

/// Launches the platform's default handler, detached from the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&mut self, path: &Path) -> io::Result<()> {
        // The handler outlives us and is never left behind as our child
        open::that_detached(path)
    }
}

/// Alerts waiting to be shown, oldest first
#[derive(Debug, Default, Clone)]
pub struct AlertQueue {
    pending: VecDeque<String>,
}

impl AlertQueue {
    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl AlertSink for AlertQueue {
    fn alert(&mut self, message: String) {
        self.pending.push_back(message);
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::{cell::Cell, collections::BTreeMap};

    #[derive(Debug, Clone)]
    enum Entry {
        File { size: u64 },
        Dir,
    }

    /// In-memory tree that counts listings and can simulate failures
    #[derive(Debug, Default)]
    pub struct MemoryFs {
        entries: BTreeMap<PathBuf, Entry>,
        unreadable: Vec<PathBuf>,
        broken_metadata: Vec<PathBuf>,
        listings: Cell<usize>,
    }

    impl MemoryFs {
        pub fn new() -> Self {
            let mut fs = Self::default();
            fs.entries.insert(PathBuf::from("/"), Entry::Dir);
            fs
        }

        pub fn dir(mut self, path: &str) -> Self {
            self.insert_parents(Path::new(path));
            self.entries.insert(PathBuf::from(path), Entry::Dir);
            self
        }

        pub fn file(mut self, path: &str, size: u64) -> Self {
            self.insert_parents(Path::new(path));
            self.entries.insert(PathBuf::from(path), Entry::File { size });
            self
        }

        pub fn unreadable(mut self, path: &str) -> Self {
            self.unreadable.push(PathBuf::from(path));
            self
        }

        pub fn broken_metadata(mut self, path: &str) -> Self {
            self.broken_metadata.push(PathBuf::from(path));
            self
        }

        pub fn listings(&self) -> usize {
            self.listings.get()
        }

        fn insert_parents(&mut self, path: &Path) {
            for ancestor in path.ancestors().skip(1) {
                self.entries.entry(ancestor.to_path_buf()).or_insert(Entry::Dir);
            }
        }

        fn lookup(&self, path: &Path) -> io::Result<&Entry> {
            if self.broken_metadata.iter().any(|p| p == path) {
                return Err(io::Error::other("metadata unavailable"));
            }
            self.entries
                .get(path)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file or directory"))
        }
    }

    impl FileSystem for MemoryFs {
        fn list_entries(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
            self.listings.set(self.listings.get() + 1);
            if self.unreadable.iter().any(|p| p == path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
            }
            match self.entries.get(path) {
                Some(Entry::Dir) => {}
                Some(Entry::File { .. }) => {
                    return Err(io::Error::new(io::ErrorKind::NotADirectory, "not a directory"));
                }
                None => {
                    return Err(io::Error::new(io::ErrorKind::NotFound, "no such file or directory"));
                }
            }
            // Reverse order so callers cannot rely on enumeration order
            Ok(self
                .entries
                .keys()
                .filter(|p| p.parent() == Some(path) && p.as_path() != path)
                .rev()
                .cloned()
                .collect())
        }

        fn is_dir(&self, path: &Path) -> io::Result<bool> {
            self.lookup(path).map(|e| matches!(e, Entry::Dir))
        }

        fn file_size(&self, path: &Path) -> io::Result<u64> {
            self.lookup(path).map(|e| match e {
                Entry::File { size } => *size,
                Entry::Dir => 0,
            })
        }

        fn modified_time(&self, path: &Path) -> io::Result<Option<SystemTime>> {
            self.lookup(path).map(|_| Some(SystemTime::UNIX_EPOCH))
        }
    }

    /// Records every path it was asked to open
    #[derive(Debug, Default)]
    pub struct RecordingOpener {
        pub opened: Vec<PathBuf>,
        pub fail: bool,
    }

    impl Opener for RecordingOpener {
        fn open(&mut self, path: &Path) -> io::Result<()> {
            self.opened.push(path.to_path_buf());
            if self.fail {
                Err(io::Error::new(io::ErrorKind::NotFound, "no handler"))
            } else {
                Ok(())
            }
        }
    }
}
