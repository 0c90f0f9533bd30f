use crate::{
    error::{BrowseError, Result},
    file_node::{BundleRules, FileNode, NodeKind},
    fs::FileSystem,
};
use std::path::{Path, PathBuf};

/// Whether bundles found in a listing get their own contents listed right away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preload {
    Bundles,
    Nothing,
}

/// Lists the immediate children of `path`, sorted by name.
///
/// Metadata that cannot be read only degrades the affected entry. Bundles at
/// this level are listed one level deep when `preload` asks for it; their own
/// subdirectories stay lazy.
pub fn list_dir<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
    rules: &BundleRules,
    preload: Preload,
) -> Result<Vec<FileNode>> {
    let entries = fs.list_entries(path).map_err(|source| BrowseError::Listing {
        path: path.to_path_buf(),
        source,
    })?;

    let mut nodes: Vec<FileNode> = entries
        .into_iter()
        .map(|entry_path| build_node(fs, entry_path, rules))
        .collect();

    // Stable, byte-wise on the display name
    nodes.sort_by(|a, b| a.name.cmp(&b.name));

    if preload == Preload::Bundles {
        for node in nodes.iter_mut().filter(|n| n.kind == NodeKind::Bundle) {
            if let Err(e) = load_children(fs, node, rules, Preload::Nothing) {
                log::warn!("Bundle contents unavailable: {}", e);
            }
        }
    }

    log::debug!("Listed {} entries in {}", nodes.len(), path.display());
    Ok(nodes)
}

/// Fills `node.children` once. A failed listing still counts as loaded.
pub fn load_children<F: FileSystem + ?Sized>(
    fs: &F,
    node: &mut FileNode,
    rules: &BundleRules,
    preload: Preload,
) -> Result<()> {
    if node.children_loaded {
        return Ok(());
    }
    node.children_loaded = true;
    node.children = list_dir(fs, &node.path, rules, preload)?;
    Ok(())
}

fn build_node<F: FileSystem + ?Sized>(fs: &F, path: PathBuf, rules: &BundleRules) -> FileNode {
    let is_dir = fs.is_dir(&path).unwrap_or_else(|e| {
        log::debug!("Directory check failed for {}: {}", path.display(), e);
        false
    });
    let kind = rules.classify(&path, is_dir);

    let size = if kind == NodeKind::File {
        Some(fs.file_size(&path).unwrap_or_else(|e| {
            log::debug!("Size unavailable for {}: {}", path.display(), e);
            0
        }))
    } else {
        None
    };

    let mtime = fs.modified_time(&path).unwrap_or_else(|e| {
        log::debug!("Modification time unavailable for {}: {}", path.display(), e);
        None
    });

    FileNode::new(path, kind, size, mtime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MemoryFs;

    fn names(nodes: &[FileNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn sorts_case_sensitive_ascending() {
        let fs = MemoryFs::new()
            .file("/d/b.txt", 1)
            .file("/d/A.txt", 2)
            .dir("/d/c");
        let nodes = list_dir(&fs, Path::new("/d"), &BundleRules::default(), Preload::Bundles).unwrap();
        assert_eq!(names(&nodes), ["A.txt", "b.txt", "c"]);
    }

    #[test]
    fn bundles_are_preloaded_one_level() {
        let fs = MemoryFs::new()
            .file("/apps/App.bundle/Info.plist", 10)
            .dir("/apps/App.bundle/Contents")
            .file("/apps/App.bundle/Contents/MacOS", 5)
            .dir("/apps/Plain")
            .file("/apps/Plain/inside", 1);
        let nodes = list_dir(&fs, Path::new("/apps"), &BundleRules::default(), Preload::Bundles).unwrap();

        let bundle = &nodes[0];
        assert_eq!(bundle.kind, NodeKind::Bundle);
        assert!(bundle.children_loaded);
        assert_eq!(names(&bundle.children), ["Contents", "Info.plist"]);

        // Grandchildren stay lazy
        let contents = &bundle.children[0];
        assert_eq!(contents.kind, NodeKind::Directory);
        assert!(!contents.children_loaded);
        assert!(contents.children.is_empty());

        let plain = &nodes[1];
        assert_eq!(plain.kind, NodeKind::Directory);
        assert!(!plain.children_loaded);
        assert!(plain.children.is_empty());

        // /apps and App.bundle, nothing deeper
        assert_eq!(fs.listings(), 2);
    }

    #[test]
    fn bundle_inside_bundle_is_not_cascaded() {
        let fs = MemoryFs::new()
            .dir("/x/Outer.app/Inner.app/Deep");
        let nodes = list_dir(&fs, Path::new("/x"), &BundleRules::default(), Preload::Bundles).unwrap();
        let inner = &nodes[0].children[0];
        assert_eq!(inner.kind, NodeKind::Bundle);
        assert!(!inner.children_loaded);
        assert!(inner.children.is_empty());
        assert_eq!(fs.listings(), 2);
    }

    #[test]
    fn metadata_failure_degrades_entry_only() {
        let fs = MemoryFs::new()
            .file("/d/good", 7)
            .file("/d/bad", 99)
            .broken_metadata("/d/bad");
        let nodes = list_dir(&fs, Path::new("/d"), &BundleRules::default(), Preload::Bundles).unwrap();
        assert_eq!(names(&nodes), ["bad", "good"]);
        assert_eq!(nodes[0].kind, NodeKind::File);
        assert_eq!(nodes[0].size, Some(0));
        assert_eq!(nodes[0].modified_time, None);
        assert_eq!(nodes[1].size, Some(7));
        assert!(nodes[1].modified_time.is_some());
    }

    #[test]
    fn unreadable_directory_is_a_listing_failure() {
        let fs = MemoryFs::new().dir("/locked").unreadable("/locked");
        let err = list_dir(&fs, Path::new("/locked"), &BundleRules::default(), Preload::Bundles).unwrap_err();
        assert!(matches!(err, BrowseError::Listing { ref path, .. } if path == Path::new("/locked")));
    }

    #[test]
    fn failed_bundle_preload_leaves_it_empty_and_loaded() {
        let fs = MemoryFs::new()
            .file("/d/Locked.app/secret", 1)
            .unreadable("/d/Locked.app");
        let nodes = list_dir(&fs, Path::new("/d"), &BundleRules::default(), Preload::Bundles).unwrap();
        assert_eq!(nodes[0].kind, NodeKind::Bundle);
        assert!(nodes[0].children_loaded);
        assert!(nodes[0].children.is_empty());
    }

    #[test]
    fn load_children_runs_once() {
        let fs = MemoryFs::new().file("/d/sub/a", 1);
        let mut node = FileNode::new(PathBuf::from("/d/sub"), NodeKind::Directory, None, None);
        let rules = BundleRules::default();
        load_children(&fs, &mut node, &rules, Preload::Bundles).unwrap();
        load_children(&fs, &mut node, &rules, Preload::Bundles).unwrap();
        assert_eq!(fs.listings(), 1);
        assert_eq!(names(&node.children), ["a"]);
    }
}
