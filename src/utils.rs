use chrono::{DateTime, Local};
use number_prefix::NumberPrefix;
use std::{
    path::{Component, Path, PathBuf},
    time::SystemTime,
};

pub fn format_size(size: u64) -> String {
    match NumberPrefix::binary(size as f64) {
        NumberPrefix::Standalone(bytes) => format!("{} B", bytes),
        NumberPrefix::Prefixed(prefix, n) => format!("{:.1} {}B", n, prefix),
    }
}

/// Medium date, short time, in the local zone
pub fn format_time(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%b %e, %Y %H:%M").to_string()
}

/// Lexically removes `.` and resolves `..` without touching the file system
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                // Relative paths keep their leading `..`
                None | Some(Component::ParentDir) | Some(Component::CurDir) => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Parent of a normalized path, `None` at a file system root
pub fn parent_path(path: &Path) -> Option<PathBuf> {
    let normalized = normalize_path(path);
    match normalized.components().next_back()? {
        Component::RootDir | Component::Prefix(_) => None,
        // `.` and `..` climb by appending another `..`
        Component::CurDir => Some(PathBuf::from("..")),
        Component::ParentDir => Some(normalized.join("..")),
        Component::Normal(_) => {
            let parent = normalized.parent()?;
            if parent.as_os_str().is_empty() {
                Some(PathBuf::from("."))
            } else {
                Some(parent.to_path_buf())
            }
        }
    }
}
