use clap::Parser;
use std::path::PathBuf;

use crate::{file_node::BundleRules, utils::normalize_path};

/// RFE: A Rust-based terminal file explorer
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to open (default: home directory)
    pub path: Option<PathBuf>,

    /// Directory extension treated as a bundle (repeatable)
    #[arg(long = "bundle-ext", value_name = "EXT", default_values = ["app", "bundle"])]
    pub bundle_ext: Vec<String>,

    /// Write log records to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// The starting location, made absolute when the file system allows it
    pub fn start_path(&self) -> PathBuf {
        let requested = self
            .path
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        requested
            .canonicalize()
            .or_else(|_| std::path::absolute(&requested))
            .map(|path| normalize_path(&path))
            .unwrap_or_else(|_| normalize_path(&requested))
    }

    pub fn bundle_rules(&self) -> BundleRules {
        BundleRules::new(self.bundle_ext.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn defaults_to_app_and_bundle() {
        let args = Args::parse_from(["rfe"]);
        assert_eq!(args.path, None);
        assert_eq!(args.bundle_ext, ["app", "bundle"]);
        assert!(args.log_file.is_none());
        assert!(args.bundle_rules().matches(Path::new("X.app")));
    }

    #[test]
    fn bundle_ext_replaces_defaults() {
        let args = Args::parse_from(["rfe", "/tmp", "--bundle-ext", "framework", "--bundle-ext", ".plugin"]);
        assert_eq!(args.path, Some(PathBuf::from("/tmp")));
        let rules = args.bundle_rules();
        assert!(rules.matches(Path::new("Foo.framework")));
        assert!(rules.matches(Path::new("Foo.plugin")));
        assert!(!rules.matches(Path::new("Foo.app")));
    }

    #[test]
    fn missing_start_path_is_normalized() {
        let args = Args::parse_from(["rfe", "/definitely/not/./here/.."]);
        assert_eq!(args.start_path(), PathBuf::from("/definitely/not"));
    }

    #[test]
    fn relative_start_path_becomes_absolute() {
        let args = Args::parse_from(["rfe", "no-such-dir/./sub"]);
        let start = args.start_path();
        assert!(start.is_absolute());
        assert!(start.ends_with("no-such-dir/sub"));
    }
}
