pub mod app;
pub mod args;
pub mod colors;
pub mod error;
pub mod file_node;
pub mod fs;
pub mod history;
pub mod navigator;
pub mod scanner;
pub mod ui;
pub mod utils;

pub use app::App;
pub use args::Args;
pub use error::BrowseError;
pub use file_node::{BundleRules, FileNode, NodeKind};
pub use fs::{AlertQueue, AlertSink, FileSystem, LocalFs, Opener, SystemOpener};
pub use history::History;
pub use navigator::{LocalNavigator, Navigator};
pub use scanner::list_dir;
