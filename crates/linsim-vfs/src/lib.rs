//! In-memory hierarchical file tree.
//!
//! The tree is strictly owned top-down: every directory exclusively owns its
//! children, so there is no sharing and no cycles. Paths are `/`-delimited
//! strings; `.` and `..` are resolved by [`normalize_path`] and never stored.

mod mode;
mod node;
mod path;
mod tree;

pub use mode::{apply_mode, format_mode, parse_permissions};
pub use node::{DIR_SIZE, EntryKind, Metadata, Node, NodeBody};
pub use path::{components, file_name, is_within, normalize_path, parent};
pub use tree::{Children, FileTree};
