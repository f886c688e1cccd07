//! File and directory nodes.

use indexmap::IndexMap;
use linsim_platform::SystemTime;

/// Nominal size reported for directories.
pub const DIR_SIZE: u64 = 4096;

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Informational attributes carried by every node. Nothing here is
/// enforced; `ls -l` and `chmod`/`chown` just read and write it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Ten-character mode string, e.g. `drwxr-xr-x`.
    pub permissions: String,
    pub owner: String,
    pub group: String,
    pub size: u64,
    pub modified: SystemTime,
}

/// The two shapes a node can take.
#[derive(Debug, Clone)]
pub enum NodeBody {
    File { content: String },
    /// Children keyed by entry name, in insertion order.
    Directory { children: IndexMap<String, Node> },
}

/// A single filesystem entry.
#[derive(Debug, Clone)]
pub struct Node {
    pub meta: Metadata,
    pub(crate) body: NodeBody,
}

impl Node {
    /// A new empty directory.
    pub fn directory(permissions: &str, owner: &str, group: &str, modified: SystemTime) -> Self {
        Self {
            meta: Metadata {
                permissions: permissions.to_string(),
                owner: owner.to_string(),
                group: group.to_string(),
                size: DIR_SIZE,
                modified,
            },
            body: NodeBody::Directory {
                children: IndexMap::new(),
            },
        }
    }

    /// A new file whose size is its content length.
    pub fn file(
        permissions: &str,
        owner: &str,
        group: &str,
        modified: SystemTime,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            meta: Metadata {
                permissions: permissions.to_string(),
                owner: owner.to_string(),
                group: group.to_string(),
                size: content.len() as u64,
                modified,
            },
            body: NodeBody::File { content },
        }
    }

    /// Override the reported size (simulated binaries, pseudo filesystems).
    pub fn with_size(mut self, size: u64) -> Self {
        self.meta.size = size;
        self
    }

    pub fn kind(&self) -> EntryKind {
        match self.body {
            NodeBody::File { .. } => EntryKind::File,
            NodeBody::Directory { .. } => EntryKind::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind() == EntryKind::File
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    /// File content, or `None` for a directory.
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            NodeBody::File { content } => Some(content),
            NodeBody::Directory { .. } => None,
        }
    }

    /// Replace file content and resync the size. No-op on directories.
    pub fn set_content(&mut self, text: impl Into<String>) {
        if let NodeBody::File { content } = &mut self.body {
            *content = text.into();
            self.meta.size = content.len() as u64;
        }
    }

    /// Directory children, or `None` for a file.
    pub fn children(&self) -> Option<&IndexMap<String, Node>> {
        match &self.body {
            NodeBody::Directory { children } => Some(children),
            NodeBody::File { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut IndexMap<String, Node>> {
        match &mut self.body {
            NodeBody::Directory { children } => Some(children),
            NodeBody::File { .. } => None,
        }
    }

    /// Whether the owner execute bit is set.
    pub fn is_executable(&self) -> bool {
        self.is_file() && matches!(self.meta.permissions.chars().nth(3), Some('x' | 's'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t() -> SystemTime {
        SystemTime::date(2024, 1, 1)
    }

    #[test]
    fn file_size_tracks_content() {
        let mut f = Node::file("-rw-r--r--", "u", "u", t(), "hello");
        assert_eq!(f.meta.size, 5);
        f.set_content("hello world");
        assert_eq!(f.meta.size, 11);
        assert_eq!(f.content(), Some("hello world"));
    }

    #[test]
    fn directory_has_no_content() {
        let d = Node::directory("drwxr-xr-x", "root", "root", t());
        assert_eq!(d.kind(), EntryKind::Directory);
        assert_eq!(d.meta.size, DIR_SIZE);
        assert!(d.content().is_none());
        assert!(d.children().unwrap().is_empty());
    }

    #[test]
    fn file_has_no_children() {
        let f = Node::file("-rw-r--r--", "u", "u", t(), "");
        assert!(f.children().is_none());
    }

    #[test]
    fn set_content_ignored_on_directory() {
        let mut d = Node::directory("drwxr-xr-x", "root", "root", t());
        d.set_content("nope");
        assert!(d.is_dir());
        assert_eq!(d.meta.size, DIR_SIZE);
    }

    #[test]
    fn simulated_size_override() {
        let f = Node::file("-rwxr-xr-x", "root", "root", t(), "Bash shell").with_size(1_183_448);
        assert_eq!(f.meta.size, 1_183_448);
        assert!(f.is_executable());
    }

    #[test]
    fn plain_file_not_executable() {
        let f = Node::file("-rw-r--r--", "u", "u", t(), "");
        assert!(!f.is_executable());
    }
}
