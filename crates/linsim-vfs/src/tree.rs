//! The file tree and its operations.

use indexmap::IndexMap;
use linsim_platform::SystemTime;
use linsim_types::error::{Result, SimError};

use crate::mode::{apply_mode, format_mode, parse_permissions};
use crate::node::{Node, NodeBody};
use crate::path::{components, file_name, is_within, normalize_path, parent};

/// Restartable iterator over a directory's entries in insertion order.
#[derive(Clone)]
pub struct Children<'a> {
    inner: indexmap::map::Iter<'a, String, Node>,
}

impl<'a> Iterator for Children<'a> {
    type Item = (&'a str, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, node)| (name.as_str(), node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Children<'_> {}

/// A tree rooted at `/`.
///
/// Every method that takes a path normalizes it against `/` first, so
/// callers may pass anything [`normalize_path`] accepts; relative paths
/// should already be joined with the working directory.
#[derive(Debug, Clone)]
pub struct FileTree {
    root: Node,
}

impl FileTree {
    /// An empty tree holding only `/`.
    pub fn new(now: SystemTime) -> Self {
        Self {
            root: Node::directory("drwxr-xr-x", "root", "root", now),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Look up a node by path, relative to `cwd` when not absolute.
    pub fn resolve(&self, path: &str, cwd: &str) -> Option<&Node> {
        self.get(&normalize_path(cwd, path))
    }

    /// Mutable counterpart of [`FileTree::resolve`].
    pub fn resolve_mut(&mut self, path: &str, cwd: &str) -> Option<&mut Node> {
        self.get_mut(&normalize_path(cwd, path))
    }

    /// Look up a node by absolute path.
    pub fn get(&self, path: &str) -> Option<&Node> {
        let path = normalize_path("/", path);
        let mut node = &self.root;
        for seg in components(&path) {
            node = node.children()?.get(seg)?;
        }
        Some(node)
    }

    fn get_mut(&mut self, path: &str) -> Option<&mut Node> {
        let path = normalize_path("/", path);
        let mut node = &mut self.root;
        for seg in components(&path) {
            node = node.children_mut()?.get_mut(seg)?;
        }
        Some(node)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.get(path).is_some_and(Node::is_dir)
    }

    /// Entries of the directory at `path`.
    pub fn list_children(&self, path: &str) -> Result<Children<'_>> {
        let node = self
            .get(path)
            .ok_or_else(|| SimError::NotFound(path.to_string()))?;
        let children = node
            .children()
            .ok_or_else(|| SimError::NotADirectory(path.to_string()))?;
        Ok(Children {
            inner: children.iter(),
        })
    }

    fn dir_mut(&mut self, path: &str) -> Result<&mut IndexMap<String, Node>> {
        let node = self
            .get_mut(path)
            .ok_or_else(|| SimError::NotFound(path.to_string()))?;
        node.children_mut()
            .ok_or_else(|| SimError::NotADirectory(path.to_string()))
    }

    /// Place `node` under `parent` as `name`, replacing any existing entry.
    pub fn insert(&mut self, parent: &str, name: &str, node: Node) -> Result<&mut Node> {
        validate_name(name)?;
        let children = self.dir_mut(parent)?;
        children.insert(name.to_string(), node);
        children
            .get_mut(name)
            .ok_or_else(|| SimError::NotFound(name.to_string()))
    }

    /// Create an empty directory. Fails if `name` already exists.
    pub fn create_dir(
        &mut self,
        parent: &str,
        name: &str,
        owner: &str,
        now: SystemTime,
    ) -> Result<&mut Node> {
        validate_name(name)?;
        if self.dir_mut(parent)?.contains_key(name) {
            return Err(SimError::AlreadyExists(name.to_string()));
        }
        self.insert(parent, name, Node::directory("drwxr-xr-x", owner, owner, now))
    }

    /// Create `path` and any missing ancestors. Existing directories are
    /// left alone; an existing file in the way is an error.
    pub fn create_dir_all(&mut self, path: &str, owner: &str, now: SystemTime) -> Result<()> {
        let path = normalize_path("/", path);
        let mut current = String::from("/");
        for seg in components(&path) {
            let next = normalize_path(&current, seg);
            match self.get(&next) {
                Some(node) if node.is_dir() => {},
                Some(_) => return Err(SimError::NotADirectory(next)),
                None => {
                    self.create_dir(&current, seg, owner, now)?;
                },
            }
            current = next;
        }
        Ok(())
    }

    /// Create an empty file, replacing any existing entry.
    pub fn create_file(
        &mut self,
        parent: &str,
        name: &str,
        owner: &str,
        now: SystemTime,
    ) -> Result<&mut Node> {
        self.insert(parent, name, Node::file("-rw-r--r--", owner, owner, now, ""))
    }

    /// Content of the file at `path`.
    pub fn read_file(&self, path: &str) -> Result<&str> {
        let node = self
            .get(path)
            .ok_or_else(|| SimError::NotFound(path.to_string()))?;
        node.content()
            .ok_or_else(|| SimError::NotAFile(path.to_string()))
    }

    /// Overwrite (or create) the file at `path`.
    pub fn write_file(
        &mut self,
        path: &str,
        content: &str,
        owner: &str,
        now: SystemTime,
    ) -> Result<()> {
        let path = normalize_path("/", path);
        match self.get_mut(&path) {
            Some(node) if node.is_dir() => Err(SimError::NotAFile(path)),
            Some(node) => {
                node.set_content(content);
                node.meta.modified = now;
                Ok(())
            },
            None => {
                let node = self.create_file(parent(&path), file_name(&path), owner, now)?;
                node.set_content(content);
                Ok(())
            },
        }
    }

    /// Bump the modification time of an existing entry.
    pub fn touch(&mut self, path: &str, now: SystemTime) -> Result<()> {
        let node = self
            .get_mut(path)
            .ok_or_else(|| SimError::NotFound(path.to_string()))?;
        node.meta.modified = now;
        Ok(())
    }

    /// Detach and return the entry at `path`. Non-empty directories need
    /// `recursive`; the root can never be removed.
    pub fn remove(&mut self, path: &str, recursive: bool) -> Result<Node> {
        let path = normalize_path("/", path);
        if path == "/" {
            return Err(SimError::InvalidArgument(
                "it is dangerous to operate recursively on '/'".to_string(),
            ));
        }
        let node = self
            .get(&path)
            .ok_or_else(|| SimError::NotFound(path.clone()))?;
        if node.is_dir() && !recursive {
            return Err(SimError::NotAFile(path));
        }
        let removed = self.dir_mut(parent(&path))?.shift_remove(file_name(&path));
        removed.ok_or(SimError::NotFound(path))
    }

    /// Where `src` lands when copied or moved to `dst`: inside `dst` when
    /// it is a directory, otherwise at `dst` itself.
    pub fn landing_path(&self, src: &str, dst: &str) -> Result<String> {
        let src = normalize_path("/", src);
        let dst = normalize_path("/", dst);
        if self.is_dir(&dst) {
            return Ok(normalize_path(&dst, file_name(&src)));
        }
        if !self.is_dir(parent(&dst)) {
            return Err(SimError::NotFound(dst));
        }
        Ok(dst)
    }

    /// Deep-copy `src` to `dst` and return the path it landed at.
    ///
    /// A directory copied onto an existing directory is merged into it:
    /// entries from `src` replace same-named files, and same-named
    /// subdirectories are merged in turn.
    pub fn copy(&mut self, src: &str, dst: &str, recursive: bool, now: SystemTime) -> Result<String> {
        let src = normalize_path("/", src);
        let node = self
            .get(&src)
            .ok_or_else(|| SimError::NotFound(src.clone()))?;
        if node.is_dir() && !recursive {
            return Err(SimError::InvalidArgument(format!(
                "-r not specified; omitting directory '{src}'"
            )));
        }
        let target = self.landing_path(&src, dst)?;
        if target == src {
            return Err(SimError::InvalidArgument(format!(
                "'{src}' and '{target}' are the same file"
            )));
        }
        if is_within(&target, &src) {
            return Err(SimError::InvalidArgument(format!(
                "cannot copy a directory, '{src}', into itself, '{target}'"
            )));
        }

        let mut copy = node.clone();
        copy.meta.modified = now;
        match self.get(&target).map(Node::is_dir) {
            Some(true) if !copy.is_dir() => Err(SimError::InvalidArgument(format!(
                "cannot overwrite directory '{target}' with non-directory"
            ))),
            Some(true) => {
                if let Some(existing) = self.get_mut(&target) {
                    merge_into(existing, copy);
                }
                Ok(target)
            },
            _ => {
                self.insert(parent(&target), file_name(&target), copy)?;
                Ok(target)
            },
        }
    }

    /// Move `src` to `dst` and return the path it landed at. An existing
    /// directory at the landing path is replaced only when it is empty.
    pub fn rename(&mut self, src: &str, dst: &str) -> Result<String> {
        let src = normalize_path("/", src);
        if src == "/" {
            return Err(SimError::InvalidArgument("cannot move '/'".to_string()));
        }
        let moving_dir = match self.get(&src) {
            Some(node) => node.is_dir(),
            None => return Err(SimError::NotFound(src)),
        };
        let target = self.landing_path(&src, dst)?;
        if target == src {
            return Err(SimError::InvalidArgument(format!(
                "'{src}' and '{target}' are the same file"
            )));
        }
        if is_within(&target, &src) {
            return Err(SimError::InvalidArgument(format!(
                "cannot move '{src}' to a subdirectory of itself, '{target}'"
            )));
        }
        if let Some(existing) = self.get(&target) {
            match (existing.children(), moving_dir) {
                (Some(_), false) => {
                    return Err(SimError::InvalidArgument(format!(
                        "cannot overwrite directory '{target}' with non-directory"
                    )));
                },
                (Some(children), true) if !children.is_empty() => {
                    return Err(SimError::InvalidArgument(format!(
                        "cannot move '{src}' to '{target}': Directory not empty"
                    )));
                },
                (None, true) => {
                    return Err(SimError::InvalidArgument(format!(
                        "cannot overwrite non-directory '{target}' with directory '{src}'"
                    )));
                },
                _ => {},
            }
        }
        let node = self.remove(&src, true)?;
        self.insert(parent(&target), file_name(&target), node)?;
        Ok(target)
    }

    /// Apply a `chmod` mode argument to the entry at `path`.
    pub fn set_permissions(&mut self, path: &str, mode: &str) -> Result<()> {
        let node = self
            .get_mut(path)
            .ok_or_else(|| SimError::NotFound(path.to_string()))?;
        let kind = if node.is_dir() { 'd' } else { '-' };
        let bits = apply_mode(mode, parse_permissions(&node.meta.permissions))?;
        node.meta.permissions = format_mode(kind, bits);
        Ok(())
    }

    /// Change owner and, when given, group.
    pub fn set_owner(&mut self, path: &str, owner: &str, group: Option<&str>) -> Result<()> {
        let node = self
            .get_mut(path)
            .ok_or_else(|| SimError::NotFound(path.to_string()))?;
        if !owner.is_empty() {
            node.meta.owner = owner.to_string();
        }
        if let Some(group) = group {
            node.meta.group = group.to_string();
        }
        Ok(())
    }

    /// Pre-order walk starting at (and including) `path`.
    pub fn walk(&self, path: &str) -> Result<Vec<(String, &Node)>> {
        let start = normalize_path("/", path);
        let node = self
            .get(&start)
            .ok_or_else(|| SimError::NotFound(path.to_string()))?;
        let mut out = Vec::new();
        walk_into(start, node, &mut out);
        Ok(out)
    }
}

fn merge_into(dst: &mut Node, src: Node) {
    dst.meta.modified = src.meta.modified;
    let NodeBody::Directory { children: incoming } = src.body else {
        return;
    };
    let Some(children) = dst.children_mut() else {
        return;
    };
    for (name, node) in incoming {
        match children.get_mut(&name) {
            Some(existing) if existing.is_dir() && node.is_dir() => merge_into(existing, node),
            _ => {
                children.insert(name, node);
            },
        }
    }
}

fn walk_into<'a>(path: String, node: &'a Node, out: &mut Vec<(String, &'a Node)>) {
    let children = node.children();
    out.push((path.clone(), node));
    if let Some(children) = children {
        for (name, child) in children {
            walk_into(normalize_path(&path, name), child, out);
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(SimError::InvalidArgument(format!("invalid name '{name}'")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::EntryKind;

    fn now() -> SystemTime {
        SystemTime::date(2024, 1, 15)
    }

    fn sample() -> FileTree {
        let mut t = FileTree::new(now());
        t.create_dir_all("/home/user/docs", "user", now()).unwrap();
        t.write_file("/home/user/docs/a.txt", "alpha", "user", now()).unwrap();
        t.write_file("/home/user/b.txt", "beta", "user", now()).unwrap();
        t
    }

    fn names(t: &FileTree, path: &str) -> Vec<String> {
        t.list_children(path)
            .unwrap()
            .map(|(n, _)| n.to_string())
            .collect()
    }

    #[test]
    fn root_exists() {
        let t = FileTree::new(now());
        assert!(t.root().is_dir());
        assert!(t.get("/").is_some());
        assert!(t.list_children("/").unwrap().next().is_none());
    }

    #[test]
    fn resolve_relative_and_dotdot() {
        let t = sample();
        let n = t.resolve("../user/docs/a.txt", "/home/user").unwrap();
        assert_eq!(n.content(), Some("alpha"));
        assert!(t.resolve("nope", "/home/user").is_none());
    }

    #[test]
    fn resolve_through_file_is_none() {
        let t = sample();
        assert!(t.get("/home/user/b.txt/x").is_none());
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut t = FileTree::new(now());
        for name in ["zeta", "alpha", "mid"] {
            t.create_dir("/", name, "root", now()).unwrap();
        }
        assert_eq!(names(&t, "/"), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn children_iterator_restarts_via_clone() {
        let t = sample();
        let it = t.list_children("/home/user").unwrap();
        assert_eq!(it.len(), 2);
        let first: Vec<_> = it.clone().map(|(n, _)| n).collect();
        let second: Vec<_> = it.map(|(n, _)| n).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn list_children_of_file_fails() {
        let t = sample();
        assert!(matches!(
            t.list_children("/home/user/b.txt"),
            Err(SimError::NotADirectory(_))
        ));
    }

    #[test]
    fn create_dir_duplicate_fails() {
        let mut t = sample();
        let err = t.create_dir("/home/user", "docs", "user", now()).unwrap_err();
        assert!(matches!(err, SimError::AlreadyExists(ref n) if n == "docs"));
    }

    #[test]
    fn create_dir_sets_owner() {
        let mut t = sample();
        let d = t.create_dir("/home/user", "new", "user", now()).unwrap();
        assert_eq!(d.meta.owner, "user");
        assert_eq!(d.meta.permissions, "drwxr-xr-x");
    }

    #[test]
    fn create_dir_rejects_bad_names() {
        let mut t = sample();
        assert!(t.create_dir("/", "", "root", now()).is_err());
        assert!(t.create_dir("/", "..", "root", now()).is_err());
        assert!(t.create_dir("/", "a/b", "root", now()).is_err());
    }

    #[test]
    fn create_dir_all_is_idempotent() {
        let mut t = sample();
        t.create_dir_all("/home/user/docs/x/y", "user", now()).unwrap();
        t.create_dir_all("/home/user/docs/x/y", "user", now()).unwrap();
        assert!(t.is_dir("/home/user/docs/x/y"));
    }

    #[test]
    fn create_dir_all_through_file_fails() {
        let mut t = sample();
        assert!(t.create_dir_all("/home/user/b.txt/x", "user", now()).is_err());
    }

    #[test]
    fn create_file_overwrites() {
        let mut t = sample();
        t.create_file("/home/user", "b.txt", "user", now()).unwrap();
        assert_eq!(t.read_file("/home/user/b.txt").unwrap(), "");
    }

    #[test]
    fn read_directory_fails() {
        let t = sample();
        assert!(matches!(t.read_file("/home/user/docs"), Err(SimError::NotAFile(_))));
        assert!(matches!(t.read_file("/nope"), Err(SimError::NotFound(_))));
    }

    #[test]
    fn write_updates_size() {
        let mut t = sample();
        t.write_file("/home/user/b.txt", "longer text", "user", now()).unwrap();
        assert_eq!(t.get("/home/user/b.txt").unwrap().meta.size, 11);
    }

    #[test]
    fn remove_file_and_dir() {
        let mut t = sample();
        t.remove("/home/user/b.txt", false).unwrap();
        assert!(!t.exists("/home/user/b.txt"));
        assert!(matches!(t.remove("/home/user/docs", false), Err(SimError::NotAFile(_))));
        t.remove("/home/user/docs", true).unwrap();
        assert!(!t.exists("/home/user/docs/a.txt"));
    }

    #[test]
    fn remove_root_refused() {
        let mut t = sample();
        assert!(t.remove("/", true).is_err());
        assert!(t.exists("/home"));
    }

    #[test]
    fn remove_preserves_sibling_order() {
        let mut t = FileTree::new(now());
        for name in ["a", "b", "c"] {
            t.create_dir("/", name, "root", now()).unwrap();
        }
        t.remove("/b", true).unwrap();
        assert_eq!(names(&t, "/"), vec!["a", "c"]);
    }

    #[test]
    fn copy_file_into_directory() {
        let mut t = sample();
        let landed = t.copy("/home/user/b.txt", "/home/user/docs", false, now()).unwrap();
        assert_eq!(landed, "/home/user/docs/b.txt");
        assert_eq!(t.read_file("/home/user/docs/b.txt").unwrap(), "beta");
        assert!(t.exists("/home/user/b.txt"));
    }

    #[test]
    fn copy_file_to_new_name() {
        let mut t = sample();
        t.copy("/home/user/b.txt", "/home/user/c.txt", false, now()).unwrap();
        assert_eq!(t.read_file("/home/user/c.txt").unwrap(), "beta");
    }

    #[test]
    fn copy_dir_requires_recursive() {
        let mut t = sample();
        assert!(t.copy("/home/user/docs", "/tmp2", false, now()).is_err());
        t.copy("/home/user/docs", "/home/user/backup", true, now()).unwrap();
        assert_eq!(t.read_file("/home/user/backup/a.txt").unwrap(), "alpha");
    }

    #[test]
    fn copy_is_deep() {
        let mut t = sample();
        t.copy("/home/user/docs", "/home/user/backup", true, now()).unwrap();
        t.write_file("/home/user/docs/a.txt", "changed", "user", now()).unwrap();
        assert_eq!(t.read_file("/home/user/backup/a.txt").unwrap(), "alpha");
    }

    #[test]
    fn copy_into_self_fails() {
        let mut t = sample();
        assert!(t.copy("/home/user", "/home/user/docs", true, now()).is_err());
    }

    #[test]
    fn copy_root_is_rejected() {
        let mut t = sample();
        t.create_dir("/", "tmp", "root", now()).unwrap();
        t.write_file("/tmp/keep.txt", "kept", "root", now()).unwrap();
        assert!(matches!(
            t.copy("/", "/tmp", true, now()),
            Err(SimError::InvalidArgument(_))
        ));
        assert_eq!(names(&t, "/tmp"), vec!["keep.txt"]);
    }

    #[test]
    fn copy_onto_itself_is_rejected() {
        let mut t = sample();
        assert!(t.copy("/home/user/b.txt", "/home/user", false, now()).is_err());
        assert!(t.copy("/home/user/b.txt", "/home/user/b.txt", false, now()).is_err());
    }

    #[test]
    fn copy_dir_merges_into_existing() {
        let mut t = sample();
        t.create_dir_all("/backup/docs/old", "user", now()).unwrap();
        t.write_file("/backup/docs/a.txt", "stale", "user", now()).unwrap();
        t.write_file("/backup/docs/keep.txt", "keep", "user", now()).unwrap();
        let landed = t.copy("/home/user/docs", "/backup", true, now()).unwrap();
        assert_eq!(landed, "/backup/docs");
        assert_eq!(t.read_file("/backup/docs/a.txt").unwrap(), "alpha");
        assert_eq!(t.read_file("/backup/docs/keep.txt").unwrap(), "keep");
        assert!(t.is_dir("/backup/docs/old"));
    }

    #[test]
    fn copy_missing_parent_fails() {
        let mut t = sample();
        assert!(matches!(
            t.copy("/home/user/b.txt", "/nowhere/x", false, now()),
            Err(SimError::NotFound(_))
        ));
    }

    #[test]
    fn rename_moves_subtree() {
        let mut t = sample();
        let landed = t.rename("/home/user/docs", "/home/user/papers").unwrap();
        assert_eq!(landed, "/home/user/papers");
        assert!(!t.exists("/home/user/docs"));
        assert_eq!(t.read_file("/home/user/papers/a.txt").unwrap(), "alpha");
    }

    #[test]
    fn rename_into_directory() {
        let mut t = sample();
        t.rename("/home/user/b.txt", "/home/user/docs").unwrap();
        assert!(t.exists("/home/user/docs/b.txt"));
        assert!(!t.exists("/home/user/b.txt"));
    }

    #[test]
    fn rename_into_own_child_fails() {
        let mut t = sample();
        assert!(t.rename("/home/user", "/home/user/docs").is_err());
        assert!(t.exists("/home/user/docs/a.txt"));
    }

    #[test]
    fn rename_onto_itself_is_rejected() {
        let mut t = sample();
        let err = t.rename("/home/user/b.txt", "/home/user").unwrap_err();
        assert!(err.to_string().contains("are the same file"));
        assert_eq!(t.read_file("/home/user/b.txt").unwrap(), "beta");
    }

    #[test]
    fn rename_refuses_non_empty_directory() {
        let mut t = sample();
        t.create_dir_all("/home/user/papers/docs", "user", now()).unwrap();
        t.write_file("/home/user/papers/docs/x", "x", "user", now()).unwrap();
        assert!(t.rename("/home/user/docs", "/home/user/papers").is_err());
        assert!(t.exists("/home/user/docs/a.txt"));

        t.remove("/home/user/papers/docs/x", false).unwrap();
        t.rename("/home/user/docs", "/home/user/papers").unwrap();
        assert_eq!(t.read_file("/home/user/papers/docs/a.txt").unwrap(), "alpha");
    }

    #[test]
    fn chmod_and_chown() {
        let mut t = sample();
        t.set_permissions("/home/user/b.txt", "755").unwrap();
        t.set_owner("/home/user/b.txt", "root", Some("staff")).unwrap();
        let n = t.get("/home/user/b.txt").unwrap();
        assert_eq!(n.meta.permissions, "-rwxr-xr-x");
        assert_eq!(n.meta.owner, "root");
        assert_eq!(n.meta.group, "staff");
        assert!(n.is_executable());
    }

    #[test]
    fn chmod_symbolic_on_directory() {
        let mut t = sample();
        t.set_permissions("/home/user/docs", "go-rx").unwrap();
        assert_eq!(t.get("/home/user/docs").unwrap().meta.permissions, "drwx------");
    }

    #[test]
    fn chmod_invalid_mode_leaves_node() {
        let mut t = sample();
        assert!(t.set_permissions("/home/user/b.txt", "bogus").is_err());
        assert_eq!(t.get("/home/user/b.txt").unwrap().meta.permissions, "-rw-r--r--");
    }

    #[test]
    fn walk_is_preorder() {
        let t = sample();
        let paths: Vec<String> = t.walk("/home").unwrap().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec![
                "/home",
                "/home/user",
                "/home/user/docs",
                "/home/user/docs/a.txt",
                "/home/user/b.txt",
            ]
        );
    }

    #[test]
    fn walk_kinds() {
        let t = sample();
        let files = t
            .walk("/")
            .unwrap()
            .into_iter()
            .filter(|(_, n)| n.kind() == EntryKind::File)
            .count();
        assert_eq!(files, 2);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn created_entries_are_listed(
                dirs in proptest::collection::hash_set("[a-z]{1,8}", 1..8),
                files in proptest::collection::hash_set("[A-Z]{1,8}", 0..8),
            ) {
                let mut t = FileTree::new(now());
                for d in &dirs {
                    t.create_dir("/", d, "root", now()).unwrap();
                }
                for f in &files {
                    t.write_file(&format!("/{f}"), f, "root", now()).unwrap();
                }
                let listed: std::collections::HashSet<String> =
                    t.list_children("/").unwrap().map(|(n, _)| n.to_string()).collect();
                prop_assert_eq!(listed.len(), dirs.len() + files.len());
                for d in &dirs {
                    let dir_path = format!("/{d}");
                    prop_assert!(t.is_dir(&dir_path));
                }
                for f in &files {
                    prop_assert_eq!(t.read_file(&format!("/{f}")).unwrap(), f.as_str());
                }
            }

            #[test]
            fn write_then_read(content in "\\PC{0,64}") {
                let mut t = FileTree::new(now());
                t.write_file("/f", &content, "root", now()).unwrap();
                prop_assert_eq!(t.read_file("/f").unwrap(), content.as_str());
                prop_assert_eq!(t.get("/f").unwrap().meta.size, content.len() as u64);
            }
        }
    }
}
