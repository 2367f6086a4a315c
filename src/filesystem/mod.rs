// Virtual filesystem
//
// A fixed, in-memory tree of drives, folders and files. Explorer and terminal
// navigate it by node id; nothing is created, renamed or removed at runtime.
// Every search walks the tree depth-first in pre-order, following the
// authored child order.

pub mod catalog;
pub mod node;

use crate::error::ShellError;
use std::collections::HashSet;

pub use self::catalog::{MUSIC_ID, PROJECTS_DRIVE_ID, ROOT_ID, SYSTEM_DRIVE_ID, USERS_ID};
pub use self::node::{FileSystemNode, IconKey, NodeKind};

pub const PARENT_TOKEN: &str = "..";

#[derive(Debug, Clone)]
pub struct FileSystemTree {
    root: FileSystemNode,
}

impl FileSystemTree {
    /// Build a tree from `root`, rejecting duplicate ids, a leaf root, leaves
    /// with children, and leaves missing their content or url.
    pub fn new(root: FileSystemNode) -> Result<Self, ShellError> {
        if !root.is_container() {
            return Err(ShellError::InvalidTree(format!(
                "root '{}' is not a container",
                root.id
            )));
        }
        let mut seen = HashSet::new();
        validate(&root, &mut seen)?;
        tracing::debug!(target: "fs", nodes = seen.len(), "filesystem tree built");
        Ok(Self { root })
    }

    /// The built-in portfolio tree.
    pub fn portfolio() -> Self {
        Self {
            root: catalog::portfolio_catalog(),
        }
    }

    pub fn root(&self) -> &FileSystemNode {
        &self.root
    }

    /// Drives and folders directly below the synthetic root
    pub fn top_level(&self) -> &[FileSystemNode] {
        &self.root.children
    }

    pub fn find_node_by_id(&self, id: &str) -> Option<&FileSystemNode> {
        find_in(&self.root, id)
    }

    /// Children of `id` in display order; empty for leaves and unknown ids.
    pub fn children_of(&self, id: &str) -> &[FileSystemNode] {
        self.find_node_by_id(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    /// Chain of nodes from just below the synthetic root down to `id`,
    /// inclusive. The root itself maps to an empty chain.
    pub fn path_to(&self, id: &str) -> Option<Vec<&FileSystemNode>> {
        if self.root.id == id {
            return Some(Vec::new());
        }
        let mut chain = Vec::new();
        if chain_to(&self.root.children, id, &mut chain) {
            Some(chain)
        } else {
            None
        }
    }

    /// Render a chain as `C/Users/About_Me.txt`. A leading synthetic root is
    /// skipped; an empty chain renders as `/`.
    pub fn format_path(&self, chain: &[&FileSystemNode]) -> String {
        let segments = match chain.first() {
            Some(first) if first.id == self.root.id => &chain[1..],
            _ => chain,
        };
        if segments.is_empty() {
            return "/".to_string();
        }
        segments
            .iter()
            .map(|node| node.display_name())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// `format_path(path_to(id))`, or `/` for unknown ids.
    pub fn display_path(&self, id: &str) -> String {
        let chain = self.path_to(id).unwrap_or_default();
        self.format_path(&chain)
    }

    pub fn parent_of(&self, id: &str) -> Option<&FileSystemNode> {
        if self.root.id == id {
            return None;
        }
        let chain = self.path_to(id)?;
        match chain.len() {
            0 => None,
            1 => Some(&self.root),
            n => Some(chain[n - 2]),
        }
    }

    /// Resolve one path token relative to the container `current_id`.
    ///
    /// `..` yields the parent, except that top-level containers (and the root)
    /// resolve to themselves. Any other token matches a direct child by name,
    /// case-insensitively, with or without its drive colon. Tokens naming more
    /// than one segment (`a/b`) are not resolved.
    pub fn resolve(&self, current_id: &str, token: &str) -> Option<String> {
        let current = self.find_node_by_id(current_id)?;

        if token == PARENT_TOKEN {
            let parent = match self.parent_of(current_id) {
                Some(parent) if parent.id != self.root.id => parent.id.clone(),
                _ => current_id.to_string(),
            };
            return Some(parent);
        }

        current
            .children
            .iter()
            .find(|child| child.matches_token(token))
            .map(|child| child.id.clone())
    }

    pub fn find_all_by_kind(&self, kind: NodeKind) -> Vec<&FileSystemNode> {
        let mut found = Vec::new();
        collect_kind(&self.root, kind, &mut found);
        found
    }
}

impl Default for FileSystemTree {
    fn default() -> Self {
        Self::portfolio()
    }
}

fn validate<'a>(node: &'a FileSystemNode, seen: &mut HashSet<&'a str>) -> Result<(), ShellError> {
    if !seen.insert(node.id.as_str()) {
        return Err(ShellError::InvalidTree(format!("duplicate id '{}'", node.id)));
    }
    let payload_ok = match node.kind {
        NodeKind::Folder | NodeKind::Disk => true,
        NodeKind::Text => node.content.is_some(),
        NodeKind::Link | NodeKind::Image | NodeKind::Audio => node.url.is_some(),
    };
    if !payload_ok {
        return Err(ShellError::InvalidTree(format!(
            "{:?} node '{}' has no content",
            node.kind, node.id
        )));
    }
    if !node.is_container() && !node.children.is_empty() {
        return Err(ShellError::InvalidTree(format!(
            "leaf '{}' has children",
            node.id
        )));
    }
    node.children.iter().try_for_each(|child| validate(child, seen))
}

fn find_in<'a>(node: &'a FileSystemNode, id: &str) -> Option<&'a FileSystemNode> {
    if node.id == id {
        return Some(node);
    }
    node.children.iter().find_map(|child| find_in(child, id))
}

fn chain_to<'a>(nodes: &'a [FileSystemNode], id: &str, chain: &mut Vec<&'a FileSystemNode>) -> bool {
    for node in nodes {
        chain.push(node);
        if node.id == id || chain_to(&node.children, id, chain) {
            return true;
        }
        chain.pop();
    }
    false
}

fn collect_kind<'a>(node: &'a FileSystemNode, kind: NodeKind, found: &mut Vec<&'a FileSystemNode>) {
    if node.kind == kind {
        found.push(node);
    }
    for child in &node.children {
        collect_kind(child, kind, found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> FileSystemTree {
        FileSystemTree::portfolio()
    }

    #[test]
    fn builtin_catalog_is_valid() {
        assert!(FileSystemTree::new(catalog::portfolio_catalog()).is_ok());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let root = FileSystemNode::folder(
            "root",
            "Root",
            vec![
                FileSystemNode::text("a", "A.txt", "one"),
                FileSystemNode::folder("f", "F", vec![FileSystemNode::text("a", "B.txt", "two")]),
            ],
        );
        assert!(matches!(FileSystemTree::new(root), Err(ShellError::InvalidTree(_))));
    }

    #[test]
    fn leaf_root_is_rejected() {
        let root = FileSystemNode::text("root", "Root.txt", "");
        assert!(FileSystemTree::new(root).is_err());
    }

    #[test]
    fn find_node_by_id_searches_nested_nodes() {
        let tree = tree();
        assert_eq!(tree.find_node_by_id("p2-repo").unwrap().name, "Source Code");
        assert_eq!(tree.find_node_by_id("root").unwrap().id, "root");
        assert!(tree.find_node_by_id("missing").is_none());
    }

    #[test]
    fn path_to_excludes_root() {
        let tree = tree();
        let ids: Vec<_> = tree.path_to("about").unwrap().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c-drive", "users", "about"]);
        assert!(tree.path_to("root").unwrap().is_empty());
        assert!(tree.path_to("missing").is_none());
    }

    #[test]
    fn format_path_strips_drive_colon() {
        let tree = tree();
        let chain = tree.path_to("about").unwrap();
        assert_eq!(tree.format_path(&chain), "C/Users/About_Me.txt");
        assert_eq!(tree.display_path("d-drive"), "D");
        assert_eq!(tree.display_path("root"), "/");
    }

    #[test]
    fn format_path_skips_leading_root() {
        let tree = tree();
        let mut chain = vec![tree.root()];
        chain.extend(tree.path_to("users").unwrap());
        assert_eq!(tree.format_path(&chain), "C/Users");
        assert_eq!(tree.format_path(&[tree.root()]), "/");
    }

    #[test]
    fn resolve_parent_stops_at_drive() {
        let tree = tree();
        assert_eq!(tree.resolve("users", "..").as_deref(), Some("c-drive"));
        assert_eq!(tree.resolve("c-drive", "..").as_deref(), Some("c-drive"));
        assert_eq!(tree.resolve("root", "..").as_deref(), Some("root"));
    }

    #[test]
    fn resolve_matches_children_case_insensitively() {
        let tree = tree();
        assert_eq!(tree.resolve("c-drive", "users").as_deref(), Some("users"));
        assert_eq!(tree.resolve("users", "ABOUT_ME.TXT").as_deref(), Some("about"));
        assert_eq!(tree.resolve("root", "d:").as_deref(), Some("d-drive"));
        assert_eq!(tree.resolve("root", "d").as_deref(), Some("d-drive"));
    }

    #[test]
    fn resolve_rejects_unknown_and_multi_segment_tokens() {
        let tree = tree();
        assert!(tree.resolve("c-drive", "Nope").is_none());
        assert!(tree.resolve("c-drive", "Users/About_Me.txt").is_none());
        assert!(tree.resolve("missing", "..").is_none());
    }

    #[test]
    fn find_all_by_kind_keeps_tree_order() {
        let tree = tree();
        let texts: Vec<_> = tree
            .find_all_by_kind(NodeKind::Text)
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(
            texts,
            vec!["about", "skills", "education", "hobbies", "p1-readme", "p2-readme"]
        );
        assert_eq!(tree.find_all_by_kind(NodeKind::Audio).len(), 1);
    }

    #[test]
    fn parent_of_top_level_is_root() {
        let tree = tree();
        assert_eq!(tree.parent_of("c-drive").unwrap().id, "root");
        assert_eq!(tree.parent_of("song-1").unwrap().id, "music");
        assert!(tree.parent_of("root").is_none());
    }

    #[test]
    fn children_of_lists_in_display_order() {
        let tree = FileSystemTree::portfolio();
        let names: Vec<_> = tree.children_of("c-drive").iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Users", "Musics"]);
        assert!(tree.children_of("about").is_empty());
        assert!(tree.children_of("missing").is_empty());
    }

    fn leaf(id: &str, kind: NodeKind) -> FileSystemNode {
        FileSystemNode {
            id: id.to_string(),
            name: format!("{}.txt", id),
            kind,
            label: None,
            icon: IconKey::default_for(kind),
            content: None,
            url: None,
            children: Vec::new(),
        }
    }

    #[test]
    fn rejects_leaves_without_payload() {
        let root = FileSystemNode::folder("root", "Root", vec![leaf("x", NodeKind::Text)]);
        assert!(matches!(FileSystemTree::new(root), Err(ShellError::InvalidTree(_))));

        let root = FileSystemNode::folder("root", "Root", vec![leaf("song", NodeKind::Audio)]);
        assert!(matches!(FileSystemTree::new(root), Err(ShellError::InvalidTree(_))));
    }

    #[test]
    fn rejects_leaf_with_children() {
        let mut parent = FileSystemNode::text("notes", "notes.txt", "hi");
        parent.children = vec![FileSystemNode::text("inner", "inner.txt", "nested")];
        let root = FileSystemNode::folder("root", "Root", vec![parent]);
        assert!(matches!(FileSystemTree::new(root), Err(ShellError::InvalidTree(_))));
    }
}
