// File explorer session: which container a window shows, and what clicking an item does

use super::ShellEffect;
use crate::filesystem::{FileSystemNode, FileSystemTree, IconKey, NodeKind, MUSIC_ID, SYSTEM_DRIVE_ID};
use crate::state::window::{AppId, LaunchRequest, WindowPayload};
use serde::Serialize;

pub const MEDIA_PLAYER_TITLE: &str = "VLC Media Player";
pub const IMAGE_VIEWER_TITLE: &str = "Photos";

/// Sidebar shortcut
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickAccessEntry {
    pub label: &'static str,
    pub target_id: &'static str,
    pub icon: IconKey,
}

pub const QUICK_ACCESS: [QuickAccessEntry; 3] = [
    QuickAccessEntry {
        label: "Desktop",
        target_id: SYSTEM_DRIVE_ID,
        icon: IconKey::Folder,
    },
    QuickAccessEntry {
        label: "Musics",
        target_id: MUSIC_ID,
        icon: IconKey::Music,
    },
    QuickAccessEntry {
        label: "C: System",
        target_id: SYSTEM_DRIVE_ID,
        icon: IconKey::Drive,
    },
];

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    pub id: String,
    pub label: String,
}

/// One item in the content grid
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub icon: IconKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Thumbnail source for images
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&FileSystemNode> for ExplorerEntry {
    fn from(node: &FileSystemNode) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            kind: node.kind,
            icon: node.icon,
            label: node.label.clone(),
            url: if node.kind == NodeKind::Image {
                node.url.clone()
            } else {
                None
            },
        }
    }
}

/// Render model for one explorer window
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerView {
    pub current_id: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub entries: Vec<ExplorerEntry>,
    pub item_count: usize,
    pub can_go_up: bool,
    pub search_hint: String,
    pub quick_access: Vec<QuickAccessEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explorer {
    current_id: String,
}

impl Explorer {
    /// Start at `start_id`; anything that is not a known container falls back to the root.
    pub fn new(tree: &FileSystemTree, start_id: &str) -> Self {
        let current_id = match tree.find_node_by_id(start_id) {
            Some(node) if node.is_container() => start_id.to_string(),
            _ => {
                tracing::warn!(target: "explorer", start_id, "start is not a container, showing root");
                tree.root().id.clone()
            }
        };
        Self { current_id }
    }

    /// Start from a window payload (defaults to the system drive)
    pub fn from_payload(tree: &FileSystemTree, payload: &WindowPayload) -> Self {
        match payload {
            WindowPayload::Explorer { path_id } => Self::new(tree, path_id),
            _ => Self::new(tree, SYSTEM_DRIVE_ID),
        }
    }

    pub fn current_id(&self) -> &str {
        &self.current_id
    }

    pub fn current<'t>(&self, tree: &'t FileSystemTree) -> &'t FileSystemNode {
        tree.find_node_by_id(&self.current_id).unwrap_or_else(|| tree.root())
    }

    /// Double-click on an item. Containers are entered in place; leaves become
    /// a window or an external link.
    pub fn activate(&mut self, tree: &FileSystemTree, node_id: &str) -> Option<ShellEffect> {
        let node = tree.find_node_by_id(node_id)?;
        tracing::debug!(target: "explorer", node_id, kind = ?node.kind, "activate");

        match node.kind {
            NodeKind::Folder | NodeKind::Disk => {
                self.current_id = node.id.clone();
                None
            }
            NodeKind::Text => Some(ShellEffect::Launch(LaunchRequest::new(
                AppId::TextEditor,
                node.name.clone(),
                WindowPayload::Text {
                    content: node.content.clone().unwrap_or_default(),
                },
            ))),
            NodeKind::Link => node
                .url
                .clone()
                .map(|url| ShellEffect::OpenExternal { url }),
            NodeKind::Audio => media_launch(node, AppId::Vlc, MEDIA_PLAYER_TITLE),
            NodeKind::Image => media_launch(node, AppId::ImageViewer, IMAGE_VIEWER_TITLE),
        }
    }

    /// Jump to a container (breadcrumb or sidebar). Leaves and unknown ids are ignored.
    pub fn navigate_to(&mut self, tree: &FileSystemTree, id: &str) {
        if tree.find_node_by_id(id).is_some_and(FileSystemNode::is_container) {
            self.current_id = id.to_string();
        }
    }

    /// Go to the parent container, up to and including the root.
    pub fn go_up(&mut self, tree: &FileSystemTree) {
        if let Some(parent) = tree.parent_of(&self.current_id) {
            self.current_id = parent.id.clone();
        }
    }

    pub fn breadcrumbs(&self, tree: &FileSystemTree) -> Vec<Breadcrumb> {
        tree.path_to(&self.current(tree).id)
            .unwrap_or_default()
            .into_iter()
            .map(|node| Breadcrumb {
                id: node.id.clone(),
                label: node.display_name(),
            })
            .collect()
    }

    pub fn entries(&self, tree: &FileSystemTree) -> Vec<ExplorerEntry> {
        self.current(tree)
            .children
            .iter()
            .map(ExplorerEntry::from)
            .collect()
    }

    pub fn item_count(&self, tree: &FileSystemTree) -> usize {
        self.current(tree).children.len()
    }

    pub fn quick_access(&self) -> Vec<QuickAccessEntry> {
        QUICK_ACCESS.to_vec()
    }

    /// Placeholder of the search box: "Search" plus the first word of the folder name
    pub fn search_hint(&self, tree: &FileSystemTree) -> String {
        let first_word = self
            .current(tree)
            .name
            .split(' ')
            .next()
            .unwrap_or_default();
        format!("Search {}", first_word)
    }

    pub fn view(&self, tree: &FileSystemTree) -> ExplorerView {
        let current = self.current(tree);
        ExplorerView {
            current_id: current.id.clone(),
            breadcrumbs: self.breadcrumbs(tree),
            entries: self.entries(tree),
            item_count: self.item_count(tree),
            can_go_up: current.id != tree.root().id,
            search_hint: self.search_hint(tree),
            quick_access: self.quick_access(),
        }
    }
}

fn media_launch(node: &FileSystemNode, app_id: AppId, title: &str) -> Option<ShellEffect> {
    let url = node.url.clone()?;
    Some(ShellEffect::Launch(LaunchRequest::new(
        app_id,
        title,
        WindowPayload::Media {
            url,
            file_name: node.name.clone(),
        },
    )))
}
