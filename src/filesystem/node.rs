use serde::{Deserialize, Serialize};

/// Kind of a filesystem node. `Folder` and `Disk` are containers, the rest are leaves.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Folder,
    Disk,
    Text,
    Link,
    Image,
    Audio,
}

impl NodeKind {
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Folder | NodeKind::Disk)
    }
}

/// Symbolic icon handle, resolved to artwork by the frontend.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IconKey {
    Computer,
    Drive,
    Folder,
    User,
    Music,
    Document,
    Picture,
    Track,
    Globe,
    GitHub,
    Terminal,
    Mail,
    Player,
}

impl IconKey {
    /// Icon used when a node does not name one explicitly
    pub fn default_for(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Folder => IconKey::Folder,
            NodeKind::Disk => IconKey::Drive,
            NodeKind::Text => IconKey::Document,
            NodeKind::Link => IconKey::Globe,
            NodeKind::Image => IconKey::Picture,
            NodeKind::Audio => IconKey::Track,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemNode {
    pub id: String,
    /// Display name; drives end their letter with `:` (e.g. "C:")
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Volume label shown next to a drive letter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub icon: IconKey,
    /// Text body for `Text` nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Target for `Link`, `Image` and `Audio` nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Ordered children; empty for leaves
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileSystemNode>,
}

impl FileSystemNode {
    fn new(id: &str, name: &str, kind: NodeKind) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            label: None,
            icon: IconKey::default_for(kind),
            content: None,
            url: None,
            children: Vec::new(),
        }
    }

    pub fn folder(id: &str, name: &str, children: Vec<FileSystemNode>) -> Self {
        Self {
            children,
            ..Self::new(id, name, NodeKind::Folder)
        }
    }

    pub fn disk(id: &str, letter: &str, label: &str, children: Vec<FileSystemNode>) -> Self {
        Self {
            label: Some(label.to_string()),
            children,
            ..Self::new(id, letter, NodeKind::Disk)
        }
    }

    pub fn text(id: &str, name: &str, content: &str) -> Self {
        Self {
            content: Some(content.to_string()),
            ..Self::new(id, name, NodeKind::Text)
        }
    }

    pub fn link(id: &str, name: &str, url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..Self::new(id, name, NodeKind::Link)
        }
    }

    pub fn image(id: &str, name: &str, url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..Self::new(id, name, NodeKind::Image)
        }
    }

    pub fn audio(id: &str, name: &str, url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..Self::new(id, name, NodeKind::Audio)
        }
    }

    pub fn with_icon(mut self, icon: IconKey) -> Self {
        self.icon = icon;
        self
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Name with the drive-letter separator removed ("C:" -> "C")
    pub fn display_name(&self) -> String {
        self.name.replacen(':', "", 1)
    }

    /// Case-insensitive match used by path resolution: exact name, or name
    /// without its drive colon.
    pub fn matches_token(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        let name = self.name.to_lowercase();
        name == token || name.replacen(':', "", 1) == token
    }
}
