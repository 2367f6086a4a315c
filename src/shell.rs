// Shell surface
//
// Composition root for the desktop: owns the window manager, the shared
// filesystem tree and the backend sessions of app windows, and applies the
// effects app views ask for. The Tauri layer (or a test) drives it; nothing
// here knows about the webview.

use crate::apps::explorer::ExplorerView;
use crate::apps::media::MediaCommand;
use crate::apps::terminal::TerminalView;
use crate::apps::{Explorer, MediaPlayer, ShellEffect, TerminalSession};
use crate::config::ShellConfig;
use crate::filesystem::{FileSystemTree, IconKey, PROJECTS_DRIVE_ID, ROOT_ID, USERS_ID};
use crate::state::geometry::{Position, Size};
use crate::state::window::{AppId, LaunchRequest, WindowPayload};
use crate::state::WindowManager;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

pub const GITHUB_PROFILE_URL: &str = "https://github.com";

/// Whole-screen mode picked from the viewport width
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ShellMode {
    Desktop,
    /// Static "desktop experience required" notice; no shell at all
    Unsupported,
}

impl ShellMode {
    pub fn for_viewport(width: f64, min_width: f64) -> Self {
        if width < min_width {
            ShellMode::Unsupported
        } else {
            ShellMode::Desktop
        }
    }
}

/// A URL the host should open in the platform browser
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct ExternalLink {
    pub url: String,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IconAction {
    Launch(LaunchRequest),
    OpenExternal { url: String },
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct DesktopIcon {
    pub label: String,
    pub icon: IconKey,
    pub action: IconAction,
}

fn icon(label: &str, icon: IconKey, request: LaunchRequest) -> DesktopIcon {
    DesktopIcon {
        label: label.to_string(),
        icon,
        action: IconAction::Launch(request),
    }
}

fn explorer_at(title: &str, path_id: &str) -> LaunchRequest {
    LaunchRequest::new(
        AppId::Explorer,
        title,
        WindowPayload::Explorer {
            path_id: path_id.to_string(),
        },
    )
}

/// Desktop icons in display order
pub fn desktop_icons() -> Vec<DesktopIcon> {
    vec![
        icon("This PC", IconKey::Computer, explorer_at("This PC", ROOT_ID)),
        icon("Profile", IconKey::User, explorer_at("Profile", USERS_ID)),
        icon("Projects", IconKey::Folder, explorer_at("Projects", PROJECTS_DRIVE_ID)),
        icon(
            "Terminal",
            IconKey::Terminal,
            LaunchRequest::bare(AppId::Terminal, "Command Prompt"),
        ),
        icon("Contact", IconKey::Mail, LaunchRequest::bare(AppId::Mail, "Mail")),
        icon(
            "VLC Player",
            IconKey::Player,
            LaunchRequest::bare(AppId::Vlc, "VLC Media Player"),
        ),
        DesktopIcon {
            label: "GitHub".to_string(),
            icon: IconKey::GitHub,
            action: IconAction::OpenExternal {
                url: GITHUB_PROFILE_URL.to_string(),
            },
        },
    ]
}

/// Backend state of one app window
#[derive(Debug, Clone)]
enum AppSession {
    Terminal(TerminalSession),
    Explorer(Explorer),
    Media(MediaPlayer),
}

pub struct Shell {
    config: ShellConfig,
    tree: Arc<FileSystemTree>,
    windows: WindowManager,
    sessions: HashMap<String, AppSession>,
    icons: Vec<DesktopIcon>,
}

impl Shell {
    pub fn new(config: ShellConfig, tree: Arc<FileSystemTree>) -> Self {
        Self {
            windows: WindowManager::from_config(&config),
            config,
            tree,
            sessions: HashMap::new(),
            icons: desktop_icons(),
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn tree(&self) -> &FileSystemTree {
        &self.tree
    }

    pub fn windows(&self) -> &WindowManager {
        &self.windows
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn mode(&self, viewport_width: f64) -> ShellMode {
        ShellMode::for_viewport(viewport_width, self.config.min_desktop_width)
    }

    // ===== Window lifecycle =====

    /// Open (or re-focus) a window and make sure its backend session exists.
    pub fn launch(&mut self, request: LaunchRequest) -> String {
        let id = self.windows.open(request);
        if !self.sessions.contains_key(&id) {
            if let Some(session) = self.new_session(&id) {
                self.sessions.insert(id.clone(), session);
            }
        }
        id
    }

    fn new_session(&self, id: &str) -> Option<AppSession> {
        let window = self.windows.get(id)?;
        let session = match window.app_id {
            AppId::Terminal => AppSession::Terminal(TerminalSession::new(&self.tree)),
            AppId::Explorer => AppSession::Explorer(Explorer::from_payload(&self.tree, &window.data)),
            AppId::Vlc => AppSession::Media(MediaPlayer::from_payload(&self.tree, &window.data)),
            AppId::Mail | AppId::TextEditor | AppId::ImageViewer => return None,
        };
        tracing::debug!(target: "shell", %id, app = %window.app_id, "session created");
        Some(session)
    }

    /// Click on a desktop icon
    pub fn activate_icon(&mut self, index: usize) -> Option<ExternalLink> {
        let action = self.icons.get(index)?.action.clone();
        match action {
            IconAction::Launch(request) => {
                self.launch(request);
                None
            }
            IconAction::OpenExternal { url } => Some(ExternalLink { url }),
        }
    }

    pub fn close(&mut self, id: &str) {
        self.windows.close(id);
        self.sessions.remove(id);
    }

    pub fn focus(&mut self, id: &str) {
        self.windows.focus(id);
    }

    pub fn minimize(&mut self, id: &str) {
        self.windows.minimize(id);
    }

    pub fn toggle_maximize(&mut self, id: &str) {
        self.windows.toggle_maximize(id);
    }

    pub fn taskbar_activate(&mut self, id: &str) {
        self.windows.handle_taskbar_activate(id);
    }

    pub fn begin_drag(&mut self, id: &str, pointer: Position) {
        self.windows.begin_drag(id, pointer);
    }

    pub fn drag_to(&mut self, pointer: Position) {
        self.windows.drag_to(pointer);
    }

    pub fn end_drag(&mut self) {
        self.windows.end_drag();
    }

    pub fn resize(&mut self, id: &str, size: Size) {
        self.windows.resize(id, size);
    }

    /// Carry out a request made by the view in window `source`.
    pub fn apply(&mut self, source: &str, effect: ShellEffect) -> Option<ExternalLink> {
        tracing::debug!(target: "shell", %source, ?effect, "apply effect");
        match effect {
            ShellEffect::Launch(request) => {
                self.launch(request);
                None
            }
            ShellEffect::CloseSelf => {
                self.close(source);
                None
            }
            ShellEffect::OpenExternal { url } => Some(ExternalLink { url }),
        }
    }

    // ===== Terminal =====

    pub fn terminal_input(&mut self, id: &str, line: &str) -> Option<ExternalLink> {
        let Some(AppSession::Terminal(terminal)) = self.sessions.get_mut(id) else {
            return None;
        };
        let effect = terminal.execute(&self.tree, line)?;
        self.apply(id, effect)
    }

    pub fn terminal_view(&self, id: &str) -> Option<TerminalView> {
        match self.sessions.get(id)? {
            AppSession::Terminal(terminal) => Some(terminal.view(&self.tree)),
            _ => None,
        }
    }

    // ===== Explorer =====

    pub fn explorer_activate(&mut self, id: &str, node_id: &str) -> Option<ExternalLink> {
        let Some(AppSession::Explorer(explorer)) = self.sessions.get_mut(id) else {
            return None;
        };
        let effect = explorer.activate(&self.tree, node_id)?;
        self.apply(id, effect)
    }

    pub fn explorer_navigate(&mut self, id: &str, node_id: &str) {
        if let Some(AppSession::Explorer(explorer)) = self.sessions.get_mut(id) {
            explorer.navigate_to(&self.tree, node_id);
        }
    }

    pub fn explorer_up(&mut self, id: &str) {
        if let Some(AppSession::Explorer(explorer)) = self.sessions.get_mut(id) {
            explorer.go_up(&self.tree);
        }
    }

    pub fn explorer_view(&self, id: &str) -> Option<ExplorerView> {
        match self.sessions.get(id)? {
            AppSession::Explorer(explorer) => Some(explorer.view(&self.tree)),
            _ => None,
        }
    }

    // ===== Media player =====

    pub fn media_command(&mut self, id: &str, command: MediaCommand) {
        if let Some(AppSession::Media(player)) = self.sessions.get_mut(id) {
            player.apply(command);
        }
    }

    pub fn media_select(&mut self, id: &str, index: usize) {
        if let Some(AppSession::Media(player)) = self.sessions.get_mut(id) {
            player.select(index);
        }
    }

    pub fn media_state(&self, id: &str) -> Option<&MediaPlayer> {
        match self.sessions.get(id)? {
            AppSession::Media(player) => Some(player),
            _ => None,
        }
    }

    pub fn has_session(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(ShellConfig::default(), Arc::new(FileSystemTree::portfolio()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_gate_is_all_or_nothing() {
        assert_eq!(ShellMode::for_viewport(767.9, 768.0), ShellMode::Unsupported);
        assert_eq!(ShellMode::for_viewport(768.0, 768.0), ShellMode::Desktop);
        assert_eq!(Shell::default().mode(1920.0), ShellMode::Desktop);
    }

    #[test]
    fn github_icon_returns_external_link() {
        let mut shell = Shell::default();
        let index = shell.icons().iter().position(|i| i.label == "GitHub").unwrap();
        assert_eq!(
            shell.activate_icon(index),
            Some(ExternalLink {
                url: GITHUB_PROFILE_URL.to_string()
            })
        );
        assert!(shell.windows().windows().is_empty());
        assert_eq!(shell.activate_icon(99), None);
    }

    #[test]
    fn closing_a_window_drops_its_session() {
        let mut shell = Shell::default();
        let id = shell.launch(LaunchRequest::bare(AppId::Terminal, "Command Prompt"));
        assert!(shell.has_session(&id));
        shell.close(&id);
        assert!(!shell.has_session(&id));
        assert!(shell.terminal_view(&id).is_none());
    }

    #[test]
    fn payload_only_apps_have_no_session() {
        let mut shell = Shell::default();
        let id = shell.launch(LaunchRequest::bare(AppId::Mail, "Mail"));
        assert!(!shell.has_session(&id));
    }

    #[test]
    fn relaunch_keeps_existing_session() {
        let mut shell = Shell::default();
        let id = shell.launch(LaunchRequest::bare(AppId::Terminal, "Command Prompt"));
        shell.terminal_input(&id, "cd users");
        let again = shell.launch(LaunchRequest::bare(AppId::Terminal, "Command Prompt"));
        assert_eq!(id, again);
        assert_eq!(shell.terminal_view(&id).unwrap().current_id, "users");
    }
}
