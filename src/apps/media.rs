// Media player session: playlist, selection and the autoplay permission prompt.
// The webview's media element does the actual playback and reports back.

use crate::filesystem::{FileSystemTree, NodeKind};
use crate::state::window::WindowPayload;
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PlayerView {
    Playlist,
    Player,
}

/// User actions and media-element callbacks forwarded by the frontend
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MediaCommand {
    Next,
    Previous,
    TogglePlay,
    Stop,
    ShowPlaylist,
    /// The element started playing
    Started,
    /// Autoplay was refused
    Rejected,
    /// The user accepted the permission prompt
    Grant,
    /// Current track reached its end
    Ended,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaPlayer {
    playlist: Vec<Track>,
    current: Option<usize>,
    view: PlayerView,
    is_playing: bool,
    show_permission_prompt: bool,
}

impl MediaPlayer {
    /// A media payload plays that single file; otherwise every audio file
    /// on the machine is listed, nothing selected.
    pub fn from_payload(tree: &FileSystemTree, payload: &WindowPayload) -> Self {
        match payload {
            WindowPayload::Media { url, file_name } => Self {
                playlist: vec![Track {
                    id: "opened".to_string(),
                    name: file_name.clone(),
                    url: url.clone(),
                }],
                current: Some(0),
                view: PlayerView::Player,
                is_playing: false,
                show_permission_prompt: false,
            },
            _ => Self::library(tree),
        }
    }

    pub fn library(tree: &FileSystemTree) -> Self {
        let playlist = tree
            .find_all_by_kind(NodeKind::Audio)
            .into_iter()
            .filter_map(|node| {
                node.url.as_ref().map(|url| Track {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    url: url.clone(),
                })
            })
            .collect();
        Self {
            playlist,
            current: None,
            view: PlayerView::Playlist,
            is_playing: false,
            show_permission_prompt: false,
        }
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.playlist.get(i))
    }

    pub fn view(&self) -> PlayerView {
        self.view
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn shows_permission_prompt(&self) -> bool {
        self.show_permission_prompt
    }

    /// Pick a track from the playlist and switch to the player view
    pub fn select(&mut self, index: usize) {
        if index < self.playlist.len() {
            self.current = Some(index);
            self.view = PlayerView::Player;
        }
    }

    pub fn next(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        self.current = Some(match self.current {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    pub fn previous(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        self.current = Some(match self.current {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        });
    }

    pub fn toggle_play(&mut self) {
        if self.current_track().is_some() {
            self.is_playing = !self.is_playing;
        }
    }

    pub fn stop(&mut self) {
        self.is_playing = false;
    }

    pub fn playback_started(&mut self) {
        self.is_playing = true;
    }

    /// The environment refused to start playback without a user gesture
    pub fn playback_rejected(&mut self) {
        tracing::info!(target: "media", "autoplay rejected, asking for permission");
        self.is_playing = false;
        self.show_permission_prompt = true;
    }

    pub fn grant_playback(&mut self) {
        self.show_permission_prompt = false;
    }

    /// Stop and move on to the next track
    pub fn track_ended(&mut self) {
        self.is_playing = false;
        self.next();
    }

    pub fn apply(&mut self, command: MediaCommand) {
        tracing::debug!(target: "media", ?command, current = ?self.current, "media command");
        match command {
            MediaCommand::Next => self.next(),
            MediaCommand::Previous => self.previous(),
            MediaCommand::TogglePlay => self.toggle_play(),
            MediaCommand::Stop => self.stop(),
            MediaCommand::ShowPlaylist => self.view = PlayerView::Playlist,
            MediaCommand::Started => self.playback_started(),
            MediaCommand::Rejected => self.playback_rejected(),
            MediaCommand::Grant => self.grant_playback(),
            MediaCommand::Ended => self.track_ended(),
        }
    }
}
