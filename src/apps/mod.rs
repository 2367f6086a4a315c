// Application views with backend state
//
// Terminal, explorer and media player keep per-window sessions here. They
// never touch the window manager directly: every request to open a window,
// close their own window or leave the shell is returned as a `ShellEffect`
// for the shell to apply. Mail, text editor and image viewer only render
// their payload and have no backend state.

pub mod explorer;
pub mod media;
pub mod terminal;

use crate::state::window::LaunchRequest;
use serde::Serialize;

pub use self::explorer::Explorer;
pub use self::media::MediaPlayer;
pub use self::terminal::TerminalSession;

/// Something an app view asks the shell to do on its behalf
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShellEffect {
    /// Open (or re-focus) another window
    Launch(LaunchRequest),
    /// Close the window hosting the view
    CloseSelf,
    /// Hand a URL to the platform browser
    OpenExternal { url: String },
}
