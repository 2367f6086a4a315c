// Portfolio OS
//
// Backend of a desktop-metaphor portfolio: a window manager, a read-only
// virtual filesystem and the app sessions (terminal, explorer, media player)
// that run inside windows. Everything except `desktop` is plain Rust and
// can be driven headlessly through `shell::Shell`; the `desktop` feature
// wires it to a Tauri webview.

pub mod apps;
pub mod clock;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod logging;
pub mod shell;
pub mod state;

#[cfg(feature = "desktop")]
mod desktop;

#[cfg(feature = "desktop")]
pub use desktop::run;

pub use error::ShellError;
pub use filesystem::{FileSystemNode, FileSystemTree, NodeKind};
pub use shell::Shell;
pub use state::window::{AppId, LaunchRequest, WindowPayload, WindowState};
pub use state::WindowManager;
