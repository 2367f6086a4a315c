// Tauri host: command surface, events and the clock ticker.
//
// Every command locks the shell, performs one operation and, when windows may
// have changed, broadcasts a fresh snapshot on `windows-changed`.

use crate::apps::explorer::ExplorerView;
use crate::apps::media::MediaCommand;
use crate::apps::terminal::TerminalView;
use crate::apps::MediaPlayer;
use crate::clock::ClockFace;
use crate::config::ConfigLoader;
use crate::error::ShellError;
use crate::filesystem::{FileSystemNode, FileSystemTree, NodeKind};
use crate::logging::init_logging;
use crate::shell::{DesktopIcon, ExternalLink, Shell, ShellMode};
use crate::state::geometry::{Position, Rect, Size};
use crate::state::window::{AppId, LaunchRequest, WindowPayload};
use crate::state::WindowSnapshot;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tauri::{AppHandle, Emitter, State};
use tauri_plugin_opener::OpenerExt;

const WINDOWS_CHANGED: &str = "windows-changed";
const CLOCK_TICK: &str = "clock-tick";

fn broadcast(app: &AppHandle, shell: &Shell) -> Result<(), ShellError> {
    app.emit(WINDOWS_CHANGED, shell.windows().snapshot())?;
    Ok(())
}

/// Hand a link to the platform browser. Failures are logged, not returned:
/// the shell state already changed and the frontend has nothing to undo.
fn open_external(app: &AppHandle, link: Option<ExternalLink>) {
    if let Some(ExternalLink { url }) = link {
        tracing::info!(target: "desktop", %url, "opening external link");
        if let Err(err) = app.opener().open_url(url.as_str(), None::<&str>) {
            tracing::warn!(target: "desktop", %url, error = %err, "failed to open external link");
        }
    }
}

// ===== Shell Commands =====

#[tauri::command]
fn shell_mode(viewport_width: f64, state: State<Mutex<Shell>>) -> Result<ShellMode, ShellError> {
    let shell = state.lock()?;
    Ok(shell.mode(viewport_width))
}

#[tauri::command]
fn list_windows(state: State<Mutex<Shell>>) -> Result<WindowSnapshot, ShellError> {
    let shell = state.lock()?;
    Ok(shell.windows().snapshot())
}

#[tauri::command]
fn desktop_icons(state: State<Mutex<Shell>>) -> Result<Vec<DesktopIcon>, ShellError> {
    let shell = state.lock()?;
    Ok(shell.icons().to_vec())
}

#[tauri::command]
fn activate_desktop_icon(index: usize, app: AppHandle, state: State<Mutex<Shell>>) -> Result<(), ShellError> {
    let mut shell = state.lock()?;
    let link = shell.activate_icon(index);
    broadcast(&app, &shell)?;
    open_external(&app, link);
    Ok(())
}

#[tauri::command]
fn clock_now() -> ClockFace {
    ClockFace::now()
}

// ===== Window Management Commands =====

#[tauri::command]
fn open_window(
    app_id: String,
    title: String,
    payload: Option<serde_json::Value>,
    app: AppHandle,
    state: State<Mutex<Shell>>,
) -> Result<String, ShellError> {
    let app_id: AppId = app_id.parse()?;
    let payload = WindowPayload::from_json(app_id, payload.as_ref());
    let mut shell = state.lock()?;
    let id = shell.launch(LaunchRequest::new(app_id, title, payload));
    broadcast(&app, &shell)?;
    Ok(id)
}

#[tauri::command]
fn close_window(id: String, app: AppHandle, state: State<Mutex<Shell>>) -> Result<(), ShellError> {
    let mut shell = state.lock()?;
    shell.close(&id);
    broadcast(&app, &shell)
}

#[tauri::command]
fn focus_window(id: String, app: AppHandle, state: State<Mutex<Shell>>) -> Result<(), ShellError> {
    let mut shell = state.lock()?;
    shell.focus(&id);
    broadcast(&app, &shell)
}

#[tauri::command]
fn minimize_window(id: String, app: AppHandle, state: State<Mutex<Shell>>) -> Result<(), ShellError> {
    let mut shell = state.lock()?;
    shell.minimize(&id);
    broadcast(&app, &shell)
}

#[tauri::command]
fn toggle_maximize_window(id: String, app: AppHandle, state: State<Mutex<Shell>>) -> Result<(), ShellError> {
    let mut shell = state.lock()?;
    shell.toggle_maximize(&id);
    broadcast(&app, &shell)
}

#[tauri::command]
fn taskbar_activate(id: String, app: AppHandle, state: State<Mutex<Shell>>) -> Result<(), ShellError> {
    let mut shell = state.lock()?;
    shell.taskbar_activate(&id);
    broadcast(&app, &shell)
}

#[tauri::command]
fn begin_window_drag(
    id: String,
    x: f64,
    y: f64,
    app: AppHandle,
    state: State<Mutex<Shell>>,
) -> Result<(), ShellError> {
    let mut shell = state.lock()?;
    shell.begin_drag(&id, Position::new(x, y));
    broadcast(&app, &shell)
}

#[tauri::command]
fn drag_window(x: f64, y: f64, app: AppHandle, state: State<Mutex<Shell>>) -> Result<(), ShellError> {
    let mut shell = state.lock()?;
    shell.drag_to(Position::new(x, y));
    broadcast(&app, &shell)
}

#[tauri::command]
fn end_window_drag(state: State<Mutex<Shell>>) -> Result<(), ShellError> {
    let mut shell = state.lock()?;
    shell.end_drag();
    Ok(())
}

#[tauri::command]
fn resize_window(
    id: String,
    width: f64,
    height: f64,
    app: AppHandle,
    state: State<Mutex<Shell>>,
) -> Result<(), ShellError> {
    let mut shell = state.lock()?;
    shell.resize(&id, Size::new(width, height));
    broadcast(&app, &shell)
}

#[tauri::command]
fn window_frame(
    id: String,
    canvas_width: f64,
    canvas_height: f64,
    state: State<Mutex<Shell>>,
) -> Result<Option<Rect>, ShellError> {
    let shell = state.lock()?;
    Ok(shell
        .windows()
        .frame(&id, Size::new(canvas_width, canvas_height)))
}

// ===== Filesystem Commands =====

#[tauri::command]
fn fs_find_node(id: String, tree: State<Arc<FileSystemTree>>) -> Option<FileSystemNode> {
    tree.find_node_by_id(&id).cloned()
}

#[tauri::command]
fn fs_path_to(id: String, tree: State<Arc<FileSystemTree>>) -> Option<Vec<FileSystemNode>> {
    tree.path_to(&id)
        .map(|chain| chain.into_iter().cloned().collect())
}

#[tauri::command]
fn fs_format_path(id: String, tree: State<Arc<FileSystemTree>>) -> String {
    tree.display_path(&id)
}

#[tauri::command]
fn fs_resolve(current_id: String, token: String, tree: State<Arc<FileSystemTree>>) -> Option<String> {
    tree.resolve(&current_id, &token)
}

#[tauri::command]
fn fs_find_all_by_kind(kind: NodeKind, tree: State<Arc<FileSystemTree>>) -> Vec<FileSystemNode> {
    tree.find_all_by_kind(kind).into_iter().cloned().collect()
}

// ===== App Session Commands =====

#[tauri::command]
fn terminal_state(id: String, state: State<Mutex<Shell>>) -> Result<Option<TerminalView>, ShellError> {
    let shell = state.lock()?;
    Ok(shell.terminal_view(&id))
}

#[tauri::command]
fn terminal_input(
    id: String,
    line: String,
    app: AppHandle,
    state: State<Mutex<Shell>>,
) -> Result<Option<TerminalView>, ShellError> {
    let mut shell = state.lock()?;
    let link = shell.terminal_input(&id, &line);
    broadcast(&app, &shell)?;
    open_external(&app, link);
    Ok(shell.terminal_view(&id))
}

#[tauri::command]
fn explorer_state(id: String, state: State<Mutex<Shell>>) -> Result<Option<ExplorerView>, ShellError> {
    let shell = state.lock()?;
    Ok(shell.explorer_view(&id))
}

#[tauri::command]
fn explorer_activate(
    id: String,
    node_id: String,
    app: AppHandle,
    state: State<Mutex<Shell>>,
) -> Result<Option<ExplorerView>, ShellError> {
    let mut shell = state.lock()?;
    let link = shell.explorer_activate(&id, &node_id);
    broadcast(&app, &shell)?;
    open_external(&app, link);
    Ok(shell.explorer_view(&id))
}

#[tauri::command]
fn explorer_navigate(
    id: String,
    node_id: String,
    state: State<Mutex<Shell>>,
) -> Result<Option<ExplorerView>, ShellError> {
    let mut shell = state.lock()?;
    shell.explorer_navigate(&id, &node_id);
    Ok(shell.explorer_view(&id))
}

#[tauri::command]
fn explorer_up(id: String, state: State<Mutex<Shell>>) -> Result<Option<ExplorerView>, ShellError> {
    let mut shell = state.lock()?;
    shell.explorer_up(&id);
    Ok(shell.explorer_view(&id))
}

#[tauri::command]
fn media_state(id: String, state: State<Mutex<Shell>>) -> Result<Option<MediaPlayer>, ShellError> {
    let shell = state.lock()?;
    Ok(shell.media_state(&id).cloned())
}

#[tauri::command]
fn media_command(
    id: String,
    command: MediaCommand,
    state: State<Mutex<Shell>>,
) -> Result<Option<MediaPlayer>, ShellError> {
    let mut shell = state.lock()?;
    shell.media_command(&id, command);
    Ok(shell.media_state(&id).cloned())
}

#[tauri::command]
fn media_select(
    id: String,
    index: usize,
    state: State<Mutex<Shell>>,
) -> Result<Option<MediaPlayer>, ShellError> {
    let mut shell = state.lock()?;
    shell.media_select(&id, index);
    Ok(shell.media_state(&id).cloned())
}

/// Push a [`ClockFace`] to the frontend every `interval`.
fn spawn_clock(app: AppHandle, interval: Duration) {
    tauri::async_runtime::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            if let Err(err) = app.emit(CLOCK_TICK, ClockFace::now()) {
                tracing::warn!(target: "desktop", error = %err, "clock tick not delivered");
            }
        }
    });
}

fn try_run() -> Result<(), ShellError> {
    let config = ConfigLoader::load(None)?;
    init_logging(&config.logging)?;

    let tree = Arc::new(FileSystemTree::portfolio());
    let clock_interval = Duration::from_millis(config.clock_interval_ms.max(1));
    let shell = Shell::new(config, Arc::clone(&tree));
    tracing::info!(target: "desktop", "portfolio shell starting");

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(Mutex::new(shell))
        .manage(tree)
        .setup(move |app| {
            spawn_clock(app.handle().clone(), clock_interval);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Shell
            shell_mode,
            list_windows,
            desktop_icons,
            activate_desktop_icon,
            clock_now,
            // Windows
            open_window,
            close_window,
            focus_window,
            minimize_window,
            toggle_maximize_window,
            taskbar_activate,
            begin_window_drag,
            drag_window,
            end_window_drag,
            resize_window,
            window_frame,
            // Filesystem
            fs_find_node,
            fs_path_to,
            fs_format_path,
            fs_resolve,
            fs_find_all_by_kind,
            // Apps
            terminal_state,
            terminal_input,
            explorer_state,
            explorer_activate,
            explorer_navigate,
            explorer_up,
            media_state,
            media_command,
            media_select,
        ])
        .run(tauri::generate_context!())?;
    Ok(())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    if let Err(err) = try_run() {
        tracing::error!(target: "desktop", error = %err, "portfolio shell exited with an error");
        eprintln!("portfolio-os: {err}");
        std::process::exit(1);
    }
}
