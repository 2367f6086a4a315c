use self::geometry::{DragSession, Position, Rect, Size};
use self::window::{AppId, LaunchRequest, WindowState};
use crate::config::{ShellConfig, WindowDefaults};
use serde::Serialize;
use uuid::Uuid;

pub mod geometry;
pub mod window;

/// Taskbar button for one open window, in open order
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskbarEntry {
    pub id: String,
    pub app_id: AppId,
    pub title: String,
    pub is_active: bool, // Focused and not minimized
    pub is_minimized: bool,
}

/// Everything the frontend needs to redraw windows and taskbar
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WindowSnapshot {
    pub windows: Vec<WindowState>,
    pub focused_id: Option<String>,
    /// Ids of visible windows, bottom to top
    pub visible_stack: Vec<String>,
    pub taskbar: Vec<TaskbarEntry>,
}

/// Owns every open window plus focus and stacking state.
///
/// All operations are total: ids that are not open are ignored.
pub struct WindowManager {
    windows: Vec<WindowState>, // Open order; drives taskbar order and cascade
    focused_id: Option<String>,
    z_counter: u32,
    drag: Option<DragSession>,
    defaults: WindowDefaults,
    taskbar_height: f64,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::from_config(&ShellConfig::default())
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            windows: Vec::new(),
            focused_id: None,
            z_counter: config.windows.initial_z_index,
            drag: None,
            defaults: config.windows.clone(),
            taskbar_height: config.taskbar_height,
        }
    }

    /// Advance the stacking counter and return the new top value.
    /// When the counter is exhausted, windows are renumbered 1..=n in their
    /// current stacking order first.
    pub fn next_z_index(&mut self) -> u32 {
        if self.z_counter.checked_add(1).is_none() {
            self.compact_z_indices();
        }
        self.z_counter += 1;
        self.z_counter
    }

    fn compact_z_indices(&mut self) {
        let mut order: Vec<usize> = (0..self.windows.len()).collect();
        order.sort_by_key(|&i| self.windows[i].z_index);
        for (rank, &i) in order.iter().enumerate() {
            self.windows[i].z_index = rank as u32 + 1;
        }
        self.z_counter = self.windows.len() as u32;
        tracing::debug!(target: "wm", windows = self.windows.len(), "z-indices compacted");
    }

    /// Open a window, or bring back the one already showing `(app_id, title)`.
    /// Returns the id of the window that ends up focused.
    pub fn open(&mut self, request: LaunchRequest) -> String {
        if let Some(existing) = self
            .windows
            .iter_mut()
            .find(|w| w.matches(request.app_id, &request.title))
        {
            existing.is_minimized = false;
            let id = existing.id.clone();
            tracing::debug!(target: "wm", %id, app = %request.app_id, "open: re-focusing existing window");
            self.focus(&id);
            return id;
        }

        let id = Uuid::now_v7().to_string();
        let offset = self.defaults.cascade_base + self.defaults.cascade_step * self.windows.len() as f64;
        let z_index = self.next_z_index();

        let window = WindowState {
            id: id.clone(),
            app_id: request.app_id,
            title: request.title,
            is_minimized: false,
            is_maximized: false,
            z_index,
            position: Position::new(offset, offset),
            size: Size::new(self.defaults.width, self.defaults.height),
            data: request.payload,
        };

        tracing::debug!(target: "wm", %id, app = %window.app_id, title = %window.title, z_index, "window opened");
        self.windows.push(window);
        self.focused_id = Some(id.clone());
        id
    }

    /// Remove a window. Returns the closed record, if it was open.
    pub fn close(&mut self, id: &str) -> Option<WindowState> {
        let index = self.windows.iter().position(|w| w.id == id)?;
        let removed = self.windows.remove(index);

        if self.focused_id.as_deref() == Some(id) {
            self.focused_id = None;
        }
        if self.drag.as_ref().is_some_and(|d| d.window_id == id) {
            self.drag = None;
        }

        tracing::debug!(target: "wm", %id, "window closed");
        Some(removed)
    }

    /// Raise, restore and focus a window.
    pub fn focus(&mut self, id: &str) {
        if !self.contains(id) {
            return;
        }
        let z_index = self.next_z_index();
        if let Some(win) = self.get_mut(id) {
            win.z_index = z_index;
            win.is_minimized = false;
        }
        self.focused_id = Some(id.to_string());
        tracing::debug!(target: "wm", %id, z_index, "window focused");
    }

    pub fn minimize(&mut self, id: &str) {
        let Some(win) = self.get_mut(id) else {
            return;
        };
        win.is_minimized = true;
        if self.focused_id.as_deref() == Some(id) {
            self.focused_id = None;
        }
        tracing::debug!(target: "wm", %id, "window minimized");
    }

    /// Flip between maximized and restored. Stored geometry is left as is.
    pub fn toggle_maximize(&mut self, id: &str) {
        if let Some(win) = self.get_mut(id) {
            win.is_maximized = !win.is_maximized;
            tracing::debug!(target: "wm", %id, maximized = win.is_maximized, "window maximize toggled");
        }
    }

    /// Taskbar button click: restore a minimized window, minimize the focused
    /// one, otherwise focus.
    pub fn handle_taskbar_activate(&mut self, id: &str) {
        let Some(win) = self.get_mut(id) else {
            return;
        };

        if win.is_minimized {
            win.is_minimized = false;
            self.focus(id);
        } else if self.focused_id.as_deref() == Some(id) {
            self.minimize(id);
        } else {
            self.focus(id);
        }
    }

    pub fn move_to(&mut self, id: &str, position: Position) {
        if let Some(win) = self.get_mut(id) {
            win.position = position;
        }
    }

    /// Set a window's size, clamped to the configured minimum
    pub fn resize(&mut self, id: &str, size: Size) {
        let min = Size::new(self.defaults.min_width, self.defaults.min_height);
        if let Some(win) = self.get_mut(id) {
            win.size = size.at_least(min);
        }
    }

    /// Start dragging a window by its title bar. Maximized windows stay put.
    pub fn begin_drag(&mut self, id: &str, pointer: Position) {
        let Some(win) = self.get(id) else {
            return;
        };
        if win.is_maximized {
            return;
        }
        let grab_offset = pointer.offset_from(win.position);
        self.focus(id);
        self.drag = Some(DragSession {
            window_id: id.to_string(),
            grab_offset,
        });
    }

    /// Move the dragged window so the pointer keeps its grab offset.
    pub fn drag_to(&mut self, pointer: Position) {
        let Some(session) = self.drag.clone() else {
            return;
        };
        let target = pointer.offset_from(session.grab_offset);
        self.move_to(&session.window_id, target);
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn windows(&self) -> &[WindowState] {
        &self.windows
    }

    pub fn get(&self, id: &str) -> Option<&WindowState> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut WindowState> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focused_id.as_deref()
    }

    /// Non-minimized windows, bottom to top
    pub fn visible_stack(&self) -> Vec<&WindowState> {
        let mut stack: Vec<_> = self.windows.iter().filter(|w| !w.is_minimized).collect();
        stack.sort_by_key(|w| w.z_index);
        stack
    }

    pub fn taskbar_entries(&self) -> Vec<TaskbarEntry> {
        self.windows
            .iter()
            .map(|w| TaskbarEntry {
                id: w.id.clone(),
                app_id: w.app_id,
                title: w.title.clone(),
                is_active: self.focused_id.as_deref() == Some(w.id.as_str()) && !w.is_minimized,
                is_minimized: w.is_minimized,
            })
            .collect()
    }

    /// Where a window is drawn on a canvas of the given size. Maximized
    /// windows fill everything above the taskbar.
    pub fn frame(&self, id: &str, canvas: Size) -> Option<Rect> {
        let win = self.get(id)?;
        if win.is_maximized {
            return Some(Rect {
                x: 0.0,
                y: 0.0,
                width: canvas.width,
                height: (canvas.height - self.taskbar_height).max(0.0),
            });
        }
        Some(Rect::from_parts(win.position, win.size))
    }

    /// Topmost visible window under a point
    pub fn window_at(&self, point: Position, canvas: Size) -> Option<&WindowState> {
        self.visible_stack()
            .into_iter()
            .rev()
            .find(|w| self.frame(&w.id, canvas).is_some_and(|r| r.contains(point)))
    }

    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            windows: self.windows.clone(),
            focused_id: self.focused_id.clone(),
            visible_stack: self.visible_stack().iter().map(|w| w.id.clone()).collect(),
            taskbar: self.taskbar_entries(),
        }
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::window::WindowPayload;
    use super::*;

    fn open(wm: &mut WindowManager, app: AppId, title: &str) -> String {
        wm.open(LaunchRequest::bare(app, title))
    }

    #[test]
    fn test_open_cascades_and_focuses() {
        let mut wm = WindowManager::new();
        let a = open(&mut wm, AppId::Terminal, "Command Prompt");
        let b = open(&mut wm, AppId::Mail, "Mail");

        assert_eq!(wm.get(&a).unwrap().position, Position::new(50.0, 50.0));
        assert_eq!(wm.get(&b).unwrap().position, Position::new(80.0, 80.0));
        assert_eq!(wm.get(&b).unwrap().size, Size::new(800.0, 600.0));
        assert_eq!(wm.get(&a).unwrap().z_index, 11);
        assert_eq!(wm.get(&b).unwrap().z_index, 12);
        assert_eq!(wm.focused_id(), Some(b.as_str()));
    }

    #[test]
    fn test_open_deduplicates_on_app_and_title() {
        let mut wm = WindowManager::new();
        let first = wm.open(LaunchRequest::new(
            AppId::TextEditor,
            "README.txt",
            WindowPayload::Text {
                content: "one".to_string(),
            },
        ));
        wm.minimize(&first);
        let second = wm.open(LaunchRequest::new(
            AppId::TextEditor,
            "README.txt",
            WindowPayload::Text {
                content: "two".to_string(),
            },
        ));

        assert_eq!(first, second);
        assert_eq!(wm.windows().len(), 1);
        let win = wm.get(&first).unwrap();
        assert!(!win.is_minimized);
        assert_eq!(
            win.data,
            WindowPayload::Text {
                content: "one".to_string()
            }
        );
        assert_eq!(wm.focused_id(), Some(first.as_str()));
    }

    #[test]
    fn test_same_title_different_app_opens_two_windows() {
        let mut wm = WindowManager::new();
        open(&mut wm, AppId::Explorer, "Photos");
        open(&mut wm, AppId::ImageViewer, "Photos");
        assert_eq!(wm.windows().len(), 2);
    }

    #[test]
    fn test_close_clears_focus_only_for_focused_window() {
        let mut wm = WindowManager::new();
        let a = open(&mut wm, AppId::Terminal, "Command Prompt");
        let b = open(&mut wm, AppId::Mail, "Mail");

        wm.close(&a);
        assert_eq!(wm.focused_id(), Some(b.as_str()));

        wm.close(&b);
        assert_eq!(wm.focused_id(), None);
        assert!(wm.close(&b).is_none());
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut wm = WindowManager::new();
        let a = open(&mut wm, AppId::Terminal, "Command Prompt");
        let before = wm.snapshot();

        wm.focus("nope");
        wm.minimize("nope");
        wm.toggle_maximize("nope");
        wm.handle_taskbar_activate("nope");
        wm.move_to("nope", Position::new(1.0, 1.0));
        wm.begin_drag("nope", Position::new(1.0, 1.0));

        assert_eq!(wm.snapshot(), before);
        let top = wm.get(&a).unwrap().z_index;
        assert_eq!(wm.next_z_index(), top + 1);
    }

    #[test]
    fn test_taskbar_three_way_branch() {
        let mut wm = WindowManager::new();
        let a = open(&mut wm, AppId::Terminal, "Command Prompt");
        let b = open(&mut wm, AppId::Mail, "Mail");

        // Not focused: focus
        wm.handle_taskbar_activate(&a);
        assert_eq!(wm.focused_id(), Some(a.as_str()));

        // Focused: minimize
        wm.handle_taskbar_activate(&a);
        assert!(wm.get(&a).unwrap().is_minimized);
        assert_eq!(wm.focused_id(), None);

        // Minimized: restore and focus on top
        wm.handle_taskbar_activate(&a);
        let a_win = wm.get(&a).unwrap();
        assert!(!a_win.is_minimized);
        assert!(a_win.z_index > wm.get(&b).unwrap().z_index);
        assert_eq!(wm.focused_id(), Some(a.as_str()));
    }

    #[test]
    fn test_maximize_keeps_stored_geometry() {
        let mut wm = WindowManager::new();
        let a = open(&mut wm, AppId::Explorer, "This PC");
        let canvas = Size::new(1280.0, 800.0);

        wm.toggle_maximize(&a);
        assert_eq!(
            wm.frame(&a, canvas).unwrap(),
            Rect {
                x: 0.0,
                y: 0.0,
                width: 1280.0,
                height: 760.0
            }
        );
        assert_eq!(wm.get(&a).unwrap().position, Position::new(50.0, 50.0));

        wm.toggle_maximize(&a);
        assert_eq!(
            wm.frame(&a, canvas).unwrap(),
            Rect::from_parts(Position::new(50.0, 50.0), Size::new(800.0, 600.0))
        );
    }

    #[test]
    fn test_maximized_window_can_be_minimized() {
        let mut wm = WindowManager::new();
        let a = open(&mut wm, AppId::Explorer, "This PC");
        wm.toggle_maximize(&a);
        wm.minimize(&a);
        let win = wm.get(&a).unwrap();
        assert!(win.is_maximized && win.is_minimized);
        assert!(wm.visible_stack().is_empty());
        assert_eq!(wm.taskbar_entries().len(), 1);
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut wm = WindowManager::new();
        let a = open(&mut wm, AppId::Mail, "Mail");
        let b = open(&mut wm, AppId::Terminal, "Command Prompt");

        wm.begin_drag(&a, Position::new(60.0, 55.0));
        assert_eq!(wm.focused_id(), Some(a.as_str()));
        wm.drag_to(Position::new(160.0, 255.0));
        assert_eq!(wm.get(&a).unwrap().position, Position::new(150.0, 250.0));
        wm.end_drag();
        wm.drag_to(Position::new(0.0, 0.0));
        assert_eq!(wm.get(&a).unwrap().position, Position::new(150.0, 250.0));
        assert_eq!(wm.get(&b).unwrap().position, Position::new(80.0, 80.0));
    }

    #[test]
    fn test_drag_ignored_while_maximized() {
        let mut wm = WindowManager::new();
        let a = open(&mut wm, AppId::Mail, "Mail");
        wm.toggle_maximize(&a);
        wm.begin_drag(&a, Position::new(60.0, 55.0));
        assert!(wm.drag_session().is_none());
    }

    #[test]
    fn test_resize_clamps_to_minimum() {
        let mut wm = WindowManager::new();
        let a = open(&mut wm, AppId::Mail, "Mail");
        wm.resize(&a, Size::new(100.0, 700.0));
        assert_eq!(wm.get(&a).unwrap().size, Size::new(320.0, 700.0));
    }

    #[test]
    fn test_window_at_picks_topmost() {
        let mut wm = WindowManager::new();
        let a = open(&mut wm, AppId::Mail, "Mail");
        let b = open(&mut wm, AppId::Terminal, "Command Prompt");
        let canvas = Size::new(1280.0, 800.0);
        let overlap = Position::new(100.0, 100.0);

        assert_eq!(wm.window_at(overlap, canvas).unwrap().id, b);
        wm.focus(&a);
        assert_eq!(wm.window_at(overlap, canvas).unwrap().id, a);
        assert_eq!(wm.window_at(Position::new(60.0, 60.0), canvas).unwrap().id, a);
        assert!(wm.window_at(Position::new(5.0, 5.0), canvas).is_none());
    }

    #[test]
    fn test_exhausted_z_counter_compacts_stack() {
        let mut config = ShellConfig::default();
        config.windows.initial_z_index = u32::MAX - 1;
        let mut wm = WindowManager::from_config(&config);

        let a = open(&mut wm, AppId::Mail, "Mail");
        assert_eq!(wm.get(&a).unwrap().z_index, u32::MAX);

        let b = open(&mut wm, AppId::Terminal, "Command Prompt");
        assert_eq!(wm.get(&a).unwrap().z_index, 1);
        assert_eq!(wm.get(&b).unwrap().z_index, 2);

        wm.focus(&a);
        let stack: Vec<_> = wm.visible_stack().iter().map(|w| w.id.clone()).collect();
        assert_eq!(stack, vec![b, a]);
    }

    #[test]
    fn test_max_initial_z_index_still_opens() {
        let mut config = ShellConfig::default();
        config.windows.initial_z_index = u32::MAX;
        let mut wm = WindowManager::from_config(&config);
        let a = open(&mut wm, AppId::Mail, "Mail");
        assert_eq!(wm.get(&a).unwrap().z_index, 1);
        assert_eq!(wm.focused_id(), Some(a.as_str()));
    }
}
