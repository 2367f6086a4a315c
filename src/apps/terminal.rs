// Command-prompt session over the virtual filesystem
//
// Closed command set: help, ls, cd, cat, open, whoami, clear, exit and
// drive switches ("c:", "d:"). No scripting, pipes or globbing.

use super::ShellEffect;
use crate::filesystem::{FileSystemTree, NodeKind, SYSTEM_DRIVE_ID};
use crate::state::window::{AppId, LaunchRequest, WindowPayload};
use serde::Serialize;

pub const WHOAMI: &str = "user@windows";
pub const DRIVE_NOT_FOUND: &str = "The system cannot find the drive specified.";
pub const EMPTY_DIRECTORY: &str = "Directory is empty";
pub const UNSUPPORTED_OPEN: &str = "Cannot open this file type via terminal. Try File Explorer.";

const HELP: [(&str, &str); 8] = [
    ("ls", "List directory contents"),
    ("cd", "Change directory (e.g. \"cd Users\" or \"cd ..\")"),
    ("cat", "View file content"),
    ("clear", "Clear terminal screen"),
    ("open", "Open a file or application"),
    ("whoami", "Display current user"),
    ("exit", "Close the terminal"),
    ("d:", "Switch to D drive (or c:)"),
];

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingEntry {
    pub name: String,
    pub is_container: bool,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct HelpRow {
    pub command: &'static str,
    pub description: &'static str,
}

/// One scrollback line
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TerminalLine {
    /// Echo of a submitted command with the prompt it was typed at
    Input { path: String, text: String },
    Output { text: String },
    Listing { entries: Vec<ListingEntry> },
    Help { rows: Vec<HelpRow> },
    Blank,
}

impl TerminalLine {
    fn output(text: impl Into<String>) -> Self {
        TerminalLine::Output { text: text.into() }
    }
}

#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TerminalView {
    pub current_id: String,
    pub prompt: String,
    pub lines: Vec<TerminalLine>,
}

/// Startup lines shown in a fresh terminal
pub fn banner() -> Vec<TerminalLine> {
    vec![
        TerminalLine::output(format!(
            "Portfolio OS [Version {}]",
            env!("CARGO_PKG_VERSION")
        )),
        TerminalLine::output("(c) Portfolio OS. All rights reserved."),
        TerminalLine::Blank,
        TerminalLine::output("Type \"help\" to see available commands."),
    ]
}

fn is_drive_token(token: &str) -> bool {
    token.chars().count() == 2 && token.ends_with(':')
}

#[derive(Debug, Clone, PartialEq)]
pub struct TerminalSession {
    current_id: String,
    scrollback: Vec<TerminalLine>,
}

impl TerminalSession {
    /// New session on the system drive (or the root if the tree has none).
    pub fn new(tree: &FileSystemTree) -> Self {
        let current_id = match tree.find_node_by_id(SYSTEM_DRIVE_ID) {
            Some(node) if node.is_container() => SYSTEM_DRIVE_ID.to_string(),
            _ => tree.root().id.clone(),
        };
        Self {
            current_id,
            scrollback: banner(),
        }
    }

    pub fn current_id(&self) -> &str {
        &self.current_id
    }

    pub fn scrollback(&self) -> &[TerminalLine] {
        &self.scrollback
    }

    pub fn prompt(&self, tree: &FileSystemTree) -> String {
        tree.display_path(&self.current_id)
    }

    pub fn view(&self, tree: &FileSystemTree) -> TerminalView {
        TerminalView {
            current_id: self.current_id.clone(),
            prompt: self.prompt(tree),
            lines: self.scrollback.clone(),
        }
    }

    /// Run one line of input. Returns a request for the shell when the
    /// command opens something or closes the terminal.
    pub fn execute(&mut self, tree: &FileSystemTree, input: &str) -> Option<ShellEffect> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (command, args) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };
        tracing::debug!(target: "terminal", %command, args, cwd = %self.current_id, "execute");

        match command.as_str() {
            "exit" => return Some(ShellEffect::CloseSelf),
            "clear" => {
                self.scrollback.clear();
                return None;
            }
            _ => {}
        }

        let path = self.prompt(tree);
        self.scrollback.push(TerminalLine::Input {
            path,
            text: trimmed.to_string(),
        });

        if is_drive_token(&command) {
            self.switch_drive(tree, &command);
            return None;
        }

        match command.as_str() {
            "help" => {
                let rows = HELP
                    .iter()
                    .map(|&(command, description)| HelpRow {
                        command,
                        description,
                    })
                    .collect();
                self.scrollback.push(TerminalLine::Help { rows });
                None
            }
            "ls" => {
                self.list(tree);
                None
            }
            "cd" => {
                self.change_directory(tree, args);
                None
            }
            "cat" => {
                self.concatenate(tree, args);
                None
            }
            "whoami" => {
                self.print(WHOAMI);
                None
            }
            "open" => self.open(tree, args),
            _ => {
                tracing::warn!(target: "terminal", %command, "unrecognized command");
                self.print(format!(
                    "'{}' is not recognized as an internal or external command.",
                    command
                ));
                None
            }
        }
    }

    fn print(&mut self, text: impl Into<String>) {
        self.scrollback.push(TerminalLine::output(text));
    }

    /// Drive tokens resolve against the top-level containers with the same
    /// matching as `cd`, and must name a disk.
    fn switch_drive(&mut self, tree: &FileSystemTree, token: &str) {
        let drive = tree
            .resolve(&tree.root().id, token)
            .and_then(|id| tree.find_node_by_id(&id))
            .filter(|node| node.kind == NodeKind::Disk);

        match drive {
            Some(drive) => self.current_id = drive.id.clone(),
            None => self.print(DRIVE_NOT_FOUND),
        }
    }

    fn list(&mut self, tree: &FileSystemTree) {
        let entries: Vec<ListingEntry> = tree
            .children_of(&self.current_id)
            .iter()
            .map(|child| ListingEntry {
                name: child.name.clone(),
                is_container: child.is_container(),
            })
            .collect();

        if entries.is_empty() {
            self.print(EMPTY_DIRECTORY);
        } else {
            self.scrollback.push(TerminalLine::Listing { entries });
        }
    }

    fn change_directory(&mut self, tree: &FileSystemTree, args: &str) {
        if args.is_empty() {
            let path = self.prompt(tree);
            self.print(path);
            return;
        }
        if is_drive_token(args) {
            self.switch_drive(tree, args);
            return;
        }

        let target = tree
            .resolve(&self.current_id, args)
            .and_then(|id| tree.find_node_by_id(&id));
        match target {
            Some(node) if node.is_container() => self.current_id = node.id.clone(),
            Some(_) => self.print(format!("cd: not a directory: {}", args)),
            None => self.print(format!("cd: no such file or directory: {}", args)),
        }
    }

    fn concatenate(&mut self, tree: &FileSystemTree, args: &str) {
        if args.is_empty() {
            self.print("usage: cat <filename>");
            return;
        }

        let target = tree
            .resolve(&self.current_id, args)
            .and_then(|id| tree.find_node_by_id(&id));
        match target {
            Some(node) if node.kind == NodeKind::Text => {
                let content = node.content.clone().unwrap_or_default();
                self.print(content);
            }
            Some(_) => self.print(format!("cat: {}: Is a directory or binary", args)),
            None => self.print(format!("cat: {}: No such file", args)),
        }
    }

    fn open(&mut self, tree: &FileSystemTree, args: &str) -> Option<ShellEffect> {
        if args.is_empty() {
            self.print("usage: open <filename>");
            return None;
        }

        let target = tree
            .resolve(&self.current_id, args)
            .and_then(|id| tree.find_node_by_id(&id));

        let Some(node) = target else {
            if args == "mail" {
                self.print("Launching Mail...");
                return Some(ShellEffect::Launch(LaunchRequest::bare(AppId::Mail, "Mail")));
            }
            self.print(format!("open: file not found: {}", args));
            return None;
        };

        match (node.kind, node.url.as_ref()) {
            (NodeKind::Text, _) => {
                self.print(format!("Opening {}...", node.name));
                Some(ShellEffect::Launch(LaunchRequest::new(
                    AppId::TextEditor,
                    node.name.clone(),
                    WindowPayload::Text {
                        content: node.content.clone().unwrap_or_default(),
                    },
                )))
            }
            (NodeKind::Link, Some(url)) => {
                let url = url.clone();
                self.print(format!("Opening {}...", url));
                Some(ShellEffect::OpenExternal { url })
            }
            _ => {
                self.print(UNSUPPORTED_OPEN);
                None
            }
        }
    }
}
