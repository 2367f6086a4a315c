use super::geometry::{Position, Size};
use crate::error::ShellError;
use serde::de::value::StrDeserializer;
use serde::de::{self, IntoDeserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Which application view renders a window's body
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AppId {
    Explorer,
    Terminal,
    Mail,
    TextEditor,
    Vlc,
    ImageViewer,
}

impl AppId {
    pub const ALL: [AppId; 6] = [
        AppId::Explorer,
        AppId::Terminal,
        AppId::Mail,
        AppId::TextEditor,
        AppId::Vlc,
        AppId::ImageViewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppId::Explorer => "explorer",
            AppId::Terminal => "terminal",
            AppId::Mail => "mail",
            AppId::TextEditor => "text-editor",
            AppId::Vlc => "vlc",
            AppId::ImageViewer => "image-viewer",
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppId {
    type Err = ShellError;

    // Same names as the serde representation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let de: StrDeserializer<'_, de::value::Error> = s.into_deserializer();
        AppId::deserialize(de).map_err(|_| ShellError::UnknownApp(s.to_string()))
    }
}

/// Data handed to an application view when its window opens
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WindowPayload {
    #[default]
    None,
    /// Starting container for an explorer
    Explorer {
        #[serde(rename = "pathId")]
        path_id: String,
    },
    /// Body of a text file
    Text { content: String },
    /// Media reference for the player and image viewer
    Media {
        url: String,
        #[serde(rename = "fileName")]
        file_name: String,
    },
}

impl WindowPayload {
    /// Interpret an untyped frontend payload for `app_id`.
    ///
    /// Shapes the target app does not understand become [`WindowPayload::None`].
    pub fn from_json(app_id: AppId, value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return WindowPayload::None;
        };
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

        match app_id {
            AppId::Explorer => field("pathId")
                .map(|path_id| WindowPayload::Explorer { path_id })
                .unwrap_or_default(),
            AppId::TextEditor => field("content")
                .map(|content| WindowPayload::Text { content })
                .unwrap_or_default(),
            AppId::Vlc | AppId::ImageViewer => match (field("url"), field("fileName")) {
                (Some(url), Some(file_name)) => WindowPayload::Media { url, file_name },
                _ => WindowPayload::None,
            },
            AppId::Terminal | AppId::Mail => WindowPayload::None,
        }
    }
}

/// A request to open (or re-focus) an application window
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub app_id: AppId,
    pub title: String,
    #[serde(default)]
    pub payload: WindowPayload,
}

impl LaunchRequest {
    pub fn new(app_id: AppId, title: impl Into<String>, payload: WindowPayload) -> Self {
        Self {
            app_id,
            title: title.into(),
            payload,
        }
    }

    pub fn bare(app_id: AppId, title: impl Into<String>) -> Self {
        Self::new(app_id, title, WindowPayload::None)
    }
}

/// One open application window
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WindowState {
    pub id: String,              // Time-ordered UUID (v7)
    pub app_id: AppId,           // Which view renders the body
    pub title: String,           // With app_id, the de-duplication key
    pub is_minimized: bool,      // Hidden from the stack, kept in the taskbar
    pub is_maximized: bool,      // Fills the canvas; position/size kept for restore
    pub z_index: u32,            // Higher draws on top
    pub position: Position,
    pub size: Size,
    pub data: WindowPayload,
}

impl WindowState {
    pub fn matches(&self, app_id: AppId, title: &str) -> bool {
        self.app_id == app_id && self.title == title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn app_ids_use_kebab_case() {
        assert_eq!(serde_json::to_value(AppId::TextEditor).unwrap(), json!("text-editor"));
        assert_eq!("image-viewer".parse::<AppId>().unwrap(), AppId::ImageViewer);
        assert!(matches!("browser".parse::<AppId>(), Err(ShellError::UnknownApp(_))));
    }

    #[test]
    fn display_names_agree_with_serde() {
        for app in AppId::ALL {
            assert_eq!(serde_json::to_value(app).unwrap(), json!(app.as_str()));
            assert_eq!(app.to_string().parse::<AppId>().unwrap(), app);
        }
    }

    #[test]
    fn payload_from_json_follows_app() {
        let media = json!({ "url": "/music/a.mp3", "fileName": "a.mp3" });
        assert_eq!(
            WindowPayload::from_json(AppId::Vlc, Some(&media)),
            WindowPayload::Media {
                url: "/music/a.mp3".to_string(),
                file_name: "a.mp3".to_string()
            }
        );
        assert_eq!(
            WindowPayload::from_json(AppId::Explorer, Some(&json!({ "pathId": "users" }))),
            WindowPayload::Explorer {
                path_id: "users".to_string()
            }
        );
        assert_eq!(WindowPayload::from_json(AppId::Mail, Some(&media)), WindowPayload::None);
        assert_eq!(
            WindowPayload::from_json(AppId::TextEditor, Some(&json!({ "url": "x" }))),
            WindowPayload::None
        );
        assert_eq!(WindowPayload::from_json(AppId::Terminal, None), WindowPayload::None);
    }

    #[test]
    fn payload_wire_shape() {
        let payload = WindowPayload::Media {
            url: "/img.jpg".to_string(),
            file_name: "img.jpg".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "kind": "media", "url": "/img.jpg", "fileName": "img.jpg" })
        );
    }
}
