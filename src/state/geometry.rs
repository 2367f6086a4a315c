// Layout primitives shared by the window manager and the frontend

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `origin` to this point
    pub fn offset_from(&self, origin: Position) -> Position {
        Position::new(self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Component-wise lower bound
    pub fn at_least(&self, min: Size) -> Size {
        Size::new(self.width.max(min.width), self.height.max(min.height))
    }
}

/// A spatial rectangle as rendered on the desktop canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn from_parts(position: Position, size: Size) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Whether a point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x <= self.x + self.width
            && point.y <= self.y + self.height
    }
}

/// An in-progress title-bar drag: which window, and where the pointer grabbed it
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub window_id: String,
    pub grab_offset: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_at_least_clamps_each_axis() {
        let clamped = Size::new(100.0, 900.0).at_least(Size::new(320.0, 200.0));
        assert_eq!(clamped, Size::new(320.0, 900.0));
    }

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::from_parts(Position::new(10.0, 10.0), Size::new(100.0, 50.0));
        assert!(rect.contains(Position::new(10.0, 60.0)));
        assert!(!rect.contains(Position::new(111.0, 20.0)));
    }
}
