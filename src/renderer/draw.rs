//! Display-list primitives for a 2D drawing surface

use std::fmt;

use glam::Vec2;

use crate::sim::Aabb;

/// RGBA color (alpha 0-1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// CSS color string, e.g. `rgba(0, 0, 0, 0.7)`
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Outline drawn around a filled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// Text style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

impl Font {
    /// CSS font shorthand
    pub fn css(&self) -> String {
        if self.bold {
            format!("bold {}px Arial", self.size)
        } else {
            format!("{}px Arial", self.size)
        }
    }
}

/// One drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill an axis-aligned rectangle
    FillRect { rect: Aabb, color: Color },
    /// Filled rounded rectangle with optional outline
    RoundRect {
        rect: Aabb,
        radius: f32,
        fill: Color,
        stroke: Option<Stroke>,
    },
    /// Several circles filled as a single path (overlaps don't darken)
    Circles {
        circles: Vec<(Vec2, f32)>,
        color: Color,
    },
    /// Filled circle
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Horizontally centred text, baseline at `pos.y`
    Text {
        text: String,
        pos: Vec2,
        font: Font,
        color: Color,
    },
}

/// Everything painted for one frame, in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text drawn this frame, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const SKY: Color = Color::rgb(0x87, 0xce, 0xeb);
    pub const CLOUD: Color = Color::rgba(255, 255, 255, 0.5);
    pub const OBSTACLE: Color = Color::rgb(0x90, 0xee, 0x90);
    pub const ENTITY: Color = Color::rgb(0xd0, 0xb4, 0xf4);
    pub const OUTLINE: Color = Color::rgb(0, 0, 0);
    pub const EYE: Color = Color::rgb(0, 0, 0);
    pub const OVERLAY: Color = Color::rgba(0, 0, 0, 0.7);
    pub const OVERLAY_TEXT: Color = Color::rgb(255, 255, 255);
}
