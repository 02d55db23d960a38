//! Backend-agnostic drawing surface
//!
//! The engine does not talk to a pixel backend. A draw pass records
//! [`DrawCommand`]s into a [`Graphics`] context; the host that owns the
//! actual surface drains the commands and maps them to pixels however it
//! likes (framebuffer, GPU, terminal, test assertions).

/// An RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque green
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Opaque blue
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with explicit alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The same color with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

use crate::geom::Rect;

/// One recorded drawing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Fill the entire surface with a color
    Clear(Color),
    /// Fill a rectangle with a color
    FillRect(Rect, Color),
    /// Outline a rectangle with a color
    OutlineRect(Rect, Color),
}

/// Command-recording graphics context handed down the draw pass
///
/// Stateful in the style of classic 2D canvases: `set_color` applies to every
/// subsequent shape until changed.
pub struct Graphics {
    commands: Vec<DrawCommand>,
    color: Color,
}

impl Default for Graphics {
    fn default() -> Self {
        Self::new()
    }
}

impl Graphics {
    /// Create an empty graphics context
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            color: Color::BLACK,
        }
    }

    /// Set the color used by subsequent shape commands
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// The currently active color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Fill the whole surface with the active color
    pub fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear(self.color));
    }

    /// Fill a rectangle with the active color
    pub fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::FillRect(rect, self.color));
    }

    /// Outline a rectangle with the active color
    pub fn outline_rect(&mut self, rect: Rect) {
        self.commands
            .push(DrawCommand::OutlineRect(rect, self.color));
    }

    /// The commands recorded so far this frame
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands, leaving the context ready for reuse
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

/// Host-provided handle invoked once per render tick
///
/// The host owns the actual pixel surface and input polling; the engine only
/// ever asks it to repaint.
pub trait Repaintable: Send + Sync {
    /// Redraw the surface
    fn repaint(&self);
}
