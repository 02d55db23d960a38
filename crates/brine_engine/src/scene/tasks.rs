//! Scene-level work that is not tied to a game object

use crate::render::Graphics;

/// A unit of simulation work run at the start of every fixed tick, before
/// collision detection and the object passes.
///
/// Tasks are infallible; fallible work should handle or log its own errors.
pub trait FixedTask: Send + Sync {
    /// Run the task for this tick
    fn on_fixed_tick(&self);
}

impl<F> FixedTask for F
where
    F: Fn() + Send + Sync,
{
    fn on_fixed_tick(&self) {
        self();
    }
}

/// Where a [`DrawingRoutine`] runs relative to the object pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingPosition {
    /// Before any game object draws (backgrounds)
    BeforeObjects,
    /// After the objects and the UI (overlays)
    AfterObjects,
}

/// A free-standing draw callback registered on a scene
pub struct DrawingRoutine {
    position: DrawingPosition,
    draw: Box<dyn Fn(&mut Graphics) + Send + Sync>,
}

impl DrawingRoutine {
    /// Create a routine from its phase and draw callback
    pub fn new(
        position: DrawingPosition,
        draw: impl Fn(&mut Graphics) + Send + Sync + 'static,
    ) -> Self {
        Self {
            position,
            draw: Box::new(draw),
        }
    }

    /// The phase this routine draws in
    pub fn position(&self) -> DrawingPosition {
        self.position
    }

    /// Run the routine's draw callback
    pub fn draw(&self, g: &mut Graphics) {
        (self.draw)(g);
    }
}
