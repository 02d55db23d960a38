//! Built-in components
//!
//! Four of these are reserved and installed on every game object at
//! construction: [`PhysicsComponent`], [`RecalculateHitboxComponent`],
//! [`RecalculateMiddleComponent`] and [`Accelerator`]. The rest are opt-in.

mod accelerator;
mod gfx;
mod physics;
mod recalculate;

pub use accelerator::Accelerator;
pub use gfx::{FadeDirection, KeyframeAnimation, SceneFade, DEFAULT_FADE_DURATION};
pub use physics::PhysicsComponent;
pub use recalculate::{RecalculateHitboxComponent, RecalculateMiddleComponent};
