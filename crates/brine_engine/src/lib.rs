//! # Brine Engine
//!
//! A 2D game engine built around a fixed-timestep scene graph.
//!
//! ## Features
//!
//! - **Scene Graph**: Scenes own game objects, per-tick tasks and drawing routines
//! - **Component Model**: Behavior composed from name-keyed components
//! - **Fixed Timestep**: Deterministic simulation clock decoupled from rendering
//! - **Collision Detection**: Pairwise AABB tests with directional resolution
//! - **Backend Agnostic**: Drawing is recorded as commands; the host maps them to pixels
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brine_engine::prelude::*;
//! use std::sync::Arc;
//!
//! struct Player;
//!
//! impl Entity for Player {
//!     fn initialize(&mut self, _core: &mut ObjectCore) {}
//!     fn on_collision(&mut self, _core: &mut ObjectCore, _event: &CollisionEvent) {}
//!     fn on_fixed_tick(&mut self, core: &mut ObjectCore) {
//!         core.move_by(1.0, Direction::Right);
//!     }
//!     fn on_tick(&mut self, _core: &mut ObjectCore) {}
//!     fn draw(&mut self, core: &ObjectCore, g: &mut Graphics) {
//!         g.set_color(Color::WHITE);
//!         g.fill_rect(core.transform().rect());
//!     }
//! }
//!
//! struct Headless;
//! impl Repaintable for Headless {
//!     fn repaint(&self) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scene = Scene::new();
//!     scene.add_game_object(GameObject::new(Player, Transform::new(0.0, 0.0, 16.0, 16.0), "player"));
//!
//!     let context = GameContext::with_scene(scene);
//!     let mut engine = Engine::new(Arc::clone(&context), EngineConfig::default());
//!     engine.start(Arc::new(Headless))?;
//!     engine.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod geom;
pub mod object;
pub mod scene;
pub mod ui;
pub mod render;
pub mod audio;

mod config;
mod context;
mod engine;

pub use config::{ConfigError, EngineConfig};
pub use context::{DisplayMode, GameContext};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineConfig, EngineError,
        GameContext, DisplayMode,
        foundation::math::Vec2,
        foundation::time::TimeState,
        geom::{Axis, Dimensions, Direction, DirectionSet, Hitbox, Rect, Transform},
        object::{
            CollisionEvent, Component, Entity, GameObject, GameObjectHandle, ObjectCore,
        },
        render::{Color, DrawCommand, Graphics, Repaintable},
        scene::{DrawingPosition, DrawingRoutine, FixedTask, LayerCollection, Scene},
        ui::{UiElement, UiSystem},
        audio::{AudioError, AudioPlayer},
    };
}
