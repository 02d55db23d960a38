//! Shared game state both engine clocks operate on

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::foundation::collections::lock_or_recover;
use crate::render::Graphics;
use crate::scene::{LayerCollection, Scene};

/// What the engine is currently simulating and drawing
#[derive(Clone)]
pub enum DisplayMode {
    /// A single scene
    Scene(Arc<Scene>),
    /// A stack of layered scenes
    Layers(Arc<LayerCollection>),
}

/// The mutable hub shared by the engine's clocks and the host.
///
/// Swapping the display mode or toggling pause takes effect at the next tick
/// of each clock; a tick already running finishes against the state it
/// started with.
pub struct GameContext {
    mode: Mutex<DisplayMode>,
    paused: AtomicBool,
}

impl GameContext {
    /// Create a context around a display mode
    pub fn new(mode: DisplayMode) -> Arc<Self> {
        Arc::new(Self {
            mode: Mutex::new(mode),
            paused: AtomicBool::new(false),
        })
    }

    /// Create a context displaying a single scene
    pub fn with_scene(scene: Scene) -> Arc<Self> {
        Self::new(DisplayMode::Scene(Arc::new(scene)))
    }

    /// Create a context displaying layered scenes
    pub fn with_layers(layers: LayerCollection) -> Arc<Self> {
        Self::new(DisplayMode::Layers(Arc::new(layers)))
    }

    /// The current display mode
    pub fn mode(&self) -> DisplayMode {
        lock_or_recover(&self.mode).clone()
    }

    /// Switch to a single scene
    pub fn set_scene(&self, scene: Arc<Scene>) {
        *lock_or_recover(&self.mode) = DisplayMode::Scene(scene);
    }

    /// Switch to layered scenes
    pub fn set_layers(&self, layers: Arc<LayerCollection>) {
        *lock_or_recover(&self.mode) = DisplayMode::Layers(layers);
    }

    /// Stop the fixed clock from advancing the simulation.
    ///
    /// The clock itself keeps running (and the render clock is unaffected),
    /// so resuming never has to restart a thread.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    /// Let the fixed clock advance the simulation again
    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    /// Whether the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Initialize the active scene or layers (idempotent)
    pub fn initialize_active(&self) {
        match self.mode() {
            DisplayMode::Scene(scene) => scene.init_game_objects(),
            DisplayMode::Layers(layers) => layers.init_game_objects(),
        }
    }

    /// Advance the active scene or layers by one fixed tick
    pub fn fixed_tick_active(&self) {
        match self.mode() {
            DisplayMode::Scene(scene) => scene.on_fixed_tick(),
            DisplayMode::Layers(layers) => layers.on_fixed_tick(),
        }
    }

    /// Run the variable-rate tick on the active scene or layers
    pub fn tick_active(&self) {
        match self.mode() {
            DisplayMode::Scene(scene) => scene.on_tick(),
            DisplayMode::Layers(layers) => layers.on_tick(),
        }
    }

    /// Draw the active scene or layers
    pub fn draw_active(&self, g: &mut Graphics) {
        match self.mode() {
            DisplayMode::Scene(scene) => scene.draw(g),
            DisplayMode::Layers(layers) => layers.draw(g),
        }
    }
}
