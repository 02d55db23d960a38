//! Stacked scenes simulated and drawn together

use std::sync::Arc;

use crate::render::Graphics;

use super::Scene;

struct Layer {
    name: String,
    scene: Arc<Scene>,
}

/// An ordered stack of named scenes.
///
/// Layers tick and draw in insertion order, so earlier layers paint
/// underneath later ones. Useful for a parallax background, a play field and
/// a HUD simulated as separate scenes.
#[derive(Default)]
pub struct LayerCollection {
    layers: crate::foundation::collections::SnapshotList<Layer>,
}

impl LayerCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named layer
    pub fn add_layer(&self, name: impl Into<String>, scene: Arc<Scene>) {
        self.layers.push(Arc::new(Layer {
            name: name.into(),
            scene,
        }));
    }

    /// Look up a layer's scene by name
    pub fn layer(&self, name: &str) -> Option<Arc<Scene>> {
        self.layers
            .snapshot()
            .iter()
            .find(|layer| layer.name == name)
            .map(|layer| Arc::clone(&layer.scene))
    }

    /// Remove every layer with the given name
    pub fn remove_layer(&self, name: &str) {
        self.layers.retain(|layer| layer.name != name);
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the collection has no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Initialize every layer's game objects
    pub fn init_game_objects(&self) {
        for layer in &self.layers.snapshot() {
            layer.scene.init_game_objects();
        }
    }

    /// Advance every layer by one fixed tick, in stack order
    pub fn on_fixed_tick(&self) {
        for layer in &self.layers.snapshot() {
            layer.scene.on_fixed_tick();
        }
    }

    /// Run the variable-rate tick on every layer
    pub fn on_tick(&self) {
        for layer in &self.layers.snapshot() {
            layer.scene.on_tick();
        }
    }

    /// Draw every layer, earlier layers first
    pub fn draw(&self, g: &mut Graphics) {
        for layer in &self.layers.snapshot() {
            layer.scene.draw(g);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Color, DrawCommand};
    use crate::scene::{DrawingPosition, DrawingRoutine};

    fn layer_painting(color: Color) -> Arc<Scene> {
        let scene = Scene::new();
        scene.add_drawing_routine(DrawingRoutine::new(
            DrawingPosition::BeforeObjects,
            move |g| {
                g.set_color(color);
                g.clear();
            },
        ));
        Arc::new(scene)
    }

    #[test]
    fn test_layers_draw_in_stack_order() {
        let layers = LayerCollection::new();
        layers.add_layer("background", layer_painting(Color::BLUE));
        layers.add_layer("foreground", layer_painting(Color::RED));

        let mut g = Graphics::new();
        layers.draw(&mut g);

        assert_eq!(
            g.commands(),
            &[DrawCommand::Clear(Color::BLUE), DrawCommand::Clear(Color::RED)]
        );
    }

    #[test]
    fn test_layer_lookup_and_removal() {
        let layers = LayerCollection::new();
        layers.add_layer("hud", Arc::new(Scene::new()));
        assert!(layers.layer("hud").is_some());
        assert!(layers.layer("missing").is_none());

        layers.remove_layer("hud");
        assert!(layers.is_empty());
    }
}
