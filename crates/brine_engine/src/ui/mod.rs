//! Scene-attached user-interface layer
//!
//! UI elements tick after the object passes and draw after the objects but
//! before the scene's post-object drawing routines.

use std::sync::{Arc, Mutex};

use crate::foundation::collections::{lock_or_recover, SnapshotList};
use crate::render::Graphics;

/// A single piece of UI (a health bar, a menu, a label)
pub trait UiElement: Send {
    /// Simulation-step update, run after every object's fixed tick
    fn on_fixed_tick(&mut self);

    /// Draw the element
    fn draw(&mut self, g: &mut Graphics);
}

/// The ordered collection of UI elements attached to a scene
#[derive(Default)]
pub struct UiSystem {
    elements: SnapshotList<Mutex<dyn UiElement>>,
}

impl UiSystem {
    /// Create an empty UI system
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element; elements tick and draw in insertion order
    pub fn add_element(&self, element: impl UiElement + 'static) {
        self.elements.push(Arc::new(Mutex::new(element)));
    }

    /// Remove every element
    pub fn clear(&self) {
        self.elements.clear();
    }

    /// Number of attached elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no elements are attached
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Tick every element in insertion order
    pub fn on_fixed_tick(&self) {
        for element in &self.elements.snapshot() {
            lock_or_recover(element).on_fixed_tick();
        }
    }

    /// Draw every element in insertion order
    pub fn draw_ui(&self, g: &mut Graphics) {
        for element in &self.elements.snapshot() {
            lock_or_recover(element).draw(g);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingElement {
        log: Arc<Mutex<Vec<&'static str>>>,
        id: &'static str,
    }

    impl UiElement for CountingElement {
        fn on_fixed_tick(&mut self) {
            self.log.lock().unwrap().push(self.id);
        }

        fn draw(&mut self, _g: &mut Graphics) {
            self.log.lock().unwrap().push(self.id);
        }
    }

    #[test]
    fn test_elements_run_in_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let ui = UiSystem::new();
        ui.add_element(CountingElement { log: Arc::clone(&log), id: "first" });
        ui.add_element(CountingElement { log: Arc::clone(&log), id: "second" });

        ui.on_fixed_tick();
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }
}
