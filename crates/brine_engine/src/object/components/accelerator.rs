//! Countdown driver for timed accelerations

use crate::object::{Component, ObjectCore};

/// Reserved component that advances the owner's timed accelerations.
///
/// [`ObjectCore::accelerate`] only registers the countdown; this component
/// ticks it and resets the force's acceleration to zero when it expires.
/// Disabling or removing the accelerator freezes every countdown in place.
#[derive(Debug, Default)]
pub struct Accelerator;

impl Accelerator {
    /// Create the accelerator component
    pub fn new() -> Self {
        Self
    }
}

impl Component for Accelerator {
    fn on_fixed_tick(&mut self, owner: &mut ObjectCore) {
        owner.forces_mut().tick_accelerations();
    }
}
