//! The component contract and the bookkeeping around name-keyed registration

use crate::render::Graphics;

use super::{CollisionEvent, ObjectCore};

/// Reserved name of the physics component every game object carries
pub const PHYSICS_COMPONENT: &str = "brine.core.physics";
/// Reserved name of the hitbox-recalculation component
pub const RECALCULATE_HITBOX_COMPONENT: &str = "brine.core.recalculate-hitbox";
/// Reserved name of the middle-recalculation component
pub const RECALCULATE_MIDDLE_COMPONENT: &str = "brine.core.recalculate-middle";
/// Reserved name of the default accelerator component
pub const DEFAULT_ACCELERATOR_COMPONENT: &str = "brine.core.accelerator";

/// A polymorphic behavior unit attached to a game object
///
/// Components never reach sibling components directly; every hook works
/// through the owner's [`ObjectCore`] accessors, which is what keeps the
/// side-effect discipline enforceable.
///
/// A disabled component's hooks are skipped entirely by the owner, and
/// enabling or disabling takes effect on the next dispatch rather than
/// mid-dispatch.
pub trait Component: Send {
    /// Simulation-step mutation, called once per fixed tick
    fn on_fixed_tick(&mut self, owner: &mut ObjectCore);

    /// Render-step drawing; must not mutate simulation state
    fn draw(&mut self, owner: &ObjectCore, g: &mut Graphics) {
        let _ = (owner, g);
    }

    /// Reaction to a detected overlap (or, for the physics component, to the
    /// per-other "no collision" notification carrying an empty relation)
    fn on_collision(&mut self, owner: &mut ObjectCore, event: &CollisionEvent) {
        let _ = (owner, event);
    }
}

/// A registered component together with its name and enabled flag
pub(crate) struct ComponentSlot {
    pub(crate) name: String,
    pub(crate) enabled: bool,
    pub(crate) component: Box<dyn Component>,
}

impl ComponentSlot {
    pub(crate) fn new(name: String, component: Box<dyn Component>) -> Self {
        Self {
            name,
            enabled: true,
            component,
        }
    }
}

/// A structural change requested from inside a dispatch pass.
///
/// Hooks only see the owner's core, not the component list, so requests are
/// queued there and applied by the owner once the current pass has finished.
/// That gives dispatch snapshot semantics: no hook of the running pass is
/// skipped or double-invoked because of a mid-pass request.
pub(crate) enum ComponentOp {
    Add(ComponentSlot),
    Remove(String),
    SetEnabled(String, bool),
}
