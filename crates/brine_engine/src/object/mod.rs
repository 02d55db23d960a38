//! Game objects: the units a scene simulates, draws and collides
//!
//! A [`GameObject`] couples three things:
//!
//! - an [`ObjectCore`] holding the spatial and physical state every hook may
//!   touch (transform, hitbox, forces, properties),
//! - an ordered list of name-keyed [`Component`]s providing composed behavior,
//! - a user-supplied [`Entity`] implementing the object's own hooks.
//!
//! Hooks receive the core rather than the whole object, which structurally
//! prevents a component from reaching into a sibling component's state.

mod component;
pub mod components;
mod forces;
mod properties;

pub use component::{
    Component, DEFAULT_ACCELERATOR_COMPONENT, PHYSICS_COMPONENT, RECALCULATE_HITBOX_COMPONENT,
    RECALCULATE_MIDDLE_COMPONENT,
};
pub use forces::{Force, ForceSet, GRAVITY_FORCE};
pub use properties::PropertyError;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::foundation::collections::{lock_or_recover, Snapshot};
use crate::foundation::math::Vec2;
use crate::geom::{relation, Axis, Direction, DirectionSet, Hitbox, Transform};
use crate::render::Graphics;

use component::{ComponentOp, ComponentSlot};
use components::{
    Accelerator, PhysicsComponent, RecalculateHitboxComponent, RecalculateMiddleComponent,
};

/// Shared, lockable handle to a game object stored in a scene
pub type GameObjectHandle = Arc<Mutex<GameObject>>;

/// The required-override capability set of a concrete game object
///
/// Every hook receives the owning object's [`ObjectCore`].
pub trait Entity: Send {
    /// One-time setup, fired exactly once per scene activation
    fn initialize(&mut self, core: &mut ObjectCore);

    /// Reaction to a detected overlap with another object
    fn on_collision(&mut self, core: &mut ObjectCore, event: &CollisionEvent);

    /// Simulation-step logic, called once per fixed tick after the object's
    /// components have ticked
    fn on_fixed_tick(&mut self, core: &mut ObjectCore);

    /// Variable-rate logic driven by the render clock
    fn on_tick(&mut self, core: &mut ObjectCore);

    /// Draw the object; components draw afterwards
    fn draw(&mut self, core: &ObjectCore, g: &mut Graphics);

    /// Aggregate reaction to all of this tick's collisions, invoked exactly
    /// once per fixed tick with the full set of events (empty if none).
    fn on_collision_detection_finish(&mut self, core: &mut ObjectCore, collisions: &[CollisionEvent]) {
        let _ = (core, collisions);
    }
}

/// Ephemeral record of one detected overlap, produced per colliding pair per
/// fixed tick and never persisted
#[derive(Clone)]
pub struct CollisionEvent {
    other: GameObjectHandle,
    other_tag: String,
    relation: DirectionSet,
}

impl CollisionEvent {
    fn new(other: GameObjectHandle, other_tag: String, relation: DirectionSet) -> Self {
        Self {
            other,
            other_tag,
            relation,
        }
    }

    /// Handle of the other object involved in the collision.
    ///
    /// Do not lock this from inside a collision hook: the dispatching pass
    /// already holds the receiving object's lock. Defer work on the handle
    /// to a later hook, or use the snapshotted [`other_tag`](Self::other_tag)
    /// and [`relation`](Self::relation) instead.
    pub fn other(&self) -> &GameObjectHandle {
        &self.other
    }

    /// Tag of the other object, snapshotted at detection time
    pub fn other_tag(&self) -> &str {
        &self.other_tag
    }

    /// Which side(s) of this object face the other object
    pub fn relation(&self) -> DirectionSet {
        self.relation
    }

    /// Whether the event describes an actual overlap; the physics component
    /// also receives empty-relation events for every non-overlapping object
    pub fn is_overlap(&self) -> bool {
        !self.relation.is_empty()
    }
}

/// The mutable state of a game object that hooks are allowed to touch
pub struct ObjectCore {
    transform: Transform,
    hitbox: Hitbox,
    middle: Vec2,
    tag: String,
    mass: f32,
    forces: ForceSet,
    last_direction: Option<Direction>,
    properties: HashMap<String, String>,
    properties_file: Option<PathBuf>,
    pending_ops: Vec<ComponentOp>,
}

impl ObjectCore {
    fn new(transform: Transform, tag: String) -> Self {
        let hitbox = Hitbox::from_transform(&transform);
        let middle = transform.middle();
        Self {
            transform,
            hitbox,
            middle,
            tag,
            mass: 1.0,
            forces: ForceSet::new(),
            last_direction: None,
            properties: HashMap::new(),
            properties_file: None,
            pending_ops: Vec::new(),
        }
    }

    /// The object's transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The object's transform, mutably
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// The object's hitbox
    pub fn hitbox(&self) -> &Hitbox {
        &self.hitbox
    }

    /// The object's hitbox, mutably
    pub fn hitbox_mut(&mut self) -> &mut Hitbox {
        &mut self.hitbox
    }

    /// Re-derive the hitbox position from the transform
    pub fn recalculate_hitbox(&mut self) {
        self.hitbox.recalculate(&self.transform);
    }

    /// Cached center point, recomputed each tick by the reserved component
    pub fn middle(&self) -> Vec2 {
        self.middle
    }

    /// Recompute the cached center point from the transform
    pub fn recalculate_middle(&mut self) {
        self.middle = self.transform.middle();
    }

    /// The object's tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Change the object's tag
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = tag.into();
    }

    /// The object's mass
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Change the object's mass
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
    }

    /// The forces acting on the object
    pub fn forces(&self) -> &ForceSet {
        &self.forces
    }

    /// The forces acting on the object, mutably
    pub fn forces_mut(&mut self) -> &mut ForceSet {
        &mut self.forces
    }

    /// Set a force's acceleration for a limited number of fixed ticks; the
    /// reserved accelerator component resets it afterwards.
    ///
    /// Returns whether the force exists.
    pub fn accelerate(&mut self, force: &str, acceleration: f32, duration_ticks: u64) -> bool {
        self.forces.accelerate(force, acceleration, duration_ticks)
    }

    /// The direction of the last non-zero movement
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    /// Horizontal position
    pub fn x(&self) -> f32 {
        self.transform.x()
    }

    /// Set the horizontal position
    pub fn set_x(&mut self, x: f32) {
        self.transform.set_x(x);
    }

    /// Vertical position
    pub fn y(&self) -> f32 {
        self.transform.y()
    }

    /// Set the vertical position
    pub fn set_y(&mut self, y: f32) {
        self.transform.set_y(y);
    }

    /// Current position (top-left corner)
    pub fn position(&self) -> Vec2 {
        self.transform.position()
    }

    /// Set the position (top-left corner)
    pub fn set_position(&mut self, position: Vec2) {
        self.transform.set_position(position);
    }

    /// Shift the position along one axis by a signed delta
    pub fn basic_move(&mut self, delta: f32, axis: Axis) {
        match axis {
            Axis::X => self.transform.set_x(self.transform.x() + delta),
            Axis::Y => self.transform.set_y(self.transform.y() + delta),
        }
    }

    /// Move by `delta` in `direction`.
    ///
    /// The delta is normalized to a non-negative magnitude before it is
    /// applied along the direction's axis. `last_direction` is recorded only
    /// for non-zero deltas.
    pub fn move_by(&mut self, delta: f32, direction: Direction) {
        if delta != 0.0 {
            self.last_direction = Some(direction);
        }
        let delta = delta.abs();
        match direction {
            Direction::Right => self.basic_move(delta, Axis::X),
            Direction::Left => self.basic_move(-delta, Axis::X),
            Direction::Up => self.basic_move(-delta, Axis::Y),
            Direction::Down => self.basic_move(delta, Axis::Y),
        }
    }

    /// Add an in-memory property
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Replace an existing property's value; absent keys are left untouched
    pub fn change_property(&mut self, key: &str, new_value: impl Into<String>) {
        if let Some(value) = self.properties.get_mut(key) {
            *value = new_value.into();
        }
    }

    /// Look up an in-memory property
    pub fn local_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Look up an in-memory property and parse it as an integer
    pub fn property_as_i32(&self, key: &str) -> Result<i32, PropertyError> {
        let value = self
            .local_property(key)
            .ok_or_else(|| PropertyError::Missing(key.to_string()))?;
        value.parse().map_err(|_| PropertyError::WrongType {
            key: key.to_string(),
            expected: "integer",
        })
    }

    /// Attach a TOML properties file backing this object
    pub fn attach_properties_file(&mut self, path: impl Into<PathBuf>) {
        self.properties_file = Some(path.into());
    }

    /// Path of the attached properties file, if any
    pub fn properties_file(&self) -> Option<&Path> {
        self.properties_file.as_deref()
    }

    /// Read a property from the attached file; I/O and parse failures
    /// propagate to the caller
    pub fn read_property(&self, key: &str) -> Result<String, PropertyError> {
        let path = self
            .properties_file
            .as_deref()
            .ok_or(PropertyError::NoPropertiesFile)?;
        properties::read_property_from_file(path, key)
    }

    /// Apply the well-known entries of the attached file, currently the
    /// `key_properties.location` coordinate pair
    pub fn read_key_properties(&mut self) -> Result<(), PropertyError> {
        let path = self
            .properties_file
            .as_deref()
            .ok_or(PropertyError::NoPropertiesFile)?;
        if let Some(location) = properties::read_location_from_file(path)? {
            self.set_position(location);
        }
        Ok(())
    }

    /// Request that a component be added to the owner.
    ///
    /// Requests made from inside a dispatch pass are applied once the pass
    /// has finished; the new component first participates in the next pass.
    pub fn add_component(&mut self, component: Box<dyn Component>, name: impl Into<String>) {
        self.pending_ops
            .push(ComponentOp::Add(ComponentSlot::new(name.into(), component)));
    }

    /// Request removal of every component with the given name.
    ///
    /// Safe to call from inside a component's own hook: the running pass
    /// still dispatches to every other enabled component exactly once, and
    /// the removed component receives no hooks from the next pass on.
    pub fn remove_component(&mut self, name: &str) {
        self.pending_ops.push(ComponentOp::Remove(name.to_string()));
    }

    /// Request enabling or disabling of every component with the given name,
    /// effective from the next dispatch pass
    pub fn set_component_enabled(&mut self, name: &str, enabled: bool) {
        self.pending_ops
            .push(ComponentOp::SetEnabled(name.to_string(), enabled));
    }

    fn take_component_ops(&mut self) -> Vec<ComponentOp> {
        std::mem::take(&mut self.pending_ops)
    }
}

/// A concrete object living in a scene
pub struct GameObject {
    core: ObjectCore,
    components: Vec<ComponentSlot>,
    entity: Box<dyn Entity>,
}

impl GameObject {
    /// Create a game object from its entity behavior, transform and tag.
    ///
    /// Every object starts with the four reserved components: physics,
    /// hitbox recalculation, middle recalculation and the default
    /// accelerator, addressable under their reserved names.
    pub fn new(entity: impl Entity + 'static, transform: Transform, tag: impl Into<String>) -> Self {
        let mut object = Self {
            core: ObjectCore::new(transform, tag.into()),
            components: Vec::new(),
            entity: Box::new(entity),
        };
        object.add_component(PhysicsComponent::new(), PHYSICS_COMPONENT);
        object.add_component(RecalculateHitboxComponent, RECALCULATE_HITBOX_COMPONENT);
        object.add_component(RecalculateMiddleComponent, RECALCULATE_MIDDLE_COMPONENT);
        object.add_component(Accelerator::new(), DEFAULT_ACCELERATOR_COMPONENT);
        object
    }

    /// Wrap the object into the shared handle form scenes store
    pub fn into_handle(self) -> GameObjectHandle {
        Arc::new(Mutex::new(self))
    }

    /// The object's core state
    pub fn core(&self) -> &ObjectCore {
        &self.core
    }

    /// The object's core state, mutably
    pub fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    /// Append a component under the given name.
    ///
    /// Names are unique by convention only; no uniqueness check is performed
    /// and duplicates are dispatched in insertion order. Use
    /// [`replace_component`](Self::replace_component) for last-write-wins
    /// semantics.
    pub fn add_component(&mut self, component: impl Component + 'static, name: impl Into<String>) {
        self.components
            .push(ComponentSlot::new(name.into(), Box::new(component)));
    }

    /// Remove every component with the given name, immediately
    pub fn remove_component(&mut self, name: &str) {
        self.components.retain(|slot| slot.name != name);
    }

    /// Remove every component with the given name, then add the replacement
    pub fn replace_component(&mut self, component: impl Component + 'static, name: &str) {
        self.remove_component(name);
        self.add_component(component, name.to_string());
    }

    /// Whether a component with the given name is attached
    pub fn has_component(&self, name: &str) -> bool {
        self.components.iter().any(|slot| slot.name == name)
    }

    /// Enable or disable every component with the given name
    pub fn set_component_enabled(&mut self, name: &str, enabled: bool) {
        for slot in &mut self.components {
            if slot.name == name {
                slot.enabled = enabled;
            }
        }
    }

    /// Names of the attached components, in insertion order
    pub fn component_names(&self) -> Vec<String> {
        self.components.iter().map(|slot| slot.name.clone()).collect()
    }

    /// Dispatch `on_fixed_tick` to every enabled component in insertion
    /// order, then apply structural requests queued during the pass
    pub fn do_component_fixed_tick(&mut self) {
        for slot in &mut self.components {
            if slot.enabled {
                slot.component.on_fixed_tick(&mut self.core);
            }
        }
        self.apply_component_ops();
    }

    /// Dispatch `draw` to every enabled component in insertion order; called
    /// after the object's own `draw`
    pub fn do_component_drawing(&mut self, g: &mut Graphics) {
        for slot in &mut self.components {
            if slot.enabled {
                slot.component.draw(&self.core, g);
            }
        }
    }

    /// Test this object against every other object in the scene.
    ///
    /// For each overlap: computes the directional relation, dispatches the
    /// entity's `on_collision` followed by every enabled component's, and
    /// records those components' names into `collision_components` once per
    /// colliding pair; a component colliding with several others is
    /// intentionally recorded once per pair. For each non-overlap the
    /// physics component receives one
    /// empty-relation event so it can reset transient collision state.
    ///
    /// Finishes with exactly one `on_collision_detection_finish` carrying all
    /// of this tick's events.
    pub fn do_collision_detection(
        &mut self,
        self_handle: &GameObjectHandle,
        objects: &Snapshot<Mutex<GameObject>>,
        collision_components: &mut Vec<String>,
    ) {
        let mut collisions: Vec<CollisionEvent> = Vec::new();

        for other in objects {
            if Arc::ptr_eq(self_handle, other) {
                continue;
            }

            let (other_hitbox, other_transform, other_tag) = {
                let guard = lock_or_recover(other);
                (
                    guard.core.hitbox().clone(),
                    guard.core.transform().clone(),
                    guard.core.tag().to_string(),
                )
            };

            if self.core.hitbox().collides(&other_hitbox) {
                let sides = relation(self.core.transform(), &other_transform);
                let event = CollisionEvent::new(Arc::clone(other), other_tag, sides);

                self.entity.on_collision(&mut self.core, &event);
                for slot in &mut self.components {
                    if slot.enabled {
                        slot.component.on_collision(&mut self.core, &event);
                        collision_components.push(slot.name.clone());
                    }
                }
                collisions.push(event);
            } else {
                let event =
                    CollisionEvent::new(Arc::clone(other), other_tag, DirectionSet::empty());
                for slot in &mut self.components {
                    if slot.enabled && slot.name == PHYSICS_COMPONENT {
                        slot.component.on_collision(&mut self.core, &event);
                    }
                }
            }
        }

        self.entity
            .on_collision_detection_finish(&mut self.core, &collisions);
        self.apply_component_ops();
    }

    /// Fire the entity's one-time initialization
    pub fn initialize(&mut self) {
        self.entity.initialize(&mut self.core);
        self.apply_component_ops();
    }

    /// Fire the entity's fixed-tick hook.
    ///
    /// Structural requests the hook queued are applied before returning, so
    /// they are in effect for the next pass that touches this object.
    pub fn on_fixed_tick(&mut self) {
        self.entity.on_fixed_tick(&mut self.core);
        self.apply_component_ops();
    }

    /// Fire the entity's variable-rate tick hook
    pub fn on_tick(&mut self) {
        self.entity.on_tick(&mut self.core);
        self.apply_component_ops();
    }

    /// Draw the object itself (components draw separately, afterwards)
    pub fn draw(&mut self, g: &mut Graphics) {
        self.entity.draw(&self.core, g);
    }

    fn apply_component_ops(&mut self) {
        for op in self.core.take_component_ops() {
            match op {
                ComponentOp::Add(slot) => self.components.push(slot),
                ComponentOp::Remove(name) => self.components.retain(|slot| slot.name != name),
                ComponentOp::SetEnabled(name, enabled) => {
                    for slot in &mut self.components {
                        if slot.name == name {
                            slot.enabled = enabled;
                        }
                    }
                }
            }
        }
    }
}
