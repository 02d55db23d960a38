//! Named forces driving the built-in physics component
//!
//! Units are tick-based: an acceleration of `a` adds `a` to the force's
//! velocity every fixed tick, and the velocity is applied as a per-tick
//! position delta along the force's direction.

use crate::geom::{Direction, DirectionSet};

/// Reserved name of the gravity force every object starts with
pub const GRAVITY_FORCE: &str = "brine.core.gravity";

/// A single directed force with per-tick acceleration and velocity
#[derive(Debug, Clone)]
pub struct Force {
    name: String,
    direction: Direction,
    acceleration: f32,
    velocity: f32,
}

impl Force {
    fn new(name: String, direction: Direction) -> Self {
        Self {
            name,
            direction,
            acceleration: 0.0,
            velocity: 0.0,
        }
    }

    /// The force's registration name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The direction the force pushes towards
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current per-tick acceleration
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Set the per-tick acceleration
    pub fn set_acceleration(&mut self, acceleration: f32) {
        self.acceleration = acceleration;
    }

    /// Current per-tick velocity
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Set the per-tick velocity
    pub fn set_velocity(&mut self, velocity: f32) {
        self.velocity = velocity;
    }
}

struct TimedAcceleration {
    force: String,
    remaining: u64,
}

/// The set of forces acting on one game object, plus the transient collision
/// state the physics component derives movement from.
///
/// Lives in the object's core so that the physics component, the accelerator
/// and user code all manipulate it through the owner's accessors.
pub struct ForceSet {
    forces: Vec<Force>,
    timed: Vec<TimedAcceleration>,
    blocked: DirectionSet,
    clearances: u32,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceSet {
    /// Create a force set with the default gravity force (pointing down,
    /// acceleration zero until enabled)
    pub fn new() -> Self {
        let mut set = Self {
            forces: Vec::new(),
            timed: Vec::new(),
            blocked: DirectionSet::empty(),
            clearances: 0,
        };
        set.add_force(GRAVITY_FORCE, Direction::Down);
        set
    }

    /// Register a new force
    pub fn add_force(&mut self, name: impl Into<String>, direction: Direction) {
        self.forces.push(Force::new(name.into(), direction));
    }

    /// Look up a force by name
    pub fn force(&self, name: &str) -> Option<&Force> {
        self.forces.iter().find(|f| f.name == name)
    }

    /// Look up a force by name, mutably
    pub fn force_mut(&mut self, name: &str) -> Option<&mut Force> {
        self.forces.iter_mut().find(|f| f.name == name)
    }

    /// Set a force's acceleration; returns whether the force exists
    pub fn set_acceleration(&mut self, name: &str, acceleration: f32) -> bool {
        if let Some(force) = self.force_mut(name) {
            force.set_acceleration(acceleration);
            true
        } else {
            false
        }
    }

    /// Set a force's acceleration for a limited number of fixed ticks, after
    /// which the accelerator component resets it to zero.
    ///
    /// Returns whether the force exists.
    pub fn accelerate(&mut self, name: &str, acceleration: f32, duration_ticks: u64) -> bool {
        if !self.set_acceleration(name, acceleration) {
            return false;
        }
        self.timed.push(TimedAcceleration {
            force: name.to_string(),
            remaining: duration_ticks,
        });
        true
    }

    /// Advance every timed acceleration by one tick, zeroing expired ones.
    ///
    /// Driven by the accelerator component; nothing counts down while that
    /// component is disabled or removed.
    pub(crate) fn tick_accelerations(&mut self) {
        let mut expired = Vec::new();
        for timed in &mut self.timed {
            timed.remaining = timed.remaining.saturating_sub(1);
            if timed.remaining == 0 {
                expired.push(timed.force.clone());
            }
        }
        self.timed.retain(|t| t.remaining > 0);
        for name in expired {
            self.set_acceleration(&name, 0.0);
        }
    }

    /// Iterate over the registered forces
    pub fn iter(&self) -> std::slice::Iter<'_, Force> {
        self.forces.iter()
    }

    /// Iterate over the registered forces, mutably
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Force> {
        self.forces.iter_mut()
    }

    /// Mark directions as blocked by a collision this tick and kill any
    /// velocity pushing into them
    pub fn block(&mut self, directions: DirectionSet) {
        self.blocked |= directions;
        for force in &mut self.forces {
            if directions.has(force.direction) {
                force.velocity = 0.0;
            }
        }
    }

    /// Directions blocked by collisions this tick
    pub fn blocked(&self) -> DirectionSet {
        self.blocked
    }

    /// Record one "no collision" notification received this tick
    pub(crate) fn record_clearance(&mut self) {
        self.clearances += 1;
    }

    /// Number of "no collision" notifications received this tick
    pub fn clearances(&self) -> u32 {
        self.clearances
    }

    /// Drop the per-tick collision state; called by the physics component at
    /// the end of its fixed tick
    pub(crate) fn reset_tick_state(&mut self) {
        self.blocked = DirectionSet::empty();
        self.clearances = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gravity_force_registered_by_default() {
        let forces = ForceSet::new();
        let gravity = forces.force(GRAVITY_FORCE).unwrap();
        assert_eq!(gravity.direction(), Direction::Down);
        assert_relative_eq!(gravity.acceleration(), 0.0);
    }

    #[test]
    fn test_set_acceleration_unknown_force() {
        let mut forces = ForceSet::new();
        assert!(!forces.set_acceleration("nope", 1.0));
    }

    #[test]
    fn test_timed_acceleration_expires() {
        let mut forces = ForceSet::new();
        forces.add_force("thrust", Direction::Right);
        assert!(forces.accelerate("thrust", 0.5, 2));
        assert_relative_eq!(forces.force("thrust").unwrap().acceleration(), 0.5);

        forces.tick_accelerations();
        assert_relative_eq!(forces.force("thrust").unwrap().acceleration(), 0.5);

        forces.tick_accelerations();
        assert_relative_eq!(forces.force("thrust").unwrap().acceleration(), 0.0);
    }

    #[test]
    fn test_block_zeroes_velocity_towards_blocked_side() {
        let mut forces = ForceSet::new();
        forces.add_force("thrust", Direction::Right);
        forces.force_mut("thrust").unwrap().set_velocity(3.0);
        forces.force_mut(GRAVITY_FORCE).unwrap().set_velocity(2.0);

        forces.block(DirectionSet::RIGHT);

        assert_relative_eq!(forces.force("thrust").unwrap().velocity(), 0.0);
        assert_relative_eq!(forces.force(GRAVITY_FORCE).unwrap().velocity(), 2.0);
        assert!(forces.blocked().has(Direction::Right));
    }

    #[test]
    fn test_reset_tick_state() {
        let mut forces = ForceSet::new();
        forces.block(DirectionSet::DOWN);
        forces.record_clearance();

        forces.reset_tick_state();

        assert!(forces.blocked().is_empty());
        assert_eq!(forces.clearances(), 0);
    }
}
