//! Force integration and collision response

use crate::object::{CollisionEvent, Component, ObjectCore};

/// Reserved component that turns the owner's forces into movement.
///
/// Each fixed tick, every force's velocity is advanced by its acceleration
/// and applied as a position delta along the force's direction. Forces
/// pushing into a direction blocked by this tick's collisions are zeroed
/// instead of applied. The per-tick collision state is dropped at the end of
/// the tick, so blocks never outlive the tick that produced them.
#[derive(Debug, Default)]
pub struct PhysicsComponent;

impl PhysicsComponent {
    /// Create the physics component
    pub fn new() -> Self {
        Self
    }
}

impl Component for PhysicsComponent {
    fn on_fixed_tick(&mut self, owner: &mut ObjectCore) {
        let blocked = owner.forces().blocked();

        let mut moves = Vec::new();
        for force in owner.forces_mut().iter_mut() {
            if blocked.has(force.direction()) {
                force.set_velocity(0.0);
                continue;
            }
            force.set_velocity(force.velocity() + force.acceleration());
            if force.velocity() != 0.0 {
                moves.push((force.velocity(), force.direction()));
            }
        }

        for (velocity, direction) in moves {
            if velocity >= 0.0 {
                owner.move_by(velocity, direction);
            } else {
                // A negative velocity pushes away from the force's direction.
                owner.move_by(-velocity, direction.opposite());
            }
        }

        owner.forces_mut().reset_tick_state();
    }

    fn on_collision(&mut self, owner: &mut ObjectCore, event: &CollisionEvent) {
        if event.is_overlap() {
            owner.forces_mut().block(event.relation());
        } else {
            owner.forces_mut().record_clearance();
        }
    }
}
