//! Reserved components keeping derived spatial state in sync

use crate::object::{Component, ObjectCore};

/// Re-derives the owner's hitbox position from its transform every fixed
/// tick, so hooks later in the pass (and the next collision pass) see a
/// hitbox matching the current position
#[derive(Debug, Default)]
pub struct RecalculateHitboxComponent;

impl Component for RecalculateHitboxComponent {
    fn on_fixed_tick(&mut self, owner: &mut ObjectCore) {
        owner.recalculate_hitbox();
    }
}

/// Recomputes the owner's cached center point every fixed tick
#[derive(Debug, Default)]
pub struct RecalculateMiddleComponent;

impl Component for RecalculateMiddleComponent {
    fn on_fixed_tick(&mut self, owner: &mut ObjectCore) {
        owner.recalculate_middle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::geom::Transform;
    use approx::assert_relative_eq;

    #[test]
    fn test_hitbox_follows_transform() {
        let mut core =
            ObjectCore::new(Transform::new(0.0, 0.0, 10.0, 10.0), "probe".to_string());
        core.set_x(25.0);
        assert_relative_eq!(core.hitbox().position().x, 0.0);

        RecalculateHitboxComponent.on_fixed_tick(&mut core);
        assert_relative_eq!(core.hitbox().position().x, 25.0);
    }

    #[test]
    fn test_middle_follows_transform() {
        let mut core =
            ObjectCore::new(Transform::new(0.0, 0.0, 10.0, 10.0), "probe".to_string());
        core.set_position(Vec2::new(10.0, 20.0));

        RecalculateMiddleComponent.on_fixed_tick(&mut core);
        assert_eq!(core.middle(), Vec2::new(15.0, 25.0));
    }
}
