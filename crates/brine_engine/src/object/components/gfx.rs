//! Visual-effect components driven by the fixed clock

use std::sync::{Arc, Mutex};

use crate::foundation::collections::lock_or_recover;
use crate::foundation::math::lerp;
use crate::object::{Component, ObjectCore};
use crate::render::Color;
use crate::scene::{DrawingPosition, DrawingRoutine};

/// A scalar value animated along tick-indexed keyframes.
///
/// Values between keyframes are linearly interpolated; the animation holds
/// its last value once the final keyframe's tick is reached.
#[derive(Debug, Default, Clone)]
pub struct KeyframeAnimation {
    keyframes: Vec<(u64, f32)>,
    current_tick: u64,
    current_value: f32,
}

impl KeyframeAnimation {
    /// Create an empty animation
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyframe, keeping the keyframes ordered by tick.
    ///
    /// A keyframe at tick zero sets the starting value.
    pub fn add(&mut self, tick: u64, value: f32) {
        if tick == 0 && self.current_tick == 0 {
            self.current_value = value;
        }
        let index = self
            .keyframes
            .iter()
            .position(|&(t, _)| t > tick)
            .unwrap_or(self.keyframes.len());
        self.keyframes.insert(index, (tick, value));
    }

    /// Advance one tick and return the value change it produced
    pub fn next_delta(&mut self) -> f32 {
        if self.finished() {
            return 0.0;
        }
        self.current_tick += 1;
        let target = self.value_at(self.current_tick);
        let delta = target - self.current_value;
        self.current_value = target;
        delta
    }

    /// The value at the current tick
    pub fn value(&self) -> f32 {
        self.current_value
    }

    /// Whether the last keyframe has been reached
    pub fn finished(&self) -> bool {
        match self.keyframes.last() {
            Some(&(tick, _)) => self.current_tick >= tick,
            None => true,
        }
    }

    /// Rewind to tick zero
    pub fn restart(&mut self) {
        self.current_tick = 0;
        self.current_value = self.value_at(0);
    }

    fn value_at(&self, tick: u64) -> f32 {
        let mut previous: Option<(u64, f32)> = None;
        for &(frame_tick, value) in &self.keyframes {
            if frame_tick >= tick {
                return match previous {
                    Some((prev_tick, prev_value)) if frame_tick > prev_tick => {
                        let t = (tick - prev_tick) as f32 / (frame_tick - prev_tick) as f32;
                        lerp(prev_value, value, t)
                    }
                    _ => value,
                };
            }
            previous = Some((frame_tick, value));
        }
        previous.map_or(0.0, |(_, value)| value)
    }
}

/// Whether a [`SceneFade`] fades the scene in or out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// From fully covered to fully visible
    In,
    /// From fully visible to fully covered
    Out,
}

/// Default fade duration in fixed ticks
pub const DEFAULT_FADE_DURATION: u64 = 1500;

/// Fades the whole scene to or from a color by animating the alpha of a
/// full-surface overlay.
///
/// The component animates the alpha on the fixed clock; the overlay itself is
/// drawn by the [`DrawingRoutine`] obtained from
/// [`drawing_routine`](Self::drawing_routine), which must be registered on
/// the scene. The component removes itself from its owner once the fade has
/// finished.
pub struct SceneFade {
    name: String,
    direction: FadeDirection,
    color: Color,
    duration: u64,
    animation: KeyframeAnimation,
    alpha: f32,
    overlay: Arc<Mutex<Option<Color>>>,
    on_finish: Option<Box<dyn FnMut() + Send>>,
}

impl SceneFade {
    /// Create a fade registered under `name` (the name the component removes
    /// itself by)
    pub fn new(name: impl Into<String>, direction: FadeDirection, color: Color) -> Self {
        let mut fade = Self {
            name: name.into(),
            direction,
            color,
            duration: DEFAULT_FADE_DURATION,
            animation: KeyframeAnimation::new(),
            alpha: 0.0,
            overlay: Arc::new(Mutex::new(None)),
            on_finish: None,
        };
        fade.rebuild_animation();
        fade
    }

    /// Override the fade duration in fixed ticks
    #[must_use]
    pub fn with_duration(mut self, ticks: u64) -> Self {
        self.duration = ticks.max(1);
        self.rebuild_animation();
        self
    }

    /// Run a callback once when the fade finishes
    #[must_use]
    pub fn with_on_finish(mut self, on_finish: impl FnMut() + Send + 'static) -> Self {
        self.on_finish = Some(Box::new(on_finish));
        self
    }

    /// The drawing routine that paints the overlay; register it on the scene
    /// alongside attaching the component to an object
    pub fn drawing_routine(&self) -> DrawingRoutine {
        let overlay = Arc::clone(&self.overlay);
        DrawingRoutine::new(DrawingPosition::AfterObjects, move |g| {
            if let Some(color) = *lock_or_recover(&overlay) {
                g.set_color(color);
                g.clear();
            }
        })
    }

    /// The overlay color currently painted, if any
    pub fn overlay(&self) -> Option<Color> {
        *lock_or_recover(&self.overlay)
    }

    fn rebuild_animation(&mut self) {
        let (from, to) = match self.direction {
            FadeDirection::In => (255.0, 0.0),
            FadeDirection::Out => (0.0, 255.0),
        };
        let mut animation = KeyframeAnimation::new();
        animation.add(0, from);
        animation.add(self.duration, to);
        self.animation = animation;
        self.alpha = from;
    }
}

impl Component for SceneFade {
    fn on_fixed_tick(&mut self, owner: &mut ObjectCore) {
        self.alpha += self.animation.next_delta();
        let alpha = self.alpha.clamp(0.0, 255.0) as u8;
        *lock_or_recover(&self.overlay) = Some(self.color.with_alpha(alpha));

        if self.animation.finished() {
            if self.direction == FadeDirection::In {
                // Fully faded in: nothing left to paint.
                *lock_or_recover(&self.overlay) = None;
            }
            if let Some(mut on_finish) = self.on_finish.take() {
                on_finish();
            }
            owner.remove_component(&self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Transform;
    use approx::assert_relative_eq;

    #[test]
    fn test_animation_interpolates_between_keyframes() {
        let mut animation = KeyframeAnimation::new();
        animation.add(0, 0.0);
        animation.add(4, 8.0);

        let mut total = 0.0;
        for _ in 0..4 {
            let delta = animation.next_delta();
            assert_relative_eq!(delta, 2.0);
            total += delta;
        }
        assert_relative_eq!(total, 8.0);
        assert!(animation.finished());
        assert_relative_eq!(animation.next_delta(), 0.0);
    }

    #[test]
    fn test_animation_keyframes_sorted_by_tick() {
        let mut animation = KeyframeAnimation::new();
        animation.add(10, 20.0);
        animation.add(0, 0.0);
        animation.add(5, 5.0);

        for _ in 0..5 {
            animation.next_delta();
        }
        assert_relative_eq!(animation.value(), 5.0);
    }

    #[test]
    fn test_restart_rewinds() {
        let mut animation = KeyframeAnimation::new();
        animation.add(0, 1.0);
        animation.add(2, 3.0);
        animation.next_delta();
        animation.next_delta();
        assert!(animation.finished());

        animation.restart();
        assert!(!animation.finished());
        assert_relative_eq!(animation.value(), 1.0);
    }

    #[test]
    fn test_fade_out_reaches_full_cover_and_removes_itself() {
        let mut core =
            ObjectCore::new(Transform::new(0.0, 0.0, 10.0, 10.0), "probe".to_string());
        let mut fade =
            SceneFade::new("fade", FadeDirection::Out, Color::BLACK).with_duration(4);

        for _ in 0..4 {
            fade.on_fixed_tick(&mut core);
        }

        assert_eq!(fade.overlay(), Some(Color::BLACK));
        // Self-removal was queued on the owner.
        assert!(!core.pending_ops.is_empty());
    }

    #[test]
    fn test_fade_in_clears_overlay_and_fires_callback() {
        let mut core =
            ObjectCore::new(Transform::new(0.0, 0.0, 10.0, 10.0), "probe".to_string());
        let finished = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&finished);
        let mut fade = SceneFade::new("fade", FadeDirection::In, Color::BLACK)
            .with_duration(2)
            .with_on_finish(move || *flag.lock().unwrap() = true);

        fade.on_fixed_tick(&mut core);
        assert!(fade.overlay().is_some());
        assert!(!*finished.lock().unwrap());

        fade.on_fixed_tick(&mut core);
        assert!(fade.overlay().is_none());
        assert!(*finished.lock().unwrap());
    }

    #[test]
    fn test_drawing_routine_paints_overlay() {
        let mut core =
            ObjectCore::new(Transform::new(0.0, 0.0, 10.0, 10.0), "probe".to_string());
        let mut fade =
            SceneFade::new("fade", FadeDirection::Out, Color::RED).with_duration(2);
        let routine = fade.drawing_routine();

        let mut g = crate::render::Graphics::new();
        routine.draw(&mut g);
        assert!(g.commands().is_empty());

        fade.on_fixed_tick(&mut core);
        routine.draw(&mut g);
        assert_eq!(g.commands().len(), 1);
    }
}
