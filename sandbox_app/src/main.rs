//! Sandbox demo application
//!
//! Builds a small scene (a crate bouncing between two walls), runs the
//! engine headless for a couple of seconds with a console host, then shuts
//! down. Useful as a smoke test and as a minimal usage example.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use brine_engine::prelude::*;

/// Moves along its heading every fixed tick and turns around when it runs
/// into something on that side.
struct Bouncer {
    heading: Direction,
    speed: f32,
    bounces: u64,
}

impl Entity for Bouncer {
    fn initialize(&mut self, core: &mut ObjectCore) {
        log::info!(
            "bouncer `{}` starting at ({:.0}, {:.0})",
            core.tag(),
            core.x(),
            core.y()
        );
    }

    fn on_collision(&mut self, core: &mut ObjectCore, event: &CollisionEvent) {
        if event.relation().has(self.heading) {
            self.heading = self.heading.opposite();
            self.bounces += 1;
            log::debug!(
                "`{}` bounced off `{}` (bounce #{})",
                core.tag(),
                event.other_tag(),
                self.bounces
            );
        }
    }

    fn on_fixed_tick(&mut self, core: &mut ObjectCore) {
        core.move_by(self.speed, self.heading);
    }

    fn on_tick(&mut self, _core: &mut ObjectCore) {}

    fn draw(&mut self, core: &ObjectCore, g: &mut Graphics) {
        g.set_color(Color::WHITE);
        g.fill_rect(core.transform().rect());
    }
}

/// Static obstacle
struct Wall;

impl Entity for Wall {
    fn initialize(&mut self, _core: &mut ObjectCore) {}
    fn on_collision(&mut self, _core: &mut ObjectCore, _event: &CollisionEvent) {}
    fn on_fixed_tick(&mut self, _core: &mut ObjectCore) {}
    fn on_tick(&mut self, _core: &mut ObjectCore) {}

    fn draw(&mut self, core: &ObjectCore, g: &mut Graphics) {
        g.set_color(Color::GREEN);
        g.outline_rect(core.transform().rect());
    }
}

/// Render host that draws the active scene into a command buffer and logs a
/// summary every so often instead of pushing pixels anywhere.
struct ConsoleHost {
    context: Arc<GameContext>,
    frames: AtomicU64,
}

impl Repaintable for ConsoleHost {
    fn repaint(&self) {
        let frame = self.frames.fetch_add(1, Ordering::Relaxed) + 1;
        if frame % 60 == 0 {
            let mut g = Graphics::new();
            self.context.draw_active(&mut g);
            log::debug!("frame {frame}: {} draw command(s)", g.commands().len());
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    brine_engine::foundation::logging::init();

    let scene = Scene::new();
    scene.add_game_object(GameObject::new(
        Wall,
        Transform::new(-16.0, 0.0, 16.0, 128.0),
        "left-wall",
    ));
    scene.add_game_object(GameObject::new(
        Wall,
        Transform::new(128.0, 0.0, 16.0, 128.0),
        "right-wall",
    ));
    scene.add_game_object(GameObject::new(
        Bouncer {
            heading: Direction::Right,
            speed: 1.0,
            bounces: 0,
        },
        Transform::new(56.0, 56.0, 16.0, 16.0),
        "crate",
    ));

    let context = GameContext::with_scene(scene);
    let config = EngineConfig::default()
        .with_fixed_tick_millis(2)
        .with_target_fps(60);
    config.validate()?;

    let host = Arc::new(ConsoleHost {
        context: Arc::clone(&context),
        frames: AtomicU64::new(0),
    });

    let mut engine = Engine::new(Arc::clone(&context), config);
    engine.start(Arc::clone(&host) as Arc<dyn Repaintable>)?;

    std::thread::sleep(Duration::from_secs(2));

    log::info!(
        "rendered {} frame(s), average {:.1} fps",
        host.frames.load(Ordering::Relaxed),
        engine.time().average_fps()
    );
    engine.shutdown();
    Ok(())
}
