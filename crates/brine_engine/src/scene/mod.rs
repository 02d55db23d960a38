//! Scenes: what the engine simulates and draws
//!
//! A [`Scene`] owns game objects, fixed tasks, drawing routines and an
//! optional UI system, all in copy-on-write lists: every pass iterates a
//! snapshot taken at its start, so registrations and removals made mid-pass
//! apply from the next pass on.
//!
//! Per fixed tick, the order is fixed tasks, collision detection, the object
//! pass (components before the entity), then the UI. Per draw, it is
//! pre-object routines, objects (each followed by its components), the UI,
//! then post-object routines.

mod layers;
mod tasks;

pub use layers::LayerCollection;
pub use tasks::{DrawingPosition, DrawingRoutine, FixedTask};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;

use crate::foundation::collections::{lock_or_recover, Snapshot, SnapshotList};
use crate::foundation::math::Vec2;
use crate::geom::Axis;
use crate::object::{GameObject, GameObjectHandle};
use crate::render::Graphics;
use crate::ui::UiSystem;

/// A simulation space the engine can activate
pub struct Scene {
    game_objects: SnapshotList<Mutex<GameObject>>,
    fixed_tasks: SnapshotList<dyn FixedTask>,
    drawing_routines: SnapshotList<DrawingRoutine>,
    ui: Mutex<Option<Arc<UiSystem>>>,
    camera_delta: Mutex<Vec2>,
    initialized: AtomicBool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self {
            game_objects: SnapshotList::new(),
            fixed_tasks: SnapshotList::new(),
            drawing_routines: SnapshotList::new(),
            ui: Mutex::new(None),
            camera_delta: Mutex::new(Vec2::new(0.0, 0.0)),
            initialized: AtomicBool::new(false),
        }
    }

    /// Add a game object and return the shared handle it is stored under.
    ///
    /// If the scene has already been initialized, the object is initialized
    /// immediately; otherwise it is initialized with the scene.
    pub fn add_game_object(&self, object: GameObject) -> GameObjectHandle {
        let handle = object.into_handle();
        self.add_game_object_handle(Arc::clone(&handle));
        handle
    }

    /// Add an already-shared game object handle
    pub fn add_game_object_handle(&self, handle: GameObjectHandle) {
        if self.initialized.load(Ordering::SeqCst) {
            lock_or_recover(&handle).initialize();
        }
        self.game_objects.push(handle);
    }

    /// Remove a game object by handle identity.
    ///
    /// A pass already running keeps its snapshot; the object is gone from the
    /// next pass on.
    pub fn remove_game_object(&self, handle: &GameObjectHandle) {
        let target = Arc::as_ptr(handle);
        self.game_objects.retain(|object| !std::ptr::eq(object, target));
    }

    /// Remove every game object
    pub fn clear_game_objects(&self) {
        self.game_objects.clear();
    }

    /// Snapshot of the current game objects
    pub fn game_objects(&self) -> Snapshot<Mutex<GameObject>> {
        self.game_objects.snapshot()
    }

    /// Number of game objects currently registered
    pub fn game_object_count(&self) -> usize {
        self.game_objects.len()
    }

    /// Register a fixed task, run at the start of every fixed tick
    pub fn add_fixed_task(&self, task: impl FixedTask + 'static) {
        self.fixed_tasks.push(Arc::new(task));
    }

    /// Register a drawing routine
    pub fn add_drawing_routine(&self, routine: DrawingRoutine) {
        self.drawing_routines.push(Arc::new(routine));
    }

    /// Attach a UI system, replacing any previous one
    pub fn set_ui(&self, ui: Arc<UiSystem>) {
        *lock_or_recover(&self.ui) = Some(ui);
    }

    /// The attached UI system, if any
    pub fn ui(&self) -> Option<Arc<UiSystem>> {
        lock_or_recover(&self.ui).clone()
    }

    /// Initialize every game object exactly once.
    ///
    /// Subsequent calls are no-ops; objects added after the first call are
    /// initialized on addition instead.
    pub fn init_game_objects(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!("initializing {} game object(s)", self.game_objects.len());
        for object in &self.game_objects.snapshot() {
            lock_or_recover(object).initialize();
        }
    }

    /// Whether [`init_game_objects`](Self::init_game_objects) has run
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Advance the scene by one fixed tick
    pub fn on_fixed_tick(&self) {
        for task in &self.fixed_tasks.snapshot() {
            task.on_fixed_tick();
        }

        self.do_collision_detection();

        for object in &self.game_objects.snapshot() {
            let mut object = lock_or_recover(object);
            object.do_component_fixed_tick();
            object.on_fixed_tick();
        }

        if let Some(ui) = self.ui() {
            ui.on_fixed_tick();
        }
    }

    /// Test every pair of game objects for overlap and dispatch the
    /// resulting collision events
    pub fn do_collision_detection(&self) {
        let snapshot = self.game_objects.snapshot();
        let mut collision_components = Vec::new();
        for object in &snapshot {
            lock_or_recover(object).do_collision_detection(
                object,
                &snapshot,
                &mut collision_components,
            );
        }
    }

    /// Run the variable-rate tick on every game object
    pub fn on_tick(&self) {
        for object in &self.game_objects.snapshot() {
            lock_or_recover(object).on_tick();
        }
    }

    /// Draw the scene in phase order
    pub fn draw(&self, g: &mut Graphics) {
        let routines = self.drawing_routines.snapshot();

        for routine in &routines {
            if routine.position() == DrawingPosition::BeforeObjects {
                routine.draw(g);
            }
        }

        for object in &self.game_objects.snapshot() {
            let mut object = lock_or_recover(object);
            object.draw(g);
            object.do_component_drawing(g);
        }

        if let Some(ui) = self.ui() {
            ui.draw_ui(g);
        }

        for routine in &routines {
            if routine.position() == DrawingPosition::AfterObjects {
                routine.draw(g);
            }
        }
    }

    /// Shift every game object by `delta` along `axis`, accumulating the
    /// shift so [`reset_camera_position`](Self::reset_camera_position) can
    /// undo it
    pub fn move_camera(&self, axis: Axis, delta: f32) {
        for object in &self.game_objects.snapshot() {
            lock_or_recover(object).core_mut().basic_move(delta, axis);
        }
        let mut accumulated = lock_or_recover(&self.camera_delta);
        match axis {
            Axis::X => accumulated.x += delta,
            Axis::Y => accumulated.y += delta,
        }
    }

    /// The net camera shift applied since the last reset
    pub fn camera_delta(&self) -> Vec2 {
        *lock_or_recover(&self.camera_delta)
    }

    /// Undo the accumulated camera shift, returning every object to where it
    /// would be had the camera never moved
    pub fn reset_camera_position(&self) {
        let delta = {
            let mut accumulated = lock_or_recover(&self.camera_delta);
            std::mem::replace(&mut *accumulated, Vec2::new(0.0, 0.0))
        };
        for object in &self.game_objects.snapshot() {
            let mut object = lock_or_recover(object);
            object.core_mut().basic_move(-delta.x, Axis::X);
            object.core_mut().basic_move(-delta.y, Axis::Y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Transform;
    use crate::object::{CollisionEvent, Entity, ObjectCore};
    use approx::assert_relative_eq;

    struct LoggingEntity {
        log: Arc<Mutex<Vec<String>>>,
        id: &'static str,
    }

    impl LoggingEntity {
        fn record(&self, hook: &str) {
            self.log.lock().unwrap().push(format!("{}:{}", self.id, hook));
        }
    }

    impl Entity for LoggingEntity {
        fn initialize(&mut self, _core: &mut ObjectCore) {
            self.record("initialize");
        }

        fn on_collision(&mut self, _core: &mut ObjectCore, _event: &CollisionEvent) {
            self.record("collision");
        }

        fn on_fixed_tick(&mut self, _core: &mut ObjectCore) {
            self.record("fixed_tick");
        }

        fn on_tick(&mut self, _core: &mut ObjectCore) {
            self.record("tick");
        }

        fn draw(&mut self, _core: &ObjectCore, _g: &mut Graphics) {
            self.record("draw");
        }
    }

    struct LoggingUi {
        log: Arc<Mutex<Vec<String>>>,
    }

    impl crate::ui::UiElement for LoggingUi {
        fn on_fixed_tick(&mut self) {
            self.log.lock().unwrap().push("ui:fixed_tick".to_string());
        }

        fn draw(&mut self, _g: &mut Graphics) {
            self.log.lock().unwrap().push("ui:draw".to_string());
        }
    }

    fn logging_object(
        log: &Arc<Mutex<Vec<String>>>,
        id: &'static str,
        x: f32,
    ) -> GameObject {
        GameObject::new(
            LoggingEntity { log: Arc::clone(log), id },
            Transform::new(x, 0.0, 10.0, 10.0),
            id,
        )
    }

    fn taken(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    #[test]
    fn test_fixed_tick_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let scene = Scene::new();

        let task_log = Arc::clone(&log);
        scene.add_fixed_task(move || task_log.lock().unwrap().push("task".to_string()));
        scene.add_game_object(logging_object(&log, "a", 0.0));
        scene.add_game_object(logging_object(&log, "b", 5.0));

        let ui = Arc::new(UiSystem::new());
        ui.add_element(LoggingUi { log: Arc::clone(&log) });
        scene.set_ui(ui);

        scene.on_fixed_tick();

        // Tasks first, then the collision pass (the objects overlap), then
        // the per-object pass, then the UI.
        assert_eq!(
            taken(&log),
            vec![
                "task",
                "a:collision",
                "b:collision",
                "a:fixed_tick",
                "b:fixed_tick",
                "ui:fixed_tick",
            ]
        );
    }

    #[test]
    fn test_draw_phase_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let scene = Scene::new();

        let before_log = Arc::clone(&log);
        scene.add_drawing_routine(DrawingRoutine::new(
            DrawingPosition::BeforeObjects,
            move |_| before_log.lock().unwrap().push("before".to_string()),
        ));
        let after_log = Arc::clone(&log);
        scene.add_drawing_routine(DrawingRoutine::new(
            DrawingPosition::AfterObjects,
            move |_| after_log.lock().unwrap().push("after".to_string()),
        ));
        scene.add_game_object(logging_object(&log, "a", 0.0));

        let ui = Arc::new(UiSystem::new());
        ui.add_element(LoggingUi { log: Arc::clone(&log) });
        scene.set_ui(ui);

        let mut g = Graphics::new();
        scene.draw(&mut g);

        assert_eq!(taken(&log), vec!["before", "a:draw", "ui:draw", "after"]);
    }

    #[test]
    fn test_init_game_objects_runs_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let scene = Scene::new();
        scene.add_game_object(logging_object(&log, "a", 0.0));

        scene.init_game_objects();
        scene.init_game_objects();
        assert_eq!(taken(&log), vec!["a:initialize"]);

        // Objects added afterwards initialize immediately instead.
        scene.add_game_object(logging_object(&log, "b", 50.0));
        assert_eq!(taken(&log), vec!["b:initialize"]);
    }

    #[test]
    fn test_remove_game_object_by_handle() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let scene = Scene::new();
        let a = scene.add_game_object(logging_object(&log, "a", 0.0));
        let _b = scene.add_game_object(logging_object(&log, "b", 50.0));

        scene.remove_game_object(&a);
        assert_eq!(scene.game_object_count(), 1);
    }

    #[test]
    fn test_camera_round_trip_restores_positions() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let scene = Scene::new();
        let object = scene.add_game_object(logging_object(&log, "a", 10.0));

        scene.move_camera(Axis::X, 4.0);
        scene.move_camera(Axis::X, 3.0);
        scene.move_camera(Axis::Y, -2.0);
        assert_relative_eq!(lock_or_recover(&object).core().x(), 17.0);
        assert_eq!(scene.camera_delta(), Vec2::new(7.0, -2.0));

        scene.reset_camera_position();
        let guard = lock_or_recover(&object);
        assert_relative_eq!(guard.core().x(), 10.0);
        assert_relative_eq!(guard.core().y(), 0.0);
        assert_eq!(scene.camera_delta(), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_entity_removal_holds_for_the_next_collision_pass() {
        use crate::object::{Component, GameObjectHandle};
        use std::sync::atomic::{AtomicU32, Ordering};

        struct CollisionCounter {
            count: Arc<AtomicU32>,
        }

        impl Component for CollisionCounter {
            fn on_fixed_tick(&mut self, _owner: &mut crate::object::ObjectCore) {}

            fn on_collision(
                &mut self,
                _owner: &mut crate::object::ObjectCore,
                event: &CollisionEvent,
            ) {
                if event.is_overlap() {
                    self.count.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        struct RemovingEntity {
            target: &'static str,
        }

        impl Entity for RemovingEntity {
            fn initialize(&mut self, _core: &mut ObjectCore) {}
            fn on_collision(&mut self, _core: &mut ObjectCore, _event: &CollisionEvent) {}

            fn on_fixed_tick(&mut self, core: &mut ObjectCore) {
                core.remove_component(self.target);
            }

            fn on_tick(&mut self, _core: &mut ObjectCore) {}
            fn draw(&mut self, _core: &ObjectCore, _g: &mut Graphics) {}
        }

        let log = Arc::new(Mutex::new(Vec::new()));
        let scene = Scene::new();
        let count = Arc::new(AtomicU32::new(0));

        let mut object = GameObject::new(
            RemovingEntity { target: "victim" },
            Transform::new(0.0, 0.0, 10.0, 10.0),
            "a",
        );
        object.add_component(CollisionCounter { count: Arc::clone(&count) }, "victim");
        let handle: GameObjectHandle = scene.add_game_object(object);
        scene.add_game_object(logging_object(&log, "b", 5.0));

        // Tick 1: the collision pass reaches the component, then the entity
        // requests its removal.
        scene.on_fixed_tick();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!lock_or_recover(&handle).has_component("victim"));

        // Tick 2: the removal from tick 1 is in effect, so the component
        // sees no further collisions.
        scene.on_fixed_tick();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_on_tick_reaches_every_object() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let scene = Scene::new();
        scene.add_game_object(logging_object(&log, "a", 0.0));
        scene.add_game_object(logging_object(&log, "b", 50.0));

        scene.on_tick();
        assert_eq!(taken(&log), vec!["a:tick", "b:tick"]);
    }
}
