//! The two-clock engine core
//!
//! One thread drives the fixed simulation clock on a constant period; a
//! second drives the render clock, either uncapped or at a target frame
//! rate. The clocks never block each other: pausing stops only the
//! simulation from advancing, and closing stops only the render clock.
//! [`Engine::shutdown`] stops both and joins the threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::info;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::context::GameContext;
use crate::foundation::time::TimeState;
use crate::render::Repaintable;

/// Errors surfaced by engine lifecycle operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine's clocks are already running
    #[error("engine already started")]
    AlreadyStarted,

    /// A frame-rate cap of zero was requested
    #[error("invalid frame rate: {0} fps")]
    InvalidFrameRate(u32),

    /// Spawning a clock thread failed
    #[error("failed to spawn clock thread: {0}")]
    Thread(#[from] std::io::Error),
}

/// One fixed tick against the shared context: initialization is re-checked
/// (it is idempotent), and the simulation advances unless paused. The clock
/// itself never pauses.
pub(crate) fn fixed_tick_body(context: &GameContext) {
    context.initialize_active();
    if !context.is_paused() {
        context.fixed_tick_active();
    }
}

/// Drives a [`GameContext`] with a fixed simulation clock and a render clock
pub struct Engine {
    context: Arc<GameContext>,
    fixed_tick: Duration,
    target_fps: Option<u32>,
    close_requested: Arc<AtomicBool>,
    stop_requested: Arc<AtomicBool>,
    time: Arc<TimeState>,
    fixed_thread: Option<JoinHandle<()>>,
    render_thread: Option<JoinHandle<()>>,
    started: bool,
}

impl Engine {
    /// Create an engine around a context.
    ///
    /// The config's `fixed_tick_millis` sets the simulation period; its
    /// `target_fps`, when set, is applied by [`start`](Self::start) as if
    /// [`start_capped`](Self::start_capped) had been called.
    pub fn new(context: Arc<GameContext>, config: EngineConfig) -> Self {
        Self {
            context,
            fixed_tick: Duration::from_millis(config.fixed_tick_millis.max(1)),
            target_fps: config.target_fps,
            close_requested: Arc::new(AtomicBool::new(false)),
            stop_requested: Arc::new(AtomicBool::new(false)),
            time: Arc::new(TimeState::new()),
            fixed_thread: None,
            render_thread: None,
            started: false,
        }
    }

    /// Frame timing recorded by the render clock
    pub fn time(&self) -> &Arc<TimeState> {
        &self.time
    }

    /// The context the engine drives
    pub fn context(&self) -> &Arc<GameContext> {
        &self.context
    }

    /// Start both clocks, rendering as fast as the host allows (or at the
    /// configured `target_fps`, if one was set)
    pub fn start(&mut self, host: Arc<dyn Repaintable>) -> Result<(), EngineError> {
        match self.target_fps {
            Some(fps) => self.start_capped(host, fps),
            None => self.start_clocks(host, None),
        }
    }

    /// Start both clocks with the render clock capped at `fps`
    pub fn start_capped(&mut self, host: Arc<dyn Repaintable>, fps: u32) -> Result<(), EngineError> {
        if fps == 0 {
            return Err(EngineError::InvalidFrameRate(fps));
        }
        self.start_clocks(host, Some(fps))
    }

    fn start_clocks(
        &mut self,
        host: Arc<dyn Repaintable>,
        fps: Option<u32>,
    ) -> Result<(), EngineError> {
        if self.started {
            return Err(EngineError::AlreadyStarted);
        }
        self.started = true;

        info!(
            "starting engine: fixed tick {:?}, render {}",
            self.fixed_tick,
            fps.map_or_else(|| "uncapped".to_string(), |fps| format!("{fps} fps")),
        );

        let fixed_tick = self.fixed_tick;
        let context = Arc::clone(&self.context);
        let stop = Arc::clone(&self.stop_requested);
        self.fixed_thread = Some(
            thread::Builder::new()
                .name("fixed-clock".to_string())
                .spawn(move || {
                    let mut next = Instant::now() + fixed_tick;
                    while !stop.load(Ordering::SeqCst) {
                        let now = Instant::now();
                        if now < next {
                            thread::sleep(next - now);
                        }
                        next += fixed_tick;
                        fixed_tick_body(&context);
                    }
                })?,
        );

        let context = Arc::clone(&self.context);
        let close = Arc::clone(&self.close_requested);
        let stop = Arc::clone(&self.stop_requested);
        let time = Arc::clone(&self.time);
        let frame_time = fps.map(|fps| Duration::from_millis(u64::from(1000 / fps).max(1)));
        self.render_thread = Some(
            thread::Builder::new()
                .name("render-clock".to_string())
                .spawn(move || {
                    let mut last = Instant::now();
                    while !close.load(Ordering::SeqCst) && !stop.load(Ordering::SeqCst) {
                        host.repaint();
                        context.tick_active();

                        let now = Instant::now();
                        time.record_frame(now - last);
                        last = now;

                        match frame_time {
                            Some(frame_time) => thread::sleep(frame_time),
                            None => thread::yield_now(),
                        }
                    }
                    info!("render clock stopped");
                })?,
        );

        Ok(())
    }

    /// Stop the render clock after its current frame.
    ///
    /// The simulation clock keeps ticking; use [`shutdown`](Self::shutdown)
    /// to stop everything.
    pub fn close(&self) {
        self.close_requested.store(true, Ordering::SeqCst);
    }

    /// Whether [`close`](Self::close) has been requested
    pub fn is_close_requested(&self) -> bool {
        self.close_requested.load(Ordering::SeqCst)
    }

    /// Stop both clocks and wait for their threads to finish
    pub fn shutdown(&mut self) {
        if !self.started {
            return;
        }
        self.stop_requested.store(true, Ordering::SeqCst);
        self.close_requested.store(true, Ordering::SeqCst);
        if let Some(handle) = self.fixed_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.render_thread.take() {
            let _ = handle.join();
        }
        info!("engine shut down");
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use std::sync::atomic::AtomicU64;

    struct Headless;

    impl Repaintable for Headless {
        fn repaint(&self) {}
    }

    struct CountingHost {
        frames: AtomicU64,
    }

    impl Repaintable for CountingHost {
        fn repaint(&self) {
            self.frames.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counting_context() -> (Arc<GameContext>, Arc<AtomicU64>) {
        let ticks = Arc::new(AtomicU64::new(0));
        let scene = Scene::new();
        let counter = Arc::clone(&ticks);
        scene.add_fixed_task(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (GameContext::with_scene(scene), ticks)
    }

    #[test]
    fn test_paused_firings_still_initialize() {
        let scene = Scene::new();
        let context = GameContext::with_scene(scene);
        context.pause();

        fixed_tick_body(&context);

        let crate::context::DisplayMode::Scene(scene) = context.mode() else {
            panic!("expected scene mode");
        };
        assert!(scene.is_initialized());
    }

    #[test]
    fn test_pause_freezes_simulation_deterministically() {
        let (context, ticks) = counting_context();

        for _ in 0..5 {
            fixed_tick_body(&context);
        }
        assert_eq!(ticks.load(Ordering::SeqCst), 5);

        context.pause();
        for _ in 0..5 {
            fixed_tick_body(&context);
        }
        assert_eq!(ticks.load(Ordering::SeqCst), 5);

        context.resume();
        fixed_tick_body(&context);
        assert_eq!(ticks.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_clocks_run_and_shut_down() {
        let (context, ticks) = counting_context();
        let mut engine = Engine::new(context, EngineConfig::default());
        let host = Arc::new(CountingHost { frames: AtomicU64::new(0) });

        engine.start(Arc::clone(&host) as Arc<dyn Repaintable>).unwrap();
        thread::sleep(Duration::from_millis(50));
        engine.shutdown();

        assert!(ticks.load(Ordering::SeqCst) > 0, "fixed clock never ticked");
        assert!(host.frames.load(Ordering::SeqCst) > 0, "render clock never ticked");
        assert!(engine.time().frame_count() > 0);
    }

    #[test]
    fn test_close_stops_only_the_render_clock() {
        let (context, ticks) = counting_context();
        let mut engine = Engine::new(context, EngineConfig::default());

        engine.start(Arc::new(Headless)).unwrap();
        engine.close();
        thread::sleep(Duration::from_millis(30));

        let after_close = ticks.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(30));
        assert!(
            ticks.load(Ordering::SeqCst) > after_close,
            "fixed clock should outlive close()"
        );

        engine.shutdown();
    }

    #[test]
    fn test_double_start_is_rejected() {
        let (context, _ticks) = counting_context();
        let mut engine = Engine::new(context, EngineConfig::default());

        engine.start(Arc::new(Headless)).unwrap();
        assert!(matches!(
            engine.start(Arc::new(Headless)),
            Err(EngineError::AlreadyStarted)
        ));

        engine.shutdown();
    }

    #[test]
    fn test_zero_fps_cap_is_rejected() {
        let (context, _ticks) = counting_context();
        let mut engine = Engine::new(context, EngineConfig::default());

        assert!(matches!(
            engine.start_capped(Arc::new(Headless), 0),
            Err(EngineError::InvalidFrameRate(0))
        ));
    }
}
