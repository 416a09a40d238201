use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, Lifecycle, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{self, Action};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Client area size used in windowed mode.
    pub initial_size: PhysicalSize<u32>,
    /// Start in borderless fullscreen on the current monitor.
    pub fullscreen: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            initial_size: PhysicalSize::new(1366, 768),
            fullscreen: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU, hands it to `app.setup`, and
    /// drives frames until the user quits.
    ///
    /// Returns the first setup or loop failure. Resources are released in
    /// reverse order of creation before this returns.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        let loop_result = event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error");

        state.teardown(loop_result)
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,

    // Scene resources live in the app and go before the device they came from.
    app: A,
    entry: Option<WindowEntry>,

    lifecycle: Lifecycle,
    frame_index: u64,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            lifecycle: Lifecycle::new(),
            frame_index: 0,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        if !self.lifecycle.should_exit() {
            self.lifecycle.shutdown();
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.lifecycle.fail(err);
        event_loop.exit();
    }

    /// Window + device, in that order.
    fn create_window_entry(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let fullscreen = self.config.fullscreen.then_some(Fullscreen::Borderless(None));
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_fullscreen(fullscreen);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn apply_action(&mut self, event_loop: &ActiveEventLoop, action: Action) {
        match action {
            Action::Quit => {
                log::info!("quit requested");
                self.request_exit(event_loop);
            }
            Action::ToggleFullscreen => {
                if let Some(entry) = &self.entry {
                    entry.with_window(|w| {
                        let next = toggled_fullscreen(w.fullscreen());
                        log::info!("fullscreen: {}", next.is_some());
                        w.set_fullscreen(next);
                    });
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.draw_frame() == Some(AppControl::Exit) {
            self.request_exit(event_loop);
        }
    }

    /// Runs `on_frame` once. `None` when no frame is drawn: the loop is not
    /// running yet (or any more), or there is no window.
    fn draw_frame(&mut self) -> Option<AppControl> {
        if !self.lifecycle.is_running() {
            return None;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry, frame_index) = (&mut self.app, &mut self.entry, self.frame_index);
        let entry = entry.as_mut()?;

        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    window: fields.window,
                },
                gpu: fields.gpu,
                frame_index,
            };
            app.on_frame(&mut ctx)
        });

        self.frame_index += 1;
        Some(control)
    }

    /// Releases scene resources, then the device and window, and reports the run.
    fn teardown(self, loop_result: Result<()>) -> Result<()> {
        let AppState {
            app,
            entry,
            mut lifecycle,
            frame_index,
            ..
        } = self;

        if let Err(err) = loop_result {
            lifecycle.fail(err);
        } else if !lifecycle.should_exit() {
            lifecycle.shutdown();
        }

        drop(app);
        drop(entry);

        lifecycle.terminate();
        log::info!("shut down after {frame_index} frames");
        lifecycle.finish()
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.lifecycle.should_exit() {
            return;
        }

        let entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(err) => return self.fail(event_loop, err),
        };
        self.lifecycle.initialized();

        entry.with_gpu(|gpu| {
            let info = gpu.adapter_info();
            log::info!(
                "device ready: {} ({:?}), {:?}, {:?}",
                info.name,
                info.backend,
                gpu.surface_format(),
                gpu.present_mode()
            );
        });

        let app = &mut self.app;
        if let Err(err) = entry.with_gpu(|gpu| app.setup(gpu)) {
            self.entry = Some(entry);
            return self.fail(event_loop, err.context("scene setup failed"));
        }

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
        self.lifecycle.running();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.should_exit() {
            event_loop.exit();
            return;
        }

        // Continuous redraw; the loop never blocks on events.
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.lifecycle.should_exit() {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.request_exit(event_loop);
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.request_exit(event_loop);
            }

            WindowEvent::KeyboardInput { event: key, .. } => {
                let key = input::platform::translate_key_event(key);
                if let Some(action) = input::action_for(key) {
                    self.apply_action(event_loop, action);
                }
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = &mut self.entry {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = &mut self.entry {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

/// Fullscreen state after one toggle: windowed becomes borderless, anything else
/// becomes windowed.
fn toggled_fullscreen(current: Option<Fullscreen>) -> Option<Fullscreen> {
    match current {
        Some(_) => None,
        None => Some(Fullscreen::Borderless(None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Counters {
        frames: Cell<u32>,
        dropped: Cell<bool>,
    }

    struct CountingApp(Rc<Counters>);

    impl CoreApp for CountingApp {
        fn setup(&mut self, _gpu: &Gpu<'_>) -> Result<()> {
            Ok(())
        }

        fn on_frame(&mut self, _ctx: &mut FrameCtx<'_, '_>) -> AppControl {
            self.0.frames.set(self.0.frames.get() + 1);
            AppControl::Continue
        }
    }

    impl Drop for CountingApp {
        fn drop(&mut self) {
            self.0.dropped.set(true);
        }
    }

    fn state() -> (AppState<CountingApp>, Rc<Counters>) {
        let counters = Rc::new(Counters::default());
        let app = CountingApp(Rc::clone(&counters));
        (AppState::new(RuntimeConfig::default(), GpuInit::default(), app), counters)
    }

    // ── frame gating ──────────────────────────────────────────────────────

    #[test]
    fn no_frames_outside_running() {
        let (mut st, counters) = state();
        assert_eq!(st.draw_frame(), None);

        st.lifecycle.initialized();
        assert_eq!(st.draw_frame(), None);

        st.lifecycle.fail(anyhow::anyhow!("scene setup failed"));
        assert_eq!(st.draw_frame(), None);

        assert_eq!(counters.frames.get(), 0);
        assert_eq!(st.frame_index, 0);
    }

    #[test]
    fn no_frames_without_a_window() {
        let (mut st, counters) = state();
        st.lifecycle.initialized();
        st.lifecycle.running();
        assert_eq!(st.draw_frame(), None);
        assert_eq!(counters.frames.get(), 0);
    }

    // ── teardown ──────────────────────────────────────────────────────────

    #[test]
    fn clean_run_tears_down_ok() {
        let (mut st, counters) = state();
        st.lifecycle.initialized();
        st.lifecycle.running();
        st.lifecycle.shutdown();

        assert!(st.teardown(Ok(())).is_ok());
        assert!(counters.dropped.get());
    }

    #[test]
    fn recorded_setup_failure_surfaces_from_teardown() {
        let (mut st, counters) = state();
        st.lifecycle.initialized();
        st.lifecycle.fail(anyhow::anyhow!("shader parse error"));

        let err = st.teardown(Ok(())).unwrap_err();
        assert!(err.to_string().contains("shader parse error"));
        assert!(counters.dropped.get());
    }

    #[test]
    fn event_loop_error_surfaces_from_teardown() {
        let (st, counters) = state();
        let err = st.teardown(Err(anyhow::anyhow!("event loop died"))).unwrap_err();
        assert!(err.to_string().contains("event loop died"));
        assert!(counters.dropped.get());
    }

    #[test]
    fn first_failure_wins_over_loop_error() {
        let (mut st, _) = state();
        st.lifecycle.fail(anyhow::anyhow!("GPU initialization failed"));
        let err = st.teardown(Err(anyhow::anyhow!("later"))).unwrap_err();
        assert_eq!(err.to_string(), "GPU initialization failed");
    }

    // ── config ────────────────────────────────────────────────────────────

    #[test]
    fn default_config_is_fullscreen_1366x768() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.initial_size, PhysicalSize::new(1366, 768));
        assert!(cfg.fullscreen);
    }

    #[test]
    fn toggle_flips_between_windowed_and_borderless() {
        assert_eq!(toggled_fullscreen(None), Some(Fullscreen::Borderless(None)));
        assert_eq!(toggled_fullscreen(Some(Fullscreen::Borderless(None))), None);
        assert_eq!(toggled_fullscreen(toggled_fullscreen(None)), None);
    }
}
