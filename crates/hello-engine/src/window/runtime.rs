use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl RuntimeConfig {
    pub fn window_attributes(&self) -> WindowAttributes {
        Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size)
            .with_resizable(self.resizable)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Hello, Graphics Application".to_string(),
            initial_size: LogicalSize::new(1024.0, 576.0),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, creates the GPU device, and drives `app` until the
    /// window is closed or a step fails.
    ///
    /// The first error raised by any step ends the loop and is returned here.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("could not initialize the event loop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("event loop terminated with error")?;

        match state.error.take() {
            Some(err) => Err(err),
            None => {
                log::info!("shut down cleanly");
                Ok(())
            }
        }
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
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    quit_requested: bool,
    error: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            quit_requested: false,
            error: None,
        }
    }

    /// Requests quit and keeps `err` unless an earlier error is already held.
    ///
    /// Returns whether `err` was kept. Printing is left to whoever receives
    /// the error from `Runtime::run`.
    fn record_error(&mut self, err: anyhow::Error) -> bool {
        log::debug!("stopping: {err:#}");
        self.quit_requested = true;
        if self.error.is_some() {
            return false;
        }
        self.error = Some(err);
        true
    }

    /// Whether `resumed` should open the window.
    fn needs_window(&self) -> bool {
        self.entry.is_none() && !self.quit_requested
    }

    /// Applies the quit rules to `event`.
    ///
    /// Returns `false` once quit is requested (before or by this event); the
    /// event then gets no further handling.
    fn observe_event(&mut self, event: &WindowEvent) -> bool {
        if self.quit_requested {
            return false;
        }

        if self.app.on_window_event(event) == AppControl::Exit {
            self.quit_requested = true;
            return false;
        }

        if matches!(event, WindowEvent::CloseRequested | WindowEvent::Destroyed) {
            log::debug!("quit requested");
            self.quit_requested = true;
            return false;
        }

        true
    }

    fn finish_frame(&mut self, result: Result<AppControl>) {
        match result {
            Ok(AppControl::Continue) => {}
            Ok(AppControl::Exit) => self.quit_requested = true,
            Err(err) => {
                self.record_error(err);
            }
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let window = event_loop
            .create_window(self.config.window_attributes())
            .context("could not create window")?;

        log::info!("window created ({:?})", window.inner_size());

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()?;

        entry.with_gpu(|gpu| self.app.on_start(gpu))?;

        Ok(entry)
    }

    fn redraw(&mut self) -> Result<AppControl> {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return Ok(AppControl::Continue);
        };

        entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
            };
            app.on_frame(&mut ctx)
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !self.needs_window() {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
            }
            Err(err) => {
                self.record_error(err);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.quit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw.
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
        if !self.observe_event(&event) {
            return;
        }

        match event {
            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                }
            }

            WindowEvent::RedrawRequested => {
                let result = self.redraw();
                self.finish_frame(result);
                if self.error.is_some() {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Surface and device go before the window they borrow.
        self.entry = None;
    }
}
