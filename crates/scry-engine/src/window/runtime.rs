use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, InitCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Window creation options.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Redraw continuously instead of only on request.
    pub continuous: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "scry".to_string(),
            initial_size: LogicalSize::new(960.0, 540.0),
            continuous: true,
        }
    }
}

/// Requests an app makes from its callbacks; applied once the callback
/// returns.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    exit_requested: bool,
}

impl RuntimeCtx {
    /// Stops the event loop after the current callback.
    pub fn exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn is_exit_requested(&self) -> bool {
        self.exit_requested
    }

    fn merge(&mut self, control: AppControl) {
        if control == AppControl::Exit {
            self.exit();
        }
    }
}

/// Runs the winit event loop until the window is closed or the app exits.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(initial, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    continuous: bool,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A: App + 'static> {
    initial: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    exit_requested: bool,
}

impl<A: App + 'static> AppState<A> {
    fn new(initial: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            initial,
            gpu_init,
            app,
            window: None,
            exit_requested: false,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<RuntimeCtx> {
        let config = self.initial.clone();
        let attrs = Window::default_attributes()
            .with_title(config.title)
            .with_inner_size(config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let mut entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            continuous: config.continuous,
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        let mut runtime = RuntimeCtx::default();
        let app = &mut self.app;
        let control = entry.with_mut(|fields| {
            let mut ctx = InitCtx {
                window: WindowCtx {
                    id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                runtime: &mut runtime,
            };
            app.on_initialize(&mut ctx)
        });
        runtime.merge(control);

        entry.with_window(|w| w.request_redraw());
        self.window = Some(entry);

        log::debug!("window {id:?} created");
        Ok(runtime)
    }

    fn apply(&mut self, event_loop: &ActiveEventLoop, runtime: RuntimeCtx) {
        if runtime.is_exit_requested() || self.window.is_none() {
            self.exit_requested = true;
        }
        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn resize(&mut self, window_id: WindowId, size: PhysicalSize<u32>) {
        let Some(entry) = self.window.as_mut() else {
            return;
        };
        entry.with_gpu_mut(|gpu| gpu.resize(size));
        let logical = entry.with_window(|w| {
            w.request_redraw();
            size.to_logical::<f64>(w.scale_factor())
        });
        self.app
            .on_resize(window_id, logical.width as f32, logical.height as f32);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        let mut runtime = RuntimeCtx::default();
        let app = &mut self.app;

        let Some(entry) = self.window.as_mut() else {
            return;
        };

        let control = entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time,
                    runtime: &mut runtime,
                };
                app.on_frame(&mut ctx)
            };
            fields.input_frame.clear();
            control
        });

        runtime.merge(control);
        self.apply(event_loop, runtime);
    }

    fn owns(&self, window_id: WindowId) -> bool {
        self.window
            .as_ref()
            .is_some_and(|e| e.with_window(|w| w.id()) == window_id)
    }
}

impl<A: App + 'static> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let runtime = match self.create_window_entry(event_loop) {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                RuntimeCtx::default()
            }
        };
        self.apply(event_loop, runtime);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = self.window.as_ref() {
            if *entry.borrow_continuous() {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        if !self.owns(window_id) {
            return;
        }

        if let Some(entry) = self.window.as_mut() {
            entry.with_mut(|fields| {
                let modifiers = fields.input_state.modifiers;
                translate_window_event(modifiers, &event, |ev| {
                    fields.input_state.apply_event(fields.input_frame, ev);
                });
            });
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.window = None;
                self.apply(event_loop, RuntimeCtx::default());
            }

            WindowEvent::Resized(size) => self.resize(window_id, *size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self
                    .window
                    .as_ref()
                    .map(|e| e.with_window(|w| w.inner_size()));
                if let Some(size) = size {
                    self.resize(window_id, size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_is_sticky() {
        let mut rt = RuntimeCtx::default();
        assert!(!rt.is_exit_requested());
        rt.merge(AppControl::Continue);
        assert!(!rt.is_exit_requested());
        rt.exit();
        rt.merge(AppControl::Continue);
        assert!(rt.is_exit_requested());
    }

    #[test]
    fn exit_control_requests_exit() {
        let mut rt = RuntimeCtx::default();
        rt.merge(AppControl::Exit);
        assert!(rt.is_exit_requested());
    }
}
