use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::{translate_device_event, translate_window_event};
use crate::input::{InputFrame, InputState};
use crate::time::FrameClock;

/// Title and initial logical size of the demo window.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new("kinema", 800.0, 600.0)
    }
}

impl RuntimeConfig {
    pub fn new(title: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            title: title.into(),
            initial_size: LogicalSize::new(width, height),
        }
    }
}

/// Runs one window with one [`App`] until the app exits or the window closes.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut driver = Driver {
            config,
            gpu_init,
            app,
            surface: None,
            failure: None,
        };

        event_loop
            .run_app(&mut driver)
            .context("winit event loop terminated with error")?;

        match driver.failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// The window together with the GPU surface that borrows it.
#[self_referencing]
struct Surface {
    input: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct Driver<A: App> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    surface: Option<Surface>,
    /// Setup error reported by [`Runtime::run`] once the loop has stopped.
    failure: Option<anyhow::Error>,
}

impl<A: App> Driver<A> {
    fn open_window(&self, event_loop: &ActiveEventLoop) -> Result<Surface> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        SurfaceTryBuilder {
            input: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn redraw(&mut self) -> AppControl {
        let Some(surface) = self.surface.as_mut() else {
            return AppControl::Continue;
        };
        let app = &mut self.app;

        surface.with_mut(|f| {
            let time = f.clock.tick();
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx { window: f.window },
                    gpu: f.gpu,
                    input: f.input,
                    input_frame: f.input_frame,
                    time,
                };
                app.on_frame(&mut ctx)
            };
            f.input_frame.clear();
            control
        })
    }

    fn resize_to_window(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            let size = surface.with_window(|w| w.inner_size());
            log::debug!("surface resized to {}x{}", size.width, size.height);
            surface.with_gpu_mut(|gpu| gpu.resize(size));
            surface.with_window(|w| w.request_redraw());
        }
    }
}

impl<A: App> ApplicationHandler for Driver<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.surface.is_some() {
            return;
        }

        match self.open_window(event_loop) {
            Ok(surface) => {
                surface.with_window(|w| w.request_redraw());
                self.surface = Some(surface);
            }
            Err(e) => {
                log::error!("failed to open window: {e:#}");
                self.failure = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous animation.
        if let Some(surface) = self.surface.as_ref() {
            surface.with_window(|w| w.request_redraw());
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let (Some(surface), Some(ev)) = (self.surface.as_mut(), translate_device_event(&event))
        else {
            return;
        };

        // Raw motion is not window-scoped; only the focused window consumes it.
        surface.with_mut(|f| {
            if f.input.focused {
                f.input.apply_event(f.input_frame, ev);
            }
        });
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        surface.with_mut(|f| {
            if let Some(ev) = translate_window_event(f.window, &event) {
                f.input.apply_event(f.input_frame, ev);
            }
        });

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.surface = None;
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.resize_to_window();
            }
            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    self.surface = None;
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }
}
