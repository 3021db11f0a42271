//! Stage builder and event loop runner.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::DESKTOP_MIN_WIDTH;
use crate::cursor::CursorHalo;
use crate::error::RunError;
use crate::field::{Field, PointSprite, Segment};
use crate::gpu::GpuState;
use crate::pointer::PointerState;
use crate::time::Time;

/// Fixed simulation step. The motion constants assume 60 Hz.
const STEP_DT: f32 = 1.0 / 60.0;

/// Cap on accumulated time so a stalled frame does not trigger a
/// catch-up burst of hundreds of steps.
const MAX_FRAME_TIME: f32 = 0.25;

/// A window hosting one field.
///
/// Use method chaining to configure, then call `.run()` to start.
pub struct Stage {
    field: Box<dyn Field>,
    title: String,
    size: (u32, u32),
    cursor_halo: bool,
}

impl Stage {
    /// Create a stage for the given field with default settings.
    pub fn new(field: impl Field + 'static) -> Self {
        Self {
            field: Box::new(field),
            title: "driftfield".to_string(),
            size: (1280, 720),
            cursor_halo: true,
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Enable or disable the eased cursor halo overlay.
    pub fn with_cursor_halo(mut self, enabled: bool) -> Self {
        self.cursor_halo = enabled;
        self
    }

    /// Run the stage. This blocks until the window is closed.
    pub fn run(self) -> Result<(), RunError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    field: Box<dyn Field>,
    pointer: PointerState,
    cursor: Option<CursorHalo>,
    time: Time,
    accumulator: f32,
    title: String,
    size: (u32, u32),
    error: Option<RunError>,
    sprites: Vec<PointSprite>,
    segments: Vec<Segment>,
}

impl App {
    fn new(stage: Stage) -> Self {
        Self {
            window: None,
            gpu_state: None,
            field: stage.field,
            pointer: PointerState::new(),
            cursor: stage.cursor_halo.then(CursorHalo::new),
            time: Time::new(),
            accumulator: 0.0,
            title: stage.title,
            size: stage.size,
            error: None,
            sprites: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Resize the field and gate it on the desktop width threshold.
    fn apply_size(&mut self, physical: winit::dpi::PhysicalSize<u32>, scale_factor: f64) {
        self.field
            .resize(physical.width as f32, physical.height as f32);

        let logical_width = physical.width as f64 / scale_factor;
        if logical_width >= DESKTOP_MIN_WIDTH {
            self.field.start();
        } else {
            self.field.stop();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

            let window = match event_loop.create_window(window_attrs) {
                Ok(window) => Arc::new(window),
                Err(err) => {
                    self.error = Some(RunError::Window(err));
                    event_loop.exit();
                    return;
                }
            };
            self.window = Some(window.clone());

            let scale_factor = window.scale_factor();
            let physical = window.inner_size();

            match pollster::block_on(GpuState::new(window)) {
                Ok(gpu_state) => self.gpu_state = Some(gpu_state),
                Err(err) => {
                    self.error = Some(RunError::Gpu(err));
                    event_loop.exit();
                    return;
                }
            }

            self.apply_size(physical, scale_factor);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.pointer.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                let scale_factor = self
                    .window
                    .as_ref()
                    .map(|w| w.scale_factor())
                    .unwrap_or(1.0);
                self.apply_size(physical_size, scale_factor);
            }
            WindowEvent::RedrawRequested => {
                let (_, delta) = self.time.update();

                self.accumulator += delta.min(MAX_FRAME_TIME);
                while self.accumulator >= STEP_DT {
                    self.field.step(&self.pointer);
                    self.accumulator -= STEP_DT;
                }

                self.sprites.clear();
                self.segments.clear();
                // Below the desktop threshold the field is stopped and the
                // frame stays empty.
                if self.field.is_running() {
                    self.field.connections(&mut self.segments);
                    self.field.sprites(&mut self.sprites);
                    if let Some(cursor) = &mut self.cursor {
                        cursor.update(&self.pointer);
                        cursor.sprites(&mut self.sprites);
                    }
                }

                if let Some(gpu_state) = &mut self.gpu_state {
                    match gpu_state.render(&self.sprites, &self.segments) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            gpu_state.resize(winit::dpi::PhysicalSize {
                                width: gpu_state.config.width,
                                height: gpu_state.config.height,
                            })
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => eprintln!("Render error: {:?}", e),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}
