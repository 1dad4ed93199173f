//! Windowed host: winit drives the redraw cycle, each redraw runs one scene
//! frame into a CPU pixmap, and the GPU presents it.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]; [`run`] owns the
//! event loop. F5 re-reads `config.ron` and rebuilds the scene.

use std::path::PathBuf;
use std::sync::Arc;

use galaxy_config::{CliArgs, Config};
use galaxy_render::{
    FramePresenter, PhysicalSize, PresentError, RenderContext, SurfaceError, SurfaceWrapper,
    init_render_context_blocking,
};
use galaxy_scene::{Pixmap, Scene, Viewport};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::frame_clock::FrameClock;
use crate::settings::SceneSettings;

/// How often the title bar FPS readout refreshes, in frames.
const TITLE_REFRESH_FRAMES: u64 = 30;

/// Window attributes for the configured size, title and fullscreen mode.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// Title with the smoothed FPS appended.
pub fn title_with_fps(title: &str, fps: f64) -> String {
    format!("{title} | {fps:.0} FPS")
}

/// Whether frame `frame` is due for a stats log line. `interval == 0` disables.
pub fn stats_due(frame: u64, interval: u64) -> bool {
    interval > 0 && frame > 0 && frame % interval == 0
}

fn is_escape_press(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed && event.logical_key == Key::Named(NamedKey::Escape)
}

fn is_reload_press(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && !event.repeat
        && event.logical_key == Key::Named(NamedKey::F5)
}

/// The config file behind the running app.
pub struct ConfigSource {
    /// Directory holding `config.ron`.
    pub dir: PathBuf,
    /// File contents as last read, before CLI overrides.
    pub file: Config,
    /// Re-applied on top of every reload.
    pub overrides: CliArgs,
}

pub struct AppState {
    config: Config,
    settings: SceneSettings,
    source: ConfigSource,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    presenter: Option<FramePresenter>,
    surface_wrapper: SurfaceWrapper,
    pixmap: Pixmap,
    scene: Option<Scene>,
    clock: FrameClock,
    /// First fatal error; returned from [`run`] after the loop exits.
    error: Option<AppError>,
}

impl AppState {
    pub fn new(config: Config, settings: SceneSettings, source: ConfigSource) -> Self {
        let (width, height) = (config.window.width, config.window.height);
        Self {
            config,
            settings,
            source,
            window: None,
            gpu: None,
            presenter: None,
            surface_wrapper: SurfaceWrapper::new(width, height, 1.0),
            pixmap: Pixmap::new(width, height),
            scene: None,
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window = Arc::new(event_loop.create_window(window_attributes_from_config(&self.config))?);

        let inner = window.inner_size();
        self.surface_wrapper = SurfaceWrapper::new(inner.width, inner.height, window.scale_factor());
        let size = self.surface_wrapper.physical_size();
        info!(
            "Window created: {}x{} physical (scale: {:.2})",
            size.width,
            size.height,
            self.surface_wrapper.scale_factor()
        );

        let gpu = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        self.presenter = Some(FramePresenter::new(&gpu, size));
        self.gpu = Some(gpu);
        self.pixmap = Pixmap::new(size.width, size.height);
        self.ensure_scene();

        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    /// Build the scene once a real surface size is known. The population is
    /// laid out against that first size and kept across later resizes.
    fn ensure_scene(&mut self) {
        if self.scene.is_some() || !self.surface_wrapper.is_configured() {
            return;
        }
        let size = self.surface_wrapper.physical_size();
        self.scene = Some(Scene::new(
            &self.settings.params,
            Viewport::from((size.width, size.height)),
        ));
    }

    /// Whether a redraw would produce a frame.
    fn can_draw(&self) -> bool {
        self.scene.is_some() && self.surface_wrapper.is_configured()
    }

    fn handle_resize(&mut self, width: u32, height: u32) {
        let size = self.surface_wrapper.handle_resize(width, height);
        self.on_surface_size(size);
    }

    /// React to a size change. A 0×0 (minimized) surface leaves the scene,
    /// pixmap and GPU surface at their last real size.
    fn on_surface_size(&mut self, size: Option<PhysicalSize>) {
        if let Some(size) = size
            && self.surface_wrapper.is_configured()
        {
            self.apply_resize(size);
        }
    }

    /// Re-read `config.ron` and rebuild the scene if it changed.
    ///
    /// Window settings only take effect on the next launch. On error the
    /// running scene and config are left untouched.
    fn reload_config(&mut self) -> Result<bool, AppError> {
        let Some(fresh) = self.source.file.reload(&self.source.dir)? else {
            return Ok(false);
        };
        let mut config = fresh.clone();
        config.apply_cli_overrides(&self.source.overrides);
        config.window = self.config.window.clone();
        let settings = SceneSettings::from_config(&config)?;

        self.source.file = fresh;
        self.config = config;
        self.settings = settings;
        if let Some(viewport) = self.scene.as_ref().map(Scene::viewport) {
            self.scene = Some(Scene::new(&self.settings.params, viewport));
        }
        info!("Scene rebuilt from reloaded config");
        Ok(true)
    }

    fn apply_resize(&mut self, size: PhysicalSize) {
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(size.width, size.height);
            if let Some(presenter) = &mut self.presenter {
                presenter.resize(&gpu.device, size);
            }
        }
        self.pixmap = Pixmap::new(size.width, size.height);
        if let Some(scene) = &mut self.scene {
            scene.resize(Viewport::from((size.width, size.height)));
        }
        self.ensure_scene();
        info!(
            "Window resized to {}x{} (scale: {:.2})",
            size.width,
            size.height,
            self.surface_wrapper.scale_factor()
        );
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.can_draw() {
            return;
        }
        let (Some(window), Some(scene)) = (&self.window, &mut self.scene) else {
            return;
        };

        let pixmap = &mut self.pixmap;
        self.clock.tick(|| scene.frame(pixmap));
        let rgba = pixmap.to_rgba8(self.settings.background);

        let result = match (&self.gpu, &self.presenter) {
            (Some(gpu), Some(presenter)) => presenter.present(gpu, &rgba),
            _ => Ok(()),
        };

        let frame = self.clock.frame_count();
        if self.config.debug.show_fps && frame % TITLE_REFRESH_FRAMES == 0 {
            window.set_title(&title_with_fps(&self.config.window.title, self.clock.fps()));
        }
        if stats_due(frame, self.config.debug.stats_interval_frames) {
            info!(
                frame,
                fps = self.clock.fps(),
                slow_frames = self.clock.slow_frames(),
                respawns = scene.respawn_count(),
                "Frame stats"
            );
        }
        let window = window.clone();

        match result {
            Ok(()) => {}
            Err(PresentError::Surface(SurfaceError::Timeout)) => {
                warn!("Surface timeout, skipping frame");
            }
            Err(PresentError::Surface(SurfaceError::Lost)) => {
                let size = self.surface_wrapper.physical_size();
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
            }
            Err(PresentError::Surface(SurfaceError::OutOfMemory)) => {
                error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e @ PresentError::FrameSize { .. }) => {
                debug!("Dropped frame: {e}");
            }
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none()
            && let Err(e) = self.init_window(event_loop)
        {
            self.fail(event_loop, e);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } if is_escape_press(&event) => {
                info!("Escape pressed, shutting down");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } if is_reload_press(&event) => {
                match self.reload_config() {
                    Ok(true) => {}
                    Ok(false) => info!("Config unchanged"),
                    Err(e) => warn!("Config reload failed: {e}"),
                }
            }
            WindowEvent::Resized(new_size) => {
                self.handle_resize(new_size.width, new_size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let inner = window.inner_size();
                    let size = self.surface_wrapper.handle_scale_factor_changed(
                        scale_factor,
                        inner.width,
                        inner.height,
                    );
                    self.on_surface_size(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Open the window and animate until it is closed.
///
/// Returns the first fatal error raised inside the event loop, if any.
#[instrument(skip_all)]
pub fn run(
    config: Config,
    settings: SceneSettings,
    source: ConfigSource,
) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, settings, source);
    event_loop.run_app(&mut app)?;
    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
