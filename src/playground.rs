//! Playground builder and windowed runner.
//!
//! The window stands in for the original color form: it starts with a color
//! set and preset, and the keyboard takes over preset selection afterwards.
//!
//! | Key | Action |
//! |---|---|
//! | `←` / `→` | previous / next catalog preset |
//! | `Space` | pause or resume the clock |
//! | `R` | restart the clock from zero |
//! | `Esc` | close the window |

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::color::{Color, ColorSet};
use crate::error::{ColorError, PlaygroundError};
use crate::gpu::{GpuState, RenderOptions};
use crate::preset::{PresetId, PresetSelection};
use crate::scene::Scene;

/// Resolved startup settings.
#[derive(Debug, Clone)]
pub struct PlaygroundConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub colors: ColorSet,
    pub selection: PresetSelection,
    pub render: RenderOptions,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            title: "Hueflow".to_string(),
            width: 1280,
            height: 720,
            colors: ColorSet::default(),
            selection: PresetSelection::Preset(PresetId::default()),
            render: RenderOptions::default(),
        }
    }
}

/// A playground builder.
///
/// Use method chaining to configure, then call `.run()` to open the window.
///
/// ```ignore
/// use hueflow::{Playground, PresetId};
///
/// Playground::new()
///     .with_hex_colors(&["#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF"])
///     .with_preset(PresetId::WaveLikeFlow)
///     .run()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Playground {
    config: PlaygroundConfig,
    color_error: Option<ColorError>,
}

impl Playground {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colors(mut self, colors: ColorSet) -> Self {
        self.config.colors = colors;
        self
    }

    /// Set the colors from hex strings.
    ///
    /// Anything other than exactly five valid colors is reported by
    /// [`Playground::run`] before a window opens.
    pub fn with_hex_colors<S: AsRef<str>>(mut self, hex: &[S]) -> Self {
        match ColorSet::from_hex(hex) {
            Ok(colors) => self.config.colors = colors,
            Err(e) => self.color_error = Some(e),
        }
        self
    }

    pub fn with_preset(mut self, preset: PresetId) -> Self {
        self.config.selection = preset.into();
        self
    }

    /// Select a preset by display name. Unknown names select nothing.
    pub fn with_preset_name(mut self, name: &str) -> Self {
        self.config.selection = PresetSelection::from_name(name);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    /// Clear color behind every effect.
    pub fn with_background(mut self, color: impl Into<Color>) -> Self {
        self.config.render.background = color.into();
        self
    }

    /// Force one grid density for every quad effect.
    pub fn with_quad_subdivisions(mut self, subdivisions: u32) -> Self {
        self.config.render.quad_subdivisions = Some(subdivisions.max(1));
        self
    }

    pub fn with_point_size(mut self, size: f32) -> Self {
        self.config.render.point_size = size;
        self
    }

    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.config.render.vsync = enabled;
        self
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    /// Open the window and animate until it is closed.
    pub fn run(self) -> Result<(), PlaygroundError> {
        let _ = env_logger::try_init();

        if let Some(e) = self.color_error {
            return Err(e.into());
        }

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(self.config);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Keyboard commands understood by the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    NextPreset,
    PreviousPreset,
    TogglePause,
    ResetClock,
    Exit,
}

impl KeyAction {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::ArrowRight => Some(KeyAction::NextPreset),
            KeyCode::ArrowLeft => Some(KeyAction::PreviousPreset),
            KeyCode::Space => Some(KeyAction::TogglePause),
            KeyCode::KeyR => Some(KeyAction::ResetClock),
            KeyCode::Escape => Some(KeyAction::Exit),
            _ => None,
        }
    }

    /// Apply to the scene. Returns `true` when the active effect changed and
    /// the GPU pipeline must be rebuilt.
    pub fn apply(self, scene: &mut Scene) -> bool {
        match self {
            KeyAction::NextPreset | KeyAction::PreviousPreset => {
                let target = match (self, scene.selection().preset()) {
                    (KeyAction::NextPreset, Some(p)) => p.next(),
                    (KeyAction::NextPreset, None) => PresetId::CATALOG[0],
                    (_, Some(p)) => p.previous(),
                    (_, None) => PresetId::CATALOG[PresetId::CATALOG.len() - 1],
                };
                scene.set_preset(target.into());
                true
            }
            KeyAction::TogglePause => {
                scene.time_mut().toggle_pause();
                log::info!(
                    "Clock {}",
                    if scene.time().is_paused() { "paused" } else { "resumed" }
                );
                false
            }
            KeyAction::ResetClock => {
                scene.reset();
                log::info!("Clock reset");
                false
            }
            KeyAction::Exit => false,
        }
    }
}

struct App {
    config: PlaygroundConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: Scene,
    error: Option<PlaygroundError>,
}

impl App {
    fn new(config: PlaygroundConfig) -> Self {
        let mut scene = Scene::new(config.colors);
        scene.set_active(config.selection, config.colors);
        Self {
            config,
            window: None,
            gpu_state: None,
            scene,
            error: None,
        }
    }

    /// Start the animation clock from zero. Called once the first frame can
    /// be drawn, so window and device setup never count as animation time.
    fn start_clock(&mut self) {
        self.scene.reset();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlaygroundError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode) {
        let Some(action) = KeyAction::from_key(code) else {
            return;
        };
        if action == KeyAction::Exit {
            event_loop.exit();
            return;
        }
        if action.apply(&mut self.scene) {
            if let Some(gpu_state) = &mut self.gpu_state {
                gpu_state.set_effect(&self.scene);
            }
            if let Some(window) = &self.window {
                let name = self
                    .scene
                    .selection()
                    .preset()
                    .map_or("no effect", PresetId::name);
                window.set_title(&format!("{} - {}", self.config.title, name));
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let tick = self.scene.tick();
        let Some(gpu_state) = &mut self.gpu_state else {
            return;
        };
        match gpu_state.render(&self.scene, &tick) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated; reconfiguring");
                gpu_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory; exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Skipped frame: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.config.width, self.config.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match pollster::block_on(GpuState::new(window.clone(), self.config.render)) {
            Ok(mut gpu_state) => {
                gpu_state.set_effect(&self.scene);
                self.gpu_state = Some(gpu_state);
            }
            Err(e) => return self.fail(event_loop, e.into()),
        }
        self.start_clock();

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.handle_key(event_loop, code),
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Builder ==========

    #[test]
    fn test_defaults() {
        let config = Playground::new().config().clone();
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert_eq!(config.colors, ColorSet::default());
        assert_eq!(config.selection, PresetSelection::Preset(PresetId::SmokeEffects));
        assert_eq!(config.render.background, Color::BLACK);
    }

    #[test]
    fn test_builder_chain() {
        let playground = Playground::new()
            .with_preset(PresetId::EnergyBurst)
            .with_title("Demo")
            .with_size(800, 600)
            .with_quad_subdivisions(0)
            .with_point_size(0.1)
            .with_vsync(false);
        let config = playground.config();
        assert_eq!(config.selection, PresetSelection::Preset(PresetId::EnergyBurst));
        assert_eq!(config.title, "Demo");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.render.quad_subdivisions, Some(1));
        assert_eq!(config.render.point_size, 0.1);
        assert!(!config.render.vsync);
    }

    #[test]
    fn test_hex_colors_applied() {
        let playground =
            Playground::new().with_hex_colors(&["#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF"]);
        assert_eq!(playground.config().colors.primary(), glam::Vec3::new(1.0, 0.0, 0.0));
        assert!(playground.color_error.is_none());
    }

    #[test]
    fn test_three_colors_rejected_before_window() {
        let result = Playground::new()
            .with_hex_colors(&["#FF0000", "#00FF00", "#0000FF"])
            .run();
        match result {
            Err(PlaygroundError::Color(ColorError::WrongCount { expected: 5, found: 3 })) => {}
            other => panic!("expected WrongCount, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_preset_name_selects_nothing() {
        let playground = Playground::new().with_preset_name("Rainbow Laser");
        assert_eq!(playground.config().selection, PresetSelection::None);
    }

    // ========== Startup ==========

    #[test]
    fn test_clock_excludes_setup_time() {
        let config = Playground::new().with_preset(PresetId::WaveLikeFlow).config().clone();
        let mut app = App::new(config);
        std::thread::sleep(std::time::Duration::from_millis(200));

        app.start_clock();
        let tick = app.scene.tick();
        assert!(tick.elapsed < 0.1, "setup time leaked into the clock: {}", tick.elapsed);
        assert_eq!(app.scene.active_preset(), Some(PresetId::WaveLikeFlow));
    }

    // ========== Keyboard ==========

    #[test]
    fn test_key_mapping() {
        assert_eq!(KeyAction::from_key(KeyCode::ArrowRight), Some(KeyAction::NextPreset));
        assert_eq!(KeyAction::from_key(KeyCode::ArrowLeft), Some(KeyAction::PreviousPreset));
        assert_eq!(KeyAction::from_key(KeyCode::Space), Some(KeyAction::TogglePause));
        assert_eq!(KeyAction::from_key(KeyCode::KeyR), Some(KeyAction::ResetClock));
        assert_eq!(KeyAction::from_key(KeyCode::Escape), Some(KeyAction::Exit));
        assert_eq!(KeyAction::from_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_cycle_wraps_catalog() {
        let mut scene = Scene::new(ColorSet::default());
        scene.set_active(PresetId::CATALOG[13].into(), ColorSet::default());
        assert!(KeyAction::NextPreset.apply(&mut scene));
        assert_eq!(scene.selection().preset(), Some(PresetId::CATALOG[0]));
        assert!(KeyAction::PreviousPreset.apply(&mut scene));
        assert_eq!(scene.selection().preset(), Some(PresetId::CATALOG[13]));
    }

    #[test]
    fn test_cycle_from_nothing() {
        let mut scene = Scene::new(ColorSet::default());
        KeyAction::NextPreset.apply(&mut scene);
        assert_eq!(scene.selection().preset(), Some(PresetId::CATALOG[0]));
    }

    #[test]
    fn test_pause_and_reset_keep_effect() {
        let mut scene = Scene::new(ColorSet::default());
        scene.set_active(PresetId::WaveLikeFlow.into(), ColorSet::default());
        scene.advance(1.0);

        assert!(!KeyAction::TogglePause.apply(&mut scene));
        scene.advance(1.0);
        assert!((scene.time().elapsed() - 1.0).abs() < 1e-6);

        assert!(!KeyAction::ResetClock.apply(&mut scene));
        assert_eq!(scene.time().elapsed(), 0.0);
        assert_eq!(scene.active_preset(), Some(PresetId::WaveLikeFlow));
    }
}
