//! Galaxy application: platform directories, frame timing, and the windowed
//! and headless hosts that drive the scene.

pub mod error;
pub mod frame_clock;
pub mod headless;
pub mod platform;
pub mod settings;
pub mod window;

pub use error::AppError;
pub use frame_clock::FrameClock;
pub use headless::{HeadlessReport, run_headless};
pub use platform::PlatformDirs;
pub use settings::SceneSettings;
