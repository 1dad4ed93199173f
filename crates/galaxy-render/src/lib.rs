//! wgpu presentation for the starfield: GPU context, surface sizing and the
//! texture blit that puts a CPU frame on screen.

pub mod gpu;
pub mod present;
pub mod surface;

pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use present::{FramePresenter, PresentError};
pub use surface::{PhysicalSize, SurfaceWrapper};
