//! Window surface size tracking.
//!
//! The starfield is rasterized at physical resolution, so every consumer (the
//! GPU surface, the presenter texture and the CPU pixmap) works from the size
//! reported here. Wayland may report 0×0 before the compositor assigns a size,
//! and minimizing reports 0×0 on most platforms. Such sizes are clamped to 1×1
//! and mark the surface unconfigured until a real size arrives; hosts skip
//! drawing while [`SurfaceWrapper::is_configured`] is false.

/// Minimum surface dimension.
pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Physical pixel dimensions of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    /// Clamp each dimension to at least [`MIN_SURFACE_DIMENSION`].
    pub fn clamped(width: u32, height: u32) -> Self {
        Self {
            width: width.max(MIN_SURFACE_DIMENSION),
            height: height.max(MIN_SURFACE_DIMENSION),
        }
    }

    /// Bytes in one tightly packed RGBA8 frame of this size.
    pub fn rgba8_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

pub struct SurfaceWrapper {
    physical: PhysicalSize,
    scale_factor: f64,
    /// Whether the last reported size was non-zero.
    configured: bool,
}

impl SurfaceWrapper {
    pub fn new(physical_width: u32, physical_height: u32, scale_factor: f64) -> Self {
        Self {
            physical: PhysicalSize::clamped(physical_width, physical_height),
            scale_factor,
            configured: physical_width > 0 && physical_height > 0,
        }
    }

    /// Record a window resize. Returns the new size only if it changed.
    pub fn handle_resize(
        &mut self,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<PhysicalSize> {
        let size = PhysicalSize::clamped(physical_width, physical_height);
        self.configured = physical_width > 0 && physical_height > 0;
        if size == self.physical {
            return None;
        }
        self.physical = size;
        Some(size)
    }

    /// Record a DPI change. The physical size moves with it.
    pub fn handle_scale_factor_changed(
        &mut self,
        scale_factor: f64,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<PhysicalSize> {
        self.scale_factor = scale_factor;
        self.handle_resize(physical_width, physical_height)
    }

    pub fn physical_size(&self) -> PhysicalSize {
        self.physical
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Whether the current size is real rather than a clamped 0×0.
    pub fn is_configured(&self) -> bool {
        self.configured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_waits_for_compositor() {
        let mut wrapper = SurfaceWrapper::new(0, 0, 1.0);
        assert!(!wrapper.is_configured());
        assert_eq!(wrapper.physical_size(), PhysicalSize::clamped(1, 1));

        let size = wrapper.handle_resize(1920, 1080).unwrap();
        assert_eq!(size, PhysicalSize { width: 1920, height: 1080 });
        assert!(wrapper.is_configured());
    }

    #[test]
    fn test_same_size_is_not_an_event() {
        let mut wrapper = SurfaceWrapper::new(800, 600, 1.0);
        assert!(wrapper.handle_resize(800, 600).is_none());
        assert!(wrapper.handle_resize(801, 600).is_some());
    }

    #[test]
    fn test_minimize_unconfigures_until_restored() {
        let mut wrapper = SurfaceWrapper::new(800, 600, 1.0);
        let size = wrapper.handle_resize(0, 0).unwrap();
        assert_eq!((size.width, size.height), (1, 1));
        assert!(!wrapper.is_configured());

        let size = wrapper.handle_resize(800, 600).unwrap();
        assert_eq!(size, PhysicalSize { width: 800, height: 600 });
        assert!(wrapper.is_configured());
    }

    #[test]
    fn test_scale_factor_change() {
        let mut wrapper = SurfaceWrapper::new(1280, 720, 1.0);
        let size = wrapper.handle_scale_factor_changed(2.0, 2560, 1440).unwrap();
        assert_eq!(size.width, 2560);
        assert_eq!(wrapper.scale_factor(), 2.0);
    }

    #[test]
    fn test_rgba8_len() {
        assert_eq!(PhysicalSize::clamped(4, 3).rgba8_len(), 48);
    }
}
