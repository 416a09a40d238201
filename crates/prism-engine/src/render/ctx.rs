/// Render target size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

/// What a renderer needs to know about the frame it draws into.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderCtx {
    /// Format of the color target; must match the renderer's pipeline.
    pub surface_format: wgpu::TextureFormat,
    pub viewport: Viewport,
}

impl RenderCtx {
    #[inline]
    pub const fn new(surface_format: wgpu::TextureFormat, viewport: Viewport) -> Self {
        Self {
            surface_format,
            viewport,
        }
    }
}

/// Target for drawing (encoder + color view).
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_validity() {
        assert!(Viewport::new(1366.0, 768.0).is_valid());
        assert!(!Viewport::new(1366.0, 0.0).is_valid());
        assert!(!Viewport::new(f32::INFINITY, 768.0).is_valid());
        assert!(!Viewport::default().is_valid());
    }
}
