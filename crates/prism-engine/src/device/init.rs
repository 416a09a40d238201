/// Knobs for [`Gpu::new`](super::Gpu::new).
///
/// Every field has a working default; the demo never changes them.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick `Bgra8UnormSrgb`/`Rgba8UnormSrgb` over the surface's first format.
    pub prefer_srgb: bool,

    /// Swap behavior to ask for.
    ///
    /// `Immediate` presents without waiting for vblank. Unsupported modes
    /// degrade to `Mailbox`, then `Fifo`.
    pub present_mode: wgpu::PresentMode,

    /// Compositing mode; `None` or an unsupported value takes the surface's first.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Swapchain depth hint. 2 is double buffering.
    pub desired_maximum_frame_latency: u32,

    /// Backend validation layers and debug labels.
    pub debug: bool,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Immediate,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            debug: cfg!(debug_assertions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_ask_for_no_vsync_double_buffering() {
        let init = GpuInit::default();
        assert_eq!(init.present_mode, wgpu::PresentMode::Immediate);
        assert_eq!(init.desired_maximum_frame_latency, 2);
        assert!(init.required_features.is_empty());
        assert!(init.prefer_srgb);
    }
}
