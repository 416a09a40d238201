//! Per-frame transform generation.
//!
//! Matrices use the left-handed, depth `[0, 1]` conventions of the meshes in
//! [`super::mesh`]. Uploads are column-major, which is what WGSL `mat4x4` reads.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Rotation step applied once per frame, in radians.
pub const DEFAULT_SPIN_STEP: f32 = 0.001;

/// Uniform block holding one 4x4 transform.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TransformUniform {
    pub matrix: [[f32; 4]; 4],
}

impl TransformUniform {
    pub const SIZE: u64 = std::mem::size_of::<TransformUniform>() as u64;

    pub fn from_matrix(m: Mat4) -> Self {
        Self {
            matrix: m.to_cols_array_2d(),
        }
    }
}

impl Default for TransformUniform {
    fn default() -> Self {
        Self::from_matrix(Mat4::IDENTITY)
    }
}

/// Angle accumulator advanced by a fixed step per frame.
///
/// Speed is tied to frame rate, not wall-clock time. The angle is never wrapped;
/// periodicity comes from the trigonometric functions that consume it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Spin {
    angle: f32,
    step: f32,
}

impl Spin {
    pub fn new(step: f32) -> Self {
        debug_assert!(step >= 0.0, "spin step must not be negative");
        Self { angle: 0.0, step }
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advances by one step and returns the new angle.
    pub fn advance(&mut self) -> f32 {
        self.angle += self.step;
        self.angle
    }
}

impl Default for Spin {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN_STEP)
    }
}

/// Model rotation about the fixed `(1, 1, 1)` axis.
pub fn model_matrix(angle: f32) -> Mat4 {
    Mat4::from_axis_angle(Vec3::ONE.normalize(), angle)
}

/// Fixed look-at camera.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye, self.target, self.up)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.0, -5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

/// Perspective projection parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// Aspect ratio for a render target; `None` when the target has no height.
    pub fn aspect(width: u32, height: u32) -> Option<f32> {
        (height > 0).then(|| width as f32 / height as f32)
    }

    /// Projection matrix for a render target of `width` x `height` pixels.
    ///
    /// Returns `None` when the target is degenerate (zero height or width).
    pub fn matrix(&self, width: u32, height: u32) -> Option<Mat4> {
        let aspect = Self::aspect(width, height).filter(|a| *a > 0.0)?;
        Some(Mat4::perspective_lh(self.fov_y, aspect, self.near, self.far))
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Which transform a scene uploads each frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TransformKind {
    /// No constant buffer; vertices are already in clip space.
    None,
    /// Model rotation only.
    Model,
    /// Model rotation composed with the fixed camera and projection.
    ModelViewProjection,
}

/// Produces the per-frame transform for a scene.
#[derive(Debug, Clone)]
pub struct FrameUpdater {
    kind: TransformKind,
    spin: Spin,
    camera: Camera,
    projection: Projection,
    view_projection: Mat4,
    projected_size: Option<(u32, u32)>,
}

impl FrameUpdater {
    pub fn new(kind: TransformKind) -> Self {
        Self {
            kind,
            spin: Spin::default(),
            camera: Camera::default(),
            projection: Projection::default(),
            view_projection: Mat4::IDENTITY,
            projected_size: None,
        }
    }

    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = spin;
        self
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.spin.angle()
    }

    /// Advances the spin and returns the matrix to upload, or `None` for scenes
    /// without a transform.
    ///
    /// The view-projection product is rebuilt only when the target size changes.
    /// A zero-height target keeps the previous projection.
    pub fn advance(&mut self, width: u32, height: u32) -> Option<Mat4> {
        let model = match self.kind {
            TransformKind::None => return None,
            TransformKind::Model => return Some(model_matrix(self.spin.advance())),
            TransformKind::ModelViewProjection => model_matrix(self.spin.advance()),
        };

        if self.projected_size != Some((width, height)) {
            match self.projection.matrix(width, height) {
                Some(proj) => {
                    self.view_projection = proj * self.camera.view_matrix();
                    self.projected_size = Some((width, height));
                    log::trace!("projection rebuilt for {width}x{height}");
                }
                None => log::trace!("degenerate target {width}x{height}; keeping projection"),
            }
        }

        Some(self.view_projection * model)
    }
}
