//! Scene descriptions.
//!
//! A [`SceneDesc`] is the full parameter set for one demo: vertex layout,
//! shader pair, geometry, and which optional bindings exist. Renderers build
//! all GPU state from it; nothing here touches the device.

mod mesh;
mod texture;
mod transform;
mod variant;
mod vertex;

pub use mesh::{
    IndexData, CUBE_COLOR_INDICES, CUBE_COLOR_VERTICES, CUBE_TEX_INDICES, CUBE_TEX_VERTICES,
    QUAD_INDICES, QUAD_TRIANGLE_LIST, QUAD_VERTICES,
};
pub use texture::TextureData;
pub use transform::{
    model_matrix, Camera, FrameUpdater, Projection, Spin, TransformKind, TransformUniform,
    DEFAULT_SPIN_STEP,
};
pub use variant::Variant;
pub use vertex::{ColorVertex, TexVertex};

/// WGSL source for a vertex/fragment pair.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShaderSource {
    pub label: &'static str,
    pub wgsl: &'static str,
    pub vs_entry: &'static str,
    pub fs_entry: &'static str,
}

impl ShaderSource {
    const fn new(label: &'static str, wgsl: &'static str) -> Self {
        Self {
            label,
            wgsl,
            vs_entry: "vs_main",
            fs_entry: "fs_main",
        }
    }
}

pub const FLAT_COLOR_SHADER: ShaderSource =
    ShaderSource::new("prism flat color shader", include_str!("../render/shaders/flat_color.wgsl"));
pub const TRANSFORMED_COLOR_SHADER: ShaderSource = ShaderSource::new(
    "prism transformed color shader",
    include_str!("../render/shaders/transformed_color.wgsl"),
);
pub const TEXTURED_SHADER: ShaderSource =
    ShaderSource::new("prism textured shader", include_str!("../render/shaders/textured.wgsl"));

/// Checker texture parameters for textured scenes.
pub const CHECKER_SIZE: u32 = 256;
pub const CHECKER_CELLS: u32 = 8;
const CHECKER_LIGHT: [u8; 4] = [235, 235, 235, 255];
const CHECKER_DARK: [u8; 4] = [48, 96, 160, 255];

/// Full parameter set for one demo scene.
#[derive(Debug, Clone)]
pub struct SceneDesc {
    pub variant: Variant,
    pub shader: ShaderSource,
    pub vertex_layout: wgpu::VertexBufferLayout<'static>,
    pub vertices: &'static [u8],
    pub vertex_count: u32,
    pub indices: Option<IndexData>,
    pub transform: TransformKind,
    pub textured: bool,
}

impl SceneDesc {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Quad => Self {
                variant,
                shader: FLAT_COLOR_SHADER,
                vertex_layout: ColorVertex::layout(),
                vertices: bytemuck::cast_slice(&QUAD_TRIANGLE_LIST),
                vertex_count: QUAD_TRIANGLE_LIST.len() as u32,
                indices: None,
                transform: TransformKind::None,
                textured: false,
            },
            Variant::QuadIndexed => Self {
                variant,
                shader: FLAT_COLOR_SHADER,
                vertex_layout: ColorVertex::layout(),
                vertices: bytemuck::cast_slice(&QUAD_VERTICES),
                vertex_count: QUAD_VERTICES.len() as u32,
                indices: Some(IndexData::U16(&QUAD_INDICES)),
                transform: TransformKind::None,
                textured: false,
            },
            Variant::Cube => Self {
                variant,
                shader: TRANSFORMED_COLOR_SHADER,
                vertex_layout: ColorVertex::layout(),
                vertices: bytemuck::cast_slice(&CUBE_COLOR_VERTICES),
                vertex_count: CUBE_COLOR_VERTICES.len() as u32,
                indices: Some(IndexData::U32(&CUBE_COLOR_INDICES)),
                transform: TransformKind::Model,
                textured: false,
            },
            Variant::CubePerspective => Self {
                variant,
                shader: TRANSFORMED_COLOR_SHADER,
                vertex_layout: ColorVertex::layout(),
                vertices: bytemuck::cast_slice(&CUBE_COLOR_VERTICES),
                vertex_count: CUBE_COLOR_VERTICES.len() as u32,
                indices: Some(IndexData::U32(&CUBE_COLOR_INDICES)),
                transform: TransformKind::ModelViewProjection,
                textured: false,
            },
            Variant::CubeTextured => Self {
                variant,
                shader: TEXTURED_SHADER,
                vertex_layout: TexVertex::layout(),
                vertices: bytemuck::cast_slice(&CUBE_TEX_VERTICES),
                vertex_count: CUBE_TEX_VERTICES.len() as u32,
                indices: Some(IndexData::U16(&CUBE_TEX_INDICES)),
                transform: TransformKind::ModelViewProjection,
                textured: true,
            },
        }
    }

    /// Whether the scene needs a constant (uniform) buffer.
    #[inline]
    pub fn uses_uniform(&self) -> bool {
        self.transform != TransformKind::None
    }

    /// Number of elements the single draw call covers.
    pub fn draw_count(&self) -> u32 {
        self.indices.map_or(self.vertex_count, IndexData::count)
    }

    /// Checker image for textured scenes, `None` otherwise.
    pub fn texture_data(&self) -> Option<TextureData> {
        self.textured
            .then(|| TextureData::checker(CHECKER_SIZE, CHECKER_CELLS, CHECKER_LIGHT, CHECKER_DARK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── per-variant geometry ──────────────────────────────────────────────

    #[test]
    fn vertex_bytes_match_layout_stride() {
        for v in Variant::ALL {
            let d = SceneDesc::for_variant(v);
            assert_eq!(
                d.vertices.len() as u64,
                d.vertex_layout.array_stride * d.vertex_count as u64,
                "{v}"
            );
        }
    }

    #[test]
    fn indices_stay_within_vertex_count() {
        for v in Variant::ALL {
            let d = SceneDesc::for_variant(v);
            if let Some(idx) = d.indices {
                let max = idx.max_index().unwrap();
                assert!(max < d.vertex_count, "{v}: index {max} >= {}", d.vertex_count);
            }
        }
    }

    #[test]
    fn draw_counts_cover_full_geometry() {
        assert_eq!(SceneDesc::for_variant(Variant::Quad).draw_count(), 6);
        assert_eq!(SceneDesc::for_variant(Variant::QuadIndexed).draw_count(), 6);
        assert_eq!(SceneDesc::for_variant(Variant::Cube).draw_count(), 36);
        assert_eq!(SceneDesc::for_variant(Variant::CubePerspective).draw_count(), 36);
        assert_eq!(SceneDesc::for_variant(Variant::CubeTextured).draw_count(), 36);
    }

    // ── optional bindings ─────────────────────────────────────────────────

    #[test]
    fn quads_have_no_uniform() {
        assert!(!SceneDesc::for_variant(Variant::Quad).uses_uniform());
        assert!(!SceneDesc::for_variant(Variant::QuadIndexed).uses_uniform());
        assert!(SceneDesc::for_variant(Variant::Quad).indices.is_none());
    }

    #[test]
    fn only_textured_cube_has_texture() {
        for v in Variant::ALL {
            let d = SceneDesc::for_variant(v);
            assert_eq!(d.texture_data().is_some(), v == Variant::CubeTextured, "{v}");
        }
    }

    #[test]
    fn shader_matches_vertex_kind() {
        let textured = SceneDesc::for_variant(Variant::CubeTextured);
        assert_eq!(textured.shader, TEXTURED_SHADER);
        assert_eq!(textured.vertex_layout.array_stride, 20);

        let cube = SceneDesc::for_variant(Variant::Cube);
        assert_eq!(cube.shader, TRANSFORMED_COLOR_SHADER);
        assert_eq!(cube.vertex_layout.array_stride, 28);
    }
}
