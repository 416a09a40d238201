//! Hand-authored meshes.
//!
//! Renderers treat clockwise triangles as front faces and cull the rest.
//! The quads and the textured cube are clockwise seen from outside. The colored
//! cube keeps its historical index order, which winds every triangle
//! clockwise seen from inside, so it shows its far faces.

use super::vertex::{ColorVertex, TexVertex};

/// Immutable index data for one mesh.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum IndexData {
    U16(&'static [u16]),
    U32(&'static [u32]),
}

impl IndexData {
    pub fn format(self) -> wgpu::IndexFormat {
        match self {
            IndexData::U16(_) => wgpu::IndexFormat::Uint16,
            IndexData::U32(_) => wgpu::IndexFormat::Uint32,
        }
    }

    pub fn count(self) -> u32 {
        match self {
            IndexData::U16(i) => i.len() as u32,
            IndexData::U32(i) => i.len() as u32,
        }
    }

    pub fn bytes(self) -> &'static [u8] {
        match self {
            IndexData::U16(i) => bytemuck::cast_slice(i),
            IndexData::U32(i) => bytemuck::cast_slice(i),
        }
    }

    /// Largest referenced vertex index, `None` for an empty list.
    pub fn max_index(self) -> Option<u32> {
        match self {
            IndexData::U16(i) => i.iter().copied().max().map(u32::from),
            IndexData::U32(i) => i.iter().copied().max(),
        }
    }
}

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

// ── quad ──────────────────────────────────────────────────────────────────

/// Quad corners: bottom-left, top-left, bottom-right, top-right.
const QUAD_CORNERS: [ColorVertex; 4] = [
    ColorVertex::new([-0.5, -0.5, 0.5], WHITE),
    ColorVertex::new([-0.5, 0.5, 0.5], RED),
    ColorVertex::new([0.5, -0.5, 0.5], GREEN),
    ColorVertex::new([0.5, 0.5, 0.5], BLUE),
];

pub static QUAD_VERTICES: [ColorVertex; 4] = QUAD_CORNERS;

pub static QUAD_INDICES: [u16; 6] = [0, 1, 2, 1, 3, 2];

/// The indexed quad expanded into a plain triangle list.
pub static QUAD_TRIANGLE_LIST: [ColorVertex; 6] = [
    QUAD_CORNERS[0],
    QUAD_CORNERS[1],
    QUAD_CORNERS[2],
    QUAD_CORNERS[1],
    QUAD_CORNERS[3],
    QUAD_CORNERS[2],
];

// ── colored cube ──────────────────────────────────────────────────────────

pub static CUBE_COLOR_VERTICES: [ColorVertex; 8] = [
    ColorVertex::new([-0.5, -0.5, 0.5], WHITE),
    ColorVertex::new([-0.5, 0.5, 0.5], RED),
    ColorVertex::new([0.5, -0.5, 0.5], GREEN),
    ColorVertex::new([0.5, 0.5, 0.5], BLUE),
    ColorVertex::new([-0.5, -0.5, -0.5], BLACK),
    ColorVertex::new([-0.5, 0.5, -0.5], YELLOW),
    ColorVertex::new([0.5, -0.5, -0.5], CYAN),
    ColorVertex::new([0.5, 0.5, -0.5], MAGENTA),
];

pub static CUBE_COLOR_INDICES: [u32; 36] = [
    0, 1, 2, 1, 3, 2, //
    5, 0, 4, 5, 1, 0, //
    6, 7, 4, 4, 7, 5, //
    2, 3, 6, 3, 7, 6, //
    5, 3, 1, 5, 7, 3, //
    0, 2, 6, 6, 4, 0, //
];

// ── textured cube ─────────────────────────────────────────────────────────

/// Four vertices per face so every face carries its own texture coordinates.
///
/// Per face: bottom-left, top-left, bottom-right, top-right as seen from outside.
pub static CUBE_TEX_VERTICES: [TexVertex; 24] = [
    // -Z
    TexVertex::new([-0.5, -0.5, -0.5], [0.0, 1.0]),
    TexVertex::new([-0.5, 0.5, -0.5], [0.0, 0.0]),
    TexVertex::new([0.5, -0.5, -0.5], [1.0, 1.0]),
    TexVertex::new([0.5, 0.5, -0.5], [1.0, 0.0]),
    // +Z
    TexVertex::new([0.5, -0.5, 0.5], [0.0, 1.0]),
    TexVertex::new([0.5, 0.5, 0.5], [0.0, 0.0]),
    TexVertex::new([-0.5, -0.5, 0.5], [1.0, 1.0]),
    TexVertex::new([-0.5, 0.5, 0.5], [1.0, 0.0]),
    // +X
    TexVertex::new([0.5, -0.5, -0.5], [0.0, 1.0]),
    TexVertex::new([0.5, 0.5, -0.5], [0.0, 0.0]),
    TexVertex::new([0.5, -0.5, 0.5], [1.0, 1.0]),
    TexVertex::new([0.5, 0.5, 0.5], [1.0, 0.0]),
    // -X
    TexVertex::new([-0.5, -0.5, 0.5], [0.0, 1.0]),
    TexVertex::new([-0.5, 0.5, 0.5], [0.0, 0.0]),
    TexVertex::new([-0.5, -0.5, -0.5], [1.0, 1.0]),
    TexVertex::new([-0.5, 0.5, -0.5], [1.0, 0.0]),
    // +Y
    TexVertex::new([-0.5, 0.5, -0.5], [0.0, 1.0]),
    TexVertex::new([-0.5, 0.5, 0.5], [0.0, 0.0]),
    TexVertex::new([0.5, 0.5, -0.5], [1.0, 1.0]),
    TexVertex::new([0.5, 0.5, 0.5], [1.0, 0.0]),
    // -Y
    TexVertex::new([-0.5, -0.5, 0.5], [0.0, 1.0]),
    TexVertex::new([-0.5, -0.5, -0.5], [0.0, 0.0]),
    TexVertex::new([0.5, -0.5, 0.5], [1.0, 1.0]),
    TexVertex::new([0.5, -0.5, -0.5], [1.0, 0.0]),
];

pub static CUBE_TEX_INDICES: [u16; 36] = [
    0, 1, 2, 1, 3, 2, //
    4, 5, 6, 5, 7, 6, //
    8, 9, 10, 9, 11, 10, //
    12, 13, 14, 13, 15, 14, //
    16, 17, 18, 17, 19, 18, //
    20, 21, 22, 21, 23, 22, //
];
