//! GPU rendering subsystem.
//!
//! Convention:
//! - a renderer owns every GPU resource it creates (shader, buffers, pipeline)
//! - dropping the renderer releases them; there is no separate teardown call

mod ctx;
mod mesh;
pub mod shader;

pub use ctx::{RenderCtx, RenderTarget, Viewport};
pub use mesh::{MeshRenderer, CLEAR_COLOR};
