//! Device bring-up and swapchain handling.
//!
//! [`Gpu`] is the only owner of the adapter, device, queue and surface. Frame
//! acquisition and surface-error recovery also live here so renderers only
//! ever see a device, a queue and a target view.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
