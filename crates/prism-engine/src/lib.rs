//! Prism engine crate.
//!
//! Window, GPU device, scene descriptions, and the mesh renderer behind the
//! spinning-mesh demos. The demo binary only picks a [`scene::Variant`] and
//! implements [`core::App`].

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod scene;
pub mod window;
