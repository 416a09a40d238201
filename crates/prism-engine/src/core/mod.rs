//! Core engine-facing contracts.
//!
//! This module defines the stable interface between the runtime (platform loop)
//! and the demo layer, plus the program-wide lifecycle state machine.

mod app;
mod ctx;
mod lifecycle;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
pub use lifecycle::{Lifecycle, Phase};
