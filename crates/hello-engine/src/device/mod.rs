//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (the window's swapchain)
//! - acquiring frames and submitting recorded work
//! - turning asynchronous device errors into values callers can check

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::{DeviceError, DeviceErrorKind, DeviceErrorSink, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use surface::{choose_alpha_mode, choose_surface_format, classify_surface_error};
