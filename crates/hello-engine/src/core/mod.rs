//! Core engine-facing contracts.
//!
//! The interface between the runtime loop and the application: lifecycle
//! callbacks plus a per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
