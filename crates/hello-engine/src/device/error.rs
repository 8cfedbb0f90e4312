use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Unrecoverable (OOM or an unexplained acquire failure); the caller must stop.
    Fatal,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DeviceErrorKind {
    Validation,
    OutOfMemory,
    Internal,
    Lost,
}

/// An error wgpu reported outside of a `Result`, captured for later inspection.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeviceError {
    pub kind: DeviceErrorKind,
    pub message: String,
}

impl DeviceError {
    pub fn new(kind: DeviceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<wgpu::Error> for DeviceError {
    fn from(err: wgpu::Error) -> Self {
        let kind = match &err {
            wgpu::Error::Validation { .. } => DeviceErrorKind::Validation,
            wgpu::Error::OutOfMemory { .. } => DeviceErrorKind::OutOfMemory,
            _ => DeviceErrorKind::Internal,
        };
        Self::new(kind, err.to_string())
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DeviceErrorKind::Validation => "validation error",
            DeviceErrorKind::OutOfMemory => "out of memory",
            DeviceErrorKind::Internal => "internal error",
            DeviceErrorKind::Lost => "device lost",
        };
        write!(f, "{kind}: {}", self.message)
    }
}

impl std::error::Error for DeviceError {}

/// Shared slot that keeps the first device error until someone takes it.
///
/// wgpu reports creation and submission failures through the device's
/// uncaptured-error callback rather than a return value. The callback records
/// into this sink; callers that must fail on such errors call [`take`](Self::take)
/// right after the operation.
#[derive(Debug, Clone, Default)]
pub struct DeviceErrorSink {
    slot: Arc<Mutex<Option<DeviceError>>>,
}

impl DeviceErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `err` unless an earlier error is still pending.
    pub fn record(&self, err: DeviceError) {
        let mut slot = self.lock();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    /// Returns and clears the pending error.
    pub fn take(&self) -> Option<DeviceError> {
        self.lock().take()
    }

    // The slot only ever holds plain data; a panic while it was held cannot
    // leave it inconsistent.
    fn lock(&self) -> MutexGuard<'_, Option<DeviceError>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_is_kept() {
        let sink = DeviceErrorSink::new();
        sink.record(DeviceError::new(DeviceErrorKind::Validation, "bad shader"));
        sink.record(DeviceError::new(DeviceErrorKind::OutOfMemory, "later"));

        let err = sink.take().unwrap();
        assert_eq!(err.kind, DeviceErrorKind::Validation);
        assert_eq!(err.message, "bad shader");
    }

    #[test]
    fn take_clears_the_slot() {
        let sink = DeviceErrorSink::new();
        sink.record(DeviceError::new(DeviceErrorKind::Internal, "x"));
        assert!(sink.take().is_some());
        assert!(sink.take().is_none());
    }

    #[test]
    fn clones_share_the_slot() {
        let sink = DeviceErrorSink::new();
        let handler_side = sink.clone();
        handler_side.record(DeviceError::new(DeviceErrorKind::Lost, "driver reset"));
        assert_eq!(sink.take().map(|e| e.kind), Some(DeviceErrorKind::Lost));
    }

    #[test]
    fn display_names_the_kind() {
        let err = DeviceError::new(DeviceErrorKind::Validation, "entry point `main` not found");
        assert_eq!(err.to_string(), "validation error: entry point `main` not found");
    }
}
