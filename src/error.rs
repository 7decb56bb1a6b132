//! Engine error type
//!
//! Errors only arise while building shapes, objects and settings. Once a
//! simulation is constructed, every per-tick operation is infallible.

use crate::sim::ObjectId;

/// Errors that can occur while constructing engine values or loading settings.
#[derive(Debug)]
pub enum EngineError {
    /// A coordinate or scalar was NaN or infinite.
    NonFinite(&'static str),
    /// Circle radius must be strictly positive.
    InvalidRadius(f32),
    /// Line segment endpoints coincide.
    DegenerateSegment,
    /// A move context tunable is out of range.
    InvalidMoveContext(String),
    /// Settings failed validation.
    InvalidSettings(String),
    /// An object id does not exist in the field.
    UnknownObject(ObjectId),
    /// A command addressed an object that never moves.
    StaticObject(ObjectId),
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON serialization/deserialization error.
    Json(serde_json::Error),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NonFinite(what) => write!(f, "{what} must be finite"),
            EngineError::InvalidRadius(r) => write!(f, "circle radius must be positive, got {r}"),
            EngineError::DegenerateSegment => write!(f, "line segment endpoints must differ"),
            EngineError::InvalidMoveContext(msg) => write!(f, "invalid move context: {msg}"),
            EngineError::InvalidSettings(msg) => write!(f, "invalid settings: {msg}"),
            EngineError::UnknownObject(id) => write!(f, "unknown object id {}", id.0),
            EngineError::StaticObject(id) => write!(f, "object id {} cannot move", id.0),
            EngineError::Io(e) => write!(f, "IO error: {e}"),
            EngineError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Io(e) => Some(e),
            EngineError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Json(e)
    }
}

/// Reject NaN/Inf inputs at construction time
pub(crate) fn ensure_finite(value: f32, what: &'static str) -> Result<f32, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFinite(what))
    }
}
