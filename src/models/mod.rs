//! Data models for the score tutor
//!
//! Geometry primitives, element classifications, and the pitch ladder used
//! by the interaction mapper and the audio engine.

pub mod elements;
pub mod geometry;
pub mod note;

// Re-export commonly used types
pub use elements::{ElementClassification, NodeSnapshot};
pub use geometry::{Point, Rect};
pub use note::{Duration, NoteDescriptor, Pitch, PITCH_LADDER};
