//! Musical element classifications and rendered-node snapshots
//!
//! The score itself is rendered by an external notation library; what this
//! crate sees of it is a per-event `NodeSnapshot` of a single visual
//! primitive, read once and discarded when the event is done.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// The musical category a rendered element represents
///
/// Serialized with the JS-facing bucket keys used by the term table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementClassification {
    #[serde(rename = "notes")]
    Note,
    #[serde(rename = "clefs")]
    Clef,
    #[serde(rename = "timeSignatures")]
    TimeSignature,
    #[serde(rename = "keySignatures")]
    KeySignature,
    #[serde(rename = "dynamics")]
    Dynamic,
    #[serde(rename = "articulations")]
    Articulation,
}

impl ElementClassification {
    /// Bucket key in the term index
    pub fn key(&self) -> &'static str {
        match self {
            ElementClassification::Note => "notes",
            ElementClassification::Clef => "clefs",
            ElementClassification::TimeSignature => "timeSignatures",
            ElementClassification::KeySignature => "keySignatures",
            ElementClassification::Dynamic => "dynamics",
            ElementClassification::Articulation => "articulations",
        }
    }

    /// Default subtype when the renderer attached no explicit hint
    ///
    /// Classifications without subtypes return `None`.
    pub fn default_subtype(&self) -> Option<&'static str> {
        match self {
            ElementClassification::Note => Some("quarter"),
            ElementClassification::Clef => Some("treble"),
            ElementClassification::TimeSignature => Some("common"),
            _ => None,
        }
    }
}

/// Read-only snapshot of one rendered score element, taken per event
///
/// Rectangles are container-relative. The snapshot is never retained past
/// the pointer event that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Identity for highlight bookkeeping (document order index)
    pub id: usize,

    /// Bounding rectangle of the element
    pub rect: Rect,

    /// The element's own style/class tags
    pub classes: Vec<String>,

    /// Style/class tags carried by the element's ancestor chain
    #[serde(default)]
    pub ancestor_classes: Vec<String>,

    /// Renderer hint: symbolic note duration (`data-duration`)
    #[serde(default)]
    pub duration_hint: Option<String>,

    /// Renderer hint: clef kind (`data-clef`)
    #[serde(default)]
    pub clef_hint: Option<String>,

    /// Renderer hint: time signature kind (`data-time`)
    #[serde(default)]
    pub time_hint: Option<String>,

    /// Bounding rectangle of the nearest staff-tagged ancestor, if any
    #[serde(default)]
    pub staff_rect: Option<Rect>,
}

impl NodeSnapshot {
    /// Snapshot with only geometry and class tags, no renderer hints
    pub fn bare(id: usize, rect: Rect, classes: Vec<String>) -> Self {
        Self {
            id,
            rect,
            classes,
            ancestor_classes: Vec::new(),
            duration_hint: None,
            clef_hint: None,
            time_hint: None,
            staff_rect: None,
        }
    }
}
