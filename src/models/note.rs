//! Pitch ladder, symbolic durations, and the note message
//!
//! Position-to-pitch mapping uses a single fixed diatonic octave
//! (`C4..C5`); no clef or key signature transposition is applied.

use serde::{Deserialize, Serialize};

/// One of the 8 playable pitches, low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pitch {
    C4,
    D4,
    E4,
    F4,
    G4,
    A4,
    B4,
    C5,
}

/// The fixed pitch ladder, index 0 = lowest
pub const PITCH_LADDER: [Pitch; 8] = [
    Pitch::C4,
    Pitch::D4,
    Pitch::E4,
    Pitch::F4,
    Pitch::G4,
    Pitch::A4,
    Pitch::B4,
    Pitch::C5,
];

impl Pitch {
    /// Scientific pitch notation, as the synthesis collaborator expects it
    pub fn notation(&self) -> &'static str {
        match self {
            Pitch::C4 => "C4",
            Pitch::D4 => "D4",
            Pitch::E4 => "E4",
            Pitch::F4 => "F4",
            Pitch::G4 => "G4",
            Pitch::A4 => "A4",
            Pitch::B4 => "B4",
            Pitch::C5 => "C5",
        }
    }

    /// Ladder pitch for an index, clamped into `0..=7`
    pub fn from_ladder_index(index: usize) -> Pitch {
        PITCH_LADDER[index.min(PITCH_LADDER.len() - 1)]
    }
}

/// Symbolic note duration
///
/// Deserializes from either the subtype word (`"quarter"`) or the
/// collaborator's notation-value token (`"4n"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Duration {
    #[serde(alias = "1n")]
    Whole,
    #[serde(alias = "2n")]
    Half,
    #[serde(alias = "4n")]
    Quarter,
    #[serde(alias = "8n")]
    Eighth,
    #[serde(alias = "16n")]
    Sixteenth,
}

impl Duration {
    /// Notation-value token understood by the synthesis collaborator
    pub fn token(&self) -> &'static str {
        match self {
            Duration::Whole => "1n",
            Duration::Half => "2n",
            Duration::Quarter => "4n",
            Duration::Eighth => "8n",
            Duration::Sixteenth => "16n",
        }
    }

    /// Subtype key used by the term table
    pub fn subtype_key(&self) -> &'static str {
        match self {
            Duration::Whole => "whole",
            Duration::Half => "half",
            Duration::Quarter => "quarter",
            Duration::Eighth => "eighth",
            Duration::Sixteenth => "sixteenth",
        }
    }

    /// Parse a renderer duration hint, given as either the subtype word or
    /// the notation-value token; unknown hints resolve to `None`
    pub fn from_hint(hint: &str) -> Option<Duration> {
        match hint {
            "whole" | "1n" => Some(Duration::Whole),
            "half" | "2n" => Some(Duration::Half),
            "quarter" | "4n" => Some(Duration::Quarter),
            "eighth" | "8n" => Some(Duration::Eighth),
            "sixteenth" | "16n" => Some(Duration::Sixteenth),
            _ => None,
        }
    }
}

/// The sole message passed from the interaction side to the audio engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteDescriptor {
    pub pitch: Pitch,
    pub duration: Duration,
}

impl NoteDescriptor {
    /// Quarter-note descriptor, the click-to-play default
    pub fn quarter(pitch: Pitch) -> Self {
        Self {
            pitch,
            duration: Duration::Quarter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_index_clamps() {
        assert_eq!(Pitch::from_ladder_index(0), Pitch::C4);
        assert_eq!(Pitch::from_ladder_index(7), Pitch::C5);
        assert_eq!(Pitch::from_ladder_index(99), Pitch::C5);
    }

    #[test]
    fn test_duration_tokens() {
        assert_eq!(Duration::Quarter.token(), "4n");
        assert_eq!(Duration::Whole.token(), "1n");
        assert_eq!(Duration::Sixteenth.token(), "16n");
    }

    #[test]
    fn test_duration_hint_parsing() {
        assert_eq!(Duration::from_hint("eighth"), Some(Duration::Eighth));
        assert_eq!(Duration::from_hint("2n"), Some(Duration::Half));
        assert_eq!(Duration::from_hint("breve"), None);
    }
}
