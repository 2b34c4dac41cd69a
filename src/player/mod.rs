//! Click-to-play orchestrator
//!
//! Maps a click to the nearest note and builds the descriptor the audio
//! engine should play. The caller applies the "playing" mark and schedules
//! its removal; visual feedback is decoupled from audio success.

use serde::Serialize;

use crate::mapper;
use crate::models::{NodeSnapshot, NoteDescriptor, Point};

/// How long the "playing" mark stays on a clicked note, in milliseconds
pub const PLAYING_MARK_MS: i32 = 400;

/// Outcome of a click that landed on a note
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayAction {
    /// Identity of the node to mark "playing"
    pub node_id: usize,
    pub descriptor: NoteDescriptor,
}

/// Resolve a click to a play action, if a note is close enough
///
/// Clicks with no note inside the acceptance threshold are a logged no-op.
/// The duration is the quarter-note default.
pub fn resolve_click(pointer: Point, candidates: &[NodeSnapshot]) -> Option<PlayAction> {
    let hit = match mapper::locate_nearest_note(pointer, candidates) {
        Some(hit) => hit,
        None => {
            log::debug!(
                "no note near click at ({:.1}, {:.1})",
                pointer.x,
                pointer.y
            );
            return None;
        }
    };

    let pitch = mapper::resolve_pitch(hit.node);
    Some(PlayAction {
        node_id: hit.node.id,
        descriptor: NoteDescriptor::quarter(pitch),
    })
}
