//! JS-facing API for the score tutor
//!
//! # Module Structure
//!
//! - `helpers`: serialization and console-logging utilities shared by the
//!   API surface
//! - `audio`: audio engine exports over the host's synthesis hooks
//! - `view`: `ScoreView`, the scoped event wiring on the score container

pub mod audio;
pub mod helpers;
pub mod view;

pub use audio::{configure_audio, initialize_audio, play_note, set_volume};
pub use view::ScoreView;
