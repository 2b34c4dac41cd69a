//! Interactive Score Tutor WASM Module
//!
//! Hover a rendered music score to read what a symbol means; click a note
//! to hear its pitch. Score rendering and sound synthesis live in external
//! JS collaborators; this module owns the interaction mapping, the
//! terminology index, and the audio engine lifecycle.

pub mod api;
pub mod audio;
pub mod mapper;
pub mod models;
pub mod player;
pub mod terms;
pub mod tooltip;

// Re-export commonly used types
pub use models::{ElementClassification, NodeSnapshot, NoteDescriptor, Pitch};
pub use tooltip::TooltipState;

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console_log")]
    console_log::init_with_level(log::Level::Debug).expect("failed to initialize logger");

    log::info!("Score Tutor WASM module initialized");
}
