//! JS-facing audio engine API
//!
//! The engine is the sole owner of the voice and context; it lives in a
//! thread-local slot (wasm runs single-threaded and the voice handle is a
//! JS object, so the slot is a `RefCell`, not a `Mutex`). The slot borrow
//! is held while the engine runs the host's hooks, so every entry point
//! takes the borrow fallibly: a hook that calls back into this module is
//! a logged no-op, never a trap.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use super::helpers;
use crate::audio::web::WebSynth;
use crate::audio::AudioEngine;
use crate::models::NoteDescriptor;
use crate::{wasm_error, wasm_info, wasm_warn};

thread_local! {
    static ENGINE: RefCell<Option<AudioEngine<WebSynth>>> = RefCell::new(None);
}

/// Run an operation against the configured engine
///
/// Returns `fallback` when no engine is configured or when the slot is
/// already borrowed (a host hook re-entered the API mid-call).
fn with_engine<R>(
    op: &str,
    fallback: R,
    f: impl FnOnce(&mut AudioEngine<WebSynth>) -> R,
) -> R {
    ENGINE.with(|slot| {
        let Ok(mut guard) = slot.try_borrow_mut() else {
            wasm_warn!("{} re-entered from an audio hook, ignoring", op);
            return fallback;
        };
        match guard.as_mut() {
            Some(engine) => f(engine),
            None => {
                wasm_warn!("{} called before configureAudio", op);
                fallback
            }
        }
    })
}

/// Register the host's synthesis hooks, replacing any existing engine
///
/// See `audio::web` for the expected hooks shape. Must be called before
/// any other audio operation.
#[wasm_bindgen(js_name = configureAudio)]
pub fn configure_audio(hooks: JsValue) -> Result<(), JsValue> {
    let backend = WebSynth::from_hooks(&hooks).map_err(|e| {
        wasm_error!("audio hooks rejected");
        e
    })?;
    ENGINE.with(|slot| match slot.try_borrow_mut() {
        Ok(mut guard) => {
            *guard = Some(AudioEngine::new(backend));
            wasm_info!("audio hooks configured");
            Ok(())
        }
        Err(_) => Err(JsValue::from_str(
            "configureAudio re-entered from an audio hook",
        )),
    })
}

/// Create the voice and start the execution context
///
/// Safe to call repeatedly; returns `false` until the platform's
/// permission gate opens. Never throws.
#[wasm_bindgen(js_name = initializeAudio)]
pub fn initialize_audio() -> bool {
    with_engine("initializeAudio", false, |engine| engine.initialize())
}

/// Play a `{pitch, duration}` descriptor, best-effort
#[wasm_bindgen(js_name = playNote)]
pub fn play_note(descriptor: JsValue) -> Result<(), JsValue> {
    let note: NoteDescriptor = helpers::deserialize(descriptor, "Invalid note descriptor")?;
    play_descriptor(&note);
    Ok(())
}

/// Set the voice volume from a linear 0–1 value
#[wasm_bindgen(js_name = setVolume)]
pub fn set_volume(linear: f64) {
    with_engine("setVolume", (), |engine| engine.set_volume(linear));
}

/// Entry point shared with the click orchestration
pub(crate) fn play_descriptor(note: &NoteDescriptor) {
    with_engine("playNote", (), |engine| engine.play_note(note));
}
