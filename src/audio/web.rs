//! Web synthesis backend over host-supplied hooks
//!
//! The host registers a hooks object wrapping its synthesis library's
//! surface (a Tone.js-style voice with `triggerAttackRelease` and a decibel
//! `volume.value`, plus context start/resume gated by a user gesture):
//!
//! ```js
//! configureAudio({
//!   createVoice:   () => new Tone.Synth().toDestination(),
//!   startContext:  () => Tone.start(),
//!   resumeContext: () => Tone.context.resume(),
//!   contextState:  () => Tone.context.state,
//! });
//! ```
//!
//! Promises returned by the platform are fire-and-forget at this boundary;
//! a hook call that throws counts as failure.

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::{AudioError, ContextState, SynthBackend};
use crate::models::NoteDescriptor;

/// The host's synthesis hooks, validated once at configuration time
struct Hooks {
    create_voice: Function,
    start_context: Function,
    resume_context: Function,
    context_state: Function,
}

/// `SynthBackend` over the browser's synthesis collaborator
pub struct WebSynth {
    hooks: Hooks,
    voice: Option<JsValue>,
}

impl WebSynth {
    /// Build a backend from the host's hooks object
    ///
    /// Fails if any of the four hook functions is missing.
    pub fn from_hooks(hooks: &JsValue) -> Result<Self, JsValue> {
        Ok(Self {
            hooks: Hooks {
                create_voice: hook_function(hooks, "createVoice")?,
                start_context: hook_function(hooks, "startContext")?,
                resume_context: hook_function(hooks, "resumeContext")?,
                context_state: hook_function(hooks, "contextState")?,
            },
            voice: None,
        })
    }
}

fn hook_function(hooks: &JsValue, name: &str) -> Result<Function, JsValue> {
    Reflect::get(hooks, &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or_else(|| JsValue::from_str(&format!("audio hooks missing function '{}'", name)))
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

impl SynthBackend for WebSynth {
    fn create_voice(&mut self) -> Result<(), AudioError> {
        let voice = self
            .hooks
            .create_voice
            .call0(&JsValue::NULL)
            .map_err(|e| AudioError::VoiceCreation(describe(&e)))?;
        if voice.is_null() || voice.is_undefined() {
            return Err(AudioError::VoiceCreation(
                "voice factory returned nothing".into(),
            ));
        }
        self.voice = Some(voice);
        Ok(())
    }

    fn has_voice(&self) -> bool {
        self.voice.is_some()
    }

    fn context_state(&self) -> ContextState {
        // Anything other than a clean "running" answer is treated as
        // suspended so a resume attempt follows.
        match self.hooks.context_state.call0(&JsValue::NULL) {
            Ok(state) if state.as_string().as_deref() == Some("running") => ContextState::Running,
            _ => ContextState::Suspended,
        }
    }

    fn start_context(&mut self) -> Result<(), AudioError> {
        self.hooks
            .start_context
            .call0(&JsValue::NULL)
            .map(|_| ())
            .map_err(|e| AudioError::Context(describe(&e)))
    }

    fn resume_context(&mut self) -> Result<(), AudioError> {
        self.hooks
            .resume_context
            .call0(&JsValue::NULL)
            .map(|_| ())
            .map_err(|e| AudioError::Context(describe(&e)))
    }

    fn trigger(&mut self, note: &NoteDescriptor) -> Result<(), AudioError> {
        let voice = self
            .voice
            .as_ref()
            .ok_or_else(|| AudioError::Trigger("no voice object".into()))?;

        let method = Reflect::get(voice, &JsValue::from_str("triggerAttackRelease"))
            .ok()
            .and_then(|m| m.dyn_into::<Function>().ok())
            .ok_or_else(|| AudioError::Trigger("voice has no triggerAttackRelease".into()))?;

        method
            .call2(
                voice,
                &JsValue::from_str(note.pitch.notation()),
                &JsValue::from_str(note.duration.token()),
            )
            .map(|_| ())
            .map_err(|e| AudioError::Trigger(describe(&e)))
    }

    fn apply_volume_db(&mut self, db: f64) {
        // voice.volume.value = db
        let Some(voice) = self.voice.as_ref() else {
            return;
        };
        if let Ok(volume) = Reflect::get(voice, &JsValue::from_str("volume")) {
            let _ = Reflect::set(&volume, &JsValue::from_str("value"), &JsValue::from_f64(db));
        }
    }
}
