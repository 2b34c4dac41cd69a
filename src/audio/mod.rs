//! Audio engine lifecycle controller
//!
//! Owns the synthesis voice and its execution context behind the
//! [`SynthBackend`] seam. Initialization is gated by the browser's autoplay
//! policy and can be attempted many times before it succeeds, so every
//! public operation re-checks and repairs state instead of assuming it was
//! called in order. Nothing here throws across the component boundary:
//! failures become a `false` return or a log line.

pub mod web;

use thiserror::Error;

use crate::models::NoteDescriptor;

/// Errors surfaced by a synthesis backend
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("voice construction failed: {0}")]
    VoiceCreation(String),

    #[error("execution context unavailable: {0}")]
    Context(String),

    #[error("playback trigger failed: {0}")]
    Trigger(String),
}

/// Permission gate of the execution context, as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Running,
    Suspended,
}

/// The seam to the audio-synthesis collaborator
///
/// Calls are synchronous at this boundary; completion of the platform's
/// underlying promises is fire-and-forget.
pub trait SynthBackend {
    /// Construct the voice object
    fn create_voice(&mut self) -> Result<(), AudioError>;

    /// Whether a voice object exists
    fn has_voice(&self) -> bool;

    /// Current state of the execution context
    fn context_state(&self) -> ContextState;

    /// Start the execution context (requires a user gesture on the web)
    fn start_context(&mut self) -> Result<(), AudioError>;

    /// Resume a suspended execution context
    fn resume_context(&mut self) -> Result<(), AudioError>;

    /// Trigger the voice with a pitch and duration
    fn trigger(&mut self, note: &NoteDescriptor) -> Result<(), AudioError>;

    /// Apply a decibel volume to the voice
    fn apply_volume_db(&mut self, db: f64);
}

/// Engine lifecycle state
///
/// `Initializing` doubles as the in-flight latch: a reentrant
/// `initialize()` that observes it backs off without touching the voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Initializing,
    Ready,
}

/// Voice volume before the host sets one, in decibels
pub const DEFAULT_VOLUME_DB: f64 = -12.0;

/// Convert a linear 0..1 gain to the voice's native decibel unit
pub fn gain_to_db(linear: f64) -> f64 {
    20.0 * linear.clamp(0.0, 1.0).log10()
}

/// The audio engine: sole owner of the voice and its context state
pub struct AudioEngine<B: SynthBackend> {
    backend: B,
    state: EngineState,
    pending_volume_db: Option<f64>,
}

impl<B: SynthBackend> AudioEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: EngineState::Uninitialized,
            pending_volume_db: Some(DEFAULT_VOLUME_DB),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Read access to the backend seam
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether the engine is ready but the permission gate is still closed
    pub fn is_suspended(&self) -> bool {
        self.state == EngineState::Ready
            && self.backend.context_state() == ContextState::Suspended
    }

    /// Create the voice (at most once) and start the execution context
    ///
    /// Idempotent and retryable: a failure leaves the engine
    /// `Uninitialized` and the next user action may try again. Returns
    /// `false` on failure or when another initialization is in flight.
    pub fn initialize(&mut self) -> bool {
        match self.state {
            EngineState::Initializing => {
                log::warn!("audio initialization already in flight, ignoring reentrant call");
                return false;
            }
            EngineState::Ready => {
                // Repair the permission gate if the context fell back asleep
                if self.backend.context_state() == ContextState::Suspended {
                    if let Err(e) = self.backend.resume_context() {
                        log::warn!("audio context resume failed: {}", e);
                        return false;
                    }
                }
                return true;
            }
            EngineState::Uninitialized => {}
        }

        self.state = EngineState::Initializing;

        if !self.backend.has_voice() {
            if let Err(e) = self.backend.create_voice() {
                log::warn!("{}", e);
                self.state = EngineState::Uninitialized;
                return false;
            }
            if let Some(db) = self.pending_volume_db.take() {
                self.backend.apply_volume_db(db);
            }
        }

        if let Err(e) = self.backend.start_context() {
            log::warn!("{}", e);
            self.state = EngineState::Uninitialized;
            return false;
        }

        self.state = EngineState::Ready;
        log::info!("audio engine ready");
        true
    }

    /// Play a note, best-effort
    ///
    /// Repairs engine state first: initializes if needed, resumes a
    /// suspended context before the trigger. Every failure path aborts
    /// silently apart from a log line.
    pub fn play_note(&mut self, note: &NoteDescriptor) {
        if self.state != EngineState::Ready && !self.initialize() {
            log::warn!("skipping playback, audio engine not ready");
            return;
        }

        if self.backend.context_state() == ContextState::Suspended {
            if let Err(e) = self.backend.resume_context() {
                log::warn!("resume before trigger failed: {}", e);
                return;
            }
        }

        if let Err(e) = self.backend.trigger(note) {
            log::warn!("playback of {} failed: {}", note.pitch.notation(), e);
        }
    }

    /// Set the voice volume from a linear 0..1 value
    ///
    /// Applied immediately if the voice exists, otherwise stored and
    /// applied when the voice is created. Callable in any state.
    pub fn set_volume(&mut self, linear: f64) {
        let db = gain_to_db(linear);
        if self.backend.has_voice() {
            self.backend.apply_volume_db(db);
            self.pending_volume_db = None;
        } else {
            self.pending_volume_db = Some(db);
        }
    }
}
