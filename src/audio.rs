//! Audio cue dispatch
//!
//! The state machine emits discrete cue identifiers at transitions; an
//! external audio collaborator drains them from the receiving end of the
//! channel and synthesizes whatever it likes. Dispatch is fire-and-forget:
//! the simulation never blocks on the audio side and never learns whether
//! anyone is listening.

use std::sync::mpsc::{self, Receiver, Sender};

/// Sound cue identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// A projectile left the thrower's hand
    Throw,
    /// An impact punched a hole in a structure
    Explosion,
    /// A combatant went down
    Elimination,
    /// Round winner celebration flourish
    Victory,
}

/// Sending half of the cue boundary, held by the match state machine
pub struct CueQueue {
    tx: Option<Sender<AudioCue>>,
}

impl CueQueue {
    /// Queue connected to a drain the audio collaborator polls
    pub fn channel() -> (Self, Receiver<AudioCue>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Queue with no listener (headless runs and tests)
    pub fn disconnected() -> Self {
        Self { tx: None }
    }

    /// Send a cue without waiting; a missing or dropped listener is fine
    pub fn dispatch(&self, cue: AudioCue) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(cue);
        }
    }
}
