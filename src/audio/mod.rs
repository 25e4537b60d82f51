//! Sound cues for game events
//!
//! Playback is fire-and-forget: the game never waits on a cue or hears back
//! about it. A failed cue is logged and dropped.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::{Write, stderr};

/// Which sound effects implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SoundMode {
    /// No sound
    #[default]
    Off,
    /// Ring the terminal bell
    Bell,
}

/// A game event that has a sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// The snake ate food
    Eat,
    /// The game was lost
    Lose,
}

pub trait SoundEffects {
    fn play(&mut self, cue: SoundCue);
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct Silent;

impl SoundEffects for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Rings the terminal bell: once for food, twice on a loss
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SoundEffects for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        let rings: &[u8] = match cue {
            SoundCue::Eat => b"\x07",
            SoundCue::Lose => b"\x07\x07",
        };

        let result = self.out.write_all(rings).and_then(|_| self.out.flush());
        if let Err(err) = result {
            tracing::warn!(?cue, %err, "failed to play sound cue");
        }
    }
}

/// Build the sound effects for a mode. The bell writes to stderr, the same
/// stream the terminal UI draws on.
pub fn sound_effects(mode: SoundMode) -> Box<dyn SoundEffects> {
    match mode {
        SoundMode::Off => Box::new(Silent),
        SoundMode::Bell => Box::new(TerminalBell::new(stderr())),
    }
}
