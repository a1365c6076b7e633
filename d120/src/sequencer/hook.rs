use std::time::Duration;

use crate::{
    cosmetics::particles::ParticleBurst,
    rules::{choice::Choice, partition::RangedChoice},
    sequencer::state::{DisplayedNumber, RollOutcome, SessionId},
};

/// Callbacks for a render surface. Every method defaults to doing nothing.
#[allow(unused)]
pub trait Hook {
    /// The die should start a spin lasting roughly `duration`.
    fn on_spin_start(&mut self, session: SessionId, duration: Duration) {}
    fn on_display(&mut self, displayed: DisplayedNumber) {}
    fn on_particles(&mut self, burst: &ParticleBurst) {}
    fn on_resolve(&mut self, roll: u32, index: usize, choice: &RangedChoice) {}
    fn on_reveal(&mut self, outcome: &RollOutcome) {}
    fn on_reconfigure(&mut self, choices: &[Choice]) {}
}
