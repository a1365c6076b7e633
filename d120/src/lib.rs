//! A d120 decision roller.
//!
//! A handful of named, colored [`Choice`](rules::choice::Choice)s split the
//! faces `1..=120` between them as evenly as possible; a roll lands on one
//! face and the choice owning it wins. [`RollSequencer`](sequencer::RollSequencer)
//! runs the timed spin, settle and reveal around each roll.

pub mod choice_parser;
pub mod config;
pub mod cosmetics;
pub mod editor;
pub mod error;
pub mod rules;
pub mod sequencer;
pub mod statistics;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::{
        choice_parser::{parse_choice_spec, parse_color},
        config::{Config, Timing},
        cosmetics::{
            marble::{MarbleTexture, NumberLabel},
            particles::{Particle, ParticleBurst},
            spin::{DieMotion, SpinAnimation, ease_in_out_cubic},
        },
        editor::ChoiceDraft,
        error::{Error, Result},
        rules::{
            choice::{Choice, MAX_CHOICES, MAX_NAME_LEN, MIN_CHOICES, PALETTE, default_choices},
            color::Color,
            partition::{DIE_FACES, RangedChoice, locate, partition},
        },
        sequencer::{
            RollSequencer, Trigger,
            hook::Hook,
            logging::{LogEntry, LogRecord, RollLog},
            state::{DisplayedNumber, Phase, RollOutcome, RollState, SessionId},
            timer::{Timer, TimerKind},
        },
        statistics::{
            roller::Roller,
            tally::{RollTally, TallyRow},
        },
    };
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::prelude::*;

    #[test]
    fn test_demo() -> anyhow::Result<()> {
        let mut draft = ChoiceDraft::new(&default_choices());
        draft.change_count(1)?;
        draft.set_name(3, "Ramen")?;
        draft.set_color(3, "#bf7c7c".parse()?)?;
        let choices = draft.save()?;

        let mut sequencer = RollSequencer::new(choices, Timing::default(), Roller::from_seed(1))?;
        let mut tally = RollTally::new(sequencer.ranges());
        let mut now = Duration::ZERO;
        for _ in 0..50 {
            sequencer.roll_dice(now);
            while let Some(deadline) = sequencer.next_deadline() {
                now = deadline;
                sequencer.advance(now)?;
            }
            let outcome = sequencer
                .state()
                .visible_outcome()
                .ok_or_else(|| anyhow::anyhow!("roll was not revealed"))?;
            assert_eq!(tally.record(outcome.roll), Some(outcome.index));
            now += Duration::from_millis(500);
        }
        assert_eq!(tally.total(), 50);
        assert_eq!(sequencer.ranges()[3].name, "Ramen");
        assert_eq!(sequencer.ranges()[3].range_label(), "91\u{2013}120");
        Ok(())
    }
}
