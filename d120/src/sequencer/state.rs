use std::fmt;

use derive_more::{From, Into};
use serde::{Deserialize, Serialize};

use crate::{cosmetics::particles::ParticleBurst, rules::partition::RangedChoice};

/// Names one roll session. Every timer carries the session it was issued
/// for, and a timer whose session is no longer current does nothing.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, From, Into,
)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn next(self) -> Self {
        SessionId(self.0 + 1)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Idle,
    /// The die is spinning and the number is cycling. Triggers are ignored.
    Rolling,
    /// The true roll is on display and the winner is known but not yet shown.
    Revealing,
}

/// What the number overlay on the die shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayedNumber {
    #[default]
    Placeholder,
    Number(u32),
}

impl fmt::Display for DisplayedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayedNumber::Placeholder => f.pad("D120"),
            DisplayedNumber::Number(n) => f.pad(&n.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RollOutcome {
    pub roll: u32,
    pub index: usize,
    pub choice: RangedChoice,
}

impl RollOutcome {
    pub fn pretty_print(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(
            f,
            "{} (rolled {} \u{b7} range {})",
            self.choice.name,
            self.roll,
            self.choice.range_label()
        )
    }
}

/// Everything a view needs to draw the roller at one instant.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RollState {
    pub phase: Phase,
    pub displayed: DisplayedNumber,
    pub outcome: Option<RollOutcome>,
    pub result_visible: bool,
    pub particles: Option<ParticleBurst>,
}

impl RollState {
    pub fn in_progress(&self) -> bool {
        self.phase == Phase::Rolling
    }

    /// The published outcome, if the result is currently shown.
    pub fn visible_outcome(&self) -> Option<&RollOutcome> {
        self.outcome.as_ref().filter(|_| self.result_visible)
    }
}
