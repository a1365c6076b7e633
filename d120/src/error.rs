use thiserror::Error;

use crate::rules::choice::{MAX_CHOICES, MIN_CHOICES};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(
        "a choice list needs between {min} and {max} entries, got {count}",
        min = MIN_CHOICES,
        max = MAX_CHOICES
    )]
    ChoiceCount { count: usize },
    #[error("no choice at position {index}")]
    NoSuchChoice { index: usize },
    #[error("roll {roll} is outside 1..=120")]
    RollOutOfRange { roll: u32 },
    #[error("the choices cannot be changed while the die is rolling")]
    RollInProgress,
    #[error("no range contains roll {roll}")]
    NoRangeForRoll { roll: u32 },
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    #[error("invalid choice: {0:?} (expected NAME or NAME=#rrggbb)")]
    InvalidChoiceSpec(String),
}

pub type Result<T> = std::result::Result<T, Error>;
