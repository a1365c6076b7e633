use derive_more::Deref;
use serde::{Deserialize, Serialize};

use crate::rules::choice::Choice;

/// Number of faces on the die; the ranges always cover `1..=DIE_FACES`.
pub const DIE_FACES: u32 = 120;

/// A [`Choice`] together with the inclusive span of rolls that select it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Deref)]
pub struct RangedChoice {
    #[deref]
    #[serde(flatten)]
    pub choice: Choice,
    pub min: u32,
    pub max: u32,
}

impl RangedChoice {
    pub fn contains(&self, roll: u32) -> bool {
        (self.min..=self.max).contains(&roll)
    }

    pub fn size(&self) -> u32 {
        self.max + 1 - self.min
    }

    pub fn range_label(&self) -> String {
        format!("{}\u{2013}{}", self.min, self.max)
    }

    /// Share of all rolls that land in this range.
    pub fn probability(&self) -> f64 {
        self.size() as f64 / DIE_FACES as f64
    }
}

/// Splits `1..=120` into one contiguous range per choice, in list order.
///
/// Every range is `120 / n` wide, and the first `120 % n` choices get one
/// extra face. The editor preview and the roll resolution both go through
/// this function, so the labels they show always agree.
pub fn partition(choices: &[Choice]) -> Vec<RangedChoice> {
    let n = choices.len() as u32;
    if n == 0 {
        return Vec::new();
    }
    let base = DIE_FACES / n;
    let rem = DIE_FACES % n;

    let mut cursor = 1;
    choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let size = if (i as u32) < rem { base + 1 } else { base };
            let ranged = RangedChoice {
                choice: choice.clone(),
                min: cursor,
                max: cursor + size - 1,
            };
            cursor += size;
            ranged
        })
        .collect()
}

/// Finds the range containing `roll`, with its index in the list.
pub fn locate(ranges: &[RangedChoice], roll: u32) -> Option<(usize, &RangedChoice)> {
    ranges.iter().enumerate().find(|(_, r)| r.contains(roll))
}
