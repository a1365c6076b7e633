use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::rules::partition::{RangedChoice, locate};

/// Win counts per choice over a series of rolls against one partition.
#[derive(Debug, Clone)]
pub struct RollTally {
    ranges: Vec<RangedChoice>,
    wins: FxHashMap<usize, u64>,
    total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyRow {
    pub name: String,
    pub range_label: String,
    pub wins: u64,
    pub observed: f64,
    pub expected: f64,
}

impl RollTally {
    pub fn new(ranges: Vec<RangedChoice>) -> Self {
        Self {
            ranges,
            wins: FxHashMap::default(),
            total: 0,
        }
    }

    /// Counts `roll` towards the choice whose range holds it.
    pub fn record(&mut self, roll: u32) -> Option<usize> {
        let (index, _) = locate(&self.ranges, roll)?;
        *self.wins.entry(index).or_default() += 1;
        self.total += 1;
        Some(index)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn wins(&self, index: usize) -> u64 {
        self.wins.get(&index).copied().unwrap_or(0)
    }

    pub fn rows(&self) -> Vec<TallyRow> {
        self.ranges
            .iter()
            .enumerate()
            .map(|(i, range)| {
                let wins = self.wins(i);
                TallyRow {
                    name: range.name.clone(),
                    range_label: range.range_label(),
                    wins,
                    observed: if self.total > 0 {
                        wins as f64 / self.total as f64
                    } else {
                        0.0
                    },
                    expected: range.probability(),
                }
            })
            .collect()
    }

    /// Pearson's statistic against the range sizes.
    pub fn chi_squared(&self) -> f64 {
        let total = self.total as f64;
        self.ranges
            .iter()
            .enumerate()
            .map(|(i, range)| {
                let expected = range.probability() * total;
                let diff = self.wins(i) as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    /// Probability of a statistic at least this large from a fair die.
    pub fn p_value(&self) -> anyhow::Result<f64> {
        if self.ranges.len() < 2 {
            anyhow::bail!("Goodness of fit needs at least two choices");
        }
        if self.total == 0 {
            anyhow::bail!("No rolls recorded");
        }
        let dist = ChiSquared::new((self.ranges.len() - 1) as f64)?;
        Ok(dist.sf(self.chi_squared()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        rules::{choice::Choice, partition::partition},
        statistics::roller::Roller,
    };

    fn tally(n: usize) -> RollTally {
        RollTally::new(partition(&(0..n).map(Choice::placeholder).collect::<Vec<_>>()))
    }

    #[test]
    fn test_record() {
        let mut tally = tally(3);
        assert_eq!(tally.record(41), Some(1));
        assert_eq!(tally.record(40), Some(0));
        assert_eq!(tally.record(121), None);
        assert_eq!(tally.total(), 2);
        assert_eq!(tally.wins(1), 1);
        assert_eq!(tally.wins(2), 0);
    }

    #[test]
    fn test_fair_die_fits() {
        let mut roller = Roller::test_rng();
        let mut tally = tally(7);
        for _ in 0..12000 {
            tally.record(roller.d120());
        }
        let p = tally.p_value().unwrap();
        assert!(p > 0.001, "p = {p}");

        let rows = tally.rows();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0].expected, 18.0 / 120.0);
        let observed: f64 = rows.iter().map(|r| r.observed).sum();
        assert!((observed - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_loaded_die_does_not_fit() {
        let mut tally = tally(3);
        for _ in 0..600 {
            tally.record(1);
        }
        assert!(tally.p_value().unwrap() < 1e-6);
    }

    #[test]
    fn test_p_value_needs_rolls() {
        assert!(tally(3).p_value().is_err());
    }
}
