use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::rules::choice::{Choice, check_count, default_choices, normalize_names};

/// Timings of one roll, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Trigger to resolution; slightly longer than the spin so the die has settled.
    pub animation_ms: u64,
    /// Resolution to reveal.
    pub reveal_delay_ms: u64,
    /// Period of the cosmetic number cycling.
    pub tick_ms: u64,
    /// Nominal length of the render surface's spin.
    pub spin_ms: u64,
    pub particle_lifetime_ms: u64,
    pub particle_count: usize,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            animation_ms: 1850,
            reveal_delay_ms: 200,
            tick_ms: 55,
            spin_ms: 1800,
            particle_lifetime_ms: 1400,
            particle_count: 28,
        }
    }
}

impl Timing {
    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn tick(&self) -> Duration {
        // a zero period would re-arm forever at the same instant
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn spin(&self) -> Duration {
        Duration::from_millis(self.spin_ms)
    }

    pub fn particle_lifetime(&self) -> Duration {
        Duration::from_millis(self.particle_lifetime_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub choices: Vec<Choice>,
    pub timing: Timing,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            choices: default_choices(),
            timing: Timing::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)?;
        let config = config.validated()?;
        log::info!(
            "Loaded {} choices from {}",
            config.choices.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Applies the same rules the editor applies on save.
    pub fn validated(self) -> crate::Result<Self> {
        check_count(self.choices.len())?;
        Ok(Self {
            choices: normalize_names(self.choices),
            ..self
        })
    }
}
