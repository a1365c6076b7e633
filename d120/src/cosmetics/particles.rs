use std::{f32::consts::TAU, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    rules::{choice::Choice, color::Color},
    statistics::roller::Roller,
};

const EXTRA_COLORS: [Color; 3] = [
    Color::from_hex(0xf0d080),
    Color::WHITE,
    Color::from_hex(0x4a9e8a),
];

const MIN_DISTANCE: f32 = 90.0;
const MAX_DISTANCE: f32 = 230.0;

/// One spark flying out of the die. Offsets are in logical pixels relative
/// to the die's center; times are in seconds from the burst.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub tx: f32,
    pub ty: f32,
    pub color: Color,
    pub delay: f32,
    pub duration: f32,
}

impl Particle {
    /// Position and opacity `elapsed` seconds into the burst, or `None`
    /// while the particle hasn't started or has already faded.
    pub fn offset_at(&self, elapsed: f32) -> Option<(f32, f32, f32)> {
        let t = (elapsed - self.delay) / self.duration;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        Some((self.tx * eased, self.ty * eased, 1.0 - t))
    }

    pub fn distance(&self) -> f32 {
        self.tx.hypot(self.ty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleBurst {
    pub particles: Vec<Particle>,
    pub spawned_at: Duration,
    pub lifetime: Duration,
}

impl ParticleBurst {
    pub fn spawn(
        roller: &mut Roller,
        choices: &[Choice],
        count: usize,
        spawned_at: Duration,
        lifetime: Duration,
    ) -> Self {
        let colors: Vec<Color> = choices
            .iter()
            .map(|c| c.color)
            .chain(EXTRA_COLORS)
            .collect();

        let particles = (0..count)
            .map(|_| {
                let angle = roller.between(0.0, TAU);
                let distance = roller.between(MIN_DISTANCE, MAX_DISTANCE);
                Particle {
                    tx: angle.cos() * distance,
                    ty: angle.sin() * distance,
                    color: colors[roller.index(colors.len())],
                    delay: roller.between(0.0, 0.4),
                    duration: roller.between(0.6, 1.3),
                }
            })
            .collect();

        Self {
            particles,
            spawned_at,
            lifetime,
        }
    }

    pub fn expires_at(&self) -> Duration {
        self.spawned_at + self.lifetime
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.expires_at()
    }

    /// Seconds since the burst, for [`Particle::offset_at`].
    pub fn elapsed(&self, now: Duration) -> f32 {
        now.saturating_sub(self.spawned_at).as_secs_f32()
    }
}
