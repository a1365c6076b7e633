use std::{f32::consts::TAU, time::Duration};

use crate::statistics::roller::Roller;

const MIN_TURNS: f32 = 4.0;
const MAX_TURNS: f32 = 7.0;
const IDLE_DRIFT: f32 = 0.003;
const WOBBLE_STEP: f32 = 0.004;
const WOBBLE_AMPLITUDE: f32 = 0.04;

/// Fast start, slow settle.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAnimation {
    pub started_at: Duration,
    pub duration: Duration,
    pub from: f32,
    pub to: f32,
}

impl SpinAnimation {
    pub fn start(roller: &mut Roller, now: Duration, from: f32, duration: Duration) -> Self {
        let turns = roller.between(MIN_TURNS, MAX_TURNS);
        Self {
            started_at: now,
            duration,
            from,
            to: from + turns * TAU,
        }
    }

    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at).as_secs_f32();
        (elapsed / self.duration.as_secs_f32()).min(1.0)
    }

    pub fn angle_at(&self, now: Duration) -> f32 {
        self.from + (self.to - self.from) * ease_in_out_cubic(self.progress(now))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Orientation of the drawn die: a spin while rolling, a slow drift otherwise.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DieMotion {
    pub angle: f32,
    pub tilt: f32,
    wobble: f32,
    spin: Option<SpinAnimation>,
}

impl DieMotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spin(&mut self, roller: &mut Roller, now: Duration, duration: Duration) {
        self.spin = Some(SpinAnimation::start(roller, now, self.angle, duration));
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.is_some()
    }

    /// Advances one frame.
    pub fn update(&mut self, now: Duration) {
        match self.spin {
            Some(spin) => {
                self.angle = spin.angle_at(now);
                if spin.is_finished(now) {
                    self.angle %= TAU;
                    self.spin = None;
                }
            }
            None => {
                self.wobble += WOBBLE_STEP;
                self.angle = (self.angle + IDLE_DRIFT) % TAU;
                self.tilt = self.wobble.sin() * WOBBLE_AMPLITUDE;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn test_spin_turns() {
        let mut roller = Roller::test_rng();
        let spin = SpinAnimation::start(&mut roller, Duration::ZERO, 1.0, Duration::from_millis(1800));
        let turns = (spin.to - spin.from) / TAU;
        assert!((MIN_TURNS..MAX_TURNS).contains(&turns));
        assert_eq!(spin.angle_at(Duration::ZERO), 1.0);
        assert!((spin.angle_at(Duration::from_secs(5)) - spin.to).abs() < 1e-4);
        assert!(!spin.is_finished(Duration::from_millis(900)));
        assert!(spin.is_finished(Duration::from_millis(1800)));
    }

    #[test]
    fn test_motion_settles_after_spin() {
        let mut roller = Roller::test_rng();
        let mut motion = DieMotion::new();
        motion.spin(&mut roller, Duration::ZERO, Duration::from_millis(1800));
        motion.update(Duration::from_millis(900));
        assert!(motion.is_spinning());
        motion.update(Duration::from_millis(1800));
        assert!(!motion.is_spinning());
        assert!((0.0..TAU).contains(&motion.angle));

        let before = motion.angle;
        motion.update(Duration::from_millis(1816));
        assert!(motion.tilt.abs() <= WOBBLE_AMPLITUDE);
        assert_ne!(motion.angle, before);
    }
}
