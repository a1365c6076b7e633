use std::time::Duration;

use crate::{
    config::{Config, Timing},
    cosmetics::particles::ParticleBurst,
    error::Error,
    rules::{
        choice::{Choice, check_count, normalize_names},
        partition::{DIE_FACES, RangedChoice, locate, partition},
    },
    sequencer::{
        hook::Hook,
        logging::{LogEntry, RollLog},
        state::{DisplayedNumber, Phase, RollOutcome, RollState, SessionId},
        timer::{Scheduler, Timer, TimerKind},
    },
    statistics::roller::Roller,
};

pub mod hook;
pub mod logging;
pub mod state;
pub mod timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Started(SessionId),
    /// A roll was already spinning; nothing changed.
    Ignored,
}

/// Drives one roll at a time from trigger to reveal.
///
/// The sequencer owns no clock. Callers pass the current time to
/// [`RollSequencer::roll_dice`] and [`RollSequencer::advance`], measured
/// from any fixed epoch, and the sequencer fires whatever timers have come
/// due. A roll goes through these steps:
///
/// 1. trigger: the true roll is drawn, the die spins and the number cycles,
/// 2. resolution (`animation_ms` later): the true roll is shown and the
///    winner is located against the current choices,
/// 3. reveal (`reveal_delay_ms` after that): the outcome is published.
///
/// Each trigger or reconfigure opens a new [`SessionId`]. Timers from an
/// older session are dropped instead of fired.
pub struct RollSequencer {
    choices: Vec<Choice>,
    timing: Timing,
    state: RollState,
    session: SessionId,
    roll: Option<u32>,
    pending: Option<RollOutcome>,
    now: Duration,
    roller: Roller,
    flavor: Roller,
    scheduler: Scheduler,
    log: RollLog,
    hooks: Vec<Box<dyn Hook>>,
}

impl RollSequencer {
    pub fn new(choices: Vec<Choice>, timing: Timing, mut roller: Roller) -> crate::Result<Self> {
        check_count(choices.len())?;
        let flavor = roller.fork();
        Ok(Self {
            choices: normalize_names(choices),
            timing,
            state: RollState::default(),
            session: SessionId::default(),
            roll: None,
            pending: None,
            now: Duration::ZERO,
            roller,
            flavor,
            scheduler: Scheduler::new(),
            log: RollLog::default(),
            hooks: Vec::new(),
        })
    }

    pub fn from_config(config: &Config, roller: Roller) -> crate::Result<Self> {
        Self::new(config.choices.clone(), config.timing, roller)
    }

    pub fn add_hook<H: Hook + 'static>(&mut self, hook: H) {
        self.hooks.push(Box::new(hook));
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn ranges(&self) -> Vec<RangedChoice> {
        partition(&self.choices)
    }

    pub fn state(&self) -> &RollState {
        &self.state
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn is_rolling(&self) -> bool {
        self.state.in_progress()
    }

    /// Latest time seen through `roll_dice` or `advance`.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn has_pending_timers(&self) -> bool {
        !self.scheduler.is_empty()
    }

    pub fn log(&self) -> &RollLog {
        &self.log
    }

    pub fn take_log(&mut self) -> RollLog {
        std::mem::take(&mut self.log)
    }

    /// Starts a roll with a freshly drawn outcome, unless one is spinning.
    pub fn roll_dice(&mut self, now: Duration) -> Trigger {
        if self.is_rolling() {
            return self.ignore(now);
        }
        let roll = self.roller.d120();
        self.start(now, roll, false)
    }

    /// Starts a roll that will land on `roll`. Used to replay a known outcome.
    pub fn roll_dice_forced(&mut self, now: Duration, roll: u32) -> crate::Result<Trigger> {
        if !(1..=DIE_FACES).contains(&roll) {
            return Err(Error::RollOutOfRange { roll });
        }
        if self.is_rolling() {
            return Ok(self.ignore(now));
        }
        Ok(self.start(now, roll, true))
    }

    /// Fires every timer due at or before `now`, returning how many took effect.
    pub fn advance(&mut self, now: Duration) -> crate::Result<usize> {
        self.now = self.now.max(now);
        let mut fired = 0;
        while let Some((deadline, timer)) = self.scheduler.pop_due(now) {
            if self.fire(deadline, timer)? {
                fired += 1;
            }
        }
        Ok(fired)
    }

    /// Applies one timer as if it came due at `deadline`.
    ///
    /// A timer from a superseded session, or one whose phase has already
    /// passed, is logged and dropped; the return value says whether it
    /// took effect.
    pub fn fire(&mut self, deadline: Duration, timer: Timer) -> crate::Result<bool> {
        let current = timer.session == self.session;
        let applies = current
            && match timer.kind {
                TimerKind::DisplayTick => self.state.phase == Phase::Rolling,
                TimerKind::Resolve => self.state.phase == Phase::Rolling && self.roll.is_some(),
                TimerKind::Reveal => self.state.phase == Phase::Revealing,
                TimerKind::ExpireParticles => self.state.particles.is_some(),
            };
        if !applies {
            self.record(deadline, LogEntry::StaleTimer { timer });
            return Ok(false);
        }

        match timer.kind {
            TimerKind::DisplayTick => self.tick(deadline),
            TimerKind::Resolve => self.resolve(deadline)?,
            TimerKind::Reveal => self.reveal(deadline),
            TimerKind::ExpireParticles => self.expire_particles(deadline),
        }
        Ok(true)
    }

    /// Replaces the choice list. Refused while the die is spinning.
    ///
    /// Any outcome or pending reveal belongs to the old list, so it is
    /// discarded and the display goes back to its placeholder.
    pub fn reconfigure(&mut self, choices: Vec<Choice>) -> crate::Result<()> {
        if self.is_rolling() {
            return Err(Error::RollInProgress);
        }
        check_count(choices.len())?;

        self.choices = normalize_names(choices);
        self.session = self.session.next();
        self.scheduler.clear();
        self.roll = None;
        self.pending = None;
        self.state = RollState::default();

        self.record(
            self.now,
            LogEntry::Reconfigured {
                session: self.session,
                choices: self.choices.len(),
            },
        );
        for hook in &mut self.hooks {
            hook.on_reconfigure(&self.choices);
            hook.on_display(self.state.displayed);
        }
        Ok(())
    }

    fn ignore(&mut self, now: Duration) -> Trigger {
        self.now = self.now.max(now);
        self.record(
            now,
            LogEntry::TriggerIgnored {
                session: self.session,
            },
        );
        Trigger::Ignored
    }

    fn start(&mut self, now: Duration, roll: u32, forced: bool) -> Trigger {
        self.now = self.now.max(now);
        self.session = self.session.next();
        let session = self.session;

        // whatever an earlier session left behind must not fire into this one
        self.scheduler.clear();
        self.roll = Some(roll);
        self.pending = None;

        let burst = ParticleBurst::spawn(
            &mut self.flavor,
            &self.choices,
            self.timing.particle_count,
            now,
            self.timing.particle_lifetime(),
        );
        self.state = RollState {
            phase: Phase::Rolling,
            displayed: self.state.displayed,
            outcome: None,
            result_visible: false,
            particles: (!burst.particles.is_empty()).then_some(burst),
        };

        self.record(now, LogEntry::RollStarted { session, forced });
        let spin = self.timing.spin();
        for hook in &mut self.hooks {
            hook.on_spin_start(session, spin);
            if let Some(burst) = &self.state.particles {
                hook.on_particles(burst);
            }
        }

        self.schedule(now + self.timing.animation(), TimerKind::Resolve);
        self.schedule(now + self.timing.tick(), TimerKind::DisplayTick);
        if self.state.particles.is_some() {
            self.schedule(
                now + self.timing.particle_lifetime(),
                TimerKind::ExpireParticles,
            );
        }

        Trigger::Started(session)
    }

    fn tick(&mut self, deadline: Duration) {
        let number = self.flavor.d120();
        self.state.displayed = DisplayedNumber::Number(number);
        self.record(
            deadline,
            LogEntry::DisplayTick {
                session: self.session,
                number,
            },
        );
        for hook in &mut self.hooks {
            hook.on_display(self.state.displayed);
        }
        self.schedule(deadline + self.timing.tick(), TimerKind::DisplayTick);
    }

    fn resolve(&mut self, deadline: Duration) -> crate::Result<()> {
        self.scheduler.cancel(|t| t.kind == TimerKind::DisplayTick);

        let Some(roll) = self.roll.take() else {
            return Ok(());
        };

        self.state.displayed = DisplayedNumber::Number(roll);
        self.state.phase = Phase::Revealing;

        let ranges = partition(&self.choices);
        let Some((index, choice)) = locate(&ranges, roll) else {
            log::error!("No range of {} choices contains {}", ranges.len(), roll);
            self.state.phase = Phase::Idle;
            return Err(Error::NoRangeForRoll { roll });
        };
        let outcome = RollOutcome {
            roll,
            index,
            choice: choice.clone(),
        };

        self.record(
            deadline,
            LogEntry::Resolved {
                session: self.session,
                roll,
                index,
                name: outcome.choice.name.clone(),
            },
        );
        for hook in &mut self.hooks {
            hook.on_display(self.state.displayed);
            hook.on_resolve(roll, index, &outcome.choice);
        }

        self.pending = Some(outcome);
        self.schedule(deadline + self.timing.reveal_delay(), TimerKind::Reveal);
        Ok(())
    }

    fn reveal(&mut self, deadline: Duration) {
        let Some(outcome) = self.pending.take() else {
            return;
        };
        self.state.phase = Phase::Idle;
        self.state.result_visible = true;

        self.record(
            deadline,
            LogEntry::Revealed {
                session: self.session,
                outcome: outcome.clone(),
            },
        );
        for hook in &mut self.hooks {
            hook.on_reveal(&outcome);
        }
        self.state.outcome = Some(outcome);
    }

    fn expire_particles(&mut self, deadline: Duration) {
        self.state.particles = None;
        self.record(
            deadline,
            LogEntry::ParticlesExpired {
                session: self.session,
            },
        );
    }

    fn schedule(&mut self, deadline: Duration, kind: TimerKind) {
        self.scheduler.schedule(
            deadline,
            Timer {
                session: self.session,
                kind,
            },
        );
    }

    fn record(&mut self, at: Duration, entry: LogEntry) {
        self.log.log(at, entry);
    }
}
