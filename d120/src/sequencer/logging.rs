use std::time::Duration;

use derive_more::IntoIterator;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::sequencer::{
    state::{RollOutcome, SessionId},
    timer::Timer,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogEntry {
    RollStarted {
        session: SessionId,
        forced: bool,
    },
    TriggerIgnored {
        session: SessionId,
    },
    DisplayTick {
        session: SessionId,
        number: u32,
    },
    Resolved {
        session: SessionId,
        roll: u32,
        index: usize,
        name: String,
    },
    Revealed {
        session: SessionId,
        outcome: RollOutcome,
    },
    ParticlesExpired {
        session: SessionId,
    },
    Reconfigured {
        session: SessionId,
        choices: usize,
    },
    StaleTimer {
        timer: Timer,
    },
}

impl LogEntry {
    pub fn emoji(&self) -> &'static str {
        match self {
            LogEntry::RollStarted { .. } => "🎲",
            LogEntry::TriggerIgnored { .. } => "🚫",
            LogEntry::DisplayTick { .. } => "🔢",
            LogEntry::Resolved { .. } => "🎯",
            LogEntry::Revealed { .. } => "✨",
            LogEntry::ParticlesExpired { .. } => "💨",
            LogEntry::Reconfigured { .. } => "🛠️",
            LogEntry::StaleTimer { .. } => "⌛",
        }
    }

    pub fn is_quiet(&self) -> bool {
        matches!(
            self,
            LogEntry::TriggerIgnored { .. }
                | LogEntry::DisplayTick { .. }
                | LogEntry::ParticlesExpired { .. }
                | LogEntry::StaleTimer { .. }
        )
    }

    pub fn session(&self) -> SessionId {
        match self {
            LogEntry::RollStarted { session, .. }
            | LogEntry::TriggerIgnored { session }
            | LogEntry::DisplayTick { session, .. }
            | LogEntry::Resolved { session, .. }
            | LogEntry::Revealed { session, .. }
            | LogEntry::ParticlesExpired { session }
            | LogEntry::Reconfigured { session, .. } => *session,
            LogEntry::StaleTimer { timer } => timer.session,
        }
    }

    fn pretty_print(&self, f: &mut impl std::fmt::Write) -> std::fmt::Result {
        match self {
            LogEntry::RollStarted { session, forced } => {
                write!(f, "Roll {session} started")?;
                if *forced {
                    write!(f, " with a fixed outcome")?;
                }
                Ok(())
            }
            LogEntry::TriggerIgnored { session } => {
                write!(f, "Trigger ignored, roll {session} still spinning")
            }
            LogEntry::DisplayTick { number, .. } => write!(f, "Showing {number}"),
            LogEntry::Resolved {
                session,
                roll,
                index,
                name,
            } => write!(
                f,
                "Roll {session} landed on {roll}: choice {} ({name})",
                index + 1
            ),
            LogEntry::Revealed { session, outcome } => {
                write!(f, "Roll {session} revealed: ")?;
                outcome.pretty_print(f)
            }
            LogEntry::ParticlesExpired { session } => {
                write!(f, "Particles of roll {session} expired")
            }
            LogEntry::Reconfigured { session, choices } => {
                write!(f, "Choices replaced ({choices} entries), now at {session}")
            }
            LogEntry::StaleTimer { timer } => {
                write!(f, "Dropped stale {:?} timer of {}", timer.kind, timer.session)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub at: Duration,
    pub entry: LogEntry,
}

/// Every transition the sequencer makes, in order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, IntoIterator)]
#[serde(transparent)]
pub struct RollLog {
    records: Vec<LogRecord>,
}

#[derive(Serialize)]
struct SavedLog<'a> {
    saved_at: chrono::DateTime<chrono::Utc>,
    records: &'a [LogRecord],
}

impl RollLog {
    pub fn log(&mut self, at: Duration, entry: LogEntry) {
        let mut buf = String::new();
        buf.push_str(&format_emoji(entry.emoji(), 2));
        buf.push(' ');
        entry.pretty_print(&mut buf).ok();

        if entry.is_quiet() {
            log::debug!("{}", buf);
        } else {
            log::info!("{}", buf);
        }

        self.records.push(LogRecord { at, entry });
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.records.iter().map(|r| &r.entry)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let file = std::fs::File::create(path)?;
        let saved = SavedLog {
            saved_at: chrono::Utc::now(),
            records: &self.records,
        };
        serde_json::to_writer_pretty(file, &saved)?;
        Ok(())
    }
}

fn emoji_presentation(s: &str) -> String {
    if s.chars().any(|c| c == '\u{FE0F}' || c == '\u{200D}') {
        s.to_string()
    } else {
        format!("{s}\u{FE0F}")
    }
}

fn pad_cells(s: &str, field_cells: usize) -> String {
    let w = s.width();
    let pad = field_cells.saturating_sub(w);
    format!("{s}{}", " ".repeat(pad))
}

fn format_emoji(emoji: &str, field_cells: usize) -> String {
    pad_cells(&emoji_presentation(emoji), field_cells)
}
