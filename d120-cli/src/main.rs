use std::{
    io::Write,
    path::PathBuf,
    time::{Duration, Instant},
};

use clap::Parser;
use d120::prelude::*;
use unicode_width::UnicodeWidthStr;

#[derive(Parser, Debug)]
#[command(author, version, about = "Let a d120 decide between your choices", long_about = None)]
struct Args {
    /// A choice as NAME or NAME=#rrggbb; repeat for 2 to 12 choices
    #[arg(short, long = "choice", value_name = "CHOICE")]
    choices: Vec<String>,

    /// JSON configuration file with choices and timings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long, default_value = None)]
    seed: Option<u64>,

    /// Number of rolls to make
    #[arg(short, long, default_value_t = 1)]
    rolls: usize,

    /// Run on a virtual clock instead of waiting out the animation
    #[arg(long, default_value_t = false)]
    fast: bool,

    /// Write the roll log to this JSON file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long, default_value_t = false)]
    print_config: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Draws the roll into the terminal: the cycling number on one line, then the result.
struct TerminalSurface {
    animate: bool,
    announce: bool,
}

impl TerminalSurface {
    fn write(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

impl Hook for TerminalSurface {
    fn on_display(&mut self, displayed: DisplayedNumber) {
        if self.animate {
            self.write(&format!("\r   [ {displayed:>4} ]   "));
        }
    }

    fn on_reveal(&mut self, outcome: &RollOutcome) {
        if !self.announce {
            return;
        }
        let [r, g, b] = outcome.choice.color.to_array();
        self.write(&format!(
            "\n   the fates have chosen\n   \x1b[1;38;2;{r};{g};{b}m{}\x1b[0m\n   Rolled {} \u{b7} Range {}\n\n",
            outcome.choice.name,
            outcome.roll,
            outcome.choice.range_label()
        ));
    }
}

fn swatch(color: Color) -> String {
    let [r, g, b] = color.to_array();
    format!("\x1b[38;2;{r};{g};{b}m\u{25cf}\x1b[0m")
}

fn pad(s: &str, cells: usize) -> String {
    format!("{s}{}", " ".repeat(cells.saturating_sub(s.width())))
}

fn print_legend(ranges: &[RangedChoice]) {
    let width = ranges.iter().map(|r| r.name.width()).max().unwrap_or(0);
    for range in ranges {
        println!(
            "   {} {}  {:>9}",
            swatch(range.color),
            pad(&range.name, width),
            range.range_label()
        );
    }
    println!();
}

fn print_tally(tally: &RollTally) -> anyhow::Result<()> {
    let rows = tally.rows();
    let width = rows.iter().map(|r| r.name.width()).max().unwrap_or(0);
    println!("   {} rolls", tally.total());
    for row in &rows {
        println!(
            "   {}  {:>9}  {:>6}  {:>6.2}%  (expected {:.2}%)",
            pad(&row.name, width),
            row.range_label,
            row.wins,
            row.observed * 100.0,
            row.expected * 100.0
        );
    }
    println!(
        "   chi-squared {:.3}, p = {:.4}",
        tally.chi_squared(),
        tally.p_value()?
    );
    Ok(())
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if !args.choices.is_empty() {
        let mut choices = Vec::with_capacity(args.choices.len());
        for (i, spec) in args.choices.iter().enumerate() {
            let (name, color) = parse_choice_spec(spec)?;
            let color = color.unwrap_or_else(|| Choice::palette_color(i));
            choices.push(Choice::new(name, color));
        }
        config.choices = choices;
    }

    Ok(config.validated()?)
}

/// Runs every pending timer, sleeping until each is due unless `fast`.
fn drain(
    sequencer: &mut RollSequencer,
    clock: &mut dyn FnMut(Option<Duration>) -> Duration,
) -> anyhow::Result<()> {
    while let Some(deadline) = sequencer.next_deadline() {
        let now = clock(Some(deadline));
        sequencer.advance(now)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::builder()
        .format_timestamp_secs()
        .filter_level(level)
        .init();
    log::info!("Starting with args: {:?}", args);

    let config = load_config(&args)?;
    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let roller = match args.seed {
        Some(seed) => Roller::from_seed(seed),
        None => Roller::new(),
    };
    let mut sequencer = RollSequencer::from_config(&config, roller)?;
    sequencer.add_hook(TerminalSurface {
        animate: !args.fast,
        announce: args.rolls == 1 || !args.fast,
    });

    println!("\n   D120 \u{b7} decision roller\n");
    print_legend(&sequencer.ranges());

    let started = chrono::Utc::now();
    let epoch = Instant::now();
    let mut virtual_now = Duration::ZERO;
    let fast = args.fast;
    let mut clock = move |deadline: Option<Duration>| -> Duration {
        if fast {
            if let Some(deadline) = deadline {
                virtual_now = virtual_now.max(deadline);
            }
            virtual_now
        } else {
            if let Some(deadline) = deadline {
                let elapsed = epoch.elapsed();
                if deadline > elapsed {
                    std::thread::sleep(deadline - elapsed);
                }
            }
            epoch.elapsed()
        }
    };

    let mut tally = RollTally::new(sequencer.ranges());
    for _ in 0..args.rolls {
        let now = clock(None);
        if let Trigger::Started(session) = sequencer.roll_dice(now) {
            log::debug!("Roll {} triggered at {:?}", session, now);
        }
        drain(&mut sequencer, &mut clock)?;
        if let Some(outcome) = sequencer.state().visible_outcome() {
            tally.record(outcome.roll);
        }
    }

    log::info!(
        "{} rolls done in {} ms",
        tally.total(),
        (chrono::Utc::now() - started).num_milliseconds()
    );

    if args.rolls > 1 {
        print_tally(&tally)?;
    }

    if let Some(path) = &args.log {
        sequencer.log().save(path)?;
        log::info!("Roll log written to {}", path.display());
    }

    Ok(())
}
