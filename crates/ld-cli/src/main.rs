//! LuckyDraw command line
//!
//! Usage:
//!   luckydraw add Alice Bob        - Add participants
//!   luckydraw import names.txt     - Import one name per line
//!   luckydraw draw                 - Draw one winner
//!   luckydraw award set prizes.json
//!   luckydraw award draw           - Draw for the current award

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use ld_core::{AnimationEffect, Award, SequentialIds, SystemClock};
use ld_draw::{DrawEngine, LotterySession};
use ld_state::FileStore;

#[derive(Parser)]
#[command(name = "luckydraw", about = "Draw winners from a participant roster")]
struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed the RNG for a reproducible draw
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List participants
    List,
    /// Add participants by name
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Remove a participant by id
    Remove { id: u64 },
    /// Remove every participant
    Clear,
    /// Import participants from a text file
    Import { file: PathBuf },
    /// Export participants as number,name lines
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Draw one winner
    Draw,
    /// Show draw history
    History,
    /// Clear draw history
    ClearHistory,
    /// Show roster and draw statistics
    Stats,
    /// Show or change settings
    Settings {
        #[arg(long)]
        allow_repeat: Option<bool>,
        #[arg(long)]
        show_history: Option<bool>,
        /// Animation length in seconds
        #[arg(long)]
        duration: Option<f64>,
        /// ease, easeIn, easeOut, easeInOut or bounce
        #[arg(long)]
        effect: Option<String>,
    },
    /// Multi-award mode
    Award {
        #[command(subcommand)]
        command: AwardCommands,
    },
}

#[derive(Subcommand)]
enum AwardCommands {
    /// Show awards and progress
    List,
    /// Replace awards from a JSON array of {id, name, count, color?}
    Set { file: PathBuf },
    /// Turn multi-award mode on
    Enable,
    /// Turn multi-award mode off
    Disable,
    /// Draw one winner for the current award
    Draw,
    /// Move to the next award
    Next,
    /// Move to the previous award
    Prev,
    /// Drop all award winners and restart at the first award
    Reset,
    /// Export award winners as CSV
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let store = match &cli.data_dir {
        Some(dir) => FileStore::open(dir),
        None => FileStore::open_default(),
    }
    .context("Failed to open data directory")?;
    log::debug!("Using data directory {}", store.dir().display());

    let engine = match cli.seed {
        Some(seed) => DrawEngine::seeded(seed),
        None => DrawEngine::new(),
    };
    let mut session = LotterySession::open_with(
        store,
        Box::new(SequentialIds::from_clock()),
        Box::new(SystemClock),
        engine,
    );

    match cli.command {
        Commands::List => {
            for p in session.participants() {
                println!("{}  {}  (id {})", p.number, p.name, p.id);
            }
        }
        Commands::Add { names } => {
            for name in names {
                if session.add_participant(&name) {
                    println!("Added {}", name.trim());
                } else {
                    println!("Skipped {:?} (blank or duplicate)", name);
                }
            }
        }
        Commands::Remove { id } => {
            if !session.delete_participant(id) {
                bail!("No participant with id {}", id);
            }
            println!("Removed {}", id);
        }
        Commands::Clear => {
            if !session.clear_participants() {
                bail!("A draw is in progress");
            }
            println!("Roster cleared");
        }
        Commands::Import { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let added = session.import_participants(&text);
            println!("Imported {} participants", added);
        }
        Commands::Export { output } => write_output(&session.export_participants(), output)?,
        Commands::Draw => match session.draw_now() {
            Some(record) => println!("Winner: {} {}", record.result, record.name),
            None => bail!("Nothing to draw (empty roster or everyone has won)"),
        },
        Commands::History => {
            for record in session.history() {
                println!("{}  {}  {}", record.time, record.result, record.name);
            }
        }
        Commands::ClearHistory => {
            session.clear_history();
            println!("History cleared");
        }
        Commands::Stats => {
            println!("Participants:   {}", session.total_participants());
            println!("Draws:          {}", session.total_draws());
            println!("Unique winners: {}", session.unique_winners());
        }
        Commands::Settings {
            allow_repeat,
            show_history,
            duration,
            effect,
        } => {
            let mut settings = session.settings().clone();
            if let Some(allow_repeat) = allow_repeat {
                settings.allow_repeat = allow_repeat;
            }
            if let Some(show_history) = show_history {
                settings.show_history = show_history;
            }
            if let Some(duration) = duration {
                settings.duration = duration;
            }
            if let Some(effect) = effect {
                settings.animation_effect = AnimationEffect::parse(&effect)
                    .with_context(|| format!("Unknown animation effect {:?}", effect))?;
            }
            if &settings != session.settings() {
                session.update_settings(settings);
            }
            let s = session.settings();
            println!("duration:        {}s", s.duration);
            println!("animationEffect: {}", s.animation_effect.as_str());
            println!("allowRepeat:     {}", s.allow_repeat);
            println!("showHistory:     {}", s.show_history);
        }
        Commands::Award { command } => run_award(&mut session, command)?,
    }

    Ok(())
}

fn run_award(session: &mut LotterySession<FileStore>, command: AwardCommands) -> Result<()> {
    match command {
        AwardCommands::List => {
            let state = if session.award_sequencer().is_enabled() {
                "enabled"
            } else {
                "disabled"
            };
            println!("Multi-award mode {}", state);
            for progress in session.award_progress() {
                let marker = if progress.is_current { ">" } else { " " };
                println!(
                    "{} {}  {}/{}  ({} left)",
                    marker,
                    progress.award.name,
                    progress.won,
                    progress.award.count,
                    progress.remaining
                );
            }
            if session.all_awards_completed() {
                println!("All awards drawn");
            }
        }
        AwardCommands::Set { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let awards: Vec<Award> = serde_json::from_str(&text)
                .with_context(|| format!("Invalid awards in {}", file.display()))?;
            let count = awards.len();
            session.set_awards(awards)?;
            println!("Configured {} awards", count);
        }
        AwardCommands::Enable => {
            session.set_multi_award_enabled(true);
            println!("Multi-award mode enabled");
        }
        AwardCommands::Disable => {
            session.set_multi_award_enabled(false);
            println!("Multi-award mode disabled");
        }
        AwardCommands::Draw => match session.draw_award_now() {
            Some(winner) => println!(
                "{}: {} {}",
                winner.award_name, winner.participant.number, winner.participant.name
            ),
            None if !session.award_sequencer().is_enabled() => {
                bail!("Multi-award mode is disabled")
            }
            None if session.all_awards_completed() => bail!("All awards have been drawn"),
            None => bail!("No eligible participants for the current award"),
        },
        AwardCommands::Next => {
            if !session.advance_award() {
                bail!("Already at the last award");
            }
            print_current_award(session);
        }
        AwardCommands::Prev => {
            if !session.retreat_award() {
                bail!("Already at the first award");
            }
            print_current_award(session);
        }
        AwardCommands::Reset => {
            if !session.reset_multi_award() {
                bail!("A draw is in progress");
            }
            println!("Award results cleared");
        }
        AwardCommands::Export { output } => write_output(&session.export_award_results(), output)?,
    }
    Ok(())
}

fn print_current_award(session: &LotterySession<FileStore>) {
    if let Some(award) = session.current_award() {
        println!("Current award: {}", award.name);
    }
}

fn write_output(text: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
