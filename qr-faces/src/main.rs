use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qr_faces::constants::GAME_NAME;
use qr_faces::rng::session_rng;
use qr_faces::{
    CaptureLoop, CollectionStore, FaceCollector, FaceStyle, FsBackend, GameConfig,
    GameSnapshot, IntervalTicker, LineSource, RawTextDecoder, UserAction,
};

#[derive(Parser, Debug)]
#[command(name = "qr-faces")]
#[command(about = "Collect faces derived from QR code contents", long_about = None)]
struct Cli {
    /// Directory holding the saved collection
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Seed for rainbow colours of rare faces
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Print the resulting state as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the face for a payload without saving it
    Scan { payload: String },
    /// Derive the face for a payload and add it to the collection
    Add { payload: String },
    /// List the collection
    List,
    /// Remove one entry by position
    Remove {
        index: usize,
        #[arg(long, short)]
        yes: bool,
    },
    /// Remove every entry
    Reset {
        #[arg(long, short)]
        yes: bool,
    },
    /// Read decoded payloads from stdin, one per line, and show each face
    Watch {
        /// Add every newly seen code to the collection
        #[arg(long)]
        collect: bool,
    },
    /// Print render colours for one entry
    Style { index: usize },
}

fn prompt(question: &str) -> bool {
    eprint!("{} [y/N] ", question);
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_snapshot(snapshot: &GameSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }
    if let Some(face) = &snapshot.found {
        println!("found {}", face);
    }
    if snapshot.collection.is_empty() {
        println!("collection is empty");
    }
    for (i, face) in snapshot.collection.iter().enumerate() {
        println!("{:>3}  {}", i, face);
    }
    for error in &snapshot.errors {
        eprintln!("{}", error);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = GameConfig::discover(cli.config.as_deref()).context("loading config")?;
    let backend = match &cli.data_dir {
        Some(dir) => FsBackend::new(dir),
        None => FsBackend::in_data_dir().context("resolving data directory")?,
    };
    log::debug!("{} using {}", GAME_NAME, backend.base().display());
    let store = CollectionStore::with_key(backend, config.storage_key.clone());
    let mut collector = FaceCollector::open(store, session_rng(cli.seed), &config);

    let mut confirm = |question: &str| prompt(question);
    let mut idle = LineSource::new(io::empty());

    let snapshot = match cli.command {
        Command::Scan { payload } => {
            collector.apply(UserAction::Scan { payload }, &mut confirm, &mut idle)?
        }
        Command::Add { payload } => {
            collector.apply(UserAction::Scan { payload }, &mut confirm, &mut idle)?;
            collector.apply(UserAction::AddFound, &mut confirm, &mut idle)?
        }
        Command::List => collector.snapshot(),
        Command::Remove { index, yes } => {
            if index >= collector.collection().len() {
                log::warn!("no entry at {}", index);
            }
            let action = UserAction::Remove { index };
            if yes {
                collector.apply(action, &mut |_: &str| true, &mut idle)?
            } else {
                collector.apply(action, &mut confirm, &mut idle)?
            }
        }
        Command::Reset { yes } => {
            if yes {
                collector.apply(UserAction::Reset, &mut |_: &str| true, &mut idle)?
            } else {
                collector.apply(UserAction::Reset, &mut confirm, &mut idle)?
            }
        }
        Command::Watch { collect } => {
            let stdin = io::stdin();
            let mut source = LineSource::new(stdin.lock());
            collector.start_capture(&mut source)?;
            let json = cli.json;
            let stats = CaptureLoop::new(IntervalTicker::new(config.frame_interval()))
                .auto_collect(collect)
                .run(&mut collector, &mut source, &mut RawTextDecoder, |face| {
                    if json {
                        if let Ok(line) = serde_json::to_string(face) {
                            println!("{}", line);
                        }
                    } else {
                        println!("found {}", face);
                    }
                })?;
            eprintln!(
                "{} codes read, {} added to the collection",
                stats.decoded, stats.collected
            );
            return Ok(());
        }
        Command::Style { index } => {
            let face = collector
                .collection()
                .get(index)
                .with_context(|| format!("no entry at {}", index))?;
            let style = FaceStyle::for_color(&face.color);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&style)?);
            } else {
                println!("fill   {}\neye    {}\nborder {}", style.fill, style.eye, style.border);
            }
            return Ok(());
        }
    };

    print_snapshot(&snapshot, cli.json)
}
