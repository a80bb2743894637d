// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use tracing::level_filters::LevelFilter;

use crate::config::consts::{DEBUG_LOG_FILE, DEFAULT_SETTINGS_FILE, STORE_DIR};
use crate::config::Settings;
use crate::progress::Progress;
use crate::runner::{collect_records, run_once};
use crate::source::DirSource;
use crate::transfer::FtpTransfer;
use crate::xml::write_feed;

/// Build a dealer inventory XML feed from vehicle listing posts.
#[derive(Parser, Debug)]
#[command(name = "vehicle_feed")]
#[command(version)]
pub struct Cli {
    /// Settings file (key=value lines)
    #[arg(short, long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also append log lines to .store/debug.log
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the feed and upload it
    Run {
        /// Directory of listing JSON files
        #[arg(short, long)]
        source: PathBuf,

        /// Artifact directory, overrides `out_dir`
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Print the feed for a directory of listings to stdout, no upload
    Extract {
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Show the effective settings
    CheckSettings {
        /// Write the effective settings back to the settings file
        #[arg(long)]
        write: bool,
    },
}

/// Prints per-run counts to stderr.
#[derive(Default)]
struct CliProgress {
    total: usize,
    done: usize,
    skipped: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, _id: u64) { self.done += 1; }
    fn item_skipped(&mut self, _id: u64) { self.skipped += 1; }
    fn finish(&mut self) {
        eprintln!("{} documents: {} listings, {} skipped", self.total, self.done, self.skipped);
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let log_path = PathBuf::from(STORE_DIR).join(DEBUG_LOG_FILE);
    crate::log::init(level, cli.log_file.then_some(log_path.as_path()))
        .wrap_err("could not set up logging")?;

    let mut settings = Settings::load(&cli.config)
        .wrap_err_with(|| format!("could not load settings from {}", cli.config.display()))?;
    settings.apply_env()?;

    match cli.command {
        Commands::Run { source, out } => {
            if let Some(out) = out {
                settings.out_dir = out;
            }
            let mut progress = CliProgress::default();
            let status = run_once(&settings, &DirSource::new(source), &FtpTransfer::default(), Some(&mut progress))?;
            println!("{status}");
        }
        Commands::Extract { source } => {
            let (records, _) = collect_records(&DirSource::new(source), &settings.dealer, None)?;
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_feed(&mut lock, &records)?;
            lock.flush()?;
        }
        Commands::CheckSettings { write } => {
            print!("{}", masked(&settings));
            println!(
                "# upload {}",
                if settings.destination.is_configured() { "configured" } else { "not configured" }
            );
            if write {
                settings.save(&cli.config)?;
                println!("# written to {}", cli.config.display());
            }
        }
    }
    Ok(())
}

fn masked(settings: &Settings) -> String {
    let mut shown = settings.clone();
    if !shown.destination.password.is_empty() {
        shown.destination.password = s!("****");
    }
    shown.to_text()
}
