//! clipcast CLI - the `clipcast` command.
//!
//! Reads a generated pattern text (three note tables: melody, drum, bass)
//! from a file or stdin and programs Ableton Live clips over AbletonOSC.
//! How the text was generated is not this tool's business; it only needs
//! the three marked tables somewhere in the blob.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use clipcast_core::{
    build_commands, parse_tables, pattern_duration, Config, OscClient, Track, DEFAULT_OSC_ADDR,
};

/// clipcast - program Ableton Live clips from a text pattern
#[derive(Parser, Debug)]
#[command(name = "clipcast")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turn a text pattern into Ableton Live clips over OSC", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a pattern and send the clip commands to Ableton Live
    Send {
        #[command(flatten)]
        pattern: PatternArgs,

        /// AbletonOSC endpoint in "host:port" format
        #[arg(long, default_value = DEFAULT_OSC_ADDR)]
        addr: String,

        /// Song tempo in BPM
        #[arg(long, default_value_t = 60)]
        tempo: i32,

        /// Build and log the command stream without sending anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a pattern and print a per-track summary, sending nothing
    Check {
        #[command(flatten)]
        pattern: PatternArgs,
    },
}

/// Arguments shared by every subcommand that reads a pattern.
#[derive(ClapArgs, Debug)]
struct PatternArgs {
    /// Path to the pattern text file ("-" or omitted reads stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Lowest accepted MIDI pitch
    #[arg(long, default_value_t = 30)]
    pitch_min: i32,

    /// Highest accepted MIDI pitch
    #[arg(long, default_value_t = 90)]
    pitch_max: i32,
}

impl PatternArgs {
    fn config(&self) -> Config {
        Config {
            pitch_range: self.pitch_min..=self.pitch_max,
            ..Config::default()
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    match args.command {
        Commands::Send {
            pattern,
            addr,
            tempo,
            dry_run,
        } => {
            let config = Config {
                tempo,
                addr,
                ..pattern.config()
            };
            let text = read_pattern(pattern.file.as_deref())?;

            let commands = match build_commands(&text, &config) {
                Ok(commands) => commands,
                Err(err) => {
                    log::warn!("{err}; no commands sent");
                    return Ok(ExitCode::FAILURE);
                }
            };

            let client = if dry_run {
                OscClient::noop()
            } else {
                OscClient::new(config.addr.clone())?
            };
            client.send_all(&commands)?;

            if dry_run {
                log::info!("dry run: {} commands built, nothing sent", commands.len());
            } else {
                log::info!("sent {} commands to {}", commands.len(), client.addr);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { pattern } => {
            let config = pattern.config();
            let text = read_pattern(pattern.file.as_deref())?;

            let tables = match parse_tables(&text, &config) {
                Ok(tables) => tables,
                Err(err) => {
                    log::warn!("{err}");
                    return Ok(ExitCode::FAILURE);
                }
            };

            for track in Track::ALL {
                let events = &tables[track.index()];
                if let Some(length) = pattern_duration(events) {
                    println!(
                        "{}: {} notes, pattern length {} beats",
                        config.marker(track),
                        events.len(),
                        length
                    );
                }
            }
            println!("OK");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Read the raw pattern text from a file, or stdin for `-`/no file.
fn read_pattern(file: Option<&Path>) -> Result<String> {
    let text = match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read pattern file {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read pattern text from stdin")?;
            buf
        }
    };
    log::debug!("raw pattern text:\n{text}");
    Ok(text)
}
