//! ucd: inspect Unicode Character Database text files
//!
//! Usage: ucd <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use ucd_lines::commands::{CountCommand, DumpCommand};
use ucd_lines::fetch::{self, Source};
use ucd_lines::reader::UcdError;

#[derive(Parser)]
#[command(name = "ucd")]
#[command(version)]
#[command(about = "Inspect Unicode Character Database text files", long_about = None)]
struct Cli {
    /// Reject codepoints above U+10FFFF
    #[arg(long, global = true)]
    strict: bool,

    /// Use small I/O buffers
    #[arg(long, global = true)]
    low_memory: bool,

    /// Treat locations as file names under the latest published UCD
    /// directory (e.g. Scripts.txt, emoji/emoji-data.txt)
    #[arg(long, global = true)]
    latest: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print data and part lines as |first..last|field|...#comment
    Dump {
        /// Local file, http(s) URL, or - for stdin
        location: String,

        /// Cache remote content in this file and read it from there next time
        #[arg(long)]
        cache: Option<PathBuf>,

        /// Refetch remote content even if the cache file exists
        #[arg(long, requires = "cache")]
        force_remote: bool,

        /// Also print comment-only lines
        #[arg(short, long)]
        comments: bool,
    },

    /// Count data, part, comment and blank lines
    Count {
        /// Local files or http(s) URLs
        #[arg(required = true)]
        locations: Vec<String>,

        /// Total the codepoints covered by first-field ranges
        #[arg(short, long)]
        ranges: bool,

        /// Print data line counts per part
        #[arg(long)]
        sections: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Dump {
            location,
            cache,
            force_remote,
            comments,
        } => run_dump(
            resolve(&location, cli.latest),
            cache,
            force_remote,
            comments,
            cli.low_memory,
            cli.strict,
        ),
        Commands::Count {
            locations,
            ranges,
            sections,
        } => run_count(
            locations
                .iter()
                .map(|l| resolve(l, cli.latest))
                .collect(),
            ranges,
            sections,
            cli.low_memory,
            cli.strict,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn resolve(location: &str, latest: bool) -> String {
    if latest && location != "-" && !fetch::is_remote(location) {
        fetch::ucd_url(location)
    } else {
        location.to_string()
    }
}

fn open(location: &str) -> Result<Source, UcdError> {
    if location == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        fetch::fetch(location)
    }
}

fn run_dump(
    location: String,
    cache: Option<PathBuf>,
    force_remote: bool,
    comments: bool,
    low_memory: bool,
    strict: bool,
) -> Result<(), UcdError> {
    let input = match cache {
        Some(path) => fetch::fetch_cached(&location, path, force_remote)?,
        None => open(&location)?,
    };

    let cmd = DumpCommand {
        comments,
        low_memory,
        strict,
    };
    let stdout = io::stdout();
    cmd.run(input, stdout.lock())
}

fn run_count(
    locations: Vec<String>,
    ranges: bool,
    sections: bool,
    low_memory: bool,
    strict: bool,
) -> Result<(), UcdError> {
    let inputs = locations
        .iter()
        .map(|l| open(l))
        .collect::<Result<Vec<_>, _>>()?;

    let cmd = CountCommand {
        ranges,
        low_memory,
        strict,
    };
    let results = cmd.count_many(inputs);

    let mut first_err = None;
    for (location, result) in locations.iter().zip(results) {
        match result {
            Ok(stats) => {
                println!("{}: {}", location, stats);
                if sections {
                    for (name, count) in &stats.sections {
                        let name = if name.is_empty() { "-" } else { name };
                        println!("  @{}: {}", name, count);
                    }
                }
            }
            Err(e) => {
                eprintln!("{}: {}", location, e);
                first_err.get_or_insert(e);
            }
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
