//! Tweeter shell binary.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session
//! tweeter
//!
//! # Scripted, output only
//! tweeter --quiet < session.txt
//!
//! # "latest" means the highest id still stored
//! tweeter --latest highest-stored
//! ```

use std::io::{self, BufRead, Write};

use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tweeter_core::{LatestTweetPolicy, ManagerConfig};
use tweeter_shell::{Reply, Shell, SystemEnv};

/// Which tweet `latest` shows.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Latest {
    /// Most recently issued id, even if that tweet was never published
    LastIssued,
    /// Highest id currently stored
    HighestStored,
}

impl From<Latest> for LatestTweetPolicy {
    fn from(latest: Latest) -> Self {
        match latest {
            Latest::LastIssued => Self::LastIssuedId,
            Latest::HighestStored => Self::HighestStoredId,
        }
    }
}

/// Tweeter interactive shell
#[derive(Parser, Debug)]
#[command(name = "tweeter")]
#[command(about = "In-memory social feed shell")]
#[command(version)]
struct Args {
    /// Prompt shown before each command
    #[arg(long, default_value = "Tweeter >> ")]
    prompt: String,

    /// Which tweet the `latest` command shows
    #[arg(long, value_enum, default_value = "last-issued")]
    latest: Latest,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Don't print the prompt or banner
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let config = ManagerConfig { latest_policy: args.latest.into() };
    tracing::info!(?config, "tweeter shell starting");

    let mut shell = Shell::new(SystemEnv::new(), config);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    if !args.quiet {
        writeln!(stdout, "Welcome to Tweeter. Type 'help' for commands.")?;
    }

    let mut line = String::new();
    loop {
        if !args.quiet {
            write!(stdout, "{}", args.prompt)?;
            stdout.flush()?;
        }

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match shell.handle_line(&line) {
            Reply::Lines(lines) => {
                for output in lines {
                    writeln!(stdout, "{output}")?;
                }
            },
            Reply::Exit => break,
        }
    }

    tracing::info!(tweets = shell.manager().tweet_count(), "tweeter shell exiting");
    Ok(())
}
