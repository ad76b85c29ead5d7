//! digital-wallet CLI
//!
//! Sign up, log in, check balances, deposit, withdraw and pay bills from
//! the terminal. All state lives in memory for the length of the run.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use digital_wallet::menu::io::{LineInput, TerminalPresenter};
use digital_wallet::menu::Application;
use digital_wallet::types::{SeedUser, WalletConfig};

#[derive(Parser)]
#[command(name = "digital-wallet")]
#[command(about = "Interactive console digital wallet")]
#[command(long_about = "Interactive console digital wallet.\n\n\
Every flag is optional. Running with no flags gives a 20-user directory \
seeded with the demo user Mohamed / 12345 (balance 2000), colored \
messages and warnings-only logging on stderr.")]
#[command(version)]
struct Cli {
    /// Maximum number of users (default: 20)
    #[arg(long)]
    capacity: Option<usize>,

    /// Start with an empty user directory (no demo user)
    #[arg(long)]
    no_seed: bool,

    /// Print messages without color
    #[arg(long)]
    no_color: bool,

    /// Log more to stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> WalletConfig {
        let defaults = WalletConfig::default();
        WalletConfig {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            seed_user: if self.no_seed {
                None
            } else {
                Some(SeedUser::default())
            },
            color: !self.no_color,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config();
    let mut app = Application::new(&config);
    let mut presenter = TerminalPresenter::stdout(config.color);
    let mut input = LineInput::stdin();

    match app.run(&mut presenter, &mut input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "terminal I/O failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

/// Log to stderr so stdout carries only the menu.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init()
    {
        eprintln!("Note: logging disabled: {}", e);
    }
}
