use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::application::{parse_amount, parse_date, Session};
use crate::domain::Cents;

mod shell;

pub use shell::{CommandError, LoopControl, Shell};

/// Spendbook - Personal Expense Tracker
#[derive(Parser, Debug)]
#[command(name = "spendbook")]
#[command(about = "Track expenses against a balance and summarize them by period")]
#[command(version)]
pub struct Cli {
    /// Initial balance for the session (e.g., "250.00" or "250")
    #[arg(
        short,
        long,
        env = "SPENDBOOK_BALANCE",
        default_value = "0",
        value_parser = parse_amount,
        allow_hyphen_values = true
    )]
    pub balance: Cents,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not print the banner or prompt
    #[arg(short, long)]
    pub quiet: bool,
}

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(name = "spendbook", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    /// Start over with a new balance (discards all expenses)
    SetBalance {
        /// New balance (e.g., "250.00")
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        amount: Cents,
    },

    /// Show the current balance
    Balance,

    /// Record an expense
    Add {
        /// Amount spent (e.g., "12.50")
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        amount: Cents,

        /// Category label (case-sensitive)
        category: String,

        /// Date of the expense (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Replace the expense at an index
    Update {
        /// Index shown by `list`
        index: usize,

        /// New amount
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        amount: Cents,

        /// New category
        category: String,

        /// New date (YYYY-MM-DD)
        #[arg(value_parser = parse_date)]
        date: NaiveDate,

        /// New description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Delete the expense at an index (later indices shift down)
    Delete {
        /// Index shown by `list`
        index: usize,
    },

    /// List expenses, optionally within a date range
    List {
        /// First date to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,

        /// Last date to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Total spent within a date range
    Total {
        /// First date to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,

        /// Last date to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,
    },

    /// Spending per category within a date range
    Breakdown {
        /// First date to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        from: NaiveDate,

        /// Last date to include (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        to: NaiveDate,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Summary of the current week, month or year
    Report {
        /// Period: weekly, monthly, yearly
        period: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Verify the balance against the recorded expenses
    Check,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        let session = Session::new(self.balance).context("Failed to start session")?;

        let stdin = io::stdin();
        let interactive = !self.quiet && stdin.is_terminal();
        let mut shell = Shell::new(session, io::stdout().lock());
        shell.run(stdin.lock(), interactive)?;
        Ok(())
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = if verbose {
        "spendbook=debug"
    } else {
        "spendbook=error"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
