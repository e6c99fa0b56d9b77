use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use clap::Parser;
use serde::Serialize;
use shell_words::split;
use thiserror::Error;

use crate::application::{AppError, ExpenseFilter, Session};
use crate::domain::{format_cents, Cents, Expense, Report, DATE_FORMAT};

use super::{OutputFormat, ShellCommand, ShellLine};

const EMPTY_PERIOD: &str = "No expenses found in the specified period.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Failures while running a command. Only `App` errors are recoverable:
/// they are printed and the shell keeps going.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Output error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Line-oriented front end over a [`Session`].
pub struct Shell<W: Write> {
    session: Session,
    out: W,
}

#[derive(Serialize)]
struct ListedExpense<'a> {
    index: usize,
    #[serde(flatten)]
    expense: &'a Expense,
}

impl<W: Write> Shell<W> {
    pub fn new(session: Session, out: W) -> Self {
        Self { session, out }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Read commands until end of input or `exit`.
    pub fn run<R: BufRead>(&mut self, input: R, interactive: bool) -> Result<(), CommandError> {
        if interactive {
            writeln!(
                self.out,
                "spendbook {} - balance {}. Type 'help' for commands.",
                env!("CARGO_PKG_VERSION"),
                format_cents(self.session.balance())
            )?;
        }

        let mut lines = input.lines();
        loop {
            if interactive {
                write!(self.out, "spendbook> ")?;
                self.out.flush()?;
            }

            let Some(line) = lines.next() else {
                if interactive {
                    writeln!(self.out)?;
                }
                break;
            };
            if self.handle_line(&line?)? == LoopControl::Exit {
                break;
            }
        }

        self.out.flush()?;
        Ok(())
    }

    /// Parse and execute one line. User mistakes are reported on the output
    /// and never end the loop.
    pub fn handle_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(LoopControl::Continue);
        }

        let tokens = match split(trimmed) {
            Ok(tokens) => tokens,
            Err(err) => {
                writeln!(self.out, "Error: {}", err)?;
                return Ok(LoopControl::Continue);
            }
        };

        let command = match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                // Covers `help` and `--help` as well as usage errors
                write!(self.out, "{}", err.render())?;
                return Ok(LoopControl::Continue);
            }
        };

        match self.execute(command) {
            Err(CommandError::App(err)) => {
                writeln!(self.out, "Error: {}", err)?;
                Ok(LoopControl::Continue)
            }
            other => other,
        }
    }

    pub fn execute(&mut self, command: ShellCommand) -> Result<LoopControl, CommandError> {
        match command {
            ShellCommand::SetBalance { amount } => {
                self.session.set_initial_balance(amount)?;
                writeln!(self.out, "Initial balance set to: {}", format_cents(amount))?;
            }

            ShellCommand::Balance => {
                writeln!(
                    self.out,
                    "Current balance: {}",
                    format_cents(self.session.balance())
                )?;
            }

            ShellCommand::Add {
                amount,
                category,
                date,
                description,
            } => {
                let index = self
                    .session
                    .add_expense(amount, &category, date, &description)?;
                writeln!(
                    self.out,
                    "Expense added at index {}. Balance: {}",
                    index,
                    format_cents(self.session.balance())
                )?;
            }

            ShellCommand::Update {
                index,
                amount,
                category,
                date,
                description,
            } => {
                self.session
                    .update_expense(index, amount, &category, date, &description)?;
                writeln!(
                    self.out,
                    "Expense {} updated. Balance: {}",
                    index,
                    format_cents(self.session.balance())
                )?;
            }

            ShellCommand::Delete { index } => {
                let removed = self.session.delete_expense(index)?;
                writeln!(
                    self.out,
                    "Deleted expense {}: {}. Balance: {}",
                    index,
                    removed,
                    format_cents(self.session.balance())
                )?;
            }

            ShellCommand::List { from, to, format } => {
                let entries = self.session.list_expenses(ExpenseFilter { from, to })?;
                match format {
                    OutputFormat::Json => {
                        let listed: Vec<ListedExpense<'_>> = entries
                            .into_iter()
                            .map(|(index, expense)| ListedExpense { index, expense })
                            .collect();
                        writeln!(self.out, "{}", serde_json::to_string_pretty(&listed)?)?;
                    }
                    OutputFormat::Table if entries.is_empty() => {
                        writeln!(self.out, "{}", EMPTY_PERIOD)?;
                    }
                    OutputFormat::Table => {
                        writeln!(
                            self.out,
                            "{:<6} {:<12} {:>12} {:<15} DESCRIPTION",
                            "INDEX", "DATE", "AMOUNT", "CATEGORY"
                        )?;
                        writeln!(self.out, "{}", "-".repeat(70))?;
                        for (index, expense) in entries {
                            writeln!(
                                self.out,
                                "{:<6} {:<12} {:>12} {:<15} {}",
                                index,
                                expense.date().format(DATE_FORMAT),
                                format_cents(expense.amount_cents()),
                                truncate(expense.category(), 15),
                                truncate(expense.description(), 30)
                            )?;
                        }
                    }
                }
            }

            ShellCommand::Total { from, to } => {
                let total = self.session.total(from, to)?;
                writeln!(
                    self.out,
                    "Total from {} to {}: {}",
                    from.format(DATE_FORMAT),
                    to.format(DATE_FORMAT),
                    format_cents(total)
                )?;
            }

            ShellCommand::Breakdown { from, to, format } => {
                let breakdown = self.session.breakdown(from, to)?;
                match format {
                    OutputFormat::Json => {
                        writeln!(self.out, "{}", serde_json::to_string_pretty(&breakdown)?)?;
                    }
                    OutputFormat::Table if breakdown.is_empty() => {
                        writeln!(self.out, "{}", EMPTY_PERIOD)?;
                    }
                    OutputFormat::Table => self.write_breakdown(&breakdown)?,
                }
            }

            ShellCommand::Report { period, format } => {
                let report = self.session.report(&period)?;
                match format {
                    OutputFormat::Json => {
                        let map = report.into_map();
                        writeln!(self.out, "{}", serde_json::to_string_pretty(&map)?)?;
                    }
                    OutputFormat::Table => self.write_report(&report)?,
                }
            }

            ShellCommand::Check => {
                let report = self.session.check_integrity();
                writeln!(self.out, "Expenses:         {}", report.expense_count)?;
                writeln!(
                    self.out,
                    "Opening balance:  {}",
                    format_cents(report.opening_balance)
                )?;
                writeln!(self.out, "Total spent:      {}", format_cents(report.total_spent))?;
                writeln!(
                    self.out,
                    "Expected balance: {}",
                    format_cents(report.expected_balance)
                )?;
                writeln!(
                    self.out,
                    "Current balance:  {}",
                    format_cents(report.current_balance)
                )?;
                let status = if report.is_consistent() {
                    "OK"
                } else {
                    "MISMATCH"
                };
                writeln!(self.out, "Status:           {}", status)?;
            }

            ShellCommand::Exit => return Ok(LoopControl::Exit),
        }

        Ok(LoopControl::Continue)
    }

    fn write_report(&mut self, report: &Report) -> io::Result<()> {
        writeln!(self.out, "{} ({})", report.label(), report.window)?;
        writeln!(
            self.out,
            "Total expenses: {}",
            format_cents(report.summary.total_expenses)
        )?;
        if report.summary.category_breakdown.is_empty() {
            return Ok(());
        }
        writeln!(self.out)?;
        self.write_breakdown(&report.summary.category_breakdown)
    }

    fn write_breakdown(&mut self, breakdown: &BTreeMap<String, Cents>) -> io::Result<()> {
        writeln!(self.out, "{:<20} {:>12}", "CATEGORY", "TOTAL")?;
        writeln!(self.out, "{}", "-".repeat(33))?;
        for (category, total) in breakdown {
            writeln!(
                self.out,
                "{:<20} {:>12}",
                truncate(category, 20),
                format_cents(*total)
            )?;
        }
        Ok(())
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
