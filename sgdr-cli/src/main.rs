//! sgdr — command-line explorer for SGDR learning rate schedules.
//!
//! Prints or exports the learning rate for a range of steps, and checks
//! the closed-form schedule against the epoch-driven reference.

use std::io::{self, stdout, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use serde::Serialize;

use sgdr_core::{load_config, SgdrConfig};
use sgdr_schedule::{ReferenceSchedule, SgdrDecay};

const BAR_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "sgdr", version, about = "SGDR learning rate schedule explorer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the learning rate for each step.
    Table(TableArgs),
    /// Compare the closed form against the epoch-driven reference simulation.
    Compare(CompareArgs),
}

#[derive(Args)]
struct ScheduleArgs {
    /// JSON config file. Flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Peak learning rate of the first cycle.
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Length of the first cycle in steps.
    #[arg(long)]
    period: Option<u64>,

    /// Growth factor of each cycle's length.
    #[arg(long)]
    t_mul: Option<f64>,

    /// Shrink factor of each cycle's peak.
    #[arg(long)]
    m_mul: Option<f64>,
}

impl ScheduleArgs {
    fn resolve(&self) -> Result<SgdrDecay> {
        let mut config = match &self.config {
            Some(path) => SgdrConfig::from(
                load_config(path).with_context(|| format!("loading {}", path.display()))?,
            ),
            None => SgdrConfig::new(0.1, 100),
        };
        if let Some(lr) = self.learning_rate {
            config.learning_rate = lr;
        }
        if let Some(period) = self.period {
            config.initial_period_steps = period;
        }
        if let Some(t_mul) = self.t_mul {
            config.t_mul = t_mul;
        }
        if let Some(m_mul) = self.m_mul {
            config.m_mul = m_mul;
        }
        SgdrDecay::from_config(&config).context("invalid schedule")
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Csv,
    Json,
}

#[derive(Args)]
struct TableArgs {
    #[command(flatten)]
    schedule: ScheduleArgs,

    /// Number of steps to print, starting at 0.
    #[arg(short, long, default_value = "100")]
    steps: u64,

    /// Print every n-th step only.
    #[arg(long, default_value = "1")]
    every: u64,

    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Args)]
struct CompareArgs {
    #[arg(long, default_value = "10.0")]
    learning_rate: f64,

    /// Length of the first cycle in epochs.
    #[arg(long, default_value = "2")]
    period_epochs: u64,

    #[arg(long, default_value = "10")]
    steps_per_epoch: u64,

    /// Integer growth factor of each cycle's length.
    #[arg(long, default_value = "3")]
    t_mul: u64,

    #[arg(long, default_value = "50")]
    epochs: u64,

    /// Largest accepted absolute difference.
    #[arg(long, default_value = "1e-6")]
    tolerance: f64,
}

#[derive(Serialize)]
struct Row {
    step: u64,
    restart: u64,
    rate: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Table(args) => table(args),
        Commands::Compare(args) => compare(args),
    }
}

fn table(args: TableArgs) -> Result<()> {
    let decay = args.schedule.resolve()?;
    let rows = select_rows(&decay, args.steps, args.every)?;
    tracing::info!(steps = args.steps, rows = rows.len(), "evaluated schedule");

    let mut out = stdout();
    write_rows(&mut out, &decay, &rows, args.format)
}

/// Rows for steps `0, every, 2 * every, ...` below `steps`.
fn select_rows(decay: &SgdrDecay, steps: u64, every: u64) -> Result<Vec<Row>> {
    if every == 0 {
        bail!("--every must be at least 1");
    }
    let rows = (0..steps)
        .step_by(usize::try_from(every).unwrap_or(usize::MAX))
        .map(|step| {
            let cycle = decay.cycle(step);
            Row {
                step,
                restart: cycle.index,
                rate: decay.rate_in(&cycle),
            }
        })
        .collect();
    Ok(rows)
}

fn write_rows(out: &mut impl Write, decay: &SgdrDecay, rows: &[Row], format: Format) -> Result<()> {
    match format {
        Format::Table => print_table(out, decay, rows)?,
        Format::Csv => {
            let mut wtr = csv::Writer::from_writer(out);
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_table(out: &mut impl Write, decay: &SgdrDecay, rows: &[Row]) -> Result<()> {
    let top = decay.params().learning_rate();

    execute!(
        out,
        SetForegroundColor(Color::Cyan),
        Print(format!("{:>8}  {:>7}  {:>14}\n", "step", "restart", "rate")),
        ResetColor
    )?;

    let mut last_restart = None;
    for row in rows {
        let bar = "█".repeat(((row.rate / top) * BAR_WIDTH as f64).round() as usize);
        let restarted = last_restart.is_some_and(|r| r != row.restart);
        last_restart = Some(row.restart);

        let color = if restarted { Color::Green } else { Color::White };
        execute!(
            out,
            SetForegroundColor(color),
            Print(format!("{:>8}  {:>7}  {:>14.8}  ", row.step, row.restart, row.rate)),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("{bar}\n")),
            ResetColor
        )?;
    }
    Ok(())
}

fn compare(args: CompareArgs) -> Result<()> {
    let config = SgdrConfig::from_epochs(
        args.learning_rate,
        args.period_epochs,
        args.steps_per_epoch,
        args.t_mul as f64,
    );
    let decay = SgdrDecay::from_config(&config).context("invalid schedule")?;
    let reference = ReferenceSchedule::new(
        args.learning_rate,
        args.period_epochs,
        args.t_mul,
        args.steps_per_epoch,
    )
    .context("invalid reference schedule")?;

    let total = args.epochs.saturating_mul(args.steps_per_epoch);
    let (worst_step, max_diff) = reference
        .take(total as usize)
        .enumerate()
        .map(|(step, expected)| (step, (decay.rate(step as u64) - expected).abs()))
        .fold((0, 0.0f64), |best, cur| if cur.1 > best.1 { cur } else { best });

    tracing::info!(steps = total, max_diff, worst_step, "compared against reference");
    println!("steps: {total}  max |diff|: {max_diff:.3e} (at step {worst_step})");

    if max_diff > args.tolerance {
        bail!("closed form deviates from reference by {max_diff:e} > {}", args.tolerance);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "sgdr", "table", "--learning-rate", "0.2", "--period", "1000", "--t-mul", "1",
        ])
        .unwrap();
        let Commands::Table(args) = cli.command else {
            panic!("expected table subcommand");
        };
        let decay = args.schedule.resolve().unwrap();
        assert_eq!(decay.params().initial_period_steps(), 1000);
        assert_eq!(decay.params().m_mul(), 1.0);
        assert!((decay.rate(500) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let cli = Cli::try_parse_from(["sgdr", "table", "--m-mul", "1.5"]).unwrap();
        let Commands::Table(args) = cli.command else {
            panic!("expected table subcommand");
        };
        assert!(args.schedule.resolve().is_err());
    }

    fn decay(lr: f64, period: u64, t_mul: f64) -> SgdrDecay {
        SgdrDecay::from_config(&SgdrConfig::new(lr, period).with_t_mul(t_mul)).unwrap()
    }

    #[test]
    fn test_select_rows_evaluates_only_selected_steps() {
        let d = decay(0.2, 1000, 1.0);
        let rows = select_rows(&d, 2000, 500).unwrap();
        let steps: Vec<u64> = rows.iter().map(|r| r.step).collect();
        assert_eq!(steps, vec![0, 500, 1000, 1500]);
        assert_eq!(rows[2].restart, 1);
        assert!((rows[1].rate - 0.1).abs() < 1e-12);
        assert!(select_rows(&d, 10, 0).is_err());
    }

    #[test]
    fn test_csv_rows() {
        let d = decay(0.1, 10, 3.0);
        let rows = select_rows(&d, 41, 10).unwrap();
        let mut buf = Vec::new();
        write_rows(&mut buf, &d, &rows, Format::Csv).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "step,restart,rate");
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("0,0,0.1"));
        assert!(lines[2].starts_with("10,1,0.1"));
        assert!(lines[5].starts_with("40,2,0.1"));
    }

    #[test]
    fn test_json_rows() {
        let d = decay(0.1, 10, 3.0);
        let rows = select_rows(&d, 5, 2).unwrap();
        let mut buf = Vec::new();
        write_rows(&mut buf, &d, &rows, Format::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1]["step"], 2);
        assert_eq!(items[1]["restart"], 0);
        assert!((items[0]["rate"].as_f64().unwrap() - 0.1).abs() < 1e-12);
        assert!((items[2]["rate"].as_f64().unwrap() - d.rate(4)).abs() < 1e-15);
    }

    #[test]
    fn test_table_rows() {
        let d = decay(0.1, 10, 3.0);
        let rows = select_rows(&d, 12, 1).unwrap();
        let mut buf = Vec::new();
        write_rows(&mut buf, &d, &rows, Format::Table).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("restart"));
        assert_eq!(text.matches('\n').count(), 13);
    }

    #[test]
    fn test_compare_defaults_pass() {
        let cli = Cli::try_parse_from(["sgdr", "compare"]).unwrap();
        let Commands::Compare(args) = cli.command else {
            panic!("expected compare subcommand");
        };
        compare(args).unwrap();
    }
}
