use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

use tax_cli::{config, csv_loader, logging, report, utils::parse_amount};
use tax_core::{IncomeInputs, RegimeConfig, TaxCalculation, TaxEngine};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Advance tax calculator for the Indian new tax regime.
///
/// Computes income tax liability for FY 2025-26 (AY 2026-27) and splits it
/// into the quarterly advance-tax installments.
#[derive(Debug, Parser)]
#[command(name = "advance-tax", version, about)]
struct Cli {
    /// TOML file overriding the built-in regime constants.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive (overrides RUST_LOG).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute liability for a single set of income figures.
    Compute(ComputeArgs),
    /// Compute liability for every row of a CSV file.
    Batch(BatchArgs),
    /// Print the slab rate table.
    Slabs,
    /// Print the active regime constants as TOML.
    Config,
}

/// Amounts are taken as text: blank or invalid entries count as zero.
#[derive(Debug, Args)]
struct ComputeArgs {
    /// Gross salary income.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    salary: String,

    /// Income from business or profession.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    business: String,

    /// Income from house property.
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    rental: String,

    /// Income from other sources (interest, dividends).
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    other: String,

    /// Output as JSON instead of formatted text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// CSV file with `name,salary,business,rental,other` columns.
    #[arg(short, long)]
    file: PathBuf,

    /// Output as JSON instead of formatted text.
    #[arg(long)]
    json: bool,
}

/// One batch entry for JSON output
#[derive(Debug, Serialize)]
struct BatchEntry<'a> {
    name: &'a str,
    inputs: &'a IncomeInputs,
    calculation: TaxCalculation,
}

// ─── commands ────────────────────────────────────────────────────────────────

fn calculation_json(calculation: &TaxCalculation) -> Result<String> {
    serde_json::to_string_pretty(calculation).context("cannot serialize calculation")
}

fn batch_json(entries: &[BatchEntry<'_>]) -> Result<String> {
    serde_json::to_string_pretty(entries).context("cannot serialize calculations")
}

fn run_compute(
    regime: &RegimeConfig,
    args: &ComputeArgs,
) -> Result<()> {
    let inputs = IncomeInputs::new(
        parse_amount(&args.salary),
        parse_amount(&args.business),
        parse_amount(&args.rental),
        parse_amount(&args.other),
    );
    debug!(?inputs, "parsed income inputs");

    let calculation = TaxEngine::new(regime).calculate(&inputs);

    if args.json {
        println!("{}", calculation_json(&calculation)?);
    } else {
        print!("{}", report::render_report("Advance tax", regime, &calculation));
    }
    Ok(())
}

fn run_batch(
    regime: &RegimeConfig,
    args: &BatchArgs,
) -> Result<()> {
    let records = csv_loader::load_from_file(&args.file)
        .with_context(|| format!("failed to load incomes from: {}", args.file.display()))?;

    let engine = TaxEngine::new(regime);
    let entries: Vec<BatchEntry<'_>> = records
        .iter()
        .map(|record| BatchEntry {
            name: &record.name,
            inputs: &record.inputs,
            calculation: engine.calculate(&record.inputs),
        })
        .collect();
    info!(count = entries.len(), "computed batch");

    if args.json {
        println!("{}", batch_json(&entries)?);
        return Ok(());
    }

    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print!("{}", report::render_report(entry.name, regime, &entry.calculation));
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let regime = config::load_regime(cli.config.as_deref())?;

    match &cli.command {
        Command::Compute(args) => run_compute(&regime, args),
        Command::Batch(args) => run_batch(&regime, args),
        Command::Slabs => {
            print!("{}", report::render_slabs(&regime));
            Ok(())
        }
        Command::Config => {
            print!("{}", config::regime_toml(&regime)?);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::Value;
    use tax_core::compute_tax;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn compute_amounts_default_to_blank() {
        let cli = Cli::parse_from(["advance-tax", "compute", "--salary", "15,00,000"]);

        let Command::Compute(args) = cli.command else {
            panic!("expected compute");
        };
        assert_eq!(args.salary, "15,00,000");
        assert_eq!(args.business, "");
        assert!(!args.json);
    }

    #[test]
    fn negative_amounts_reach_the_parser() {
        let cli = Cli::parse_from(["advance-tax", "compute", "--rental", "-5000"]);

        let Command::Compute(args) = cli.command else {
            panic!("expected compute");
        };
        assert_eq!(args.rental, "-5000");
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from([
            "advance-tax",
            "batch",
            "--file",
            "incomes.csv",
            "--log-level",
            "debug",
        ]);

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Batch(_)));
    }

    #[test]
    fn calculation_json_uses_field_names() {
        let calculation = compute_tax(&IncomeInputs::salary_only(dec!(1500000)));

        let json: Value = serde_json::from_str(&calculation_json(&calculation).unwrap()).unwrap();

        assert_eq!(json["gross_total_income"], "1500000");
        assert_eq!(json["standard_deduction"], "75000");
        assert_eq!(json["total_income"], "1425000");
        assert_eq!(json["marginal_relief"], "0");
        assert_eq!(json["rebate_u87a"], "0");
        assert_eq!(json["cess"], "3750");
        assert_eq!(json["total_tax"], "97500");
        assert_eq!(json["installments"][0]["due_date_label"], "15 June 2025");
        assert_eq!(json["installments"][0]["cumulative_percentage"], 15);
        assert_eq!(json["installments"][0]["amount"], "14625");
        assert_eq!(json["installments"][3]["cumulative_amount"], "97500");
    }

    #[test]
    fn batch_json_labels_each_entry() {
        let inputs = IncomeInputs::new(dec!(0), dec!(6000000), dec!(0), dec!(0));
        let entries = vec![BatchEntry {
            name: "Ravi",
            inputs: &inputs,
            calculation: compute_tax(&inputs),
        }];

        let json: Value = serde_json::from_str(&batch_json(&entries).unwrap()).unwrap();

        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["name"], "Ravi");
        assert_eq!(json[0]["inputs"]["business"], "6000000");
        assert_eq!(json[0]["inputs"]["salary"], "0");
        assert_eq!(json[0]["calculation"]["surcharge"], "138000");
        assert_eq!(json[0]["calculation"]["total_tax"], "1578720");
    }
}
