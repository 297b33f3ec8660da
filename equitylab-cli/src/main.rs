//! EquityLab CLI — option value analysis from a cap table config.
//!
//! Commands:
//! - `analyze` — evaluate every exit scenario in a TOML config
//! - `waterfall` — print the full waterfall for a single exit value
//! - `sensitivity` — sweep one scenario across exit multipliers
//! - `template` — write a starter config
//! - `show` — print the report from a saved artifact directory

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use equitylab_core::{compute, value_options, ExitScenario, WaterfallResult};
use equitylab_runner::format::{count, money, money_cents, roi};
use equitylab_runner::{
    generate_report, load_artifacts, run_analysis, save_artifacts, sweep, AnalysisConfig,
    AnalysisReport, SensitivityPoint,
};

#[derive(Parser)]
#[command(
    name = "equitylab",
    about = "EquityLab CLI — what are my startup options worth at exit?"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every exit scenario in a TOML config.
    Analyze {
        /// Path to a TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Save report.json, CSVs, and report.md under the output directory.
        #[arg(long, default_value_t = false)]
        save: bool,

        /// Output directory for saved artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Print the full liquidation waterfall for one exit value.
    Waterfall {
        /// Path to a TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Exit proceeds in dollars.
        #[arg(long)]
        exit: f64,
    },
    /// Sweep one scenario across exit multipliers.
    Sensitivity {
        /// Path to a TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Scenario to sweep. Defaults to the first scenario in the config.
        #[arg(long)]
        scenario: Option<String>,

        /// Comma-separated multipliers. Defaults to the config's [sensitivity] list.
        #[arg(long, value_delimiter = ',')]
        multipliers: Vec<f64>,
    },
    /// Write a starter config to stdout or a file.
    Template {
        /// Write to this path instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the Markdown report from a saved artifact directory.
    Show {
        /// Artifact directory created by `analyze --save`.
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            config,
            save,
            output_dir,
        } => run_analyze(&config, save, &output_dir),
        Commands::Waterfall { config, exit } => run_waterfall(&config, exit),
        Commands::Sensitivity {
            config,
            scenario,
            multipliers,
        } => run_sensitivity(&config, scenario.as_deref(), multipliers),
        Commands::Template { output, force } => run_template(output.as_deref(), force),
        Commands::Show { dir } => run_show(&dir),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_analyze(config_path: &Path, save: bool, output_dir: &Path) -> Result<()> {
    let config = AnalysisConfig::from_file(config_path)?;
    let report = run_analysis(&config)?;

    print_report(&report);

    if save {
        let run_dir = save_artifacts(&report, output_dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }
    Ok(())
}

fn run_waterfall(config_path: &Path, exit: f64) -> Result<()> {
    let config = AnalysisConfig::from_file(config_path)?;
    let table = config.cap_table()?;
    let waterfall = compute(&table, &ExitScenario::new("Exit", exit))?;
    let option = value_options(&table, &waterfall);

    println!();
    println!("=== Waterfall at {} ===", money(exit));
    print_waterfall(&waterfall);

    println!("--- Share Classes ---");
    println!(
        "{:<16} {:>14} {:>14} {:>14}  {}",
        "Class", "Preference", "Residual", "Total", "Notes"
    );
    println!("{}", "-".repeat(72));
    for class in &waterfall.classes {
        let mut notes = Vec::new();
        if class.converted {
            notes.push("converted");
        }
        if class.capped {
            notes.push("capped");
        }
        println!(
            "{:<16} {:>14} {:>14} {:>14}  {}",
            class.name,
            money(class.preference),
            money(class.participation),
            money(class.total()),
            notes.join(", ")
        );
    }
    println!();
    println!("{}", field("Price/Share", money_cents(waterfall.price_per_common_share)));
    println!("{}", field("Option Value", money(option.total_value)));
    println!("{}", field("ROI", roi(option.roi_pct)));
    println!();
    Ok(())
}

fn run_sensitivity(
    config_path: &Path,
    scenario_name: Option<&str>,
    multipliers: Vec<f64>,
) -> Result<()> {
    let config = AnalysisConfig::from_file(config_path)?;
    let table = config.cap_table()?;
    let scenarios = config.scenarios()?;

    let base = match scenario_name {
        Some(name) => scenarios
            .iter()
            .find(|s| s.name == name)
            .with_context(|| format!("no scenario named '{name}' in config"))?,
        None => match scenarios.first() {
            Some(s) => s,
            None => bail!("config has no [[scenario]] entries"),
        },
    };

    let multipliers = if multipliers.is_empty() {
        config.multipliers()?
    } else {
        for &m in &multipliers {
            if !m.is_finite() || m < 0.0 {
                bail!("multiplier must be a non-negative number, got {m}");
            }
        }
        multipliers
    };

    let points = sweep(&table, base, &multipliers);
    println!();
    println!("=== Sensitivity: {} ({}) ===", base.name, money(base.proceeds));
    print_sensitivity(&points);
    Ok(())
}

fn run_template(output: Option<&Path>, force: bool) -> Result<()> {
    let toml = AnalysisConfig::template().to_toml()?;
    match output {
        None => print!("{toml}"),
        Some(path) => {
            if path.exists() && !force {
                bail!(
                    "{} already exists (pass --force to overwrite)",
                    path.display()
                );
            }
            std::fs::write(path, toml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Template written to: {}", path.display());
        }
    }
    Ok(())
}

fn run_show(dir: &Path) -> Result<()> {
    let report = load_artifacts(dir)?;
    print!("{}", generate_report(&report));
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    let s = &report.summary;

    println!();
    println!("=== Equity Summary ===");
    println!("{}", field("Cap Table", report.fingerprint.short(12)));
    println!("{}", field("Option Grant", format!("{} options", count(s.options_held))));
    println!("{}", field("Strike Price", money_cents(s.strike_price)));
    println!("{}", field("Exercise Cost", money_cents(s.exercise_cost)));
    println!(
        "{}",
        field(
            "Ownership",
            format!(
                "{:.4}% of {} fully diluted",
                s.ownership_pct,
                count(s.fully_diluted_shares)
            )
        )
    );
    println!(
        "{}",
        field("Break-even", format!("{} per share", money_cents(s.break_even_price)))
    );
    if let Some(exit) = report.break_even_exit {
        println!("{}", field("Break-even Exit", money(exit)));
    }
    println!();

    println!("--- Liquidation Preferences ---");
    if s.liquidation_terms.is_empty() {
        println!("No preferred stock.");
    }
    for line in &s.liquidation_terms {
        println!("{line}");
    }
    println!("{}", field("Total", money(s.total_preference)));
    println!();

    println!("--- Scenarios ---");
    println!(
        "{:<16} {:>16} {:>12} {:>14} {:>12}",
        "Scenario", "Exit Value", "Price/Share", "Option Value", "ROI"
    );
    println!("{}", "-".repeat(74));
    for r in &report.results {
        println!(
            "{:<16} {:>16} {:>12} {:>14} {:>12}",
            r.scenario,
            money(r.exit_value),
            money_cents(r.price_per_share),
            money(r.option_value),
            roi(r.roi_pct)
        );
    }
    println!();

    println!("=== Best Scenario: {} ===", report.best().scenario);
    print_waterfall(&report.best_waterfall);

    if !report.sensitivity.is_empty() {
        println!("--- Sensitivity ({}) ---", report.best().scenario);
        print_sensitivity(&report.sensitivity);
    }
}

/// `label:` padded so values line up at column 17, with at least one space.
fn field(label: &str, value: impl std::fmt::Display) -> String {
    format!("{:<15} {value}", format!("{label}:"))
}

fn print_waterfall(waterfall: &WaterfallResult) {
    println!("{:<24} {:>16} {:>16}", "Step", "Amount", "Remaining");
    println!("{}", "-".repeat(58));
    for step in &waterfall.steps {
        println!(
            "{:<24} {:>16} {:>16}",
            step.label,
            money(step.amount),
            money(step.remaining_after)
        );
    }
    println!();
}

fn print_sensitivity(points: &[SensitivityPoint]) {
    println!(
        "{:>10} {:>16} {:>12} {:>14}",
        "Multiple", "Exit Value", "Price/Share", "Option Value"
    );
    println!("{}", "-".repeat(55));
    for p in points {
        println!(
            "{:>9}x {:>16} {:>12} {:>14}",
            p.multiplier,
            money(p.exit_value),
            money_cents(p.price_per_share),
            money(p.option_value)
        );
    }
    println!();
}
