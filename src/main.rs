use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// Use library instead of local modules
use receipt_points::{PointsCalculator, Receipt, ScoringRule};

#[derive(Parser, Debug)]
#[command(name = "receipt-points")]
#[command(about = "Score purchase receipts offline", version)]
struct Cli {
    /// Log every rule evaluation to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one or more receipt JSON files
    Score {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print each breakdown as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the scoring rules
    Rules,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("receipt_points=debug"))
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Command::Score { files, json } => run_score(&files, json),
        Command::Rules => {
            print_rules();
            ExitCode::SUCCESS
        }
    }
}

fn run_score(files: &[PathBuf], json: bool) -> ExitCode {
    let calculator = PointsCalculator::new();
    let mut failures = 0;

    for path in files {
        if let Err(e) = score_file(&calculator, path, json) {
            eprintln!("❌ {}: {:#}", path.display(), e);
            failures += 1;
        }
    }

    if failures == 0 {
        ExitCode::SUCCESS
    } else {
        eprintln!("\n{} of {} receipt(s) could not be scored", failures, files.len());
        ExitCode::FAILURE
    }
}

fn score_file(calculator: &PointsCalculator, path: &Path, json: bool) -> Result<()> {
    let receipt = Receipt::from_file(path)?;
    let breakdown = calculator.breakdown(&receipt)?;

    if json {
        let output = serde_json::json!({
            "file": path.display().to_string(),
            "points": breakdown.total,
            "breakdown": breakdown.outcomes,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("🧾 {} ({})", receipt.retailer, path.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for outcome in &breakdown.outcomes {
        println!("  {:<24} {:>6}", outcome.rule.id(), outcome.points);
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {:<24} {:>6}\n", "total", breakdown.total);

    Ok(())
}

fn print_rules() {
    println!("🏷️  Scoring rules");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for rule in ScoringRule::ALL {
        println!("  {:<24} {}", rule.id(), rule.description());
    }
}
