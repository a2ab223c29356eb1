use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use chrono::{Local, NaiveDate};
use clap::Parser;
use log::info;
use ofx_memo_filter::{
    BlockSummary, FilterBuilder, FilterConfig, FilterOutcome,
    errors::{FilterError, FilterResult},
    report,
};

#[derive(Parser, Debug)]
#[command(name = "ofx-filter", version, about = "Remove automatic-investment transactions from an OFX statement")]
struct Cli {
    /// OFX statement (SGML, Latin-1)
    input: PathBuf,

    /// Filtered statement (default: extrato_filtrado_<today>.ofx)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// JSON file with `exclusion_patterns` and `display_collapse` lists
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Also write the per-record report as CSV
    #[arg(long = "report")]
    report: Option<PathBuf>,

    /// Print the report as JSON instead of tables
    #[arg(long = "json")]
    json: bool,

    /// Do not write the filtered statement
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn dated_output(date: NaiveDate) -> PathBuf {
    PathBuf::from(format!("extrato_filtrado_{}.ofx", date.format("%Y-%m-%d")))
}

fn default_output() -> PathBuf {
    dated_output(Local::now().date_naive())
}

fn write_file(path: &Path, bytes: &[u8]) -> FilterResult<()> {
    fs::write(path, bytes).map_err(|source| FilterError::WriteOutputFailed {
        path: path.display().to_string(),
        source,
    })
}

fn print_table(title: &str, summaries: &[BlockSummary]) {
    println!("{title} ({})", summaries.len());
    for summary in summaries {
        println!(
            "  {:<10}  {:>12}  {}",
            summary.posted.map(|d| d.to_string()).unwrap_or_default(),
            summary.amount.map(|a| a.to_string()).unwrap_or_default(),
            summary.memo
        );
    }
}

fn print_outcome(outcome: &FilterOutcome) {
    print_table("Excluded", &outcome.excluded);
    println!();
    print_table("Kept", &outcome.kept);
    println!();
    println!(
        "{} records, {} excluded (total {}), {} kept (total {})",
        outcome.block_count(),
        outcome.excluded.len(),
        outcome.excluded_total(),
        outcome.kept.len(),
        outcome.kept_total()
    );
}

fn run(cli: Cli) -> FilterResult<()> {
    let config = match &cli.config {
        Some(path) => FilterConfig::from_json_file(path)?,
        None => FilterConfig::default(),
    };

    let outcome = FilterBuilder::new()
        .filename(&cli.input.to_string_lossy())
        .config(config)
        .filter()?;

    if cli.json {
        let all: Vec<&BlockSummary> = outcome.excluded.iter().chain(&outcome.kept).collect();
        serde_json::to_writer_pretty(io::stdout().lock(), &all).map_err(|e| FilterError::WriteOutputFailed {
            path: "stdout".to_string(),
            source: e.into(),
        })?;
        println!();
    } else {
        print_outcome(&outcome);
    }

    if let Some(path) = &cli.report {
        let file = fs::File::create(path).map_err(|source| FilterError::WriteOutputFailed {
            path: path.display().to_string(),
            source,
        })?;
        report::write_csv(file, &outcome)?;
        info!("report written to {}", path.display());
    }

    if cli.dry_run {
        info!("dry run, filtered statement not written");
        return Ok(());
    }

    let output = cli.output.unwrap_or_else(default_output);
    write_file(&output, &outcome.filtered)?;
    info!("filtered statement written to {}", output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ofx-filter: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(), "extrato_filtrado_2025-03-31.ofx")]
    #[case(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), "extrato_filtrado_2026-01-05.ofx")]
    fn test_dated_output(#[case] date: NaiveDate, #[case] expected: &str) {
        assert_eq!(dated_output(date), PathBuf::from(expected));
    }

    #[test]
    fn test_default_output_uses_today() {
        let today = Local::now().date_naive();
        let output = default_output();
        assert!(output.to_string_lossy().starts_with("extrato_filtrado_"));
        assert_eq!(output, dated_output(today));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["ofx-filter", "extrato.ofx"]);
        assert_eq!(cli.input, PathBuf::from("extrato.ofx"));
        assert!(cli.output.is_none());
        assert!(!cli.json && !cli.dry_run);
        assert_eq!(cli.verbose, 0);
    }
}
