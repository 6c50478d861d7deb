use anyhow::Result;
use branchdiff::areas::repository::Repository;
use branchdiff::artifacts::compare::config::{
    CompareConfig, DEFAULT_OUTPUT_NAME, DEFAULT_REPOSITORY_DIR,
};
use branchdiff::artifacts::diff::tree_diff::DiffFilter;
use branchdiff::artifacts::report::csv_report::ComparisonReport;
use clap::{ArgAction, Parser};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "branchdiff",
    version = "0.1.0",
    about = "Compare the files of two git branches",
    long_about = "Compares the trees at the tips of two branches and writes a CSV report \
    listing every added, deleted, modified or renamed file with its type, \
    modification date and size as found in the working tree.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(short, long, help = "The source branch (left side of the report)")]
    source: String,
    #[arg(short, long, help = "The target branch (right side of the report)")]
    target: String,
    #[arg(short, long, default_value = DEFAULT_REPOSITORY_DIR, help = "The repository directory")]
    dir: PathBuf,
    #[arg(
        short,
        long,
        default_value = DEFAULT_OUTPUT_NAME,
        help = "The report file name, `.csv` is appended"
    )]
    output: String,
    #[arg(long, help = "Report renamed files as a deletion and an addition")]
    no_renames: bool,
    #[arg(
        long,
        value_parser = parse_diff_filter,
        help = "Only report the given change kinds (A, D, M, R)"
    )]
    diff_filter: Option<DiffFilter>,
    #[arg(long, help = "Exit with an error when some changes could not be described")]
    strict: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

impl Cli {
    fn compare_config(&self) -> CompareConfig {
        CompareConfig {
            repository_dir: self.dir.clone(),
            output_name: self.output.clone(),
            detect_renames: !self.no_renames,
            diff_filter: self.diff_filter.unwrap_or_default(),
        }
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

fn parse_diff_filter(raw: &str) -> Result<DiffFilter, String> {
    DiffFilter::try_parse(raw)
        .ok_or_else(|| format!("invalid diff filter {raw:?}, expected letters from ADMR"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let config = cli.compare_config();

    println!(
        "Comparing branches {} and {} in {}",
        cli.source.bold(),
        cli.target.bold(),
        config.repository_dir.display()
    );

    let repository = Repository::open(&config.repository_dir)?;
    let result = repository.compare(&cli.source, &cli.target, &config)?;

    let output_path = config.output_path();
    ComparisonReport::new(&cli.source, &cli.target, result.pairs()).write_file(&output_path)?;

    if let Some(error) = result.partial_failure() {
        eprintln!("{} {}", "warning:".yellow(), error);
    }

    println!(
        "{} {}",
        "Successfully wrote comparison to".green(),
        output_path.display()
    );

    if cli.strict
        && let Some(error) = result.partial_failure()
    {
        anyhow::bail!(error);
    }

    Ok(())
}
