use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use libcbrn::config::{RenumberConfig, SlotRounding};
use libcbrn::prep::{prep_directory, PrepReport};
use libcbrn::report::{IssueReport, RunReport};
use libcbrn::{process_library, HeaderProbe};
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

#[derive(Parser, Debug)]
#[command(name = "cbrn", author, version, about = "Renumber the pages of scanned comic issues", long_about = None)]
struct Cli {
    /// Show debug logs
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rename the pages of every issue directory inside a directory
    Rename(RenameArgs),
    /// Normalize the names of comic archives inside a directory
    Prep(PrepArgs),
}

#[derive(Args, Debug)]
struct RenameArgs {
    /// Directory holding one subdirectory per issue
    #[arg(required = true)]
    input_dir: PathBuf,

    /// Zip each issue after renaming
    #[arg(long, short = 'z')]
    zip: bool,

    /// Delete files that are not images
    #[arg(long, short = 'c')]
    clean: bool,

    /// Only build the archives, leave page names alone
    #[arg(long, conflicts_with = "zip")]
    archive_only: bool,

    /// Show what would change without touching any file
    #[arg(long, short = 'n')]
    dry_run: bool,

    /// Maximum ratio difference still counted as a match
    #[arg(long)]
    tolerance: Option<f64>,

    /// Number given to the first page
    #[arg(long)]
    first_number: Option<u32>,

    /// How spreads are converted into page slots
    #[arg(long, value_enum)]
    rounding: Option<RoundingArg>,

    /// Config file (defaults to the per-user cbrn/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct PrepArgs {
    /// Directory holding the archives
    #[arg(required = true)]
    dir: PathBuf,

    /// Show what would change without renaming
    #[arg(long, short = 'n')]
    dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum RoundingArg {
    Round,
    Ceil,
}

impl From<RoundingArg> for SlotRounding {
    fn from(val: RoundingArg) -> Self {
        match val {
            RoundingArg::Round => SlotRounding::Round,
            RoundingArg::Ceil => SlotRounding::Ceil,
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();
}

/// File values first, then whatever was given on the command line.
fn build_config(args: &RenameArgs) -> Result<RenumberConfig> {
    let mut config = match &args.config {
        Some(path) => RenumberConfig::load_from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RenumberConfig::load().context("Failed to load user config")?,
    };

    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(first_number) = args.first_number {
        config.first_number = first_number;
    }
    if let Some(rounding) = args.rounding {
        config.slot_rounding = rounding.into();
    }
    config.zip |= args.zip;
    config.clean |= args.clean;
    config.archive_only |= args.archive_only;
    config.dry_run |= args.dry_run;

    config.validate().context("Invalid configuration")?;
    debug!("using {:?}", config);
    Ok(config)
}

fn print_issue(issue: &IssueReport) {
    let title = if issue.dry_run {
        format!("{} (dry run)", issue.title)
    } else {
        issue.title.clone()
    };
    println!("{}", bold(&title));

    for rename in &issue.renames {
        println!(
            "  {} {} ← {}",
            green("✓"),
            rename.renamed_name,
            rename.original_name
        );
    }
    for warning in &issue.warnings {
        println!("  {}", yellow(&format!("! {warning}")));
    }
    for error in &issue.errors {
        println!("  {}", red(&format!("✗ {error}")));
    }
    if let Some(archive) = &issue.archive {
        println!("  {} {}", green("✓"), archive.display());
    }
    if let Some(failure) = &issue.failure {
        println!("  {}", red(&format!("✗ {failure}")));
    }
}

fn print_run(report: &RunReport) {
    for issue in &report.issues {
        print_issue(issue);
    }
    let summary = format!(
        "{} issues, {} done, {} failed",
        report.issues.len(),
        report.succeeded(),
        report.failed()
    );
    if report.failed() == 0 {
        println!("{}", green(&summary));
    } else {
        println!("{}", red(&summary));
    }
}

fn print_prep(report: &PrepReport) {
    for rename in &report.renames {
        println!("{} {}", green("✓"), rename.renamed_name);
    }
    for error in &report.errors {
        println!("{}", red(&format!("✗ {error}")));
    }
    if report.errors.is_empty() {
        println!("{}", green("Done"));
    }
}

fn run_rename(args: &RenameArgs) -> Result<()> {
    let config = build_config(args)?;
    let report = process_library(&args.input_dir, &config, &HeaderProbe)
        .with_context(|| format!("Failed to process {}", args.input_dir.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_run(&report);
    }

    if report.failed() > 0 {
        bail!("{} of {} issues failed", report.failed(), report.issues.len());
    }
    Ok(())
}

fn run_prep(args: &PrepArgs) -> Result<()> {
    let report = prep_directory(&args.dir, args.dry_run)
        .with_context(|| format!("Failed to prep {}", args.dir.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_prep(&report);
    }

    if !report.errors.is_empty() {
        bail!("{} archives could not be renamed", report.errors.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match &cli.command {
        Command::Rename(args) => run_rename(args),
        Command::Prep(args) => run_prep(args),
    }
}
