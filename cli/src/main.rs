//! CLI for the GitHub organization repository metadata collector.
//!
//! Collects metadata for every repository of an organization and writes it
//! to a single JSON file.

use clap::Parser;
use repo_indexer::report::{summarize, ReportSummary};
use repo_indexer::{Collector, CollectorConfig, CollectorError, RunSummary, DEFAULT_OUTPUT_FILE};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

/// Exit code when some repositories failed.
const EXIT_PARTIAL_FAILURE: u8 = 1;
/// Exit code for fatal errors.
const EXIT_FATAL: u8 = 2;
/// Exit code when the organization has no matching repositories.
const EXIT_NO_REPOSITORIES: u8 = 3;
/// Exit code after Ctrl-C.
const EXIT_INTERRUPTED: u8 = 130;

/// Number of languages shown in the console summary.
const SUMMARY_LANGUAGES: usize = 5;

/// Collect metadata for all repositories of a GitHub organization.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub organization name.
    #[arg(short, long, env = "GITHUB_ORG")]
    org: String,

    /// GitHub Personal Access Token.
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// API base URL for GitHub Enterprise Server (e.g. https://github.example.com/api/v3).
    #[arg(short = 'u', long, env = "GITHUB_URL")]
    github_url: Option<Url>,

    /// Output JSON file.
    #[arg(short = 'f', long, env = "OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Number of top contributors recorded per repository.
    #[arg(long, default_value_t = repo_indexer::DEFAULT_MAX_CONTRIBUTORS)]
    max_contributors: usize,

    /// Include forked repositories (default).
    #[arg(long, overrides_with = "no_forks")]
    include_forks: bool,

    /// Skip forked repositories.
    #[arg(long, overrides_with = "include_forks")]
    no_forks: bool,

    /// Include archived repositories (default).
    #[arg(long, overrides_with = "no_archived")]
    include_archived: bool,

    /// Skip archived repositories.
    #[arg(long, overrides_with = "include_archived")]
    no_archived: bool,

    /// Back up an existing output file before writing (default).
    #[arg(long, overrides_with = "no_backup")]
    backup: bool,

    /// Overwrite an existing output file without a backup.
    #[arg(long, overrides_with = "backup")]
    no_backup: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Print summary statistics of the written file.
    #[arg(long)]
    summary: bool,
}

impl Args {
    fn into_config(self) -> CollectorConfig {
        let mut config = CollectorConfig::new(self.org, self.token)
            .with_output_path(self.output)
            .with_max_contributors(self.max_contributors)
            .with_include_forks(self.include_forks || !self.no_forks)
            .with_include_archived(self.include_archived || !self.no_archived)
            .with_backup(self.backup || !self.no_backup);
        if let Some(url) = self.github_url {
            config = config.with_base_url(url);
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.verbose);

    if rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider was already installed");
    }

    print_header(&args);
    let show_summary = args.summary;

    tokio::select! {
        result = run(args) => match result {
            Ok(summary) => report_outcome(&summary, show_summary),
            Err(e) => {
                error!(error = %e, "Collection failed");
                eprintln!("\nError: {e}");
                ExitCode::from(EXIT_FATAL)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted by user");
            ExitCode::from(EXIT_INTERRUPTED)
        }
    }
}

/// Installs the global subscriber: compact output, `RUST_LOG` filtering,
/// falling back to `info` (or `debug` with `--verbose`).
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, CollectorError> {
    let collector = Collector::new(args.into_config())?;
    collector.run().await
}

/// Maps a finished run to console output and an exit code.
fn report_outcome(summary: &RunSummary, show_summary: bool) -> ExitCode {
    if summary.nothing_found() {
        println!(
            "\nNo repositories found in organization '{}'",
            summary.organization
        );
        print_rate_limit(summary);
        return ExitCode::from(EXIT_NO_REPOSITORIES);
    }

    print_completion(summary);

    if show_summary {
        if let Some(path) = &summary.output_path {
            match summarize(path) {
                Ok(report_summary) => print_report_summary(&report_summary),
                Err(e) => warn!(error = %e, "Could not summarize output"),
            }
        }
    }

    print_next_steps(summary);
    print_rate_limit(summary);

    if summary.has_failures() {
        ExitCode::from(EXIT_PARTIAL_FAILURE)
    } else {
        ExitCode::SUCCESS
    }
}

fn print_header(args: &Args) {
    println!("GitHub Repository Metadata Collector v{}", env!("CARGO_PKG_VERSION"));
    println!("Organization: {}", args.org);
    if let Some(url) = &args.github_url {
        println!("GitHub URL: {url}");
    }
    println!();
}

/// Prints the completion table and any failed repositories.
fn print_completion(summary: &RunSummary) {
    println!("\nCollection complete:");
    println!("  Repositories found: {}", summary.repositories_found);
    println!("  Processed: {}", summary.processed);
    println!("  Failed: {}", summary.failed.len());
    if let Some(path) = &summary.output_path {
        println!("  Output file: {}", path.display());
    }

    if summary.has_failures() {
        println!("\nFailed repositories:");
        for failure in &summary.failed {
            println!("  - {}: {}", failure.name, failure.error);
        }
    }
}

fn print_report_summary(report: &ReportSummary) {
    let status = &report.status_breakdown;
    println!("\nSummary:");
    println!("  Total repositories: {}", report.total_repositories);
    println!(
        "  Active: {}, Archived: {}, Forks: {}, Templates: {}",
        status.active, status.archived, status.forks, status.templates
    );

    if !report.top_languages.is_empty() {
        println!("  Top languages:");
        for (language, count) in report.top_languages.iter().take(SUMMARY_LANGUAGES) {
            println!("    {language}: {count}");
        }
    }

    if !report.top_starred.is_empty() {
        println!("  Most starred:");
        for repository in &report.top_starred {
            println!("    {} ({} stars)", repository.name, repository.stars);
        }
    }
}

fn print_next_steps(summary: &RunSummary) {
    let Some(path) = &summary.output_path else {
        return;
    };
    println!("\nNext steps:");
    println!("  1. Review {}", path.display());
    println!("  2. Feed it to your documentation generator");
    if summary.has_failures() {
        println!("  3. Check the failed repositories above and re-run if needed");
    }
}

fn print_rate_limit(summary: &RunSummary) {
    let Some(info) = summary.rate_limit else {
        return;
    };
    println!("\nRate limit remaining: {}/{}", info.remaining, info.limit);
    if info.is_low() {
        warn!(
            remaining = info.remaining,
            reset = %info.reset_at().to_rfc3339(),
            "Rate limit is running low"
        );
    }
}
