//! loldrivers-scan: find known-vulnerable kernel drivers by content hash.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use loldrivers_scan::{
    AppConfig, CandidateSources, FeedConfig, OutputConfig, ReportFormat, ScanConfig,
    cli::{self, ConfigView},
    pipeline::{OutputTarget, exit_codes},
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "loldrivers-scan")]
#[command(version)]
#[command(about = "Detect known-vulnerable drivers from the LOLDrivers feed", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Scan completed
    2  Vulnerable drivers found (with --fail-on-match)
    3  Error occurred

EXAMPLES:
    # Check the drivers currently loaded by the kernel
    loldrivers-scan scan --loaded

    # Check specific files
    loldrivers-scan scan '\\SystemRoot\\System32\\drivers\\RTCore64.sys' 'System32\\drivers\\gdrv.sys'

    # CI gate with JSON output and an offline feed copy
    loldrivers-scan scan --list drivers.txt --feed-file drivers.json -o json --fail-on-match")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Where the feed comes from
#[derive(Args)]
struct FeedArgs {
    /// Feed URL
    #[arg(long)]
    feed_url: Option<String>,

    /// Read a downloaded drivers.json instead of fetching
    #[arg(long, conflicts_with = "feed_url")]
    feed_file: Option<PathBuf>,

    /// Feed request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl FeedArgs {
    fn into_config(self) -> FeedConfig {
        FeedConfig {
            url: self.feed_url,
            timeout_secs: self.timeout,
            user_agent: None,
            file: self.feed_file,
        }
    }
}

/// How results are written
#[derive(Args)]
struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `scan` subcommand
#[derive(Args)]
struct ScanArgs {
    /// Driver paths to check, as Windows records them
    paths: Vec<String>,

    /// File listing one driver path per line
    #[arg(short, long)]
    list: Option<PathBuf>,

    /// Also check every driver currently loaded by the kernel (Windows only)
    #[arg(long)]
    loaded: bool,

    /// Hash candidates in parallel
    #[arg(long)]
    parallel: bool,

    /// Exit with code 2 if any vulnerable driver is found
    #[arg(long)]
    fail_on_match: bool,

    #[command(flatten)]
    feed: FeedArgs,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `feed` subcommand
#[derive(Args)]
struct FeedListArgs {
    #[command(flatten)]
    feed: FeedArgs,

    #[command(flatten)]
    output: OutputArgs,
}

/// Arguments for the `resolve` subcommand
#[derive(Args)]
struct ResolveArgs {
    /// Driver paths to resolve
    #[arg(required = true)]
    paths: Vec<String>,

    /// Also print the SHA-256 of each resolved file
    #[arg(long)]
    hash: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check driver files against the feed
    Scan(ScanArgs),

    /// Download and list the normalized feed
    Feed(FeedListArgs),

    /// Show where driver paths resolve on this host
    Resolve(ResolveArgs),

    /// Print an example config file, its JSON schema, or the effective config
    Config {
        /// Print the JSON schema of the config file
        #[arg(long, conflicts_with = "show")]
        schema: bool,

        /// Print the configuration in effect
        #[arg(long)]
        show: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so reports on stdout stay machine-readable
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<i32> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Scan(args) => {
            let overrides = AppConfig {
                feed: args.feed.into_config(),
                scan: ScanConfig {
                    parallel: args.parallel,
                },
                output: OutputConfig {
                    format: args.output.output,
                    file: args.output.output_file,
                    fail_on_match: args.fail_on_match,
                },
            };
            let config = load_config(config_path, &overrides);
            let sources = CandidateSources {
                paths: args.paths,
                list_file: args.list,
                loaded: args.loaded,
            };
            cli::run_scan(&config, &sources)
        }

        Commands::Feed(args) => {
            let overrides = AppConfig {
                feed: args.feed.into_config(),
                output: OutputConfig {
                    format: args.output.output,
                    file: args.output.output_file,
                    fail_on_match: false,
                },
                ..AppConfig::default()
            };
            let config = load_config(config_path, &overrides);
            cli::run_feed(&config)
        }

        Commands::Resolve(args) => cli::run_resolve(&args.paths, args.hash),

        Commands::Config { schema, show } => {
            let view = if schema {
                ConfigView::Schema
            } else if show {
                ConfigView::Effective
            } else {
                ConfigView::Example
            };
            cli::run_config(view, config_path, &OutputTarget::Stdout)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "loldrivers-scan", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn load_config(config_path: Option<&std::path::Path>, overrides: &AppConfig) -> AppConfig {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(config_path, overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    config
}
