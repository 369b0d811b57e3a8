#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "enet: co-enrollment networks and centrality",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output (alias for `--format json`).
    #[arg(long, global = true)]
    json: bool,

    /// Output format. Defaults to pretty on a terminal, text when piped.
    #[arg(long, value_enum, global = true)]
    format: Option<OutputMode>,

    /// Registry data file (overrides ENROLLNET_DATA and enrollnet.toml).
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Project config file (default: ./enrollnet.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags, `FORMAT`, and the terminal.
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Registrations",
        about = "Register a student's courses",
        long_about = "Register a student with one or more courses, replacing any earlier registration, then recompute and cache centrality.",
        after_help = "EXAMPLES:\n    # Register a student\n    enet register C1234 \"SOCI 101\" PSYC210 \"ECON 101.002\"\n\n    # Emit machine-readable output\n    enet register C1234 \"PSYC 210\" --json"
    )]
    Register(cmd::register::RegisterArgs),

    #[command(
        next_help_heading = "Registrations",
        about = "Remove a student's registration",
        long_about = "Remove a student's registration and recompute cached centrality.",
        after_help = "EXAMPLES:\n    # Remove a student\n    enet remove C1234"
    )]
    Remove(cmd::remove::RemoveArgs),

    #[command(
        next_help_heading = "Registrations",
        about = "List registered students",
        after_help = "EXAMPLES:\n    # List as JSON\n    enet list --json"
    )]
    List,

    #[command(
        next_help_heading = "Registrations",
        about = "Show registry metadata",
        long_about = "Show when the registry last changed and how many students it holds.",
        after_help = "EXAMPLES:\n    # Poll for changes\n    enet status --json"
    )]
    Status,

    #[command(
        next_help_heading = "Analysis",
        about = "Show network overview and centrality",
        long_about = "Show whole-network counts and every node's centrality scores from the cache, recomputing when the cache is out of date.",
        after_help = "EXAMPLES:\n    # Cached scores\n    enet stats\n\n    # Recompute and rewrite the cache\n    enet stats --fresh --json"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Export a co-enrollment network",
        long_about = "Export every node of the student or course network and the links at or above a minimum weight.",
        after_help = "EXAMPLES:\n    # Student network, default threshold\n    enet network students --json\n\n    # Course network, every link\n    enet network courses --min-weight 1"
    )]
    Network(cmd::network::NetworkArgs),

    #[command(
        next_help_heading = "Analysis",
        about = "Show one node's centrality",
        after_help = "EXAMPLES:\n    # A student\n    enet centrality student C1234\n\n    # A course\n    enet centrality course \"PSYC 210\""
    )]
    Centrality(cmd::centrality::CentralityArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    enet completions bash > ~/.local/share/bash-completion/completions/enet"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("ENROLLNET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "enrollnet=debug,enet=debug,info"
        } else {
            "enrollnet=info,enet=info,warn"
        })
    });

    let format = env::var("ENROLLNET_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();

    if let Commands::Completions(args) = &cli.command {
        let mut command = Cli::command();
        return cmd::completions::run_completions(args.shell, &mut command);
    }

    let project_root = env::current_dir()?;
    let ctx = cmd::Context::load(
        &project_root,
        cli.config.as_deref(),
        cli.data.as_deref(),
        output,
    )?;
    debug!(?output, "context loaded");

    match &cli.command {
        Commands::Register(args) => cmd::register::run_register(args, &ctx),
        Commands::Remove(args) => cmd::remove::run_remove(args, &ctx),
        Commands::List => cmd::list::run_list(&ctx),
        Commands::Status => cmd::status::run_status(&ctx),
        Commands::Stats(args) => cmd::stats::run_stats(args, &ctx),
        Commands::Network(args) => cmd::network::run_network(args, &ctx),
        Commands::Centrality(args) => cmd::centrality::run_centrality(args, &ctx),
        Commands::Completions(_) => Ok(()),
    }
}
