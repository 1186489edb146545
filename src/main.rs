use clap::{Parser, Subcommand};
use goup::core::error_help::format_error_with_help;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "goup")]
#[command(about = "Upgrade the local Go toolchain to the latest release")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show whether a newer Go release is available
    Check {
        /// Consider betas and release candidates
        #[arg(short, long, env = "GOUP_UNSTABLE")]
        unstable: bool,
        /// Installation directory whose `bin/go` is probed
        #[arg(long, env = "GOROOT")]
        goroot: Option<PathBuf>,
    },
    /// List releases available for this platform, newest first
    List {
        /// Include betas and release candidates
        #[arg(short, long, env = "GOUP_UNSTABLE")]
        unstable: bool,
        /// Installation directory whose `bin/go` is probed
        #[arg(long, env = "GOROOT")]
        goroot: Option<PathBuf>,
    },
    /// Download the newest release and install it into GOROOT
    Upgrade {
        /// Consider betas and release candidates
        #[arg(short, long, env = "GOUP_UNSTABLE")]
        unstable: bool,
        /// Stage the new toolchain without replacing GOROOT
        #[arg(long, env = "GOUP_DRYRUN", conflicts_with = "apply")]
        dry_run: bool,
        /// Replace GOROOT even if the config asks for a dry run
        #[arg(long)]
        apply: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
        /// Installation directory (defaults to `go env GOROOT`)
        #[arg(long, env = "GOROOT")]
        goroot: Option<PathBuf>,
    },
    /// Manage the goup config file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { unstable, goroot } => cli::check::run(unstable, goroot).await,
        Commands::List { unstable, goroot } => cli::list::run(unstable, goroot).await,
        Commands::Upgrade {
            unstable,
            dry_run,
            apply,
            yes,
            goroot,
        } => {
            cli::upgrade::run(cli::upgrade::UpgradeArgs {
                unstable,
                dry_run,
                apply,
                yes,
                goroot,
            })
            .await
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cli::config::show(),
            ConfigCommands::Init { force } => cli::config::init(force),
            ConfigCommands::Path => cli::config::path(),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_no_upgrade() => {
            // Already on the latest release
            println!("Go is already up to date.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("\n{}", format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
