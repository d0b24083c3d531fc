mod api;
mod auth;
mod cli;
mod commands;
mod config;
mod models;
mod output;
mod platform;
mod session;

use anyhow::Result;
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::context::RunContext;
use commands::Services;
use config::Config;

fn main() -> Result<()> {
    setup_broken_pipe_handling();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = RunContext::from_args(cli.json, cli.no_color, cli.utc)?;
    let config = Config::resolve(cli.api_url.as_deref())?;
    let services = Services::connect(&config)?;

    match &cli.command {
        // === Session Commands ===
        Commands::Login { email, password } => {
            commands::session::login(&services, email, password.as_deref(), &ctx)?;
        }
        Commands::Logout => commands::session::logout(&services, &ctx)?,
        Commands::Check => commands::session::check(&services, &ctx)?,
        Commands::Whoami => commands::session::whoami(&services, &ctx)?,

        // === Resource Commands ===
        Commands::Companies { action } => commands::companies::run(&services, action, &ctx)?,
        Commands::Tasks { action } => commands::tasks::run(&services, action, &ctx)?,
        Commands::Users { action } => commands::users::run(&services, action, &ctx)?,
        Commands::Query {
            document,
            variables,
        } => commands::query::run(&services, document, variables.as_deref())?,
    }

    Ok(())
}

/// Initialize logging based on the `--verbose` flag or `CRMC_LOG` env var.
///
/// - `CRMC_LOG` env var: full filter control (e.g. `CRMC_LOG=crmc::api=trace`)
/// - `--verbose`: sets `crmc` crate to `Debug` level
/// - Otherwise: `Warn` level only (effectively silent)
fn init_logging(verbose: bool) {
    let env_var = std::env::var("CRMC_LOG").ok();

    let mut builder = env_logger::Builder::new();
    builder.format_target(true);
    builder.format_module_path(false);

    if let Some(ref filter) = env_var {
        builder.parse_filters(filter);
    } else if verbose {
        builder.filter_module("crmc", log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Warn);
    }

    builder.init();
}

/// Handle broken pipe gracefully instead of panicking.
///
/// When output is piped to a process that exits early (e.g., `crmc tasks list --json | head -1`),
/// Rust's `println!` panics because the runtime sets SIGPIPE to SIG_IGN. This function:
/// - On Unix: resets SIGPIPE to default behavior so the OS terminates the process cleanly
/// - On all platforms: installs a panic hook that exits silently on stdout pipe failures
fn setup_broken_pipe_handling() {
    #[cfg(unix)]
    unsafe {
        // SIGPIPE = 13, SIG_DFL = 0 (POSIX constants, stable across all Unix platforms)
        unsafe extern "C" {
            fn signal(sig: i32, handler: usize) -> usize;
        }
        signal(13, 0);
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info
            .payload()
            .downcast_ref::<String>()
            .map(|s| s.as_str())
            .or_else(|| info.payload().downcast_ref::<&str>().copied())
            .unwrap_or("");

        if msg.contains("failed printing to stdout") {
            std::process::exit(0);
        }

        default_hook(info);
    }));
}
