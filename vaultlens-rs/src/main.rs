//! vaultlens CLI entry point.

use clap::Parser;
use std::process::ExitCode;
use vaultlens::cli::args::{Cli, Commands};
use vaultlens::cli::output::Output;
use vaultlens::cli::{conflicts, duplicates, inbox, links, quality, stats, trends};
use vaultlens::config::Config;
use vaultlens::error::{ExitCode as VaultExitCode, VaultError};
use vaultlens::logging;
use vaultlens::vault::Vault;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    match run(&cli) {
        Ok(code) => ExitCode::from(code.code() as u8),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<VaultExitCode, VaultError> {
    let config = Config::load()?;

    let vault_path = config.resolve_vault_path(cli.vault.as_deref())?;
    let vault = Vault::new(vault_path)?;
    tracing::info!(vault = %vault.root.display(), "opened vault");

    let output = Output::new(cli.output_format(), cli.quiet);

    match &cli.command {
        Commands::Stats => stats::stats(&vault, &output),
        Commands::Health(args) => stats::health(&vault, args.fail_below, &output),
        Commands::Fields(args) => stats::fields(&vault, &args.field, &output),
        Commands::Duplicates(args) => duplicates::duplicates(&vault, &args.field, &output),
        Commands::ContentDuplicates(args) => {
            duplicates::content_duplicates(&vault, args.mode, &output)
        }
        Commands::Links(args) => links::links(&vault, args.limit, &output),
        Commands::Quality(args) => {
            let limit = if args.all {
                None
            } else {
                Some(args.limit.unwrap_or(config.quality.limit))
            };
            quality::quality(&vault, limit, &output)
        }
        Commands::Trends(args) => trends::trends(
            &vault,
            args.timespan.as_deref(),
            args.granularity.as_deref(),
            &config.trends,
            &output,
        ),
        Commands::Conflicts => conflicts::conflicts(&vault, &output),
        Commands::Copies => conflicts::copies(&vault, &output),
        Commands::Inbox(args) => {
            let options = inbox::inbox_options(&args.headings, args.min_items, &config.inbox);
            inbox::inbox(&vault, &options, &output)
        }
    }
}
