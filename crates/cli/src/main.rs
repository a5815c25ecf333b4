//! SDK Regen CLI
//!
//! Copyright 2025 Release Workshop Ltd
//! Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
//! See the LICENSE file in the project root for details.

mod commands;
mod error;
#[cfg(test)]
mod test_helpers;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use commands::{completion, list, regenerate, update_emitter};

/// SDK Regen CLI - Bulk regeneration of TypeSpec-generated SDK packages
#[derive(Parser)]
#[command(name = "sdkregen")]
#[command(about = "SDK Regen CLI - Bulk regeneration of TypeSpec-generated SDK packages", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate every discovered package and write a run report
    Regenerate {
        /// SDK repository root
        #[arg(long, default_value = ".")]
        sdk_root: String,
        /// Directory scanned for packages, relative to the SDK root
        #[arg(long, default_value = "sdk/resourcemanager")]
        service_dir: String,
        /// Generator repository checkout holding a packed archive (dev mode)
        #[arg(long)]
        generator_root: Option<String>,
        /// Generator branch the working branch is named after
        #[arg(long, default_value = "main")]
        generator_branch: String,
        /// Published generator version to pin instead of a local archive
        #[arg(long)]
        emitter_version: Option<String>,
        /// Pin every package to the latest upstream spec commit
        #[arg(long)]
        use_latest_spec: bool,
        /// Regex filter over package names, anchored at the start
        #[arg(long)]
        service_filter: Option<String>,
        /// Skip working-branch preparation
        #[arg(long)]
        no_branch: bool,
        /// Skip staging the results with git
        #[arg(long)]
        no_stage: bool,
        /// Report output path (defaults to the SDK root)
        #[arg(long)]
        report: Option<String>,
    },
    /// List the packages a regeneration run would process
    List {
        /// SDK repository root
        #[arg(long, default_value = ".")]
        sdk_root: String,
        /// Directory scanned for packages, relative to the SDK root
        #[arg(long, default_value = "sdk/resourcemanager")]
        service_dir: String,
        /// Regex filter over package names, anchored at the start
        #[arg(long)]
        service_filter: Option<String>,
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Pin the generator dependency in the emitter descriptor
    UpdateEmitter {
        /// SDK repository root
        #[arg(long, default_value = ".")]
        sdk_root: String,
        /// Generator repository checkout holding a packed archive (dev mode)
        #[arg(long)]
        generator_root: Option<String>,
        /// Published generator version to pin instead of a local archive
        #[arg(long)]
        emitter_version: Option<String>,
        /// Skip lock-file regeneration
        #[arg(long)]
        no_lock: bool,
    },
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}

/// CLI command structure, shared with the completion generator
pub fn get_cli_command() -> clap::Command {
    Cli::command()
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("SDKREGEN_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Regenerate {
            sdk_root,
            service_dir,
            generator_root,
            generator_branch,
            emitter_version,
            use_latest_spec,
            service_filter,
            no_branch,
            no_stage,
            report,
        } => {
            let opts = regenerate::Options {
                sdk_root,
                service_dir,
                generator_root,
                generator_branch,
                emitter_version,
                use_latest_spec,
                service_filter,
                no_branch,
                no_stage,
                report,
            };
            regenerate::run(&opts)
        }
        Commands::List {
            sdk_root,
            service_dir,
            service_filter,
            format,
        } => match list::OutputFormat::from_str(&format) {
            Some(format) => {
                let opts = list::Options {
                    sdk_root,
                    service_dir,
                    service_filter,
                    format,
                };
                list::run(&opts)
            }
            None => {
                eprintln!("✗ Unknown output format: {format} (expected table or json)");
                2
            }
        },
        Commands::UpdateEmitter {
            sdk_root,
            generator_root,
            emitter_version,
            no_lock,
        } => {
            let opts = update_emitter::Options {
                sdk_root,
                generator_root,
                emitter_version,
                no_lock,
            };
            update_emitter::run(&opts)
        }
        Commands::Completion { shell } => {
            let opts = completion::Options { shell };
            completion::run(&opts)
        }
    };

    std::process::exit(exit_code);
}
