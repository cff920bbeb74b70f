//! Wayfinder CLI
//!
//! Command-line tools for identity provider routing.

#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use wayfinder_cli::cli::{Cli, Command};
use wayfinder_cli::commands::{cmd_check_domain, cmd_inspect_record, cmd_resolve};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "debug"
    } else {
        "warn,wayfinder=info,wayfinder_cli=info,wayfinder_idp=info,wayfinder_auth=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Resolve {
            tenant,
            email,
            client,
            json,
        } => {
            tracing::info!(tenant = %tenant.display(), "Resolving providers");
            let resolution = cmd_resolve(&tenant, client.as_deref(), &email)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else {
                print!("{resolution}");
            }
        }
        Command::CheckDomain { patterns, domain } => {
            let matched = cmd_check_domain(&patterns, &domain)?;
            println!("{}", if matched { "match" } else { "no match" });
            if !matched {
                std::process::exit(1);
            }
        }
        Command::InspectRecord { file, at } => {
            let report = cmd_inspect_record(&file, at)?;
            print!("{report}");
        }
    }

    Ok(())
}
