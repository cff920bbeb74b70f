//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// Wayfinder - identity provider routing tools
#[derive(Parser, Debug)]
#[command(name = "wayfinder")]
#[command(author, version, about = "Identity provider routing tools", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show which providers a login would be routed to
    Resolve {
        /// Tenant file describing providers and clients
        #[arg(short, long, env = "WAYFINDER_TENANT")]
        tenant: PathBuf,

        /// Email address entered on the login form
        #[arg(short, long)]
        email: String,

        /// Client the user is logging in to
        #[arg(short, long)]
        client: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Test a domain against wildcard patterns
    CheckDomain {
        /// Pattern to test against (repeatable)
        #[arg(short, long = "pattern", required = true)]
        patterns: Vec<String>,

        /// Domain to test
        #[arg(short, long)]
        domain: String,
    },

    /// Decode a persisted authentication record and report its validity
    InspectRecord {
        /// JSON file holding the record
        #[arg(short, long)]
        file: PathBuf,

        /// Evaluate validity at this RFC 3339 instant instead of now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{s}': {e}"))
}
