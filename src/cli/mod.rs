// CLI module for server startup and database seeding

pub mod seed;

use clap::{Parser, Subcommand};

pub use seed::{SeedReport, SeedSettings, seed_database};

/// Locations backend
#[derive(Parser, Debug)]
#[command(name = "locations_backend")]
#[command(about = "Identity and access control for the location registry", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default); seeds an empty database first
    Serve,

    /// Create the default roles, the seed admin and sample locations
    Seed,
}

impl Cli {
    /// The subcommand to run, `serve` when none was given
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}
