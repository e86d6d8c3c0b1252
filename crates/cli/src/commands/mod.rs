//! Command implementations for the Quorum CLI

mod deshard;
mod info;
mod recover;
mod shard;
mod split;

pub use deshard::DeshardCommand;
pub use info::InfoCommand;
pub use recover::RecoverCommand;
pub use shard::ShardCommand;
pub use split::SplitCommand;

use crate::config::Config;
use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Split a decimal secret into shares
    Split(SplitCommand),

    /// Recover a decimal secret from a share file
    Recover(RecoverCommand),

    /// Split a file (such as a private key) into shares
    Shard(ShardCommand),

    /// Rebuild a file from its shares
    Deshard(DeshardCommand),

    /// Display information about a share file
    Info(InfoCommand),
}

impl Commands {
    pub fn execute(&self, config: &Config) -> Result<()> {
        match self {
            Commands::Split(cmd) => cmd.execute(config),
            Commands::Recover(cmd) => cmd.execute(config),
            Commands::Shard(cmd) => cmd.execute(config),
            Commands::Deshard(cmd) => cmd.execute(config),
            Commands::Info(cmd) => cmd.execute(config),
        }
    }
}
