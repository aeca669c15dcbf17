//! Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use courtside_types::GenderFilter;

#[derive(Debug, Parser)]
#[command(
    name = "courtside",
    version,
    about = "Preview club bill settlements and organize brackets from JSON files"
)]
pub struct Cli {
    /// Club configuration JSON. Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Pretty-print the JSON written to stdout.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Settle a court bill draft against a catalog snapshot.
    Settle(SettleArgs),
    /// Settle a party bill draft.
    Party(PartyArgs),
    /// Split a player list into level-balanced groups.
    Organize(OrganizeArgs),
}

#[derive(Debug, Args)]
pub struct SettleArgs {
    /// Catalog snapshot: players, menu items, shuttle types, ratio policies.
    #[arg(long)]
    pub catalog: PathBuf,
    /// Court bill draft.
    #[arg(long)]
    pub draft: PathBuf,
}

#[derive(Debug, Args)]
pub struct PartyArgs {
    /// Party bill draft.
    #[arg(long)]
    pub draft: PathBuf,
    /// Catalog snapshot used to check linked players.
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct OrganizeArgs {
    /// JSON array of players.
    #[arg(long)]
    pub players: PathBuf,
    /// Number of groups.
    #[arg(long, short = 'g')]
    pub groups: u32,
    #[arg(long, value_enum, default_value_t = FilterArg::All)]
    pub filter: FilterArg,
    /// Replay a previous run. A fresh seed is drawn when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    MaleOnly,
    FemaleOnly,
}

impl From<FilterArg> for GenderFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Self::All,
            FilterArg::MaleOnly => Self::MaleOnly,
            FilterArg::FemaleOnly => Self::FemaleOnly,
        }
    }
}
