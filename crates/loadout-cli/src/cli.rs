use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "loadout",
    about = "Loadout preset vault: content-addressed, shareable loadout presets",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Client configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the save endpoint host
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Where stored presets are read from: a URL or a local directory
    #[arg(long, global = true)]
    pub storage_root: Option<String>,

    /// Directory of the local preset cache
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Save a preset file and print its shareable id
    Save(SaveArgs),
    /// Resolve a preset id (local cache, then store)
    Load(LoadArgs),
    /// List recently saved or opened presets
    Recent(RecentArgs),
    /// Remove a preset from the recent list and local cache
    Forget(ForgetArgs),
    /// Print the normalized form of a preset file
    Normalize(NormalizeArgs),
    /// Compute a preset's id without saving it
    Id(IdArgs),
    /// Run the preset server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct SaveArgs {
    /// Preset JSON file, or `-` for stdin
    pub file: String,
}

#[derive(Args)]
pub struct LoadArgs {
    pub id: String,
    /// Write the preset JSON to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct RecentArgs {
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct ForgetArgs {
    pub id: String,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Preset JSON file, or `-` for stdin
    pub file: String,
}

#[derive(Args)]
pub struct IdArgs {
    /// Preset JSON file, or `-` for stdin
    pub file: String,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Server configuration file (TOML)
    #[arg(long)]
    pub server_config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<String>,
    /// Directory that holds `presets/<id>.json`
    #[arg(long)]
    pub root: Option<PathBuf>,
    #[arg(long)]
    pub max_body_bytes: Option<usize>,
    /// Disable permissive CORS headers
    #[arg(long)]
    pub no_cors: bool,
}
