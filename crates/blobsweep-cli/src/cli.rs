use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "blobsweep",
    version,
    about = "Scheduled blob container cleanup agent"
)]
pub struct Cli {
    /// Config file path (TOML / YAML / JSON)
    #[arg(long, default_value = "blobsweep.toml")]
    pub config: PathBuf,

    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum Commands {
    /// Run every cleaner once and print the run status
    RunOnce {
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the agent on the configured interval until Ctrl+C / SIGTERM
    Serve,
    /// List registered cleaners in execution order
    List,
}
