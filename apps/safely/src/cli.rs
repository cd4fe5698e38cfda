//! Command line interface definition

use clap::{Args, Parser, Subcommand};
use safely_types::ExistingOutput;
use std::path::PathBuf;

/// safely - download and decrypt SendSafely packages
#[derive(Parser)]
#[command(name = "safely")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Download and decrypt files shared through SendSafely packages")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Args)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Write debug logs to the safely log directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH", env = "SAFELY_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the account the configured API key belongs to
    Whoami,

    /// Show the sender and numbered file list of a shared package
    Info(InfoArgs),

    /// Download and decrypt the files of a shared package
    #[command(alias = "dl")]
    Download(DownloadArgs),
}

#[derive(Args)]
pub struct InfoArgs {
    /// Share link, including the `#keyCode=` fragment
    #[arg(short, long)]
    pub url: String,
}

#[derive(Args)]
pub struct DownloadArgs {
    /// Share link, including the `#keyCode=` fragment
    #[arg(short, long)]
    pub url: String,

    /// Index of a file to download (repeatable; default: all files)
    #[arg(short, long = "file", value_name = "N")]
    pub files: Vec<usize>,

    /// Directory to write files into
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Replace files that already exist
    #[arg(long, conflicts_with = "append")]
    pub overwrite: bool,

    /// Append to files that already exist
    #[arg(long)]
    pub append: bool,
}

impl DownloadArgs {
    /// Output policy requested on the command line, if any
    pub fn existing_output(&self) -> Option<ExistingOutput> {
        if self.overwrite {
            Some(ExistingOutput::Truncate)
        } else if self.append {
            Some(ExistingOutput::Append)
        } else {
            None
        }
    }
}
