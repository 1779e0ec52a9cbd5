use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidasset")]
#[command(author, version, about = "Track metadata of media files processed by video providers")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the asset record for a file or URL
    Get {
        /// Local path or remote URL of the media file
        #[arg(required = true)]
        file: String,
    },

    /// Create a new asset record
    Create {
        /// Local path or remote URL of the media file
        #[arg(required = true)]
        file: String,

        /// Initial status (defaults to pending)
        #[arg(long)]
        status: Option<String>,
    },

    /// Deep-merge a JSON patch into an asset record
    Update {
        /// Local path or remote URL of the media file
        #[arg(required = true)]
        file: String,

        /// JSON object to merge into the record
        #[arg(long, required = true)]
        patch: String,
    },

    /// Print the storage key of the asset record for a file or URL
    Key {
        /// Local path or remote URL of the media file
        #[arg(required = true)]
        file: String,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
