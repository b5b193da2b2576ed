//! CLI module for transcript-qa.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// transcript-qa - ask questions about YouTube videos
///
/// Uploads video transcripts into a vector store and answers questions
/// using only what those transcripts say.
#[derive(Parser, Debug)]
#[command(name = "transcript-qa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },

    /// Fetch a video's transcript and index it
    Upload {
        /// YouTube URL or video ID
        video: String,
    },

    /// Ask a question about the uploaded transcripts
    Ask {
        /// The question to ask
        question: String,
    },

    /// Show vector store statistics
    Stats,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
