use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "plexletter")]
#[command(author, version, about = "Newsletter composer for a personal Plex server")]
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
    /// Start the composition server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Search TMDB for movies and TV shows
    Search {
        /// Title to search for
        #[arg(required = true)]
        query: String,
    },

    /// Generate newsletter HTML from a JSON payload
    Generate {
        /// Payload file in the same shape as the POST /generate body
        #[arg(required = true)]
        payload: PathBuf,

        /// Write HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip CSS inlining
        #[arg(long)]
        raw: bool,
    },

    /// Send an HTML file as the newsletter email
    Send {
        /// Recipient address (repeatable)
        #[arg(long = "to", required = true)]
        to: Vec<String>,

        /// Subject line
        #[arg(short, long)]
        subject: String,

        /// HTML body file
        #[arg(required = true)]
        html: PathBuf,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
