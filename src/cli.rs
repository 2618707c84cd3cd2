use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tubeask")]
#[command(about = "Ask anything about any YouTube video from your terminal")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a video's transcript and answer one question about it
    Ask {
        /// YouTube video URL
        url: String,

        /// Question to ask about the video
        question: String,

        /// Model identifier (overrides TUBEASK_MODEL)
        #[arg(short, long)]
        model: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a video's transcript and print a short summary
    Summarize {
        /// YouTube video URL
        url: String,

        /// Model identifier (overrides TUBEASK_MODEL)
        #[arg(short, long)]
        model: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open the interactive chat interface
    Tui,
}
