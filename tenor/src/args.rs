use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tenor chat gateway
#[derive(Debug, Parser)]
#[command(name = "tenor", about = "Chat with Ollama, OpenAI, Gemini or Grok through one interface")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "tenor.toml", env = "TENOR_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one prompt and print the normalized response
    Chat {
        /// User message
        prompt: String,

        /// System message sent ahead of the prompt
        #[arg(short, long)]
        system: Option<String>,

        /// JSON schema file the reply must follow
        #[arg(long)]
        json_schema: Option<PathBuf>,
    },

    /// Analyze the intentions behind a post
    Analyze {
        /// Post text, read from stdin when omitted
        text: Option<String>,
    },
}
