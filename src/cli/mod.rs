//! Command-line interface for the delphi binary.
//!
//! Uses clap for argument parsing and owo-colors for colored terminal
//! output.

pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Delphi - a terminal chatbot with function calling and RAG
#[derive(Parser, Debug)]
#[command(
    name = "delphi",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "Delphi - a terminal chatbot with function calling and RAG",
    long_about = "A terminal chatbot in two flavors: 'chat' answers questions by calling\n\
                  live market and weather APIs, 'rag' ingests a document into a vector\n\
                  index and answers questions against it.",
    after_help = "EXAMPLES:\n    \
                  delphi chat                   # Function-calling chat (market + weather tools)\n    \
                  delphi rag ./handbook.txt     # Ingest a document, then chat against it\n\n\
                  Configuration is read from the environment (and .env): GEMINI_API_KEY is\n\
                  always required; 'chat' needs NINJA_API_KEY and WEATHER_API_KEY; 'rag'\n\
                  uses PINECONE_API_KEY/PINECONE_INDEX_HOST when set, else an in-memory index."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with live data tools (crypto price, stock price, weather)
    Chat,

    /// Ingest a document into the vector index, then chat against it
    Rag {
        /// Path to the source document (.txt, .md, or .pdf with the 'pdf' feature)
        document: PathBuf,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chat_command() {
        let cli = Cli::try_parse_from(["delphi", "chat"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat));
        assert!(!cli.no_color);
    }

    #[test]
    fn test_parse_rag_command_with_document() {
        let cli = Cli::try_parse_from(["delphi", "--no-color", "rag", "notes.md"]).unwrap();
        assert!(cli.no_color);
        match cli.command {
            Commands::Rag { document } => assert_eq!(document, PathBuf::from("notes.md")),
            _ => panic!("expected rag command"),
        }
    }

    #[test]
    fn test_rag_requires_document() {
        assert!(Cli::try_parse_from(["delphi", "rag"]).is_err());
    }
}
