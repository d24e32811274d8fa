//! CLI for the RAG chat gateway

pub mod serve;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rag-chat-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the chat API server
    Serve,
}
