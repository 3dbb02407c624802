pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "factory")]
#[command(about = "Factory CLI - inspect caller identity resolution")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Resolve the caller identity of a hand-built request, offline")]
    Resolve(commands::resolve::ResolveArgs),

    #[command(about = "Ask a running server who it thinks you are")]
    Whoami(commands::whoami::WhoamiArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Resolve(args) => commands::resolve::handle(args, output_format),
        Commands::Whoami(args) => commands::whoami::handle(args, output_format).await,
    }
}
