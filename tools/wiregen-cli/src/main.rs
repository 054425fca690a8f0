mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{generate::GenerateArgs, plan::PlanArgs};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wiregen", about = "Generate Rust decoders from message schemas")]
struct Cli {
    /// Log compiled units and skipped files (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every schema in the input directories
    Generate(GenerateArgs),
    /// Print the decode plan (or generated source) for one schema
    Plan(PlanArgs),
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate(args) => args.run(),
        Commands::Plan(args) => args.run(),
    }
}
