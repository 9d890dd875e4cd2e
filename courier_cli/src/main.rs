use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{allocate::AllocateArgs, generate::GenerateSubcommands, matrix::MatrixArgs};

mod allocate;
mod file_utils;
mod generate;
mod matrix;
mod oracle;
mod parsers;
mod report;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate stops to the fleet, one vehicle class after the other
    #[command(visible_alias = "a")]
    Allocate {
        #[command(flatten)]
        args: AllocateArgs,
    },
    /// Print the travel-time matrix of a plan for one profile
    Matrix {
        #[command(flatten)]
        args: MatrixArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Allocate { args }) => allocate::run(args).await?,
        Some(Commands::Matrix { args }) => matrix::run(args).await?,
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => {}
    }

    Ok(())
}
