extern crate ampannot;
mod cli;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand};
use cli::annotate::{annotate_command, AnnotateCmdArgs};
use cli::enrich::{enrich_command, EnrichCmdArgs};
use cli::full::{full_command, FullCmdArgs};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "annotate amplicon panels with the gene and exon they overlap", long_about=None, rename_all = "kebab-case", help_template = cli::shared::HELP_TEMPLATE)]
struct Cli {
    #[arg(
        help = "log debug messages",
        short = 'v',
        long = "verbose",
        env = "DEBUG",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        global = true
    )]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// add gene_id and exon_number columns to an amplicon panel
    Annotate(AnnotateCmdArgs),
    /// look up protein names and diseases for the genes of an annotated panel
    Enrich(EnrichCmdArgs),
    /// annotate a panel then look up the genes it hits
    Full(FullCmdArgs),
}

#[cfg(feature = "mimalloc_allocator")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("ampannot={}", level)),
    )
    .init();

    let result = match cli.command {
        Commands::Annotate(args) => annotate_command(args),
        Commands::Enrich(args) => enrich_command(args),
        Commands::Full(args) => full_command(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
