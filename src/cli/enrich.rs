use crate::cli::shared::EnrichArgs;
use ampannot::enrich::UniprotClient;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "look up protein names and diseases for the genes of an annotated panel", long_about=None, rename_all = "kebab-case", help_template = crate::cli::shared::HELP_TEMPLATE, arg_required_else_help = true)]
pub struct EnrichCmdArgs {
    #[arg(help = "annotated panel written by `ampannot annotate`", short = 'i', long = "input")]
    pub input: PathBuf,

    #[command(flatten)]
    pub enrich: EnrichArgs,
}

pub fn enrich_command(args: EnrichCmdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (_, rows) = ampannot::bed::read_annotated(&args.input)?;
    run_enrichment(&args.enrich, &rows)
}

pub(crate) fn run_enrichment(
    args: &EnrichArgs,
    rows: &[ampannot::interval::AnnotatedInterval],
) -> Result<(), Box<dyn std::error::Error>> {
    let client = UniprotClient::new(&args.uniprot_url)?;
    let records =
        ampannot::pipeline::enrich_panel(&client, rows, &args.enrichment_artifact_path)?;
    log::info!(
        "wrote {} proteins to {}",
        records.len(),
        args.enrichment_artifact_path.display()
    );
    Ok(())
}
