use crate::cli::enrich::run_enrichment;
use crate::cli::shared::{AnnotateArgs, EnrichArgs};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "annotate a panel then look up the genes it hits", long_about=None, rename_all = "kebab-case", help_template = crate::cli::shared::HELP_TEMPLATE)]
pub struct FullCmdArgs {
    #[command(flatten)]
    pub annotate: AnnotateArgs,

    #[command(flatten)]
    pub enrich: EnrichArgs,
}

pub fn full_command(args: FullCmdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let panel = ampannot::pipeline::annotate_panel(&args.annotate.options())?;
    log::info!(
        "added gene_id and exon_number columns to {}",
        panel.path.display()
    );
    run_enrichment(&args.enrich, &panel.rows)
}
