use crate::cli::shared::AnnotateArgs;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "add gene_id and exon_number columns to an amplicon panel", long_about=None, rename_all = "kebab-case", help_template = crate::cli::shared::HELP_TEMPLATE)]
pub struct AnnotateCmdArgs {
    #[command(flatten)]
    pub annotate: AnnotateArgs,
}

pub fn annotate_command(args: AnnotateCmdArgs) -> Result<(), Box<dyn std::error::Error>> {
    let panel = ampannot::pipeline::annotate_panel(&args.annotate.options())?;
    log::info!(
        "added gene_id and exon_number columns to {}",
        panel.path.display()
    );
    Ok(())
}
