mod run_check;
mod run_check_selected;

use clap::{Parser, Subcommand};
use log::info;
use run_check::*;
use run_check_selected::*;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "MIXER",
    long_about = "Check data and parameters before GeneClust gene clustering.\n\
		  Data files in `.mtx` (genes x cells, 10x convention) or\n\
		  dense `.tsv` (cells x genes) format, either gzipped or not."
)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Check GeneClust parameters against the input data",
        long_about = "Validate a GeneClust configuration in three steps: \n\
		      (1) Check the worker limit against the available CPUs\n\
		      (2) Check whether the data matrix holds raw counts\n\
		      (3) Check the clustering parameters of the chosen version.\n\
		      Parameters come from defaults, a `--params` JSON file,\n\
		      and command-line flags, in increasing priority."
    )]
    Check(CheckArgs),

    #[command(
        about = "Check that all selected genes exist in the data",
        visible_alias = "selected"
    )]
    CheckSelected(CheckSelectedArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.commands {
        Commands::Check(args) => {
            run_check(args)?;
        }
        Commands::CheckSelected(args) => {
            run_check_selected(args)?;
        }
    }

    info!("Done");
    Ok(())
}
