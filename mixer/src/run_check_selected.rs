use clap::Args;
use matrix_util::common_io::read_first_words;
use mixer::anndata::read_selected_genes;
use mixer::check_all_genes_selected;

#[derive(Args, Debug)]
pub struct CheckSelectedArgs {
    /// Gene names of the data, one per line (first word is used)
    #[arg(long, short = 'g', required = true)]
    genes: Box<str>,

    /// Selected genes, one per line
    #[arg(long, short = 's', required = true)]
    selected: Box<str>,

    /// verbosity
    #[arg(long, short)]
    verbose: bool,
}

pub fn run_check_selected(args: &CheckSelectedArgs) -> anyhow::Result<()> {
    if args.verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let var_names = read_first_words(&args.genes)?;
    let selected = read_selected_genes(&args.selected)?;

    let n_selected = check_all_genes_selected(&var_names, &selected)?;
    println!("selected\t{}", n_selected);
    Ok(())
}
