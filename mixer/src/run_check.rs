use clap::Args;
use log::info;
use mixer::config::load_params_file;
use mixer::{check_args, AnnotatedMatrix, GeneClustParams, SpatialImage};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// MatrixMarket data file, genes x cells (`.mtx` or `.mtx.gz`)
    #[arg(long, conflicts_with = "tsv", required_unless_present = "tsv")]
    mtx: Option<Box<str>>,

    /// Dense tab-separated data file, cells x genes
    #[arg(long)]
    tsv: Option<Box<str>>,

    /// Gene names, one per line (first word is used)
    #[arg(long, short = 'g', required = true)]
    genes: Box<str>,

    /// Cell barcodes for `--mtx`, one per line
    #[arg(long, short = 'c')]
    cells: Option<Box<str>>,

    /// Parameter file in JSON. It may embed an `image` as nested arrays.
    #[arg(long, short = 'p')]
    params: Option<Box<str>>,

    /// Single-channel histology image, tab-separated
    #[arg(long)]
    image: Option<Box<str>>,

    /// GeneClust version: fast or ps
    #[arg(long)]
    variant: Option<Box<str>>,

    /// Data modality: sc (single-cell) or st (spatial)
    #[arg(long)]
    modality: Option<Box<str>>,

    /// Number of gene clusters (GeneClust-fast)
    #[arg(long, allow_negative_numbers = true)]
    n_gene_clusters: Option<i64>,

    /// Number of cell/spot clusters (GeneClust-ps)
    #[arg(long, allow_negative_numbers = true)]
    n_obs_clusters: Option<i64>,

    /// Number of principal components
    #[arg(long, allow_negative_numbers = true)]
    n_components: Option<i64>,

    /// Percentage of relevant genes, in (0, 100]
    #[arg(long, allow_negative_numbers = true)]
    relevant_gene_pct: Option<i64>,

    /// Filter gene clusters after clustering
    #[arg(long)]
    post_hoc_filtering: Option<bool>,

    /// Spot layout: hexagon or square
    #[arg(long)]
    shape: Option<Box<str>>,

    /// Weight of the image in spatial clustering
    #[arg(long, allow_negative_numbers = true)]
    alpha: Option<f64>,

    /// Return intermediate results
    #[arg(long)]
    return_info: Option<bool>,

    /// Subset the data to the selected genes
    #[arg(long)]
    subset: Option<bool>,

    /// Maximum number of worker threads
    #[arg(long, allow_negative_numbers = true)]
    max_workers: Option<i64>,

    /// Random seed
    #[arg(long, allow_negative_numbers = true)]
    random_state: Option<i64>,

    /// Print the effective parameters as JSON
    #[arg(long)]
    print_params: bool,

    /// verbosity
    #[arg(long, short)]
    verbose: bool,
}

impl CheckArgs {
    /// Command-line flags take precedence over the parameter file
    fn apply_overrides(&self, params: &mut GeneClustParams) -> anyhow::Result<()> {
        if let Some(x) = self.variant.as_deref() {
            params.version = x.parse()?;
        }
        if let Some(x) = self.modality.as_deref() {
            params.modality = x.parse()?;
        }
        if let Some(x) = self.shape.as_deref() {
            params.shape = x.parse()?;
        }
        if let Some(x) = self.n_gene_clusters {
            params.n_gene_clusters = Some(x);
        }
        if let Some(x) = self.n_obs_clusters {
            params.n_obs_clusters = Some(x);
        }
        if let Some(x) = self.n_components {
            params.n_components = Some(x);
        }
        if let Some(x) = self.relevant_gene_pct {
            params.relevant_gene_pct = Some(x);
        }
        if let Some(x) = self.post_hoc_filtering {
            params.post_hoc_filtering = x;
        }
        if let Some(x) = self.alpha {
            params.alpha = x;
        }
        if let Some(x) = self.return_info {
            params.return_info = x;
        }
        if let Some(x) = self.subset {
            params.subset = x;
        }
        if let Some(x) = self.max_workers {
            params.max_workers = x;
        }
        if let Some(x) = self.random_state {
            params.random_state = x;
        }
        Ok(())
    }

    /// Defaults, then the `--params` file, then flags; an `--image`
    /// file replaces any image embedded in the parameter file
    fn effective_params(&self) -> anyhow::Result<(GeneClustParams, Option<SpatialImage>)> {
        let (mut params, mut image) = match self.params.as_deref() {
            Some(file) => load_params_file(file)?,
            None => (GeneClustParams::default(), None),
        };

        self.apply_overrides(&mut params)?;

        if let Some(file) = self.image.as_deref() {
            image = Some(SpatialImage::from_tsv(file)?);
        }

        Ok((params, image))
    }
}

pub fn run_check(args: &CheckArgs) -> anyhow::Result<()> {
    if args.verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let (params, image) = args.effective_params()?;

    if args.print_params {
        println!("{}", serde_json::to_string_pretty(&params.to_json())?);
    }

    let adata = match (args.mtx.as_deref(), args.tsv.as_deref()) {
        (Some(mtx), _) => AnnotatedMatrix::from_mtx(mtx, &args.genes, args.cells.as_deref())?,
        (None, Some(tsv)) => AnnotatedMatrix::from_tsv(tsv, &args.genes)?,
        (None, None) => return Err(anyhow::anyhow!("need either --mtx or --tsv")),
    };

    info!(
        "Checking GeneClust-{} on {} data: {} x {}",
        params.version,
        params.modality,
        adata.n_obs(),
        adata.n_vars()
    );

    let report = check_args(&adata, image.as_ref(), &params)?;

    println!("do_norm\t{}", report.do_norm);
    for w in report.warnings.iter() {
        println!("warning\t{}", w);
    }

    Ok(())
}
