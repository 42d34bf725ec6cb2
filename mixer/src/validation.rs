use crate::anndata::{AnnotatedMatrix, SpatialImage};
use crate::common::*;
use crate::error::MixerError;
use crate::params::{GeneClustParams, Modality, Version};
use fnv::FnvHashSet as HashSet;
use matrix_util::traits::IntegralOps;
use std::fmt;

/// How far a value may sit from the nearest integer and still count as
/// a raw count.
///
/// `x` is held as `f32`, so a value read from 64-bit input within about
/// 6e-8 of an integer is already rounded onto it when loaded and counts
/// as raw.
pub const RAW_COUNT_TOLERANCE: f32 = 1e-8;

/// Anomalies that do not stop a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationWarning {
    /// `x` does not look like raw counts, so it is used as is
    NormalizedCounts,
    /// spatial data without a histology image
    MissingSpatialImage,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::NormalizedCounts => write!(
                f,
                "Will directly use the possible normalized counts found in `adata.X`."
            ),
            ValidationWarning::MissingSpatialImage => write!(
                f,
                "No available image. This could reduce the accuracy of SpaGCN."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgsReport {
    /// `x` holds raw counts and still needs normalization
    pub do_norm: bool,
    pub warnings: Vec<ValidationWarning>,
}

/// Check all parameters and the input data of a GeneClust run.
///
/// `version`, `modality` and `shape` are valid by construction (see
/// `FromStr` on each), so the checks here start from the numeric
/// parameters. The first violation is returned.
///
/// # Arguments
/// * `adata` - cells/spots x genes data
/// * `img` - histology image for spatial data
/// * `params` - run configuration
///
/// # Returns
/// * `ArgsReport` - whether to normalize, and the warnings raised
pub fn check_args(
    adata: &AnnotatedMatrix,
    img: Option<&SpatialImage>,
    params: &GeneClustParams,
) -> Result<ArgsReport, MixerError> {
    check_max_workers(params.max_workers, num_cpus::get())?;

    let mut warnings = vec![];

    let do_norm = check_raw_counts(adata);
    if !do_norm {
        warnings.push(ValidationWarning::NormalizedCounts);
    }

    warnings.extend(check_gene_clustering(img, params)?);

    Ok(ArgsReport { do_norm, warnings })
}

/// `max_workers` must be in `[1, max_available]`
pub fn check_max_workers(max_workers: i64, max_available: usize) -> Result<(), MixerError> {
    if max_workers < 1 {
        return Err(MixerError::invalid_value(
            "max_workers",
            "to be a positive integer",
            max_workers,
        ));
    }
    if max_workers as u64 > max_available as u64 {
        return Err(MixerError::WorkerLimitExceeded {
            max: max_available,
            got: max_workers,
        });
    }
    Ok(())
}

/// Whether `adata.x` contains raw counts, i.e., every value is an
/// integer up to [`RAW_COUNT_TOLERANCE`]. Logs a warning if not.
///
/// The distance is taken to the nearest integer, so values just below
/// one (`2.9999999`, `-1e-9`) count as raw.
pub fn check_raw_counts(adata: &AnnotatedMatrix) -> bool {
    let x = adata.x();
    if x.is_integral(RAW_COUNT_TOLERANCE) {
        return true;
    }

    info!(
        "{} non-integral values in a {} x {} matrix",
        x.count_non_integral(RAW_COUNT_TOLERANCE),
        x.nrows(),
        x.ncols()
    );
    warn!("{}", ValidationWarning::NormalizedCounts);
    false
}

/// Check the parameters used in gene clustering.
///
/// GeneClust-fast needs `n_gene_clusters` and only runs on
/// single-cell data. GeneClust-ps must not be given
/// `n_gene_clusters`; it needs `n_obs_clusters`, `n_components`,
/// `relevant_gene_pct` and a positive `alpha`, and takes an optional
/// image for spatial data.
pub fn check_gene_clustering(
    img: Option<&SpatialImage>,
    params: &GeneClustParams,
) -> Result<Vec<ValidationWarning>, MixerError> {
    let mut warnings = vec![];

    match params.version {
        Version::Fast => {
            let n_gene_clusters = require_int("n_gene_clusters", params.n_gene_clusters)?;
            if n_gene_clusters <= 1 {
                return Err(MixerError::invalid_value(
                    "n_gene_clusters",
                    "> 1",
                    n_gene_clusters,
                ));
            }

            if params.modality == Modality::St {
                return Err(MixerError::FastSpatialUnsupported);
            }
        }
        Version::Ps => {
            if let Some(n) = params.n_gene_clusters {
                return Err(MixerError::wrong_type("n_gene_clusters", "None", n));
            }

            if params.modality == Modality::St && img.is_none() {
                warn!("{}", ValidationWarning::MissingSpatialImage);
                warnings.push(ValidationWarning::MissingSpatialImage);
            }

            if params.alpha.is_nan() || params.alpha <= 0.0 {
                return Err(MixerError::invalid_value("alpha", "> 0", params.alpha));
            }

            let n_obs_clusters = require_int("n_obs_clusters", params.n_obs_clusters)?;
            if n_obs_clusters <= 1 {
                return Err(MixerError::invalid_value(
                    "n_obs_clusters",
                    "> 1",
                    n_obs_clusters,
                ));
            }

            let n_components = require_int("n_components", params.n_components)?;
            if n_components <= 1 {
                return Err(MixerError::invalid_value(
                    "n_components",
                    "> 1",
                    n_components,
                ));
            }

            let pct = require_int("relevant_gene_pct", params.relevant_gene_pct)?;
            if pct <= 0 || pct > 100 {
                return Err(MixerError::invalid_value(
                    "relevant_gene_pct",
                    "between (0, 100]",
                    pct,
                ));
            }
        }
    }

    Ok(warnings)
}

fn require_int(name: &'static str, value: Option<i64>) -> Result<i64, MixerError> {
    value.ok_or_else(|| MixerError::wrong_type(name, "an integer", "None"))
}

/// Check whether all selected genes are found in `var_names`.
///
/// Counts the genes of `var_names` that are among `selected_genes`;
/// the count must equal the number of selected genes.
///
/// # Returns
/// * number of selected genes
pub fn check_all_genes_selected<S, T>(
    var_names: &[S],
    selected_genes: &[T],
) -> Result<usize, MixerError>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let selected: HashSet<&str> = selected_genes.iter().map(|x| x.as_ref()).collect();

    let n_selected_genes = var_names
        .iter()
        .filter(|x| selected.contains(x.as_ref()))
        .count();

    if n_selected_genes != selected_genes.len() {
        return Err(MixerError::SelectionMismatch {
            found: n_selected_genes,
            expected: selected_genes.len(),
        });
    }

    info!("Selected {} genes.", n_selected_genes);
    Ok(n_selected_genes)
}
