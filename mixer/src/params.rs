use crate::error::MixerError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_N_COMPONENTS: i64 = 10;
pub const DEFAULT_RELEVANT_GENE_PCT: i64 = 20;
pub const DEFAULT_ALPHA: f64 = 0.9;
pub const DEFAULT_RANDOM_STATE: i64 = 0;

/// Which GeneClust algorithm to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    /// cluster genes directly into a fixed number of groups
    Fast,
    /// pseudo-supervised: cluster cells first, then score genes
    Ps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// single-cell
    Sc,
    /// spatial transcriptomics
    St,
}

/// Spot layout of a spatial slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Hexagon,
    Square,
}

impl FromStr for Version {
    type Err = MixerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fast" => Ok(Version::Fast),
            "ps" => Ok(Version::Ps),
            _ => Err(MixerError::invalid_value("version", "in {'fast', 'ps'}", s)),
        }
    }
}

impl FromStr for Modality {
    type Err = MixerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sc" => Ok(Modality::Sc),
            "st" => Ok(Modality::St),
            _ => Err(MixerError::invalid_value("modality", "in {'sc', 'st'}", s)),
        }
    }
}

impl FromStr for Shape {
    type Err = MixerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hexagon" => Ok(Shape::Hexagon),
            "square" => Ok(Shape::Square),
            _ => Err(MixerError::invalid_value(
                "shape",
                "in {'hexagon', 'square'}",
                s,
            )),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Fast => write!(f, "fast"),
            Version::Ps => write!(f, "ps"),
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modality::Sc => write!(f, "sc"),
            Modality::St => write!(f, "st"),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Hexagon => write!(f, "hexagon"),
            Shape::Square => write!(f, "square"),
        }
    }
}

/// Everything a GeneClust run is configured with.
///
/// Integer parameters are kept signed so that out-of-range input
/// (e.g., a negative percentage) reaches the validator instead of
/// failing at conversion. `None` stands for "not given".
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneClustParams {
    pub version: Version,
    pub modality: Modality,
    /// number of gene clusters; GeneClust-fast only
    pub n_gene_clusters: Option<i64>,
    /// number of cell/spot clusters; GeneClust-ps only
    pub n_obs_clusters: Option<i64>,
    /// number of principal components
    pub n_components: Option<i64>,
    /// percentage of genes kept as relevant, in (0, 100]
    pub relevant_gene_pct: Option<i64>,
    pub post_hoc_filtering: bool,
    pub shape: Shape,
    /// weight of the image in spatial clustering
    pub alpha: f64,
    pub return_info: bool,
    pub subset: bool,
    pub max_workers: i64,
    pub random_state: i64,
}

impl Default for GeneClustParams {
    fn default() -> Self {
        GeneClustParams {
            version: Version::Fast,
            modality: Modality::Sc,
            n_gene_clusters: None,
            n_obs_clusters: None,
            n_components: Some(DEFAULT_N_COMPONENTS),
            relevant_gene_pct: Some(DEFAULT_RELEVANT_GENE_PCT),
            post_hoc_filtering: true,
            shape: Shape::Hexagon,
            alpha: DEFAULT_ALPHA,
            return_info: false,
            subset: false,
            max_workers: num_cpus::get() as i64,
            random_state: DEFAULT_RANDOM_STATE,
        }
    }
}

impl GeneClustParams {
    /// GeneClust-fast on single-cell data with `n_gene_clusters` groups
    pub fn fast(n_gene_clusters: i64) -> Self {
        GeneClustParams {
            version: Version::Fast,
            n_gene_clusters: Some(n_gene_clusters),
            ..Default::default()
        }
    }

    /// GeneClust-ps on `modality` data with `n_obs_clusters` groups of
    /// cells or spots
    pub fn ps(modality: Modality, n_obs_clusters: i64) -> Self {
        GeneClustParams {
            version: Version::Ps,
            modality,
            n_obs_clusters: Some(n_obs_clusters),
            ..Default::default()
        }
    }
}
