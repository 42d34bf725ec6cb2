//! Parameter and input gate for MIXER: GeneClust-fast and
//! GeneClust-ps gene clustering on single-cell and spatial data.

pub mod anndata; // annotated cell x gene matrix and spatial image
pub mod common;
pub mod config; // parameters from JSON
pub mod error;
pub mod params; // run configuration and its defaults
pub mod validation; // checks run before clustering starts

pub use anndata::{AnnotatedMatrix, DataMatrix, SpatialImage};
pub use error::{ErrorKind, MixerError};
pub use params::{GeneClustParams, Modality, Shape, Version};
pub use validation::{
    check_all_genes_selected, check_args, check_gene_clustering, check_raw_counts, ArgsReport,
    ValidationWarning,
};
