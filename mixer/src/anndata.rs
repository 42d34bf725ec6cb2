use crate::common::*;
use matrix_util::common_io::{read_first_words, read_lines};
use matrix_util::mtx_io::read_mtx_csc;
use matrix_util::traits::{IntegralOps, IoOps};
use ndarray::{Array2, Array3, Axis};

/// Primary data matrix, observations x variables
#[derive(Debug, Clone)]
pub enum DataMatrix {
    Dense(Mat),
    Sparse(CscMat),
}

impl DataMatrix {
    pub fn nrows(&self) -> usize {
        match self {
            DataMatrix::Dense(x) => x.nrows(),
            DataMatrix::Sparse(x) => x.nrows(),
        }
    }

    pub fn ncols(&self) -> usize {
        match self {
            DataMatrix::Dense(x) => x.ncols(),
            DataMatrix::Sparse(x) => x.ncols(),
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, DataMatrix::Sparse(_))
    }

    pub fn to_dense(&self) -> Mat {
        match self {
            DataMatrix::Dense(x) => x.clone(),
            DataMatrix::Sparse(x) => Mat::from(x),
        }
    }
}

impl IntegralOps for DataMatrix {
    type Scalar = f32;

    fn is_integral(&self, tol: f32) -> bool {
        match self {
            DataMatrix::Dense(x) => x.is_integral(tol),
            DataMatrix::Sparse(x) => x.is_integral(tol),
        }
    }

    fn count_non_integral(&self, tol: f32) -> usize {
        match self {
            DataMatrix::Dense(x) => x.count_non_integral(tol),
            DataMatrix::Sparse(x) => x.count_non_integral(tol),
        }
    }
}

impl From<Mat> for DataMatrix {
    fn from(x: Mat) -> Self {
        DataMatrix::Dense(x)
    }
}

impl From<CscMat> for DataMatrix {
    fn from(x: CscMat) -> Self {
        DataMatrix::Sparse(x)
    }
}

/// A data matrix annotated with observation (cell/spot) and variable
/// (gene) names. Rows are observations, columns are variables.
#[derive(Debug, Clone)]
pub struct AnnotatedMatrix {
    x: DataMatrix,
    obs_names: Vec<Box<str>>,
    var_names: Vec<Box<str>>,
}

impl AnnotatedMatrix {
    pub fn new(
        x: impl Into<DataMatrix>,
        obs_names: Vec<Box<str>>,
        var_names: Vec<Box<str>>,
    ) -> anyhow::Result<Self> {
        let x = x.into();

        if obs_names.len() != x.nrows() {
            return Err(anyhow::anyhow!(
                "# obs names {} != # rows {}",
                obs_names.len(),
                x.nrows()
            ));
        }

        if var_names.len() != x.ncols() {
            return Err(anyhow::anyhow!(
                "# var names {} != # columns {}",
                var_names.len(),
                x.ncols()
            ));
        }

        Ok(AnnotatedMatrix {
            x,
            obs_names,
            var_names,
        })
    }

    /// Name the observations `cell_0`, `cell_1`, ...
    pub fn with_var_names(
        x: impl Into<DataMatrix>,
        var_names: Vec<Box<str>>,
    ) -> anyhow::Result<Self> {
        let x = x.into();
        let obs_names = default_obs_names(x.nrows());
        Self::new(x, obs_names, var_names)
    }

    /// Read a 10x-style MatrixMarket file, `gene x cell`, into a `cell x
    /// gene` sparse matrix.
    ///
    /// * `mtx_file` - `.mtx` or `.mtx.gz`
    /// * `var_names_file` - one gene per line (first word is used)
    /// * `obs_names_file` - one barcode per line; names are generated if
    ///   `None`
    pub fn from_mtx(
        mtx_file: &str,
        var_names_file: &str,
        obs_names_file: Option<&str>,
    ) -> anyhow::Result<Self> {
        info!("Reading MatrixMarket file: {}", mtx_file);
        let x = read_mtx_csc(mtx_file, true)?;
        let var_names = read_first_words(var_names_file)?;
        let obs_names = match obs_names_file {
            Some(file) => read_first_words(file)?,
            None => default_obs_names(x.nrows()),
        };
        info!("Found {} cells x {} genes", x.nrows(), x.ncols());
        Self::new(x, obs_names, var_names)
    }

    /// Read a dense tab-separated `cell x gene` matrix
    pub fn from_tsv(tsv_file: &str, var_names_file: &str) -> anyhow::Result<Self> {
        info!("Reading dense matrix: {}", tsv_file);
        let x = Mat::from_tsv(tsv_file, None)?;
        let var_names = read_first_words(var_names_file)?;
        Self::with_var_names(x, var_names)
    }

    pub fn x(&self) -> &DataMatrix {
        &self.x
    }

    pub fn obs_names(&self) -> &[Box<str>] {
        &self.obs_names
    }

    pub fn var_names(&self) -> &[Box<str>] {
        &self.var_names
    }

    pub fn n_obs(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_vars(&self) -> usize {
        self.x.ncols()
    }
}

fn default_obs_names(n: usize) -> Vec<Box<str>> {
    (0..n)
        .map(|i| format!("cell_{}", i).into_boxed_str())
        .collect()
}

/// Histology image aligned with a spatial slide, `height x width x
/// channels`
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialImage {
    pixels: Array3<f32>,
}

impl SpatialImage {
    pub fn new(pixels: Array3<f32>) -> Self {
        SpatialImage { pixels }
    }

    /// A single-channel image
    pub fn from_gray(pixels: Array2<f32>) -> Self {
        SpatialImage {
            pixels: pixels.insert_axis(Axis(2)),
        }
    }

    /// Read a single-channel image from a delimited text file
    pub fn from_tsv(tsv_file: &str) -> anyhow::Result<Self> {
        info!("Reading image: {}", tsv_file);
        Ok(Self::from_gray(Array2::<f32>::from_tsv(tsv_file, None)?))
    }

    pub fn pixels(&self) -> &Array3<f32> {
        &self.pixels
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        self.pixels.dim()
    }
}

/// Read selected genes, one per line, skipping empty lines
pub fn read_selected_genes(file: &str) -> anyhow::Result<Vec<Box<str>>> {
    Ok(read_lines(file)?
        .into_iter()
        .map(|x| x.trim().to_string().into_boxed_str())
        .filter(|x| !x.is_empty())
        .collect())
}
