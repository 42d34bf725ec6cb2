use crate::common_io::Delimiter;

/// Read and write matrices from and to files
pub trait IoOps {
    type Scalar;
    type Mat;

    fn read_file_delim(
        file: &str,
        delim: impl Into<Delimiter>,
        skip: Option<usize>,
    ) -> anyhow::Result<Self::Mat>;

    fn from_tsv(tsv_file: &str, skip: Option<usize>) -> anyhow::Result<Self::Mat> {
        Self::read_file_delim(tsv_file, "\t", skip)
    }

    fn write_file_delim(&self, file: &str, delim: &str) -> anyhow::Result<()>;

    fn to_tsv(&self, tsv_file: &str) -> anyhow::Result<()> {
        self.write_file_delim(tsv_file, "\t")
    }
}

/// Element-wise tests on whether a matrix only holds whole numbers,
/// e.g., raw UMI counts as opposed to normalized expression.
pub trait IntegralOps {
    type Scalar;

    /// Every (stored) value is within `tol` of an integer. Non-finite
    /// values never are.
    fn is_integral(&self, tol: Self::Scalar) -> bool;

    /// Number of (stored) values that are not within `tol` of an integer
    fn count_non_integral(&self, tol: Self::Scalar) -> usize;
}
