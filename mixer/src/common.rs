pub use log::{info, warn};

pub type Mat = nalgebra::DMatrix<f32>;
pub type CscMat = nalgebra_sparse::CscMatrix<f32>;
