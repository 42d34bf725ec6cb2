pub mod common_io;
pub mod dmatrix_io;
pub mod integral;
pub mod mtx_io;
pub mod ndarray_io;
pub mod traits;
