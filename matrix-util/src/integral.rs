use crate::traits::IntegralOps;
use nalgebra::DMatrix;
use nalgebra_sparse::CscMatrix;
use ndarray::{ArrayBase, Data, Dimension};
use num_traits::Float;
use rayon::prelude::*;

/// Whether `x` is finite and no further than `tol` from the nearest
/// integer
pub fn is_near_integer<T: Float>(x: T, tol: T) -> bool {
    x.is_finite() && (x - x.round()).abs() <= tol
}

impl<T> IntegralOps for DMatrix<T>
where
    T: Float + nalgebra::Scalar + Send + Sync,
{
    type Scalar = T;

    fn is_integral(&self, tol: T) -> bool {
        self.as_slice().par_iter().all(|&x| is_near_integer(x, tol))
    }

    fn count_non_integral(&self, tol: T) -> usize {
        self.as_slice()
            .par_iter()
            .filter(|&&x| !is_near_integer(x, tol))
            .count()
    }
}

/// Only the stored entries are visited. Implicit zeros are integers, so
/// the answer is the same as for the dense version of the matrix.
impl<T> IntegralOps for CscMatrix<T>
where
    T: Float + Send + Sync,
{
    type Scalar = T;

    fn is_integral(&self, tol: T) -> bool {
        self.values().par_iter().all(|&x| is_near_integer(x, tol))
    }

    fn count_non_integral(&self, tol: T) -> usize {
        self.values()
            .par_iter()
            .filter(|&&x| !is_near_integer(x, tol))
            .count()
    }
}

impl<S, D, T> IntegralOps for ArrayBase<S, D>
where
    S: Data<Elem = T>,
    D: Dimension,
    T: Float,
{
    type Scalar = T;

    fn is_integral(&self, tol: T) -> bool {
        self.iter().all(|&x| is_near_integer(x, tol))
    }

    fn count_non_integral(&self, tol: T) -> usize {
        self.iter().filter(|&&x| !is_near_integer(x, tol)).count()
    }
}
