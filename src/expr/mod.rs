//! The exact/float numeric kernel (C1): symbolic expressions over exact
//! rationals, precision-controlled predicates, polynomial root solvers, and
//! the bivariate resultant used by the arc-arc intersection algorithm.

mod expr;
pub(crate) mod precision;
mod complex;
pub mod roots;
mod resultant;

pub use expr::Expr;
pub use precision::{as_bool, cutoff_tiny, eq, ge, gt, is_zero, le, lt, Precision, PrecisionMode};
pub use complex::Complex;
pub use resultant::{res_y, Poly};

/// Errors raised by the numeric kernel.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum KernelError {
    #[error("polynomial has degree > 4, which is unsupported: {0} coefficients")]
    DegreeUnsupported(usize),

    #[error("polynomial is identically zero; infinitely many solutions")]
    InfinitelyManySolutions,

    #[error("predicate could not be resolved to true/false at the given precision; try a higher Precision.full")]
    IndeterminatePredicate,
}

pub type KernelResult<T> = Result<T, KernelError>;
