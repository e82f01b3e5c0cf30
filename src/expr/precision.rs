use serde::{Deserialize, Serialize};

use super::expr::Expr;
use super::KernelError;

/// `(baseline, additional)` tolerance pair, per the distilled spec's §3.
///
/// `full = baseline + additional` significant digits; values with absolute
/// magnitude `<= 10^(-baseline)` are treated as zero. `None` (no `Precision`
/// at all) means "purely symbolic, exact comparisons only" — callers express
/// that as `Option<&Precision>::None`, not as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precision {
    pub baseline: u32,
    pub additional: u32,
}

/// Default `additional_digits` used by `Precision::auto`/`auto_intersections`.
/// An explicit constructor parameter per the distilled spec's Design Notes
/// ("Global mutable state" — avoid a hidden process-wide constant).
pub const DEFAULT_ADDITIONAL_DIGITS: u32 = 8;

impl Precision {
    pub fn new(baseline: u32, additional: u32) -> Precision {
        Precision { baseline, additional }
    }

    pub fn auto(current_decimal_precision: u32) -> Precision {
        Precision::auto_with(current_decimal_precision, DEFAULT_ADDITIONAL_DIGITS)
    }

    pub fn auto_with(current_decimal_precision: u32, additional_digits: u32) -> Precision {
        Precision::new(current_decimal_precision, additional_digits)
    }

    pub fn full(&self) -> u32 {
        self.baseline + self.additional
    }

    pub fn tolerance(&self) -> f64 {
        10f64.powi(-(self.baseline as i32))
    }

    fn round_to_full(&self, v: f64) -> f64 {
        let scale = 10f64.powi(self.full() as i32);
        (v * scale).round() / scale
    }
}

/// The `prec` argument accepted by the engine's entry points (§6.2):
/// `offset_path`/`bevel_path` take one of these four modes rather than a
/// bare `Option<&Precision>`, since "auto" and "auto-intersections" differ
/// in whether the chosen `Precision` reaches the offset operator (C3) or
/// only the intersection engine (C4).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrecisionMode {
    /// Pure symbolic offsets and intersections; no `Precision` anywhere.
    Exact,
    /// An explicit `Precision`, used everywhere.
    Explicit(Precision),
    /// `Precision(current_decimal_precision, additional_digits)`, used by
    /// both the offset operator and the intersection engine.
    Auto(Precision),
    /// Same automatic `Precision`, but only for intersections — offsets
    /// remain symbolic.
    AutoIntersections(Precision),
}

impl PrecisionMode {
    pub fn auto(current_decimal_precision: u32) -> PrecisionMode {
        PrecisionMode::Auto(Precision::auto(current_decimal_precision))
    }

    pub fn auto_intersections(current_decimal_precision: u32) -> PrecisionMode {
        PrecisionMode::AutoIntersections(Precision::auto(current_decimal_precision))
    }

    /// The `Precision` the offset operator (C3) should use, if any.
    pub fn offset_precision(&self) -> Option<&Precision> {
        match self {
            PrecisionMode::Exact | PrecisionMode::AutoIntersections(_) => None,
            PrecisionMode::Explicit(p) | PrecisionMode::Auto(p) => Some(p),
        }
    }

    /// The `Precision` the intersection engine (C4) should use, if any.
    pub fn intersect_precision(&self) -> Option<&Precision> {
        match self {
            PrecisionMode::Exact => None,
            PrecisionMode::Explicit(p) | PrecisionMode::Auto(p) | PrecisionMode::AutoIntersections(p) => Some(p),
        }
    }
}

impl From<Precision> for PrecisionMode {
    fn from(p: Precision) -> PrecisionMode {
        PrecisionMode::Explicit(p)
    }
}

/// `cutoff_tiny(v, n)`: if `v` is a float-leaf and `is_zero(v, n)`, replace it
/// with exact zero.
pub fn cutoff_tiny(v: Expr, n: Option<&Precision>) -> Expr {
    match (&v, n) {
        (Expr::Float(_), Some(_)) if is_zero(&v, n) => Expr::zero(),
        _ => v,
    }
}

/// `is_zero(a, n)`: exact `a == 0` when `n` is absent; otherwise
/// `|a.evalf(full)| <= 10^(-baseline)`.
pub fn is_zero(a: &Expr, n: Option<&Precision>) -> bool {
    match n {
        None => a.is_zero_exact(),
        Some(p) => p.round_to_full(a.eval_f64()).abs() <= p.tolerance(),
    }
}

/// `eq(a, b, n)`: exact `a == b` when `n` absent, else tolerant comparison.
pub fn eq(a: &Expr, b: &Expr, n: Option<&Precision>) -> bool {
    match n {
        None => a == b || matches!((a.as_rat(), b.as_rat()), (Some(x), Some(y)) if x == y),
        Some(p) => (p.round_to_full(a.eval_f64()) - p.round_to_full(b.eval_f64())).abs() < p.tolerance(),
    }
}

pub fn lt(a: &Expr, b: &Expr, n: Option<&Precision>) -> bool {
    match n {
        None => a.eval_f64() < b.eval_f64(),
        Some(p) => p.round_to_full(a.eval_f64()) < p.round_to_full(b.eval_f64()) - p.tolerance(),
    }
}

pub fn le(a: &Expr, b: &Expr, n: Option<&Precision>) -> bool {
    lt(a, b, n) || eq(a, b, n)
}

pub fn gt(a: &Expr, b: &Expr, n: Option<&Precision>) -> bool {
    lt(b, a, n)
}

pub fn ge(a: &Expr, b: &Expr, n: Option<&Precision>) -> bool {
    le(b, a, n)
}

/// Coerce a (simplified) symbolic truth value to a native boolean, failing
/// with `IndeterminatePredicate` if the underlying float is not clearly on
/// one side of the tolerance band used by `eq`/`lt`.
pub fn as_bool(a: &Expr, n: Option<&Precision>) -> Result<bool, KernelError> {
    use num_traits::Zero;
    match n {
        None => match a {
            Expr::Rat(r) => Ok(!r.is_zero()),
            _ => Err(KernelError::IndeterminatePredicate),
        },
        Some(p) => {
            let v = p.round_to_full(a.eval_f64());
            if v.abs() <= p.tolerance() {
                Ok(false)
            } else if v.is_finite() {
                Ok(true)
            } else {
                Err(KernelError::IndeterminatePredicate)
            }
        }
    }
}
