//! Polynomial root solvers for monic-reducible polynomials of degree <= 4,
//! kept as freestanding functions keyed by degree (per the distilled spec's
//! Design Notes: the quartic-specific branch logic should stay unit-testable
//! on its own).

mod quadratic;
mod cubic;
mod quartic;

pub use quadratic::quadratic;
pub use cubic::cubic;
pub use quartic::quartic;

use std::collections::BTreeMap;

use super::complex::Complex;
use super::expr::Expr;
use super::precision::{cutoff_tiny, is_zero};
use super::{KernelError, KernelResult, Precision};

/// A multiset of roots, keyed by (rounded) value, with multiplicities.
pub type RootMultiset = Vec<(Expr, usize)>;

/// `polynomial_roots(p, x, real_only, n)`: interpret `coeffs` (highest
/// degree first, length `degree + 1`) as a univariate polynomial and return
/// its roots with multiplicity. Degree 0 with a non-zero constant returns no
/// roots; an identically-zero polynomial is `InfinitelyManySolutions`.
/// Degree > 4 is `DegreeUnsupported`.
pub fn polynomial_roots(coeffs: &[Expr], real_only: bool, n: Option<&Precision>) -> KernelResult<RootMultiset> {
    let coeffs: Vec<Expr> = coeffs.iter().map(|c| cutoff_tiny(c.clone(), n)).collect();
    let degree = coeffs.len().saturating_sub(1);
    if coeffs.is_empty() || is_zero(&coeffs[0], n) {
        // Leading coefficient vanished: drop it and re-dispatch at the next
        // lower degree (this also implements "degree 0" termination).
        if coeffs.len() <= 1 {
            return if coeffs.is_empty() || is_zero(&coeffs[0], n) {
                Err(KernelError::InfinitelyManySolutions)
            } else {
                Ok(vec![])
            };
        }
        return polynomial_roots(&coeffs[1..], real_only, n);
    }
    if degree > 4 {
        return Err(KernelError::DegreeUnsupported(degree));
    }
    let all = all_roots(&coeffs, n);
    Ok(group(all, real_only, n))
}

fn all_roots(coeffs: &[Expr], n: Option<&Precision>) -> Vec<Complex> {
    let lead = coeffs[0].clone();
    let monic: Vec<Expr> = coeffs[1..].iter().map(|c| c.clone() / lead.clone()).collect();
    match monic.len() {
        1 => vec![Complex::re(-monic[0].clone())],
        2 => quadratic::quadratic(monic[0].clone(), monic[1].clone()).all(),
        3 => cubic::cubic(monic[0].clone(), monic[1].clone(), monic[2].clone()).all(),
        4 => quartic::quartic(monic[0].clone(), monic[1].clone(), monic[2].clone(), monic[3].clone()).all(),
        _ => vec![],
    }
    .into_iter()
    .map(|c| Complex { re: cutoff_tiny(c.re, n), im: cutoff_tiny(c.im, n) })
    .collect()
}

fn group(roots: Vec<Complex>, real_only: bool, n: Option<&Precision>) -> RootMultiset {
    let mut out: RootMultiset = Vec::new();
    for r in roots {
        if real_only && !r.is_real(n) {
            continue;
        }
        let value = r.re;
        if let Some(slot) = out.iter_mut().find(|(v, _)| is_zero(&(v.clone() - value.clone()), n)) {
            slot.1 += 1;
        } else {
            out.push((value, 1));
        }
    }
    out
}

/// `eq` over a `BTreeMap` substitution — used by arc-arc intersection to turn
/// a resultant root `x` back into a `y` via the implicit ellipse equation.
pub fn substitute_and_eval(e: &Expr, var: &str, value: &Expr) -> Expr {
    let mut bindings = BTreeMap::new();
    bindings.insert(var.to_string(), value.clone());
    e.substitute(&bindings)
}
