use std::ops::{Add, Mul, Sub};

use super::expr::Expr;
use super::precision::cutoff_tiny;
use super::Precision;

/// A univariate polynomial in `x`, coefficients highest-degree first. Used
/// as the entry type of the Sylvester matrix so that `res_y` can eliminate
/// `y` from two bivariate polynomials (each given as coefficients-in-`y`,
/// themselves polynomials in `x`) and return a genuine polynomial in `x`
/// that `polynomial_roots` can consume directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Poly(pub Vec<Expr>);

impl Poly {
    pub fn zero() -> Poly {
        Poly(vec![Expr::zero()])
    }

    pub fn constant(e: Expr) -> Poly {
        Poly(vec![e])
    }

    pub fn is_zero(&self, n: Option<&Precision>) -> bool {
        self.0.iter().all(|c| super::precision::is_zero(c, n))
    }

    /// Coefficients with leading zero terms trimmed.
    pub fn trimmed(mut self, n: Option<&Precision>) -> Poly {
        while self.0.len() > 1 && super::precision::is_zero(&self.0[0], n) {
            self.0.remove(0);
        }
        self
    }

    pub fn into_coeffs(self) -> Vec<Expr> {
        self.0
    }
}

impl Add for Poly {
    type Output = Poly;
    fn add(self, rhs: Poly) -> Poly {
        let (a, b) = (self.0, rhs.0);
        let n = a.len().max(b.len());
        let pad = |v: Vec<Expr>| {
            let mut out = vec![Expr::zero(); n - v.len()];
            out.extend(v);
            out
        };
        let a = pad(a);
        let b = pad(b);
        Poly(a.into_iter().zip(b).map(|(x, y)| x + y).collect())
    }
}

impl Sub for Poly {
    type Output = Poly;
    fn sub(self, rhs: Poly) -> Poly {
        self + Poly(rhs.0.into_iter().map(|c| -c).collect())
    }
}

impl Mul for Poly {
    type Output = Poly;
    fn mul(self, rhs: Poly) -> Poly {
        let (a, b) = (self.0, rhs.0);
        let mut out = vec![Expr::zero(); a.len() + b.len() - 1];
        for (i, ai) in a.iter().enumerate() {
            if ai.is_zero_exact() {
                continue;
            }
            for (j, bj) in b.iter().enumerate() {
                out[i + j] = out[i + j].clone() + ai.clone() * bj.clone();
            }
        }
        Poly(out)
    }
}

/// `res_y(f, g)`: resultant of two polynomials in `y` (coefficient lists,
/// highest degree first, each coefficient itself a `Poly` in `x`),
/// eliminating `y` and returning a `Poly` in `x`.
///
/// Computed as the determinant of the Sylvester matrix via Laplace
/// expansion (keeps intermediate entries symbolic-friendly, per the
/// distilled spec's Design Notes), with every entry passed through
/// `cutoff_tiny(.,n)` along the way so near-zero symbolic noise collapses to
/// exact zero before the determinant is evaluated — both for speed and to
/// avoid the unbounded rational growth the Resource Model section warns
/// about.
pub fn res_y(f: &[Poly], g: &[Poly], n: Option<&Precision>) -> Poly {
    let m = f.len() - 1; // degree of f in y
    let k = g.len() - 1; // degree of g in y
    let size = m + k;
    if size == 0 {
        return Poly::constant(Expr::one());
    }
    let mut matrix: Vec<Vec<Poly>> = vec![vec![Poly::zero(); size]; size];
    for row in 0..k {
        for (j, c) in f.iter().enumerate() {
            matrix[row][row + j] = c.clone();
        }
    }
    for row in 0..m {
        for (j, c) in g.iter().enumerate() {
            matrix[k + row][row + j] = c.clone();
        }
    }
    determinant(&matrix, n)
}

fn determinant(m: &[Vec<Poly>], n: Option<&Precision>) -> Poly {
    let size = m.len();
    if size == 0 {
        return Poly::constant(Expr::one());
    }
    if size == 1 {
        return m[0][0].clone();
    }
    if size == 2 {
        return m[0][0].clone() * m[1][1].clone() - m[0][1].clone() * m[1][0].clone();
    }
    let mut total = Poly::zero();
    for col in 0..size {
        let coeff = m[0][col].clone();
        if coeff.is_zero(n) {
            continue;
        }
        let minor = submatrix(m, 0, col);
        let term = coeff * determinant(&minor, n);
        total = if col % 2 == 0 { total + term } else { total - term };
    }
    total
}

fn submatrix(m: &[Vec<Poly>], skip_row: usize, skip_col: usize) -> Vec<Vec<Poly>> {
    m.iter()
        .enumerate()
        .filter(|(i, _)| *i != skip_row)
        .map(|(_, row)| {
            row.iter()
                .enumerate()
                .filter(|(j, _)| *j != skip_col)
                .map(|(_, c)| c.clone())
                .collect()
        })
        .collect()
}
