use std::f64::consts::TAU;

use crate::expr::complex::Complex;
use crate::expr::expr::Expr;

/// Roots of the monic cubic `x^3 + a2 x^2 + a1 x + a0`.
#[derive(Debug, Clone)]
pub enum Roots {
    /// Three real roots (Viète's trigonometric form, or the triple/`q=0` case).
    Real([Expr; 3]),
    /// One real root and a complex-conjugate pair (Cardano's formula).
    Mixed(Expr, Complex),
}

impl Roots {
    pub fn all(self) -> Vec<Complex> {
        match self {
            Roots::Real([r0, r1, r2]) => vec![Complex::re(r0), Complex::re(r1), Complex::re(r2)],
            Roots::Mixed(r, c) => vec![Complex::re(r), c.clone(), c.conj()],
        }
    }
}

/// Depressed-cubic algorithm per the distilled spec's §4.1:
/// `q = a1/3 - a2^2/9`, `r = (a1 a2 - 3 a0)/6 - a2^3/27`,
/// `disc = r^2 + q^3`.
pub fn cubic(a2: Expr, a1: Expr, a0: Expr) -> Roots {
    let q = a1.clone() / 3.0 - (a2.clone() * a2.clone()) / 9.0;
    let r = (a1 * a2.clone() - a0 * 3.0) / 6.0 - (a2.clone() * a2.clone() * a2.clone()) / 27.0;
    let disc = r.clone() * r.clone() + q.clone() * q.clone() * q.clone();

    if disc.eval_f64() > 0.0 {
        // One real root via Cardano's A = (|r| + sqrt(disc))^(1/3).
        let sqrt_disc = disc.sqrt();
        let a_mag = (r.clone().eval_f64().abs() + sqrt_disc.eval_f64()).cbrt();
        let sign = if r.eval_f64() >= 0.0 { 1.0 } else { -1.0 };
        let a = Expr::from(sign * a_mag);
        let b = q.clone() / a.clone() * -1.0;
        let u = a.clone() + b.clone();
        let real_root = u.clone() - a2.clone() / 3.0;
        // Complex conjugate pair: the other two roots of the depressed cubic
        // are `-(u)/2 +- i*sqrt(3)/2*(a - b)`.
        let half_u = u.clone() / 2.0;
        let re = -half_u - a2.clone() / 3.0;
        let im_mag = (3f64.sqrt() / 2.0) * (a.eval_f64() - b.eval_f64());
        Roots::Mixed(real_root, Complex { re, im: Expr::from(im_mag) })
    } else if q.eval_f64() == 0.0 {
        // Triple root at `-a2/3`.
        let root = -a2.clone() / 3.0;
        Roots::Real([root.clone(), root.clone(), root])
    } else {
        // Three real roots via Viète's trigonometric substitution.
        let neg_q = -q.clone();
        let denom = neg_q.clone() * neg_q.clone() * neg_q.clone();
        let mut arg = (r.clone() / denom.sqrt()).eval_f64();
        if arg > 1.0 {
            arg = 1.0;
        } else if arg < -1.0 {
            arg = -1.0;
        }
        let theta = arg.acos();
        let scale = 2.0 * neg_q.eval_f64().sqrt();
        let a2_3 = a2.eval_f64() / 3.0;
        let r0 = scale * (theta / 3.0).cos() - a2_3;
        let r1 = scale * ((theta + TAU) / 3.0).cos() - a2_3;
        let r2 = scale * ((theta + 2.0 * TAU) / 3.0).cos() - a2_3;
        Roots::Real([Expr::from(r0), Expr::from(r1), Expr::from(r2)])
    }
}
