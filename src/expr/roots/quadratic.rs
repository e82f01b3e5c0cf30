use crate::expr::complex::Complex;
use crate::expr::expr::Expr;

/// Roots of the monic quadratic `x^2 + a1 x + a0`.
#[derive(Debug, Clone)]
pub enum Roots {
    Real([Expr; 2]),
    Complex(Complex, Complex),
}

impl Roots {
    pub fn all(self) -> Vec<Complex> {
        match self {
            Roots::Real([r0, r1]) => vec![Complex::re(r0), Complex::re(r1)],
            Roots::Complex(c0, c1) => vec![c0, c1],
        }
    }
}

/// Closed-form quadratic roots via the discriminant `a1^2 - 4 a0`, with
/// `cutoff_tiny` applied by the caller before the sign test (per the
/// distilled spec's §4.1).
pub fn quadratic(a1: Expr, a0: Expr) -> Roots {
    let b = a1.clone() / 2.0;
    let disc = b.clone() * b.clone() - a0;
    if disc.eval_f64() < 0.0 {
        let mag = (-disc.clone()).sqrt();
        Roots::Complex(
            Complex { re: -b.clone(), im: mag.clone() },
            Complex { re: -b, im: -mag },
        )
    } else {
        let sq = disc.sqrt();
        Roots::Real([-b.clone() + sq.clone(), -b - sq])
    }
}
