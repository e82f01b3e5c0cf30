use crate::expr::complex::Complex;
use crate::expr::expr::Expr;

use super::cubic;

/// Roots of the monic quartic `x^4 + a3 x^3 + a2 x^2 + a1 x + a0`, found via
/// Wolters' modified Euler method (quarticequations.com), per the distilled
/// spec's §4.1.
#[derive(Debug, Clone)]
pub enum Roots {
    Four([Complex; 4]),
}

impl Roots {
    pub fn all(self) -> Vec<Complex> {
        match self {
            Roots::Four(rs) => rs.to_vec(),
        }
    }
}

pub fn quartic(a3: Expr, a2: Expr, a1: Expr, a0: Expr) -> Roots {
    let c = a3.clone() / 4.0;
    let c2 = c.clone() * c.clone();
    // Depress: x = y - c.
    let b2 = a2.clone() - c2.clone() * 6.0;
    let b1 = a1.clone() - a2.clone() * c.clone() * 2.0 + c2.clone() * c.clone() * 8.0;
    let b0 = a0.clone() - a1.clone() * c.clone() + a2.clone() * c2.clone() - c2.clone() * c2.clone() * 3.0;
    quartic_depressed(b2, b1, b0, c)
}

fn quartic_depressed(b2: Expr, b1: Expr, b0: Expr, c: Expr) -> Roots {
    if b1.eval_f64().abs() < 1e-300 {
        // Biquadratic: x^4 + b2 x^2 + b0 = 0.
        let inner = super::quadratic::quadratic(b2, b0);
        let roots: Vec<Complex> = inner
            .all()
            .into_iter()
            .flat_map(|r| {
                let sq = r.sqrt();
                vec![sq.clone(), -sq]
            })
            .collect();
        let mut arr = [Complex::re(Expr::zero()), Complex::re(Expr::zero()), Complex::re(Expr::zero()), Complex::re(Expr::zero())];
        for (i, r) in roots.into_iter().take(4).enumerate() {
            arr[i] = r - c.clone();
        }
        return Roots::Four(arr);
    }

    // Resolvent cubic: r^3 + (b2/2) r^2 + ((b2^2 - 4 b0)/16) r - b1^2/64 = 0.
    let r_a2 = b2.clone() / 2.0;
    let r_a1 = (b2.clone() * b2.clone() - b0.clone() * 4.0) / 16.0;
    let r_a0 = -(b1.clone() * b1.clone()) / 64.0;
    let resolvent = cubic::cubic(r_a2, r_a1, r_a0);

    let (r1, r2, r3) = match resolvent {
        cubic::Roots::Real([x0, x1, x2]) => {
            let mut reals = [x0, x1, x2];
            reals.sort_by(|a, b| a.eval_f64().partial_cmp(&b.eval_f64()).unwrap());
            let [lo, mid, hi] = reals;
            (hi, Complex::re(mid), Complex::re(lo))
        }
        cubic::Roots::Mixed(real, complex) => (real, complex.clone(), complex.conj()),
    };

    let sigma = if b1.eval_f64() >= 0.0 { 1.0 } else { -1.0 };
    let sqrt_r1 = Expr::from(r1.eval_f64().max(0.0).sqrt());

    let re2 = r2.re.eval_f64();
    let re3 = r3.re.eval_f64();
    let im2 = r2.im.eval_f64();
    let cross = (re2 * re3 + im2 * im2).max(0.0).sqrt();

    let inner_a = Expr::from(re2 + re3 - 2.0 * sigma * cross);
    let inner_b = Expr::from(re2 + re3 + 2.0 * sigma * cross);

    let t_a = inner_a.sqrt();
    let t_b = inner_b.sqrt();

    let t1 = sqrt_r1.clone() + t_a.clone();
    let t2 = sqrt_r1.clone() - t_a;
    let t3 = -sqrt_r1.clone() + t_b.clone();
    let t4 = -sqrt_r1 - t_b;

    Roots::Four([
        Complex::re(t1 - c.clone()),
        Complex::re(t2 - c.clone()),
        Complex::re(t3 - c.clone()),
        Complex::re(t4 - c),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cross-checks the monic-quartic solver's real roots against the
    /// `roots` crate's `find_roots_quartic`, the same oracle-crate role
    /// `math/float_wrap.rs` gives it in the teacher repo (a dev-dependency
    /// used to sanity-check a from-scratch closed-form solver, never the
    /// production path).
    #[test]
    fn all_real_roots_match_roots_crate_oracle() {
        // (x+1)(x-2)(x+3)(x-4) = x^4 - 2x^3 - 13x^2 + 14x + 24
        let a3 = Expr::from_i64(-2);
        let a2 = Expr::from_i64(-13);
        let a1 = Expr::from_i64(14);
        let a0 = Expr::from_i64(24);

        let mut ours: Vec<f64> = quartic(a3.clone(), a2.clone(), a1.clone(), a0.clone())
            .all()
            .into_iter()
            .filter(|r| r.is_real(None))
            .map(|r| r.re.eval_f64())
            .collect();
        ours.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let mut oracle = roots::find_roots_quartic(1.0, a3.eval_f64(), a2.eval_f64(), a1.eval_f64(), a0.eval_f64())
            .as_ref()
            .to_vec();
        oracle.sort_by(|a, b| a.partial_cmp(b).unwrap());

        assert_eq!(ours.len(), oracle.len());
        for (a, b) in ours.iter().zip(oracle.iter()) {
            assert!((a - b).abs() < 1e-6, "expected {a} ~= {b}");
        }
    }
}
