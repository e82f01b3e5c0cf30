use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use super::expr::Expr;

/// A complex number over `Expr`. Used internally by the cubic/quartic root
/// solvers to carry non-real roots through the computation even when
/// `real_only` will discard them at the end (callers that want every root,
/// not just the real ones, still get a correct non-real pair back).
#[derive(Clone, Debug, PartialEq)]
pub struct Complex {
    pub re: Expr,
    pub im: Expr,
}

impl Complex {
    pub fn re(re: Expr) -> Complex {
        Complex { re, im: Expr::zero() }
    }

    pub fn conj(&self) -> Complex {
        Complex { re: self.re.clone(), im: -self.im.clone() }
    }

    pub fn norm2(&self) -> Expr {
        self.re.clone() * self.re.clone() + self.im.clone() * self.im.clone()
    }

    pub fn norm(&self) -> Expr {
        self.norm2().sqrt()
    }

    pub fn is_real(&self, n: Option<&super::Precision>) -> bool {
        super::precision::is_zero(&self.im, n)
    }

    /// Principal square root of a complex number.
    pub fn sqrt(&self) -> Complex {
        let r = self.norm().eval_f64();
        let re = self.re.eval_f64();
        let im = self.im.eval_f64();
        let sr = r.sqrt();
        if sr == 0.0 {
            return Complex::re(Expr::zero());
        }
        let re_out = ((r + re) / 2.0).max(0.0).sqrt();
        let im_mag = ((r - re) / 2.0).max(0.0).sqrt();
        let im_out = if im < 0.0 { -im_mag } else { im_mag };
        Complex { re: Expr::from(re_out), im: Expr::from(im_out) }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}i", self.re, self.im)
    }
}

impl Neg for Complex {
    type Output = Complex;
    fn neg(self) -> Complex {
        Complex { re: -self.re, im: -self.im }
    }
}

impl Add for Complex {
    type Output = Complex;
    fn add(self, rhs: Complex) -> Complex {
        Complex { re: self.re + rhs.re, im: self.im + rhs.im }
    }
}

impl Add<Expr> for Complex {
    type Output = Complex;
    fn add(self, rhs: Expr) -> Complex {
        Complex { re: self.re + rhs, im: self.im }
    }
}

impl Sub for Complex {
    type Output = Complex;
    fn sub(self, rhs: Complex) -> Complex {
        Complex { re: self.re - rhs.re, im: self.im - rhs.im }
    }
}

impl Sub<Expr> for Complex {
    type Output = Complex;
    fn sub(self, rhs: Expr) -> Complex {
        Complex { re: self.re - rhs, im: self.im }
    }
}

impl Mul for Complex {
    type Output = Complex;
    fn mul(self, rhs: Complex) -> Complex {
        let re = self.re.clone() * rhs.re.clone() - self.im.clone() * rhs.im.clone();
        let im = self.re * rhs.im + self.im * rhs.re;
        Complex { re, im }
    }
}

impl Mul<Expr> for Complex {
    type Output = Complex;
    fn mul(self, rhs: Expr) -> Complex {
        Complex { re: self.re * rhs.clone(), im: self.im * rhs }
    }
}

impl Mul<f64> for Complex {
    type Output = Complex;
    fn mul(self, rhs: f64) -> Complex {
        self * Expr::from(rhs)
    }
}

impl Div<f64> for Complex {
    type Output = Complex;
    fn div(self, rhs: f64) -> Complex {
        Complex { re: self.re / rhs, im: self.im / rhs }
    }
}

impl Div<Expr> for Complex {
    type Output = Complex;
    fn div(self, rhs: Expr) -> Complex {
        Complex { re: self.re / rhs.clone(), im: self.im / rhs }
    }
}

pub type ComplexPair = Complex;
