use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// An exact/float hybrid expression.
///
/// `Rat` and `Var` (and anything built purely from `+ - * /` over them) stay
/// exact. `Sqrt`, `Sin`, `Cos`, and `Atan2` generally have no rational value
/// for rational inputs, so they fold immediately to a `Float` leaf — the one
/// place this kernel admits inexactness, exactly as the distilled spec's
/// "a Float leaf introduces inexactness" rule describes.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Rat(BigRational),
    Float(f64),
    Var(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Sqrt(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Atan2(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn zero() -> Expr {
        Expr::Rat(BigRational::zero())
    }

    pub fn one() -> Expr {
        Expr::Rat(BigRational::one())
    }

    pub fn from_i64(n: i64) -> Expr {
        Expr::Rat(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    /// Lossless `Decimal -> rational` conversion via the value's textual
    /// form, per the distilled spec's `dec_to_rat`. `f64` is the closest
    /// thing to "Decimal" available without a bignum-decimal dependency, so
    /// we parse its canonical (shortest round-trip) string representation
    /// instead of its binary bit pattern — this is what makes `0.1` become
    /// the rational `1/10` rather than `3602879701896397/36028797018963968`.
    pub fn dec_to_rat(x: f64) -> Expr {
        if !x.is_finite() {
            return Expr::Float(x);
        }
        Expr::Rat(decimal_str_to_rational(&format!("{}", x)))
    }

    /// Evaluate to the ambient decimal precision (here: `f64`), canonicalized
    /// (NaN/inf pass through, `-0` collapses to `0`).
    pub fn rat_to_dec(&self) -> f64 {
        let v = self.eval_f64();
        if v == 0.0 {
            0.0
        } else {
            v
        }
    }

    pub fn eval_f64(&self) -> f64 {
        match self {
            Expr::Rat(r) => rational_to_f64(r),
            Expr::Float(f) => *f,
            Expr::Var(name) => panic!("unbound variable in eval_f64: {name}"),
            Expr::Neg(a) => -a.eval_f64(),
            Expr::Add(a, b) => a.eval_f64() + b.eval_f64(),
            Expr::Sub(a, b) => a.eval_f64() - b.eval_f64(),
            Expr::Mul(a, b) => a.eval_f64() * b.eval_f64(),
            Expr::Div(a, b) => a.eval_f64() / b.eval_f64(),
            Expr::Sqrt(a) => a.eval_f64().sqrt(),
            Expr::Sin(a) => a.eval_f64().to_radians().sin(),
            Expr::Cos(a) => a.eval_f64().to_radians().cos(),
            Expr::Atan2(y, x) => y.eval_f64().atan2(x.eval_f64()).to_degrees(),
        }
    }

    /// True if no `Float` leaf is reachable — i.e. the value is still exact.
    pub fn is_exact(&self) -> bool {
        match self {
            Expr::Rat(_) | Expr::Var(_) => true,
            Expr::Float(_) => false,
            Expr::Neg(a) | Expr::Sqrt(a) | Expr::Sin(a) | Expr::Cos(a) => a.is_exact(),
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) | Expr::Atan2(a, b) => {
                a.is_exact() && b.is_exact()
            }
        }
    }

    pub fn as_rat(&self) -> Option<&BigRational> {
        match self {
            Expr::Rat(r) => Some(r),
            _ => None,
        }
    }

    pub fn substitute(&self, bindings: &BTreeMap<String, Expr>) -> Expr {
        match self {
            Expr::Rat(_) | Expr::Float(_) => self.clone(),
            Expr::Var(name) => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            Expr::Neg(a) => Expr::Neg(Box::new(a.substitute(bindings))),
            Expr::Add(a, b) => Expr::Add(Box::new(a.substitute(bindings)), Box::new(b.substitute(bindings))),
            Expr::Sub(a, b) => Expr::Sub(Box::new(a.substitute(bindings)), Box::new(b.substitute(bindings))),
            Expr::Mul(a, b) => Expr::Mul(Box::new(a.substitute(bindings)), Box::new(b.substitute(bindings))),
            Expr::Div(a, b) => Expr::Div(Box::new(a.substitute(bindings)), Box::new(b.substitute(bindings))),
            Expr::Sqrt(a) => Expr::Sqrt(Box::new(a.substitute(bindings))),
            Expr::Sin(a) => Expr::Sin(Box::new(a.substitute(bindings))),
            Expr::Cos(a) => Expr::Cos(Box::new(a.substitute(bindings))),
            Expr::Atan2(a, b) => Expr::Atan2(Box::new(a.substitute(bindings)), Box::new(b.substitute(bindings))),
        }
    }

    pub fn sqrt(self) -> Expr {
        match &self {
            Expr::Rat(r) if !r.is_negative() => {
                if let Some(root) = exact_sqrt(r) {
                    return Expr::Rat(root);
                }
            }
            _ => {}
        }
        Expr::Float(self.eval_f64().sqrt())
    }

    /// `sin`/`cos` take degrees, matching the arc parametrization `E(θ)` of
    /// the distilled spec, which measures `θ` in degrees.
    pub fn sin_deg(self) -> Expr {
        Expr::Float(self.eval_f64().to_radians().sin())
    }

    pub fn cos_deg(self) -> Expr {
        Expr::Float(self.eval_f64().to_radians().cos())
    }

    pub fn atan2_deg(y: Expr, x: Expr) -> Expr {
        Expr::Float(y.eval_f64().atan2(x.eval_f64()).to_degrees())
    }

    pub fn deg_to_rad(self) -> Expr {
        Expr::Float(self.eval_f64().to_radians())
    }

    pub fn rad_to_deg(self) -> Expr {
        Expr::Float(self.eval_f64().to_degrees())
    }

    pub fn is_zero_exact(&self) -> bool {
        match self {
            Expr::Rat(r) => r.is_zero(),
            Expr::Float(f) => *f == 0.0,
            _ => false,
        }
    }
}

fn decimal_str_to_rational(s: &str) -> BigRational {
    let s = s.trim();
    let (neg, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (mantissa, exp) = match s.split_once(['e', 'E']) {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (s, 0),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let digits = format!("{int_part}{frac_part}");
    let numerator: BigInt = digits.parse().unwrap_or_else(|_| BigInt::zero());
    let scale = frac_part.len() as i32 - exp;
    let mut value = BigRational::from_integer(numerator);
    if scale > 0 {
        let denom = BigInt::from(10u32).pow(scale as u32);
        value = value / BigRational::from_integer(denom);
    } else if scale < 0 {
        let mult = BigInt::from(10u32).pow((-scale) as u32);
        value = value * BigRational::from_integer(mult);
    }
    if neg {
        -value
    } else {
        value
    }
}

fn rational_to_f64(r: &BigRational) -> f64 {
    let (num, den) = (r.numer(), r.denom());
    num_to_f64(num) / num_to_f64(den)
}

fn num_to_f64(n: &BigInt) -> f64 {
    // BigInt -> f64 via decimal string round-trip; adequate for the
    // magnitudes this kernel produces (path coordinates, small integer
    // polynomial coefficients).
    n.to_string().parse::<f64>().unwrap_or(f64::NAN)
}

fn exact_sqrt(r: &BigRational) -> Option<BigRational> {
    let num_root = isqrt_exact(r.numer())?;
    let den_root = isqrt_exact(r.denom())?;
    Some(BigRational::new(num_root, den_root))
}

fn isqrt_exact(n: &BigInt) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    if n.is_zero() {
        return Some(BigInt::zero());
    }
    let approx = n.to_string().parse::<f64>().ok()?.sqrt().round();
    let mut candidate = BigInt::from(approx as i64);
    for delta in -2i64..=2 {
        let c = &candidate + BigInt::from(delta);
        if &c * &c == *n {
            candidate = c;
            return Some(candidate);
        }
    }
    None
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Rat(r) => write!(f, "{r}"),
            Expr::Float(x) => write!(f, "{x}"),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Neg(a) => write!(f, "-({a})"),
            Expr::Add(a, b) => write!(f, "({a} + {b})"),
            Expr::Sub(a, b) => write!(f, "({a} - {b})"),
            Expr::Mul(a, b) => write!(f, "({a} * {b})"),
            Expr::Div(a, b) => write!(f, "({a} / {b})"),
            Expr::Sqrt(a) => write!(f, "sqrt({a})"),
            Expr::Sin(a) => write!(f, "sin({a})"),
            Expr::Cos(a) => write!(f, "cos({a})"),
            Expr::Atan2(a, b) => write!(f, "atan2({a}, {b})"),
        }
    }
}

impl From<f64> for Expr {
    fn from(x: f64) -> Expr {
        Expr::dec_to_rat(x)
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Expr {
        Expr::from_i64(n)
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        match self {
            Expr::Rat(r) => Expr::Rat(-r),
            Expr::Float(f) => Expr::Float(-f),
            other => Expr::Neg(Box::new(other)),
        }
    }
}

impl Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Rat(a), Expr::Rat(b)) => Expr::Rat(a + b),
            (a, b) if a.is_zero_exact() => b,
            (a, b) if b.is_zero_exact() => a,
            (a, b) => Expr::Float(a.eval_f64() + b.eval_f64()),
        }
    }
}

impl Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Rat(a), Expr::Rat(b)) => Expr::Rat(a - b),
            (a, b) if b.is_zero_exact() => a,
            (a, b) => Expr::Float(a.eval_f64() - b.eval_f64()),
        }
    }
}

impl Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Rat(a), Expr::Rat(b)) => Expr::Rat(a * b),
            (a, _) if a.is_zero_exact() => Expr::zero(),
            (_, b) if b.is_zero_exact() => Expr::zero(),
            (a, b) if matches!(&a, Expr::Rat(r) if r.is_one()) => b,
            (a, b) if matches!(&b, Expr::Rat(r) if r.is_one()) => a,
            (a, b) => Expr::Float(a.eval_f64() * b.eval_f64()),
        }
    }
}

impl Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Rat(a), Expr::Rat(b)) if !b.is_zero() => Expr::Rat(a / b),
            (a, b) => Expr::Float(a.eval_f64() / b.eval_f64()),
        }
    }
}

impl Mul<f64> for Expr {
    type Output = Expr;
    fn mul(self, rhs: f64) -> Expr {
        self * Expr::from(rhs)
    }
}

impl Div<f64> for Expr {
    type Output = Expr;
    fn div(self, rhs: f64) -> Expr {
        self / Expr::from(rhs)
    }
}

impl Add<f64> for Expr {
    type Output = Expr;
    fn add(self, rhs: f64) -> Expr {
        self + Expr::from(rhs)
    }
}

impl Sub<f64> for Expr {
    type Output = Expr;
    fn sub(self, rhs: f64) -> Expr {
        self - Expr::from(rhs)
    }
}
