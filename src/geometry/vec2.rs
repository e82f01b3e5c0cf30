use std::ops::Mul;

use crate::expr::{Expr, Precision};

use super::Point;

/// An exact 2D vector: a pair of `Expr`. The kernel carries out exact
/// arithmetic on `Vec2` and only falls back to evaluated expressions when a
/// `Precision` is supplied to the operation that consumes it. `Add`/`Sub`/
/// `Neg` are field-wise, the same pattern the teacher derives on its
/// operator-wrapper types.
#[derive(Debug, Clone, PartialEq, derive_more::Add, derive_more::Sub, derive_more::Neg)]
pub struct Vec2 {
    pub x: Expr,
    pub y: Expr,
}

impl Vec2 {
    pub fn new(x: Expr, y: Expr) -> Vec2 {
        Vec2 { x, y }
    }

    pub fn from_f64(x: f64, y: f64) -> Vec2 {
        Vec2::new(Expr::dec_to_rat(x), Expr::dec_to_rat(y))
    }

    /// Conversion out to `Point` uses the current decimal precision.
    pub fn to_point(&self) -> Point {
        Point::new(self.x.rat_to_dec(), self.y.rat_to_dec())
    }

    pub fn dot(&self, other: &Vec2) -> Expr {
        self.x.clone() * other.x.clone() + self.y.clone() * other.y.clone()
    }

    pub fn cross(&self, other: &Vec2) -> Expr {
        self.x.clone() * other.y.clone() - self.y.clone() * other.x.clone()
    }

    pub fn norm2(&self) -> Expr {
        self.dot(self)
    }

    pub fn norm(&self) -> Expr {
        self.norm2().sqrt()
    }

    pub fn normalized(&self) -> Vec2 {
        let n = self.norm();
        Vec2::new(self.x.clone() / n.clone(), self.y.clone() / n)
    }

    /// Perpendicular vector `(y, -x)` (a quarter-turn clockwise).
    pub fn perp(&self) -> Vec2 {
        Vec2::new(self.y.clone(), -self.x.clone())
    }

    pub fn scale(&self, s: Expr) -> Vec2 {
        Vec2::new(self.x.clone() * s.clone(), self.y.clone() * s)
    }

    pub fn approx_eq(&self, other: &Vec2, n: Option<&Precision>) -> bool {
        crate::expr::eq(&self.x, &other.x, n) && crate::expr::eq(&self.y, &other.y, n)
    }

    pub fn eval(&self) -> (f64, f64) {
        (self.x.eval_f64(), self.y.eval_f64())
    }
}

impl Mul<Expr> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: Expr) -> Vec2 {
        self.scale(rhs)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        self.scale(Expr::from(rhs))
    }
}
