use crate::expr::Expr;

use super::Vec2;

/// A 2x2 matrix. The offset engine only ever needs the rotation matrix
/// `R(phi)` (arc axis rotation) and its inverse `R(-phi)`, per the distilled
/// spec's "Arc transform" primitive.
#[derive(Debug, Clone)]
pub struct Matrix2 {
    pub a: Expr,
    pub b: Expr,
    pub c: Expr,
    pub d: Expr,
}

impl Matrix2 {
    pub fn rotation_deg(phi: &Expr) -> Matrix2 {
        let cos = phi.clone().cos_deg();
        let sin = phi.clone().sin_deg();
        Matrix2 {
            a: cos.clone(),
            b: -sin.clone(),
            c: sin,
            d: cos,
        }
    }

    pub fn apply(&self, v: &Vec2) -> Vec2 {
        Vec2::new(
            self.a.clone() * v.x.clone() + self.b.clone() * v.y.clone(),
            self.c.clone() * v.x.clone() + self.d.clone() * v.y.clone(),
        )
    }

    /// Inverse of a rotation matrix is its transpose.
    pub fn transposed(&self) -> Matrix2 {
        Matrix2 {
            a: self.a.clone(),
            b: self.c.clone(),
            c: self.b.clone(),
            d: self.d.clone(),
        }
    }
}
