use crate::expr::Expr;

use super::Vec2;

/// A line segment `(p, q)`, parametrized `L(t) = p + (q - p) t`. Only
/// `t in [0, 1]` is on the *segment*; the intersection engine may solve
/// against the infinite underlying line.
#[derive(Debug, Clone)]
pub struct Line {
    pub p: Vec2,
    pub q: Vec2,
}

impl Line {
    pub fn new(p: Vec2, q: Vec2) -> Line {
        Line { p, q }
    }

    pub fn direction(&self) -> Vec2 {
        self.q.clone() - self.p.clone()
    }

    pub fn at(&self, t: Expr) -> Vec2 {
        self.p.clone() + self.direction().scale(t)
    }

    pub fn is_vertical(&self) -> bool {
        let d = self.direction();
        d.x.eval_f64() == 0.0
    }

    /// Inward normal for a segment that is part of a polygon with the given
    /// orientation, per the distilled spec's §4.2: `(dy, -dx)` if CCW, else
    /// `(-dy, dx)`, normalized.
    pub fn inward_normal(&self, is_ccw: bool) -> Vec2 {
        let d = self.direction();
        let n = if is_ccw {
            Vec2::new(d.y.clone(), -d.x.clone())
        } else {
            Vec2::new(-d.y.clone(), d.x.clone())
        };
        n.normalized()
    }

    /// Offset the segment by `d` along its inward normal (inward if `d > 0`).
    pub fn offset(&self, d: Expr, is_ccw: bool) -> Line {
        let n = self.inward_normal(is_ccw);
        let delta = n.scale(d);
        Line::new(self.p.clone() + delta.clone(), self.q.clone() + delta)
    }
}
