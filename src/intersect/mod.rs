//! The intersection engine (C4): dispatches line/line, line/arc, and
//! arc/arc intersection, with interior, tangent-extension, and "around"
//! fallback variants, per the distilled spec's §4.4.

mod line_line;
mod line_arc;
mod arc_arc;

use log::error;

use crate::expr::{Expr, Precision};
use crate::geometry::{Line, Segment, Vec2};

/// A tagged intersection record. All variants carry an `intersection` point
/// (accessed via `Record::point`).
#[derive(Debug, Clone)]
pub enum Record {
    LineLine { intersection: Vec2, t: Expr, u: Expr },
    LineCoincident { intersection: Vec2, t: Expr, u: Expr },
    LineAround { intersection: Vec2, ante: Vec2, post: Vec2, ante_extended: Vec2, post_extended: Vec2 },
    LineArc { intersection: Vec2, t: Expr, theta: Expr },
    LineArcExt { intersection: Vec2, t: Expr, u: Expr, post: bool, theta: Expr, ext: Ext },
    LineArcAround { intersection: Vec2, ante_intersection: Vec2, post_intersection: Vec2, ante_extended: Vec2, post_extended: Vec2 },
    ArcArc { intersection: Vec2, theta0: Expr, theta1: Expr },
    ArcArcExt { intersection: Vec2, t: Expr, u: Expr, ante_intersection: Vec2, post_intersection: Vec2 },
    ArcArcAround { intersection: Vec2, ante_intersection: Vec2, post_intersection: Vec2, ante_extended: Vec2, post_extended: Vec2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ext {
    Ante,
    Post,
}

impl Record {
    pub fn point(&self) -> Vec2 {
        match self {
            Record::LineLine { intersection, .. }
            | Record::LineCoincident { intersection, .. }
            | Record::LineAround { intersection, .. }
            | Record::LineArc { intersection, .. }
            | Record::LineArcExt { intersection, .. }
            | Record::LineArcAround { intersection, .. }
            | Record::ArcArc { intersection, .. }
            | Record::ArcArcExt { intersection, .. }
            | Record::ArcArcAround { intersection, .. } => intersection.clone(),
        }
    }

    pub fn is_around(&self) -> bool {
        matches!(self, Record::LineAround { .. } | Record::LineArcAround { .. } | Record::ArcArcAround { .. })
    }
}

/// `intersect(A, B, d?, n?)`: dispatched by the pair `(typeOf(A), typeOf(B))`.
/// `d` (when present) triggers the "around" fallback when no proper
/// intersection exists — the bridge the assembler uses to stitch two offset
/// pieces that do not meet.
pub fn intersect(a: &Segment, b: &Segment, d: Option<f64>, n: Option<&Precision>) -> Option<Record> {
    let result = match (a, b) {
        (Segment::Line(la), Segment::Line(lb)) => line_line::intersect(la, lb, d, n),
        (Segment::Line(la), Segment::Arc(ab)) => line_arc::intersect(la, ab, true, d, n),
        (Segment::Arc(aa), Segment::Line(lb)) => line_arc::intersect(lb, aa, false, d, n),
        (Segment::Arc(aa), Segment::Arc(ab)) => arc_arc::intersect(aa, ab, d, n),
    };
    if result.is_none() {
        error!("intersection unavailable for segment pair (d={:?})", d);
    }
    result
}

/// Parametric solve of two *infinite* lines: `a.at(t) == b.at(u)`. Shared by
/// `line_line` (segment intersection) and the tangent-extension pre-tests in
/// `line_arc`/`arc_arc`. Returns `None` when the lines are parallel.
pub(super) fn solve_lines(a: &Line, b: &Line) -> Option<(Expr, Expr, Vec2)> {
    let d1 = a.direction();
    let d2 = b.direction();
    let denom = d1.cross(&d2);
    if denom.eval_f64().abs() < 1e-12 {
        return None;
    }
    let diff = b.p.clone() - a.p.clone();
    let t = diff.cross(&d2) / denom.clone();
    let u = diff.cross(&d1) / denom;
    let intersection = a.at(t.clone());
    Some((t, u, intersection))
}
