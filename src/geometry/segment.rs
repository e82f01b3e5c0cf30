use crate::expr::{Expr, Precision};

use super::{Arc, Line, Vec2};

/// The normal form of an "original segment" of the input path, or of its
/// offset counterpart (C3's output is always the same family as its input).
#[derive(Debug, Clone)]
pub enum Segment {
    Line(Line),
    Arc(Arc),
}

impl Segment {
    pub fn start(&self) -> Vec2 {
        match self {
            Segment::Line(l) => l.p.clone(),
            Segment::Arc(a) => a.start(),
        }
    }

    pub fn end(&self) -> Vec2 {
        match self {
            Segment::Line(l) => l.q.clone(),
            Segment::Arc(a) => a.end(),
        }
    }

    pub fn offset(&self, d: Expr, is_ccw: bool, prec: Option<&Precision>) -> Segment {
        match self {
            Segment::Line(l) => Segment::Line(eval_if_precise(l.offset(d, is_ccw), prec)),
            Segment::Arc(a) => Segment::Arc(a.offset(d, is_ccw)),
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            Segment::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_arc(&self) -> Option<&Arc> {
        match self {
            Segment::Arc(a) => Some(a),
            _ => None,
        }
    }
}

/// The offset operator (C3) is symbolic when `prec` is `None`, otherwise
/// endpoints are evaluated at the given precision (rounded to `full` digits
/// via round-trip through `f64`, consistent with `Precision::round_to_full`).
fn eval_if_precise(line: Line, prec: Option<&Precision>) -> Line {
    if prec.is_some() {
        Line::new(
            Vec2::new(Expr::from(line.p.x.eval_f64()), Expr::from(line.p.y.eval_f64())),
            Vec2::new(Expr::from(line.q.x.eval_f64()), Expr::from(line.q.y.eval_f64())),
        )
    } else {
        line
    }
}
