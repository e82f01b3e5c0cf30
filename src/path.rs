//! The minimal path model (C0): just enough of the "shared collaborator"
//! contract (§6.1) for the offset engine to consume and produce paths.
//! Tokenizing or re-serializing SVG path-data strings stays out of scope.

use serde::{Deserialize, Serialize};

use crate::expr::{Expr, Precision};
use crate::geometry::{Arc, Point, Vec2};

/// A single SVG path command, absolute-coordinate only (relative commands
/// are a string-syntax concern the parser collaborator already resolved
/// before handing us a `Path`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathItem {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    HorizontalLineTo { x: f64 },
    VerticalLineTo { y: f64 },
    ClosePath,
    CubicBezierTo { cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64 },
    SmoothCubicBezierTo { cx2: f64, cy2: f64, x: f64, y: f64 },
    QuadraticBezierTo { cx: f64, cy: f64, x: f64, y: f64 },
    SmoothQuadraticBezierTo { x: f64, y: f64 },
    EllipticalArcTo { rx: f64, ry: f64, rotation_deg: f64, large_arc: bool, sweep: bool, x: f64, y: f64 },
}

impl PathItem {
    /// The absolute point this item moves to, given the previous absolute
    /// point (`ClosePath` returns `prev` unchanged; the assembler tracks the
    /// subpath's start separately).
    pub fn abs_target(&self, prev: Point) -> Point {
        match *self {
            PathItem::MoveTo { x, y } | PathItem::LineTo { x, y } => Point::new(x, y),
            PathItem::HorizontalLineTo { x } => Point::new(x, prev.y),
            PathItem::VerticalLineTo { y } => Point::new(prev.x, y),
            PathItem::ClosePath => prev,
            PathItem::CubicBezierTo { x, y, .. }
            | PathItem::SmoothCubicBezierTo { x, y, .. }
            | PathItem::QuadraticBezierTo { x, y, .. }
            | PathItem::SmoothQuadraticBezierTo { x, y }
            | PathItem::EllipticalArcTo { x, y, .. } => Point::new(x, y),
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            PathItem::MoveTo { .. }
                | PathItem::LineTo { .. }
                | PathItem::HorizontalLineTo { .. }
                | PathItem::VerticalLineTo { .. }
                | PathItem::ClosePath
                | PathItem::EllipticalArcTo { .. }
        )
    }

    /// SVG endpoint-to-center arc parametrization (SVG 1.1 appendix F.6.5).
    /// Returns `None` for non-arc items, and for arcs whose radius reduces
    /// to zero (degenerate: a line joining the endpoints, per §3's "Parametric
    /// elliptical arc" invariant).
    pub fn to_geometry(&self, prev: Point, prec: Option<&Precision>) -> Option<Arc> {
        let PathItem::EllipticalArcTo { rx, ry, rotation_deg, large_arc, sweep, x, y } = *self else {
            return None;
        };
        if rx.abs() < 1e-12 || ry.abs() < 1e-12 {
            return None;
        }

        let phi = rotation_deg.to_radians();
        let (cos_phi, sin_phi) = (phi.cos(), phi.sin());
        let (x1, y1) = (prev.x, prev.y);
        let (x2, y2) = (x, y);

        let dx2 = (x1 - x2) / 2.0;
        let dy2 = (y1 - y2) / 2.0;
        let x1p = cos_phi * dx2 + sin_phi * dy2;
        let y1p = -sin_phi * dx2 + cos_phi * dy2;

        let (mut rx, mut ry) = (rx.abs(), ry.abs());
        let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        let sign = if large_arc == sweep { -1.0 } else { 1.0 };
        let num = (rx * rx * ry * ry) - (rx * rx * y1p * y1p) - (ry * ry * x1p * x1p);
        let den = (rx * rx * y1p * y1p) + (ry * ry * x1p * x1p);
        let co = sign * (num.max(0.0) / den).sqrt();

        let cxp = co * (rx * y1p / ry);
        let cyp = co * -(ry * x1p / rx);

        let cx = cos_phi * cxp - sin_phi * cyp + (x1 + x2) / 2.0;
        let cy = sin_phi * cxp + cos_phi * cyp + (y1 + y2) / 2.0;

        let angle = |ux: f64, uy: f64, vx: f64, vy: f64| -> f64 {
            let dot = ux * vx + uy * vy;
            let len = ((ux * ux + uy * uy) * (vx * vx + vy * vy)).sqrt();
            let mut ang = (dot / len).clamp(-1.0, 1.0).acos();
            if ux * vy - uy * vx < 0.0 {
                ang = -ang;
            }
            ang.to_degrees()
        };

        let ux = (x1p - cxp) / rx;
        let uy = (y1p - cyp) / ry;
        let vx = (-x1p - cxp) / rx;
        let vy = (-y1p - cyp) / ry;

        let theta0 = angle(1.0, 0.0, ux, uy);
        let mut delta = angle(ux, uy, vx, vy);
        if !sweep && delta > 0.0 {
            delta -= 360.0;
        } else if sweep && delta < 0.0 {
            delta += 360.0;
        }

        Some(Arc {
            c: Vec2::from_f64(cx, cy),
            rx: Expr::from(rx),
            ry: Expr::from(ry),
            theta0: Expr::from(theta0),
            delta_theta: Expr::from(delta),
            phi: Expr::from(rotation_deg),
        })
    }
}

/// An ordered sequence of `PathItem`s, beginning with `MoveTo` and ending
/// with `ClosePath` for a valid offset-engine input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path(pub Vec<PathItem>);

impl Path {
    pub fn new(items: Vec<PathItem>) -> Path {
        Path(items)
    }

    pub fn items(&self) -> &[PathItem] {
        &self.0
    }

    /// Absolute vertex list, one per item excluding `ClosePath` (§4.5 step
    /// 1). Each vertex is the item's `abs_target` chained off the previous
    /// one, starting from the implicit origin `(0, 0)`.
    pub fn absolute_vertices(&self) -> Vec<Point> {
        let mut prev = Point::new(0.0, 0.0);
        let mut out = Vec::with_capacity(self.0.len());
        for item in &self.0 {
            if matches!(item, PathItem::ClosePath) {
                continue;
            }
            prev = item.abs_target(prev);
            out.push(prev);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_round_trips_through_json() {
        let path = Path::new(vec![
            PathItem::MoveTo { x: 0.0, y: 0.0 },
            PathItem::EllipticalArcTo { rx: 2.0, ry: 2.0, rotation_deg: 45.0, large_arc: false, sweep: true, x: 2.0, y: 2.0 },
            PathItem::LineTo { x: 0.0, y: 2.0 },
            PathItem::ClosePath,
        ]);
        let json = serde_json::to_string(&path).expect("path should serialize");
        let round_tripped: Path = serde_json::from_str(&json).expect("path should deserialize");
        assert_eq!(path, round_tripped);
    }
}
