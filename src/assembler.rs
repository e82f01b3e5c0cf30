//! Path offset assembler (C5): walks the cyclic list of offset segments,
//! stitching consecutive ones with the intersection records from C4, and
//! emits the offset path per §4.5.

use log::{debug, error};

use crate::error::{OffsetError, OffsetResult};
use crate::expr::{Expr, Precision, PrecisionMode};
use crate::geometry::{signed_area, Arc, Line, Segment, Vec2};
use crate::intersect::{self, Ext, Record};
use crate::path::{Path, PathItem};

pub(crate) struct Built {
    pub(crate) orig: Segment,
    pub(crate) off: Segment,
}

/// `offset_path(path, d, prec)`: §6.2's entry point. `prec` selects one of
/// the four modes documented on `PrecisionMode` — in particular, "auto" and
/// "auto-intersections" differ in whether the automatic `Precision` reaches
/// the offset operator (C3) or only the intersection engine (C4).
pub fn offset_path(path: &Path, d: f64, prec: PrecisionMode) -> OffsetResult<Path> {
    let intersect_prec = prec.intersect_precision();
    let (built, _is_ccw) = build_segments(path, d, prec.offset_precision())?;
    let n = built.len();

    let mut inter: Vec<Record> = Vec::with_capacity(n);
    for i in 0..n {
        let prev = &built[(i + n - 1) % n].off;
        let cur = &built[i].off;
        match intersect::intersect(prev, cur, Some(d), intersect_prec) {
            Some(record) => inter.push(record),
            None => {
                error!("offset failure stitching offsets {} and {}", (i + n - 1) % n, i);
                return Err(OffsetError::OffsetFailure((i + n - 1) % n, i));
            }
        }
    }

    let mut items = Vec::new();
    items.push(PathItem::MoveTo { x: inter[0].point().x.eval_f64(), y: inter[0].point().y.eval_f64() });

    for i in 0..n {
        let incoming = &inter[i];
        let outgoing = &inter[(i + 1) % n];
        debug!("stitching segment {i}: incoming={incoming:?} outgoing={outgoing:?}");

        match &built[i].off {
            Segment::Arc(offset_arc) => {
                for v in arc_ante_vertices(incoming) {
                    items.push(line_to(&v));
                }
                let exit = arc_exit_point(outgoing);
                let (large_arc, sweep) = arc_flags(offset_arc);
                items.push(PathItem::EllipticalArcTo {
                    rx: offset_arc.rx.eval_f64(),
                    ry: offset_arc.ry.eval_f64(),
                    rotation_deg: offset_arc.phi.eval_f64(),
                    large_arc,
                    sweep,
                    x: exit.x.eval_f64(),
                    y: exit.y.eval_f64(),
                });
                for v in arc_post_vertices(outgoing) {
                    items.push(line_to(&v));
                }
            }
            Segment::Line(_) => {
                for v in line_ante_vertices(incoming) {
                    items.push(line_to(&v));
                }
                let exit = line_exit_point(outgoing);
                items.push(line_to(&exit));
            }
        }
    }

    items.push(PathItem::ClosePath);
    Ok(Path::new(items))
}

fn line_to(v: &Vec2) -> PathItem {
    PathItem::LineTo { x: v.x.eval_f64(), y: v.y.eval_f64() }
}

fn arc_ante_vertices(incoming: &Record) -> Vec<Vec2> {
    match incoming {
        Record::LineArcExt { intersection, ext: Ext::Ante, .. } => vec![intersection.clone()],
        Record::ArcArcAround { ante_intersection, ante_extended, post_extended, .. } => {
            vec![ante_intersection.clone(), ante_extended.clone(), post_extended.clone()]
        }
        Record::LineArcAround { ante_intersection, ante_extended, post_extended, .. } => {
            vec![ante_intersection.clone(), ante_extended.clone(), post_extended.clone()]
        }
        _ => vec![],
    }
}

fn arc_post_vertices(outgoing: &Record) -> Vec<Vec2> {
    match outgoing {
        Record::LineArcExt { intersection, ext: Ext::Post, .. } => vec![intersection.clone()],
        Record::ArcArcExt { intersection, .. } => vec![intersection.clone()],
        _ => vec![],
    }
}

fn line_ante_vertices(incoming: &Record) -> Vec<Vec2> {
    match incoming {
        Record::LineAround { ante_extended, .. } => vec![ante_extended.clone()],
        Record::LineArcAround { ante_intersection, ante_extended, .. } => {
            vec![ante_intersection.clone(), ante_extended.clone()]
        }
        _ => vec![],
    }
}

/// For a line offset exit: `ante_extended` for any "...Around" outgoing
/// variant, else the plain `intersection`.
fn line_exit_point(outgoing: &Record) -> Vec2 {
    match outgoing {
        Record::LineAround { ante_extended, .. }
        | Record::LineArcAround { ante_extended, .. }
        | Record::ArcArcAround { ante_extended, .. } => ante_extended.clone(),
        other => other.point(),
    }
}

/// For an arc offset exit: per-variant selection (§4.5 "Outgoing-point rules").
fn arc_exit_point(outgoing: &Record) -> Vec2 {
    match outgoing {
        Record::LineArcExt { intersection, .. } => intersection.clone(),
        Record::ArcArcExt { ante_intersection, .. } => ante_intersection.clone(),
        Record::LineArcAround { ante_intersection, .. } | Record::ArcArcAround { ante_intersection, .. } => {
            ante_intersection.clone()
        }
        other => other.point(),
    }
}

fn arc_flags(arc: &Arc) -> (bool, bool) {
    let delta = arc.delta_theta.eval_f64();
    (delta.abs() > 180.0, delta >= 0.0)
}

/// Builds the cyclic list of original/offset segment pairs (§4.5 steps 1-3)
/// after validating the path's shape. Shared with the bevel enumerator
/// (C6), which needs the original segments too.
pub(crate) fn build_segments(path: &Path, d: f64, prec: Option<&Precision>) -> OffsetResult<(Vec<Built>, bool)> {
    let items = path.items();
    if items.len() < 2 {
        return Err(OffsetError::InvalidPath("path has fewer than 2 items".into()));
    }
    if !matches!(items[0], PathItem::MoveTo { .. }) {
        return Err(OffsetError::InvalidPath("path must begin with MoveTo".into()));
    }
    if !matches!(items[items.len() - 1], PathItem::ClosePath) {
        return Err(OffsetError::InvalidPath("path must end with ClosePath".into()));
    }
    for item in items {
        if !item.is_supported() {
            return Err(OffsetError::InvalidPath(format!("unsupported path command: {item:?}")));
        }
    }

    let drawing_items = &items[1..items.len() - 1];
    let pts = path.absolute_vertices();
    let n = pts.len();
    if n < 1 {
        return Err(OffsetError::InvalidPath("path has no segments".into()));
    }

    let is_ccw = signed_area(&pts) < 0.0;
    let d_expr = Expr::from(d);

    let mut built = Vec::with_capacity(n);
    for i in 0..n {
        let start = pts[i];
        let end = pts[(i + 1) % n];
        let orig = if i < n - 1 {
            match drawing_items[i].to_geometry(start, prec) {
                Some(arc) => Segment::Arc(arc),
                None => Segment::Line(Line::new(start.to_vec2(), end.to_vec2())),
            }
        } else {
            Segment::Line(Line::new(start.to_vec2(), end.to_vec2()))
        };
        let off = orig.offset(d_expr.clone(), is_ccw, prec);
        built.push(Built { orig, off });
    }

    Ok((built, is_ccw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// P3: `offset_path(path, 0)` retraces the input's vertex cycle exactly
    /// (the output always closes with an explicit final edge back to the
    /// start, so it carries one more vertex than the input's implicit-close
    /// list; that last vertex must equal the first).
    #[test]
    fn zero_offset_preserves_line_vertices() {
        let path = Path::new(vec![
            PathItem::MoveTo { x: 0.0, y: 0.0 },
            PathItem::LineTo { x: 1.0, y: 1.0 },
            PathItem::HorizontalLineTo { x: 0.0 },
            PathItem::ClosePath,
        ]);
        let out = offset_path(&path, 0.0, PrecisionMode::Exact).expect("zero offset should succeed");
        let want = path.absolute_vertices();
        let got = out.absolute_vertices();
        assert_eq!(got.len(), want.len() + 1);
        for (g, w) in got.iter().zip(want.iter()) {
            assert_relative_eq!(g.x, w.x, epsilon = 1e-9);
            assert_relative_eq!(g.y, w.y, epsilon = 1e-9);
        }
        let last = got.last().unwrap();
        assert_relative_eq!(last.x, want[0].x, epsilon = 1e-9);
        assert_relative_eq!(last.y, want[0].y, epsilon = 1e-9);
    }

    #[test]
    fn zero_offset_preserves_arc_radii() {
        let path = Path::new(vec![
            PathItem::MoveTo { x: 0.0, y: 0.0 },
            PathItem::EllipticalArcTo { rx: 2.0, ry: 2.0, rotation_deg: 45.0, large_arc: false, sweep: true, x: 2.0, y: 2.0 },
            PathItem::LineTo { x: 0.0, y: 2.0 },
            PathItem::ClosePath,
        ]);
        let out = offset_path(&path, 0.0, PrecisionMode::Exact).expect("zero offset should succeed");
        let arc = out
            .items()
            .iter()
            .find_map(|item| match item {
                PathItem::EllipticalArcTo { rx, ry, .. } => Some((*rx, *ry)),
                _ => None,
            })
            .expect("offset path should contain an arc");
        assert_relative_eq!(arc.0, 2.0, epsilon = 1e-9);
        assert_relative_eq!(arc.1, 2.0, epsilon = 1e-9);
    }
}
