//! Bevel enumerator (C6): emits the faces (triangles, line quads, arc-bounded
//! quads) that tile the strip between the original path and its offset, per
//! §4.6. Mirrors the assembler's per-segment walk but yields faces instead
//! of a single stitched path.

use itertools::Itertools;
use log::debug;

use crate::assembler::build_segments;
use crate::error::OffsetResult;
use crate::expr::PrecisionMode;
use crate::geometry::{Arc, Point, Segment, Vec2};
use crate::intersect::{self, Ext, Record};
use crate::path::Path;

/// A closed polyline face with an outward unit normal — a triangle (ante-side
/// fan pieces) or a quadrilateral (the per-segment line strip, or the
/// closing face).
#[derive(Debug, Clone)]
pub struct BevelPolygon {
    pub vertices: Vec<Point>,
    pub normal: Vec2,
}

/// A face with two straight (radial) sides and two elliptical-arc sides: the
/// original arc segment and its offset counterpart, which (per C3) share the
/// same center and rotation.
#[derive(Debug, Clone)]
pub struct BevelArced {
    pub orig: Arc,
    pub off: Arc,
    pub locally_convex: bool,
}

#[derive(Debug, Clone)]
pub enum BevelFace {
    Polygon(BevelPolygon),
    Arced(BevelArced),
}

pub fn bevel_path(path: &Path, d: f64, prec: PrecisionMode) -> OffsetResult<Vec<BevelFace>> {
    let intersect_prec = prec.intersect_precision();
    let (built, is_ccw) = build_segments(path, d, prec.offset_precision())?;
    let n = built.len();

    let mut inter: Vec<Record> = Vec::with_capacity(n);
    for i in 0..n {
        let prev = &built[(i + n - 1) % n].off;
        let cur = &built[i].off;
        match intersect::intersect(prev, cur, Some(d), intersect_prec) {
            Some(record) => inter.push(record),
            None => {
                return Err(crate::error::OffsetError::OffsetFailure((i + n - 1) % n, i));
            }
        }
    }

    let mut faces = Vec::new();

    for i in 0..n {
        let incoming = &inter[i];
        let outgoing = &inter[(i + 1) % n];
        let orig_start = built[i].orig.start();
        let orig_end = built[i].orig.end();
        debug!("emitting bevel faces for segment {i}");

        match (&built[i].orig, &built[i].off) {
            (Segment::Arc(orig_arc), Segment::Arc(off_arc)) => {
                for tri in ante_triangles_arc(incoming, &orig_start, &orig_arc.start(), is_ccw) {
                    faces.push(tri);
                }
                faces.push(BevelFace::Arced(BevelArced {
                    orig: orig_arc.clone(),
                    off: off_arc.clone(),
                    locally_convex: orig_arc.is_locally_convex(is_ccw),
                }));
                for tri in post_triangles_arc(outgoing, &orig_end, &orig_arc.end(), is_ccw) {
                    faces.push(tri);
                }
            }
            (Segment::Line(orig_line), Segment::Line(off_line)) => {
                for tri in ante_triangles_line(incoming, &orig_start, is_ccw) {
                    faces.push(tri);
                }
                let line_offset_out = off_line.q.clone();
                let ante_pt = orig_start.clone();
                faces.push(polygon_face(
                    vec![orig_start.clone(), orig_line.q.clone(), line_offset_out, ante_pt],
                    is_ccw,
                ));
            }
            _ => unreachable!("C3's offset preserves the original segment's family"),
        }
    }

    let closing_orig = built[n - 1].orig.end();
    let closing = polygon_face(
        vec![closing_orig.clone(), inter[0].point(), inter[n - 1].point(), closing_orig],
        is_ccw,
    );
    faces.push(closing);

    Ok(faces)
}

fn polygon_face(vertices: Vec<Vec2>, is_ccw: bool) -> BevelFace {
    let normal = if vertices.len() >= 2 {
        outward_normal(&vertices[0], &vertices[1], is_ccw)
    } else {
        Vec2::from_f64(0.0, 0.0)
    };
    BevelFace::Polygon(BevelPolygon { vertices: vertices.iter().map(|v| v.to_point()).collect(), normal })
}

fn outward_normal(p0: &Vec2, p1: &Vec2, is_ccw: bool) -> Vec2 {
    let d = p1.clone() - p0.clone();
    let n = if is_ccw { Vec2::new(-d.y.clone(), d.x.clone()) } else { Vec2::new(d.y.clone(), -d.x.clone()) };
    n.normalized()
}

fn ante_triangles_arc(incoming: &Record, orig_start: &Vec2, arc_start: &Vec2, is_ccw: bool) -> Vec<BevelFace> {
    let fan = |pts: &[Vec2]| -> Vec<BevelFace> {
        pts.iter()
            .cloned()
            .tuple_windows()
            .map(|(p0, p1)| polygon_face(vec![orig_start.clone(), p0, p1], is_ccw))
            .collect()
    };
    match incoming {
        Record::LineArcExt { intersection, ext: Ext::Ante, .. } => {
            vec![polygon_face(vec![orig_start.clone(), intersection.clone(), arc_start.clone()], is_ccw)]
        }
        Record::ArcArcExt { intersection, post_intersection, .. } => {
            vec![polygon_face(vec![orig_start.clone(), intersection.clone(), post_intersection.clone()], is_ccw)]
        }
        Record::ArcArcAround { ante_intersection, ante_extended, post_extended, post_intersection, .. } => {
            fan(&[ante_intersection.clone(), ante_extended.clone(), post_extended.clone(), post_intersection.clone()])
        }
        Record::LineArcAround { ante_extended, post_extended, post_intersection, .. } => {
            fan(&[ante_extended.clone(), post_extended.clone(), post_intersection.clone()])
        }
        _ => vec![],
    }
}

fn post_triangles_arc(outgoing: &Record, orig_end: &Vec2, arc_end: &Vec2, is_ccw: bool) -> Vec<BevelFace> {
    match outgoing {
        Record::LineArcExt { intersection, ext: Ext::Post, .. } => {
            vec![polygon_face(vec![orig_end.clone(), arc_end.clone(), intersection.clone()], is_ccw)]
        }
        Record::ArcArcExt { intersection, ante_intersection, .. } => {
            vec![polygon_face(vec![orig_end.clone(), ante_intersection.clone(), intersection.clone()], is_ccw)]
        }
        _ => vec![],
    }
}

fn ante_triangles_line(incoming: &Record, orig_start: &Vec2, is_ccw: bool) -> Vec<BevelFace> {
    match incoming {
        Record::LineAround { ante_extended, post_extended, .. } => {
            vec![polygon_face(vec![orig_start.clone(), ante_extended.clone(), post_extended.clone()], is_ccw)]
        }
        Record::LineArcAround { ante_intersection, ante_extended, post_extended, .. } => {
            vec![
                polygon_face(vec![orig_start.clone(), ante_intersection.clone(), ante_extended.clone()], is_ccw),
                polygon_face(vec![orig_start.clone(), ante_extended.clone(), post_extended.clone()], is_ccw),
            ]
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Expr, PrecisionMode};
    use crate::path::PathItem;
    use approx::assert_relative_eq;

    fn line_triangle() -> Path {
        Path::new(vec![
            PathItem::MoveTo { x: 0.0, y: 0.0 },
            PathItem::LineTo { x: 1.0, y: 1.0 },
            PathItem::HorizontalLineTo { x: 0.0 },
            PathItem::ClosePath,
        ])
    }

    fn arc_path() -> Path {
        Path::new(vec![
            PathItem::MoveTo { x: 0.0, y: 0.0 },
            PathItem::EllipticalArcTo { rx: 2.0, ry: 2.0, rotation_deg: 45.0, large_arc: false, sweep: true, x: 2.0, y: 2.0 },
            PathItem::LineTo { x: 0.0, y: 2.0 },
            PathItem::ClosePath,
        ])
    }

    /// §4.6: a zero-offset line-only path has every stitch land exactly on
    /// the original shared vertex (no `LineAround` fallback, so no ante
    /// triangles), leaving one face per segment plus the closing face.
    #[test]
    fn line_only_path_emits_one_polygon_face_per_segment_plus_closing() {
        let path = line_triangle();
        let faces = bevel_path(&path, 0.0, PrecisionMode::Exact).expect("bevel should succeed");
        assert_eq!(faces.len(), 4);
        for face in &faces {
            match face {
                BevelFace::Polygon(p) => assert_eq!(p.vertices.len(), 4),
                BevelFace::Arced(_) => panic!("a line-only path should never emit an arced face"),
            }
        }
    }

    /// §4.6: a path with one arc segment and two line segments, all stitches
    /// landing exactly on shared vertices, emits exactly one `BevelArced`
    /// face (for the arc) and one plain polygon per line segment plus the
    /// closing face, with no ante/post triangles (the zero-offset corners
    /// meet the arc exactly, so `LineArcExt`/`LineArcAround` never fire).
    #[test]
    fn arc_segment_emits_exactly_one_arced_face() {
        let path = arc_path();
        let faces = bevel_path(&path, 0.0, PrecisionMode::Exact).expect("bevel should succeed");
        assert_eq!(faces.len(), 4);

        let arced: Vec<&BevelArced> = faces
            .iter()
            .filter_map(|f| match f {
                BevelFace::Arced(a) => Some(a),
                _ => None,
            })
            .collect();
        assert_eq!(arced.len(), 1);
        let arced = arced[0];
        assert_relative_eq!(arced.orig.rx.eval_f64(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(arced.orig.ry.eval_f64(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(arced.off.rx.eval_f64(), 2.0, epsilon = 1e-9);
        assert_relative_eq!(arced.off.ry.eval_f64(), 2.0, epsilon = 1e-9);
        assert!(arced.locally_convex);

        let polygons = faces.iter().filter(|f| matches!(f, BevelFace::Polygon(_))).count();
        assert_eq!(polygons, 3);
    }

    /// §4.6 ante-triangle emission: when two consecutive offset lines
    /// diverge and must be bridged, `ante_triangles_line` emits exactly one
    /// triangle spanning `orig_start`, the ante-extended point, and the
    /// post-extended point, per the `LineAround` fallback formula.
    #[test]
    fn ante_triangles_line_emits_one_triangle_for_a_line_around_record() {
        let orig_start = Vec2::from_f64(0.0, 0.0);
        let record = Record::LineAround {
            intersection: Vec2::from_f64(0.5, 0.5),
            ante: Vec2::from_f64(0.0, 0.0),
            post: Vec2::from_f64(1.0, 0.0),
            ante_extended: Vec2::from_f64(-0.2, 0.0),
            post_extended: Vec2::from_f64(1.2, 0.0),
        };
        let tris = ante_triangles_line(&record, &orig_start, true);
        assert_eq!(tris.len(), 1);
        match &tris[0] {
            BevelFace::Polygon(p) => {
                assert_eq!(p.vertices.len(), 3);
                assert_relative_eq!(p.vertices[0].x, 0.0, epsilon = 1e-9);
                assert_relative_eq!(p.vertices[0].y, 0.0, epsilon = 1e-9);
                assert_relative_eq!(p.vertices[1].x, -0.2, epsilon = 1e-9);
                assert_relative_eq!(p.vertices[2].x, 1.2, epsilon = 1e-9);
            }
            BevelFace::Arced(_) => panic!("expected a polygon face"),
        }
    }

    /// §4.6 post-triangle emission for an arc: `LineArcExt { ext: Post, .. }`
    /// yields the triangle `[orig_end, arc_end, intersection]`.
    #[test]
    fn post_triangles_arc_emits_one_triangle_for_a_line_arc_ext_record() {
        let orig_end = Vec2::from_f64(2.0, 2.0);
        let arc_end = Vec2::from_f64(1.9, 2.0);
        let record = Record::LineArcExt {
            intersection: Vec2::from_f64(2.1, 2.1),
            t: Expr::zero(),
            u: Expr::zero(),
            post: true,
            theta: Expr::zero(),
            ext: Ext::Post,
        };
        let tris = post_triangles_arc(&record, &orig_end, &arc_end, true);
        assert_eq!(tris.len(), 1);
        match &tris[0] {
            BevelFace::Polygon(p) => {
                assert_eq!(p.vertices.len(), 3);
                assert_relative_eq!(p.vertices[0].x, 2.0, epsilon = 1e-9);
                assert_relative_eq!(p.vertices[1].x, 1.9, epsilon = 1e-9);
                assert_relative_eq!(p.vertices[2].x, 2.1, epsilon = 1e-9);
            }
            BevelFace::Arced(_) => panic!("expected a polygon face"),
        }
    }
}
