use ordered_float::OrderedFloat;

use crate::expr::roots::quadratic;
use crate::expr::{Expr, Precision};
use crate::geometry::{Arc, Line, Vec2};

use super::{solve_lines, Ext, Record};

/// Line-arc intersection (§4.4.2). First tests the relevant endpoint
/// tangent half-line (ante tangent at `θ₀` if the line precedes the arc,
/// post tangent at `θ₁` otherwise) — a hit there is a tangent-extension
/// intersection, `LineArcExt`. Failing that, the line is mapped into the
/// arc's unit-circle frame via `Arc::inverse_transform`, reducing "does this
/// line cross the ellipse" to a quadratic in the line's parameter `t`. Real
/// roots are filtered by the one-sided segment rule (as in `line_line`) and
/// the arc's `angle_condition`.
///
/// `line_before_arc` tells which side of the joint the line sits on: `true`
/// means the line is the earlier path segment (so we accept `t >= 0`, no
/// upper bound — the arc's `angle_condition` does the rest); `false` means
/// the arc comes first (accept `t <= 1`).
pub fn intersect(line: &Line, arc: &Arc, line_before_arc: bool, d: Option<f64>, n: Option<&Precision>) -> Option<Record> {
    if let Some(record) = tangent_extension(line, arc, line_before_arc) {
        return Some(record);
    }

    let p = arc.inverse_transform(&line.p);
    let q = arc.inverse_transform(&line.q);
    let dir = q - p.clone();

    let a = dir.dot(&dir);
    if a.eval_f64().abs() < 1e-15 {
        return fallback_around(line, arc, line_before_arc, d);
    }
    let b = p.dot(&dir) * 2.0;
    let c = p.dot(&p) - Expr::one();

    let mut roots = quadratic(b / a.clone(), c / a).all();
    // Deterministic iteration order (Design Notes' tie-break convention):
    // smallest `t` first, so the accepted root is the one nearest the
    // line's start.
    roots.sort_by_key(|root| OrderedFloat(root.re.eval_f64()));

    for root in roots {
        if !root.is_real(n) {
            continue;
        }
        let t = root.re;
        let local = p.clone() + dir.scale(t.clone());
        let theta = Expr::atan2_deg(local.y.clone(), local.x.clone());
        if !arc.angle_condition(&theta) {
            continue;
        }
        let tv = t.eval_f64();
        let in_range = if line_before_arc { tv >= -1e-9 } else { tv <= 1.0 + 1e-9 };
        if !in_range {
            continue;
        }
        let intersection = line.at(t.clone());
        return Some(Record::LineArc { intersection, t, theta });
    }

    fallback_around(line, arc, line_before_arc, d)
}

/// The ante/post tangent half-line test (spec's first bullet per direction).
fn tangent_extension(line: &Line, arc: &Arc, line_before_arc: bool) -> Option<Record> {
    let (tangent, ext) = if line_before_arc {
        (arc.ante_tangent_line(), Ext::Ante)
    } else {
        (arc.post_tangent_line(), Ext::Post)
    };
    let (t, u, intersection) = solve_lines(line, &tangent)?;
    let accepted = if line_before_arc {
        t.eval_f64() >= -1e-9 && u.eval_f64() > 1e-9
    } else {
        t.eval_f64() <= 1.0 + 1e-9 && u.eval_f64() > 1e-9
    };
    if !accepted {
        return None;
    }
    let theta = if matches!(ext, Ext::Ante) { arc.theta0.clone() } else { arc.theta1() };
    Some(Record::LineArcExt { intersection, t, u, post: !line_before_arc, theta, ext })
}

/// Builds the bridging record from whichever endpoints actually fail to
/// meet: when the line precedes the arc, the line's end is the "ante" side
/// and the arc's start (`theta0`) is the "post" side; when the arc precedes
/// the line, the arc's end (`theta1`) is "ante" and the line's start is
/// "post" — matching `intersect`'s caller convention of `(prev, cur)`.
fn fallback_around(line: &Line, arc: &Arc, line_before_arc: bool, d: Option<f64>) -> Option<Record> {
    let d = d?;
    let dabs = Expr::from(d.abs());
    let (ante_intersection, ante_extended, post_intersection, post_extended) = if line_before_arc {
        let ante_intersection = line.q.clone();
        let ante_extended = ante_intersection.clone() + line.direction().normalized().scale(dabs.clone());
        let post_intersection = arc.start();
        let (arc_p, arc_t) = arc.point_and_tangent(&arc.theta0);
        let post_extended = arc_p - arc_t.scale(dabs);
        (ante_intersection, ante_extended, post_intersection, post_extended)
    } else {
        let ante_intersection = arc.end();
        let (arc_p, arc_t) = arc.point_and_tangent(&arc.theta1());
        let ante_extended = arc_p + arc_t.scale(dabs.clone());
        let post_intersection = line.p.clone();
        let post_extended = post_intersection.clone() - line.direction().normalized().scale(dabs);
        (ante_intersection, ante_extended, post_intersection, post_extended)
    };
    let intersection = (ante_extended.clone() + post_extended.clone()).scale(Expr::from(0.5));
    Some(Record::LineArcAround {
        intersection,
        ante_intersection,
        post_intersection,
        ante_extended,
        post_extended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_circle() -> Arc {
        Arc {
            c: Vec2::from_f64(0.0, 0.0),
            rx: Expr::one(),
            ry: Expr::one(),
            theta0: Expr::from_i64(0),
            delta_theta: Expr::from_i64(360),
            phi: Expr::zero(),
        }
    }

    #[test]
    fn horizontal_line_crosses_unit_circle() {
        let arc = unit_circle();
        let line = Line::new(Vec2::from_f64(-2.0, 0.0), Vec2::from_f64(2.0, 0.0));
        let r = intersect(&line, &arc, true, None, None).unwrap();
        match r {
            Record::LineArc { intersection, .. } => {
                assert_relative_eq!(intersection.y.eval_f64(), 0.0, epsilon = 1e-9);
                assert!((intersection.x.eval_f64().abs() - 1.0).abs() < 1e-9);
            }
            other => panic!("expected LineArc, got {other:?}"),
        }
    }

    #[test]
    fn missing_line_falls_back_to_around() {
        let arc = unit_circle();
        let line = Line::new(Vec2::from_f64(-2.0, 5.0), Vec2::from_f64(2.0, 5.0));
        assert!(intersect(&line, &arc, true, None, None).is_none());
        assert!(matches!(intersect(&line, &arc, true, Some(0.1), None), Some(Record::LineArcAround { .. })));
    }
}
