use crate::expr::Expr;
use crate::geometry::{Line, Vec2};

use super::Record;

/// Line-line intersection (§4.4.1). Solved parametrically; if the second
/// line is vertical, swap `(x, y)` before solving and swap the result back
/// (per P9's swap-symmetry property). Parallel + identical lines produce
/// `LineCoincident`; parallel + distinct lines produce no intersection.
///
/// The segment-acceptance rule is one-sided because the caller is always
/// joining *consecutive* path segments: `t >= 0` on the end of the first
/// segment, `u <= 1` on the start of the second.
pub fn intersect(a: &Line, b: &Line, d: Option<f64>, n: Option<&crate::expr::Precision>) -> Option<Record> {
    if b.is_vertical() && !a.is_vertical() {
        let a_swapped = swap(a);
        let b_swapped = swap(b);
        return intersect(&a_swapped, &b_swapped, d, n).map(|r| swap_record(r));
    }

    let p1 = &a.p;
    let d1 = a.direction();
    let p2 = &b.p;
    let d2 = b.direction();

    let denom = d1.cross(&d2);

    if denom.eval_f64().abs() < 1e-12 {
        // Parallel. Coincident if `p2` lies on line `a`.
        let cross = (p2.clone() - p1.clone()).cross(&d1);
        if cross.eval_f64().abs() < 1e-9 {
            return Some(Record::LineCoincident { intersection: p2.clone(), t: Expr::zero(), u: Expr::zero() });
        }
        return fallback_around(a, b, d);
    }

    let diff = p2.clone() - p1.clone();
    let t = diff.cross(&d2) / denom.clone();
    let u = diff.cross(&d1) / denom;

    if t.eval_f64() >= -1e-9 && u.eval_f64() <= 1.0 + 1e-9 {
        let intersection = a.at(t.clone());
        return Some(Record::LineLine { intersection, t, u });
    }

    fallback_around(a, b, d)
}

fn fallback_around(a: &Line, b: &Line, d: Option<f64>) -> Option<Record> {
    let d = d?;
    let ante = a.q.clone();
    let post = b.p.clone();
    let ante_extended = ante.clone() + a.direction().normalized().scale(Expr::from(d.abs()));
    let post_extended = post.clone() - b.direction().normalized().scale(Expr::from(d.abs()));
    let intersection = (ante_extended.clone() + post_extended.clone()).scale(Expr::from(0.5));
    Some(Record::LineAround {
        intersection,
        ante,
        post,
        ante_extended,
        post_extended,
    })
}

fn swap(l: &Line) -> Line {
    Line::new(Vec2::new(l.p.y.clone(), l.p.x.clone()), Vec2::new(l.q.y.clone(), l.q.x.clone()))
}

fn swap_vec2(v: Vec2) -> Vec2 {
    Vec2::new(v.y, v.x)
}

fn swap_record(r: Record) -> Record {
    match r {
        Record::LineLine { intersection, t, u } => Record::LineLine { intersection: swap_vec2(intersection), t, u },
        Record::LineCoincident { intersection, t, u } => Record::LineCoincident { intersection: swap_vec2(intersection), t, u },
        Record::LineAround { intersection, ante, post, ante_extended, post_extended } => Record::LineAround {
            intersection: swap_vec2(intersection),
            ante: swap_vec2(ante),
            post: swap_vec2(post),
            ante_extended: swap_vec2(ante_extended),
            post_extended: swap_vec2(post_extended),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn crossing_lines() {
        let a = Line::new(Vec2::from_f64(0.0, 0.0), Vec2::from_f64(2.0, 2.0));
        let b = Line::new(Vec2::from_f64(0.0, 2.0), Vec2::from_f64(2.0, 0.0));
        let r = intersect(&a, &b, None, None).unwrap();
        match r {
            Record::LineLine { intersection, .. } => {
                assert_relative_eq!(intersection.x.eval_f64(), 1.0, epsilon = 1e-9);
                assert_relative_eq!(intersection.y.eval_f64(), 1.0, epsilon = 1e-9);
            }
            other => panic!("expected LineLine, got {other:?}"),
        }
    }

    #[test]
    fn parallel_distinct_falls_back_to_around() {
        let a = Line::new(Vec2::from_f64(0.0, 0.0), Vec2::from_f64(1.0, 0.0));
        let b = Line::new(Vec2::from_f64(0.0, 1.0), Vec2::from_f64(1.0, 1.0));
        assert!(intersect(&a, &b, None, None).is_none());
        assert!(matches!(intersect(&a, &b, Some(0.1), None), Some(Record::LineAround { .. })));
    }

    #[test]
    fn vertical_second_line_is_solved_via_swap() {
        let a = Line::new(Vec2::from_f64(0.0, 0.0), Vec2::from_f64(2.0, 2.0));
        let b = Line::new(Vec2::from_f64(1.0, 0.0), Vec2::from_f64(1.0, 5.0));
        let r = intersect(&a, &b, None, None).unwrap();
        match r {
            Record::LineLine { intersection, .. } => {
                assert_relative_eq!(intersection.x.eval_f64(), 1.0, epsilon = 1e-9);
                assert_relative_eq!(intersection.y.eval_f64(), 1.0, epsilon = 1e-9);
            }
            other => panic!("expected LineLine, got {other:?}"),
        }
    }
}
