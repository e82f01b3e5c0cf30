use crate::expr::roots::{polynomial_roots, quadratic};
use crate::expr::{is_zero, res_y, Expr, Poly, Precision};
use crate::geometry::{Arc, Vec2};

use super::{solve_lines, Record};

/// Arc-arc intersection (§4.4.3). Each ellipse's implicit equation expands
/// to a bivariate quadratic `A x^2 + B xy + C y^2 + D x + E y + F = 0`.
/// Treating both as degree-2 polynomials in `y` with `x`-polynomial
/// coefficients and eliminating `y` via the Sylvester resultant (`res_y`)
/// yields a degree-<=4 polynomial in `x`, whose real roots are the
/// candidate intersections' `x` coordinates (per the distilled spec's
/// Design Notes on why the quartic solver exists).
pub fn intersect(a: &Arc, b: &Arc, d: Option<f64>, n: Option<&Precision>) -> Option<Record> {
    let (aa, ba, ca, da, ea, fa) = implicit_coeffs(a);
    let (ab, bb, cb, db, eb, fb) = implicit_coeffs(b);

    let f = [Poly::constant(ca), Poly(vec![ba, ea]), Poly(vec![aa, da, fa])];
    let g = [Poly::constant(cb), Poly(vec![bb, eb]), Poly(vec![ab, db, fb])];

    let resultant = res_y(&f, &g, n).trimmed(n);

    if resultant.0.len() == 1 {
        // Constant resultant: zero means the two arcs share a supporting
        // ellipse (coincident); emit the conventional bridging point at the
        // end of the first arc. Non-zero means the supporting ellipses
        // never meet at all, so there is no interior root to search for —
        // fall straight through to the tangent-extension test below.
        if is_zero(&resultant.0[0], n) {
            return Some(Record::ArcArc { intersection: a.end(), theta0: a.theta1(), theta1: b.theta0.clone() });
        }
    } else if let Ok(xs) = polynomial_roots(&resultant.into_coeffs(), true, n) {
        let (aa, ba, ca, da, ea, fa) = implicit_coeffs(a);
        for (x, _mult) in xs {
            for y in solve_y(&ca, &ba, &ea, &aa, &da, &fa, &x, n) {
                let p = Vec2::new(x.clone(), y);
                if !is_zero(&b.implicit(&p), n) {
                    continue;
                }
                let theta0 = arc_angle(a, &p);
                let theta1 = arc_angle(b, &p);
                if a.angle_condition(&theta0) && b.angle_condition(&theta1) {
                    return Some(Record::ArcArc { intersection: p, theta0, theta1 });
                }
            }
        }
    }

    if let Some(record) = tangent_extension(a, b) {
        return Some(record);
    }

    fallback_around(a, b, d)
}

/// Outgoing tangent of `a` (forward from its `θ₁`) against the incoming
/// tangent of `b` (backward from its `θ₀`).
fn tangent_extension(a: &Arc, b: &Arc) -> Option<Record> {
    let post = a.post_tangent_line();
    let ante = b.ante_tangent_line();
    let (t, u, intersection) = solve_lines(&post, &ante)?;
    if t.eval_f64() > 1e-9 && u.eval_f64() > 1e-9 {
        return Some(Record::ArcArcExt { intersection, t, u, ante_intersection: a.end(), post_intersection: b.start() });
    }
    None
}

/// `A x^2 + B xy + C y^2 + D x + E y + F` for an arc's implicit ellipse
/// equation, derived from `u = cosφ(x-cx) + sinφ(y-cy)`, `v = -sinφ(x-cx) +
/// cosφ(y-cy)`, `F = u²/rx² + v²/ry² - 1`.
fn implicit_coeffs(arc: &Arc) -> (Expr, Expr, Expr, Expr, Expr, Expr) {
    let cos = arc.phi.clone().cos_deg();
    let sin = arc.phi.clone().sin_deg();
    let cx = arc.c.x.clone();
    let cy = arc.c.y.clone();
    let rx2 = arc.rx.clone() * arc.rx.clone();
    let ry2 = arc.ry.clone() * arc.ry.clone();

    let a1 = cos.clone();
    let a2 = sin.clone();
    let a3 = -(cos.clone() * cx.clone() + sin.clone() * cy.clone());

    let b1 = -sin.clone();
    let b2 = cos.clone();
    let b3 = sin.clone() * cx - cos.clone() * cy;

    let a = a1.clone() * a1.clone() / rx2.clone() + b1.clone() * b1.clone() / ry2.clone();
    let bcoef = a1.clone() * a2.clone() * 2.0 / rx2.clone() + b1.clone() * b2.clone() * 2.0 / ry2.clone();
    let c = a2.clone() * a2.clone() / rx2.clone() + b2.clone() * b2.clone() / ry2.clone();
    let dcoef = a1 * a3.clone() * 2.0 / rx2.clone() + b1 * b3.clone() * 2.0 / ry2.clone();
    let ecoef = a2 * a3.clone() * 2.0 / rx2.clone() + b2 * b3.clone() * 2.0 / ry2.clone();
    let fcoef = a3.clone() * a3 / rx2 + b3.clone() * b3 / ry2 - Expr::one();

    (a, bcoef, c, dcoef, ecoef, fcoef)
}

/// Solve `C y^2 + (Bx + E) y + (A x^2 + Dx + F) = 0` for real `y`, given a
/// candidate `x`.
fn solve_y(c: &Expr, b: &Expr, e: &Expr, a: &Expr, d: &Expr, f: &Expr, x: &Expr, n: Option<&Precision>) -> Vec<Expr> {
    let c0 = a.clone() * x.clone() * x.clone() + d.clone() * x.clone() + f.clone();
    let c1 = b.clone() * x.clone() + e.clone();
    if c.eval_f64().abs() < 1e-12 {
        if c1.eval_f64().abs() < 1e-12 {
            return vec![];
        }
        return vec![-c0 / c1];
    }
    quadratic(c1 / c.clone(), c0 / c.clone())
        .all()
        .into_iter()
        .filter(|root| root.is_real(n))
        .map(|root| root.re)
        .collect()
}

fn arc_angle(arc: &Arc, p: &Vec2) -> Expr {
    let local = arc.inverse_transform(p);
    Expr::atan2_deg(local.y, local.x)
}

fn fallback_around(a: &Arc, b: &Arc, d: Option<f64>) -> Option<Record> {
    let d = d?;
    let ante_intersection = a.end();
    let post_intersection = b.start();
    let (ante_p, ante_t) = a.point_and_tangent(&a.theta1());
    let (post_p, post_t) = b.point_and_tangent(&b.theta0);
    let ante_extended = ante_p + ante_t.scale(Expr::from(d.abs()));
    let post_extended = post_p - post_t.scale(Expr::from(d.abs()));
    let intersection = (ante_extended.clone() + post_extended.clone()).scale(Expr::from(0.5));
    Some(Record::ArcArcAround {
        intersection,
        ante_intersection,
        post_intersection,
        ante_extended,
        post_extended,
    })
}
