use crate::expr::Expr;

use super::{Matrix2, Vec2};

/// A parametric elliptical arc `(c, r, theta0, delta_theta, phi)`, per the
/// distilled spec's §3. `E(theta) = c + R(phi) . (rx cos theta, ry sin
/// theta)`, with `theta` measured in degrees before rotation. The arc covers
/// `[theta0, theta0 + delta_theta]`, with `sign(delta_theta)` encoding sweep
/// direction.
#[derive(Debug, Clone)]
pub struct Arc {
    pub c: Vec2,
    pub rx: Expr,
    pub ry: Expr,
    pub theta0: Expr,
    pub delta_theta: Expr,
    pub phi: Expr,
}

impl Arc {
    pub fn theta1(&self) -> Expr {
        self.theta0.clone() + self.delta_theta.clone()
    }

    pub fn sweep_positive(&self) -> bool {
        self.delta_theta.eval_f64() >= 0.0
    }

    /// `E(theta)`.
    pub fn point(&self, theta: &Expr) -> Vec2 {
        let r = Matrix2::rotation_deg(&self.phi);
        let local = Vec2::new(self.rx.clone() * theta.clone().cos_deg(), self.ry.clone() * theta.clone().sin_deg());
        self.c.clone() + r.apply(&local)
    }

    /// `(p(theta), p'(theta))`, tangent sign flipped when `delta_theta < 0`
    /// so the tangent at `theta0` points *into* the arc and the tangent at
    /// `theta1` points *out of* it.
    pub fn point_and_tangent(&self, theta: &Expr) -> (Vec2, Vec2) {
        let p = self.point(theta);
        let r = Matrix2::rotation_deg(&self.phi);
        let local_d = Vec2::new(
            -self.rx.clone() * theta.clone().sin_deg(),
            self.ry.clone() * theta.clone().cos_deg(),
        );
        let mut d = r.apply(&local_d);
        if !self.sweep_positive() {
            d = -d;
        }
        (p, d.normalized())
    }

    pub fn start(&self) -> Vec2 {
        self.point(&self.theta0)
    }

    pub fn end(&self) -> Vec2 {
        self.point(&self.theta1())
    }

    /// Tangent half-line backwards from `theta0` ("ante"): the arc's
    /// incoming-tangent direction negated.
    pub fn ante_tangent_line(&self) -> super::Line {
        let (p, t) = self.point_and_tangent(&self.theta0);
        super::Line::new(p.clone(), p - t)
    }

    /// Tangent half-line forwards from `theta1` ("post").
    pub fn post_tangent_line(&self) -> super::Line {
        let (p, t) = self.point_and_tangent(&self.theta1());
        super::Line::new(p.clone(), p + t)
    }

    /// Whether `theta mod 360` lies on `[theta0, theta0 + delta_theta]`
    /// (mod 360), handling wrap-around and `sign(delta_theta)`.
    pub fn angle_condition(&self, theta: &Expr) -> bool {
        let norm = |x: f64| {
            let m = x.rem_euclid(360.0);
            m
        };
        let t0 = norm(self.theta0.eval_f64());
        let dt = self.delta_theta.eval_f64();
        let t = norm(theta.eval_f64());
        let span = dt.abs().min(360.0);
        if dt >= 0.0 {
            let end = t0 + span;
            if end <= 360.0 {
                t >= t0 - 1e-9 && t <= end + 1e-9
            } else {
                t >= t0 - 1e-9 || t <= end - 360.0 + 1e-9
            }
        } else {
            let start = t0 - span;
            if start >= 0.0 {
                t <= t0 + 1e-9 && t >= start - 1e-9
            } else {
                t <= t0 + 1e-9 || t >= start + 360.0 - 1e-9
            }
        }
    }

    /// Local convexity test: locally convex with respect to the enclosing
    /// polygon orientation when `sign(delta_theta) < 0 <=> is_ccw`.
    pub fn is_locally_convex(&self, is_ccw: bool) -> bool {
        let neg_sweep = self.delta_theta.eval_f64() < 0.0;
        neg_sweep == is_ccw
    }

    /// Offset by `d`: `delta_r = -d` if locally convex, else `+d`. Center
    /// and angular extents are preserved by construction; for non-circular
    /// ellipses this is a documented approximation (distilled spec's Open
    /// Question #1), not the true parallel curve.
    pub fn offset(&self, d: Expr, is_ccw: bool) -> Arc {
        let delta_r = if self.is_locally_convex(is_ccw) { -d } else { d };
        Arc {
            c: self.c.clone(),
            rx: self.rx.clone() + delta_r.clone(),
            ry: self.ry.clone() + delta_r,
            theta0: self.theta0.clone(),
            delta_theta: self.delta_theta.clone(),
            phi: self.phi.clone(),
        }
    }

    /// Forward map `unit-circle -> ellipse`.
    pub fn transform(&self, unit: &Vec2) -> Vec2 {
        let r = Matrix2::rotation_deg(&self.phi);
        let scaled = Vec2::new(self.rx.clone() * unit.x.clone(), self.ry.clone() * unit.y.clone());
        self.c.clone() + r.apply(&scaled)
    }

    /// Inverse map `ellipse -> unit-circle`.
    pub fn inverse_transform(&self, p: &Vec2) -> Vec2 {
        let shifted = p.clone() - self.c.clone();
        let r_inv = Matrix2::rotation_deg(&self.phi).transposed();
        let local = r_inv.apply(&shifted);
        Vec2::new(local.x / self.rx.clone(), local.y / self.ry.clone())
    }

    /// Implicit form `F(x,y) = u^2 + v^2 - 1` for `(u,v)` the inverse-mapped
    /// point.
    pub fn implicit(&self, p: &Vec2) -> Expr {
        let uv = self.inverse_transform(p);
        uv.x.clone() * uv.x.clone() + uv.y.clone() * uv.y.clone() - Expr::one()
    }

    /// True when the arc's radii are both (numerically) zero — reduces to
    /// the line segment joining its endpoints.
    pub fn is_degenerate(&self) -> bool {
        self.rx.eval_f64().abs() < 1e-12 && self.ry.eval_f64().abs() < 1e-12
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quarter_arc() -> Arc {
        // theta in [30, 120], a 90-degree sweep, on a rotated ellipse.
        Arc {
            c: Vec2::from_f64(1.0, -2.0),
            rx: Expr::from(3.0),
            ry: Expr::from(1.5),
            theta0: Expr::from(30.0),
            delta_theta: Expr::from(90.0),
            phi: Expr::from(20.0),
        }
    }

    fn reverse_sweep_arc() -> Arc {
        // delta_theta < 0, wrapping back through 0.
        Arc {
            c: Vec2::from_f64(0.0, 0.0),
            rx: Expr::one(),
            ry: Expr::one(),
            theta0: Expr::from(10.0),
            delta_theta: Expr::from(-60.0),
            phi: Expr::zero(),
        }
    }

    /// P7: `angle_condition(theta)` holds iff `theta mod 360` lies on
    /// `[min(theta0,theta1), max(theta0,theta1)] mod 360`, swept across
    /// `[theta0 - 360, theta0 + 720]` with correct wrap-around.
    #[test]
    fn angle_condition_matches_range_across_full_sweep() {
        let arc = quarter_arc();
        let t0 = arc.theta0.eval_f64();
        let mut theta = t0 - 360.0;
        while theta <= t0 + 720.0 {
            let m = theta.rem_euclid(360.0);
            let expected = (30.0..=120.0).contains(&m);
            assert_eq!(
                arc.angle_condition(&Expr::from(theta)),
                expected,
                "theta={theta} (mod 360 = {m})"
            );
            theta += 5.0;
        }
    }

    #[test]
    fn angle_condition_handles_negative_sweep_wrap_around() {
        let arc = reverse_sweep_arc();
        // Range is [theta0 + delta_theta, theta0] = [-50, 10], i.e. mod 360
        // it wraps through 0: [310, 360) union [0, 10].
        assert!(arc.angle_condition(&Expr::from(0.0)));
        assert!(arc.angle_condition(&Expr::from(10.0)));
        assert!(arc.angle_condition(&Expr::from(350.0)));
        assert!(arc.angle_condition(&Expr::from(311.0)));
        assert!(!arc.angle_condition(&Expr::from(180.0)));
        assert!(!arc.angle_condition(&Expr::from(11.0)));
    }

    #[test]
    fn angle_condition_holds_at_both_endpoints() {
        let arc = quarter_arc();
        assert!(arc.angle_condition(&arc.theta0));
        assert!(arc.angle_condition(&arc.theta1()));
    }

    /// P8: `transform(transform(p, inverse=false), inverse=true) == p`.
    #[test]
    fn transform_round_trips_through_inverse() {
        let arc = quarter_arc();
        for (u, v) in [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.6, 0.8), (-0.3, -0.95)] {
            let unit = Vec2::from_f64(u, v);
            let ellipse_pt = arc.transform(&unit);
            let back = arc.inverse_transform(&ellipse_pt);
            assert_relative_eq!(back.x.eval_f64(), u, epsilon = 1e-9);
            assert_relative_eq!(back.y.eval_f64(), v, epsilon = 1e-9);
        }
    }

    #[test]
    fn inverse_transform_round_trips_through_transform() {
        let arc = quarter_arc();
        let p = Vec2::from_f64(2.5, -0.75);
        let unit = arc.inverse_transform(&p);
        let back = arc.transform(&unit);
        assert_relative_eq!(back.x.eval_f64(), p.x.eval_f64(), epsilon = 1e-9);
        assert_relative_eq!(back.y.eval_f64(), p.y.eval_f64(), epsilon = 1e-9);
    }

    #[test]
    fn start_and_end_satisfy_implicit_equation() {
        let arc = quarter_arc();
        assert_relative_eq!(arc.implicit(&arc.start()).eval_f64(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(arc.implicit(&arc.end()).eval_f64(), 0.0, epsilon = 1e-9);
    }
}
