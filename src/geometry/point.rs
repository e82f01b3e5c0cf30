use serde::{Deserialize, Serialize};
use std::fmt;

use crate::expr::Expr;

/// A decimal-coordinate point, used at system boundaries (the `Path`
/// interface) and for "point-like" outputs (intersection results). Exact
/// equality is coordinate-wise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Exact `Decimal -> rational` conversion via textual form (§3's
    /// "conversion into Vec2 is exact").
    pub fn to_vec2(self) -> super::Vec2 {
        super::Vec2::new(Expr::dec_to_rat(self.x), Expr::dec_to_rat(self.y))
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", fmt_coord(self.x), fmt_coord(self.y))
    }
}

/// SVG-style coordinate formatting: drop trailing zeros, collapse `-0` to `0`.
pub fn fmt_coord(v: f64) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    let s = format!("{:.16}", v);
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
