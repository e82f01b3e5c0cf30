//! Literal end-to-end scenarios: a handful of closed paths (lines and
//! elliptical arcs) offset by a fixed `d = 0.1`, checked against hand-derived
//! expected vertices.

use approx::assert_relative_eq;
use test_log::test;

use svg_path_offset::{offset_path, Path, PathItem, PrecisionMode};

fn line_to(x: f64, y: f64) -> PathItem {
    PathItem::LineTo { x, y }
}

fn assert_point(got: (f64, f64), want: (f64, f64), epsilon: f64) {
    assert_relative_eq!(got.0, want.0, epsilon = epsilon);
    assert_relative_eq!(got.1, want.1, epsilon = epsilon);
}

fn item_point(item: &PathItem) -> (f64, f64) {
    match *item {
        PathItem::MoveTo { x, y } | PathItem::LineTo { x, y } | PathItem::EllipticalArcTo { x, y, .. } => (x, y),
        other => panic!("unexpected item in offset output: {other:?}"),
    }
}

/// S1: a right triangle, offset with pure symbolic line-line intersections.
#[test]
fn s1_triangle() {
    let path = Path::new(vec![
        PathItem::MoveTo { x: 0.0, y: 0.0 },
        line_to(1.0, 1.0),
        PathItem::HorizontalLineTo { x: 0.0 },
        PathItem::ClosePath,
    ]);
    let out = offset_path(&path, 0.1, PrecisionMode::Exact).expect("triangle offset should succeed");
    assert_eq!(out.items().len(), 4);
    assert!(matches!(out.items()[0], PathItem::MoveTo { .. }));
    assert!(matches!(out.items()[3], PathItem::ClosePath));

    assert_point(item_point(&out.items()[0]), (0.1, 0.2414213562373095), 1e-9);
    assert_point(item_point(&out.items()[1]), (0.7585786437626905, 0.9), 1e-9);
    assert_point(item_point(&out.items()[2]), (0.1, 0.9), 1e-9);
}

/// S2: a quarter-circle arc joined to two lines, exercising the line-arc
/// tangent/interior intersection path.
#[test]
fn s2_quarter_arc() {
    let path = Path::new(vec![
        PathItem::MoveTo { x: 0.0, y: 0.0 },
        PathItem::EllipticalArcTo { rx: 2.0, ry: 2.0, rotation_deg: 45.0, large_arc: false, sweep: true, x: 2.0, y: 2.0 },
        line_to(0.0, 2.0),
        PathItem::ClosePath,
    ]);
    let out = offset_path(&path, 0.1, PrecisionMode::Exact).expect("quarter-arc offset should succeed");
    assert!(matches!(out.items()[0], PathItem::MoveTo { .. }));
    assert!(matches!(out.items().last().unwrap(), PathItem::ClosePath));
    assert!(out.items().iter().any(|i| matches!(i, PathItem::EllipticalArcTo { .. })));

    assert_point(item_point(&out.items()[0]), (0.1, 0.1026334038989724), 1e-6);
}

/// S3: a line + arc rect, using the `"auto-intersections"` precision mode
/// (symbolic offsets, numeric intersections).
#[test]
fn s3_rect_with_bulge() {
    let path = Path::new(vec![
        PathItem::MoveTo { x: 0.0, y: 0.0 },
        PathItem::HorizontalLineTo { x: 1.0 },
        PathItem::EllipticalArcTo { rx: 2.0, ry: 3.0, rotation_deg: 32.0, large_arc: false, sweep: true, x: 1.0, y: 2.0 },
        line_to(0.0, 2.0),
        PathItem::ClosePath,
    ]);
    let prec = PrecisionMode::auto_intersections(9);
    let out = offset_path(&path, 0.1, prec).expect("rect-with-bulge offset should succeed");
    assert!(matches!(out.items()[0], PathItem::MoveTo { .. }));
    assert!(matches!(out.items().last().unwrap(), PathItem::ClosePath));
    assert_point(item_point(&out.items()[0]), (0.1, 0.1), 1e-6);
}

/// S4 and S5 stress the "around" fallback bridging strongly convex lobes
/// (wrap-around arcs past the tangent-extension and resultant-root tests).
/// Per the Design Notes' Open Question on root tie-break ("callers should
/// not depend on a specific tie-break beyond 'some valid root'"), these only
/// check structural properties, not literal coordinates.
#[test]
fn s4_square_with_bulbous_outgrowth_offsets_without_error() {
    let path = Path::new(vec![
        PathItem::MoveTo { x: 0.0, y: 0.0 },
        PathItem::HorizontalLineTo { x: 1.0 },
        PathItem::EllipticalArcTo { rx: 1.0, ry: 1.0, rotation_deg: 0.0, large_arc: true, sweep: true, x: 2.0, y: 1.0 },
        PathItem::VerticalLineTo { y: 2.0 },
        PathItem::HorizontalLineTo { x: 0.0 },
        PathItem::ClosePath,
    ]);
    let out = offset_path(&path, 0.1, PrecisionMode::Exact).expect("bulbous-outgrowth offset should succeed");
    assert!(matches!(out.items()[0], PathItem::MoveTo { .. }));
    assert!(matches!(out.items().last().unwrap(), PathItem::ClosePath));
    assert!(out.items().len() >= 5);
}

#[test]
fn s5_double_loop_offsets_without_error() {
    let path = Path::new(vec![
        PathItem::MoveTo { x: 0.0, y: 0.0 },
        PathItem::EllipticalArcTo { rx: 1.0, ry: 1.0, rotation_deg: 0.0, large_arc: false, sweep: true, x: 0.0, y: 2.0 },
        PathItem::EllipticalArcTo { rx: 1.0, ry: 1.0, rotation_deg: 0.0, large_arc: false, sweep: true, x: 0.0, y: 4.0 },
        PathItem::HorizontalLineTo { x: -1.0 },
        PathItem::VerticalLineTo { y: 0.0 },
        PathItem::ClosePath,
    ]);
    let out = offset_path(&path, 0.1, PrecisionMode::Exact).expect("double-loop offset should succeed");
    assert!(matches!(out.items()[0], PathItem::MoveTo { .. }));
    assert!(matches!(out.items().last().unwrap(), PathItem::ClosePath));
}

/// S6: polynomial root-finding, independent of the path pipeline.
#[test]
fn s6_polynomial_roots() {
    use svg_path_offset::expr::roots::polynomial_roots;
    use svg_path_offset::expr::Expr;

    let no_real_roots = polynomial_roots(&[Expr::one(), Expr::zero(), Expr::from_i64(8)], true, None).unwrap();
    assert!(no_real_roots.is_empty());

    let triple_root = polynomial_roots(
        &[Expr::one(), Expr::from_i64(3), Expr::from_i64(3), Expr::one()],
        true,
        None,
    )
    .unwrap();
    assert_eq!(triple_root.len(), 1);
    let (root, mult) = &triple_root[0];
    assert_relative_eq!(root.eval_f64(), -1.0, epsilon = 1e-9);
    assert_eq!(*mult, 3);
}
