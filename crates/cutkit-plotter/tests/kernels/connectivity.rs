use cutkit_core::PlotPoint;
use cutkit_plotter::{plot_arc, plot_cubic_bezier, plot_line, plot_quad_bezier};
use kurbo::{Arc, Point, Vec2};

fn assert_connected(points: &[PlotPoint], start: (i64, i64), end: (i64, i64)) {
    assert_eq!(points.first().map(|p| p.position()), Some(start));
    assert_eq!(points.last().map(|p| p.position()), Some(end));
    for pair in points.windows(2) {
        assert!(
            pair[0].is_adjacent(&pair[1]),
            "gap between {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_lines_in_every_octant() {
    for (x1, y1) in [
        (9, 2),
        (2, 9),
        (-2, 9),
        (-9, 2),
        (-9, -2),
        (-2, -9),
        (2, -9),
        (9, -2),
    ] {
        let points: Vec<_> = plot_line(0, 0, x1, y1).collect();
        assert_connected(&points, (0, 0), (x1, y1));
        assert_eq!(points.len() as i64, x1.abs().max(y1.abs()) + 1);
    }
}

#[test]
fn test_quads_with_interior_extrema() {
    let cases = [
        ((10.0, 0.0), (15.0, 5.0), (20.0, 0.0)),
        ((0.0, 0.0), (40.0, 40.0), (0.0, 20.0)),
        ((-7.3, 3.6), (12.1, -25.0), (30.5, 11.2)),
        ((5.0, 5.0), (5.0, 5.0), (5.0, 5.0)),
    ];
    for (p0, p1, p2) in cases {
        let (p0, p1, p2) = (Point::from(p0), Point::from(p1), Point::from(p2));
        let points = plot_quad_bezier(p0, p1, p2);
        assert_connected(
            &points,
            (p0.x.round() as i64, p0.y.round() as i64),
            (p2.x.round() as i64, p2.y.round() as i64),
        );
    }
}

#[test]
fn test_s_shaped_cubic() {
    let points = plot_cubic_bezier(
        Point::new(0.0, 0.0),
        Point::new(60.0, 80.0),
        Point::new(-20.0, 80.0),
        Point::new(40.0, 0.0),
    );
    assert_connected(&points, (0, 0), (40, 0));
}

#[test]
fn test_quarter_arc() {
    let arc = Arc {
        center: Point::new(0.0, 0.0),
        radii: Vec2::new(30.0, 30.0),
        start_angle: 0.0,
        sweep_angle: std::f64::consts::FRAC_PI_2,
        x_rotation: 0.0,
    };
    let points = plot_arc(&arc);
    assert_connected(&points, (30, 0), (0, 30));
    for p in &points {
        let r = ((p.x * p.x + p.y * p.y) as f64).sqrt();
        assert!((r - 30.0).abs() < 1.5, "{:?} strays from the circle", p);
    }
}
