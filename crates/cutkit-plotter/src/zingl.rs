//! Curve rasterization on the integer lattice.
//!
//! Implements the Zingl family of rasterizers ("A Rasterizing Algorithm for
//! Drawing Curves"): an error-accumulating Bresenham line, and quadratic and
//! cubic Bezier plotters that split a curve where its horizontal or vertical
//! gradient changes sign and then step each monotone segment. Arcs are
//! split into cubic pieces and go through the cubic plotter.
//!
//! Every stream starts at the rounded start point, ends at the rounded end
//! point, and moves at most one lattice unit per axis between consecutive
//! points.

use cutkit_core::PlotPoint;
use kurbo::{Arc, PathEl, Point, Vec2};

/// Tolerance used when splitting an arc into cubic segments.
const ARC_TOLERANCE: f64 = 0.1;

type Lattice = (i64, i64);

/// Round a scene point to the nearest lattice point.
pub fn lattice(point: Point) -> (i64, i64) {
    (point.x.round() as i64, point.y.round() as i64)
}

/// Lazy Bresenham line from `(x0, y0)` to `(x1, y1)` inclusive.
#[derive(Debug, Clone)]
pub struct LinePlotter {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl LinePlotter {
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        Self {
            x0,
            y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for LinePlotter {
    type Item = PlotPoint;

    fn next(&mut self) -> Option<PlotPoint> {
        if self.done {
            return None;
        }
        let point = PlotPoint::new(self.x0, self.y0);
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            if self.x0 == self.x1 {
                self.done = true;
                return Some(point);
            }
            self.err += self.dy;
            self.x0 += self.sx;
        }
        if e2 <= self.dx {
            if self.y0 == self.y1 {
                self.done = true;
                return Some(point);
            }
            self.err += self.dx;
            self.y0 += self.sy;
        }
        Some(point)
    }
}

/// Plot a straight line between two lattice points.
pub fn plot_line(x0: i64, y0: i64, x1: i64, y1: i64) -> LinePlotter {
    LinePlotter::new(x0, y0, x1, y1)
}

/// Plot a quadratic Bezier curve through rounded control points.
pub fn plot_quad_bezier(start: Point, control: Point, end: Point) -> Vec<PlotPoint> {
    let mut out = Vec::new();
    quad_bezier(&mut out, lattice(start), lattice(control), lattice(end));
    into_points(out)
}

/// Plot a cubic Bezier curve through rounded control points.
pub fn plot_cubic_bezier(start: Point, control1: Point, control2: Point, end: Point) -> Vec<PlotPoint> {
    let mut out = Vec::new();
    cubic_bezier(&mut out, start, control1, control2, end);
    into_points(out)
}

/// Plot an elliptical arc.
///
/// The arc is split into cubic segments; the first starts exactly at the
/// arc's start point and the last ends exactly at its end point.
pub fn plot_arc(arc: &Arc) -> Vec<PlotPoint> {
    let start = arc_point(arc, arc.start_angle);
    let end = arc_point(arc, arc.start_angle + arc.sweep_angle);

    let segments: Vec<PathEl> = arc.append_iter(ARC_TOLERANCE).collect();
    let last = segments.len().saturating_sub(1);

    let mut out = Vec::new();
    let mut p0 = start;
    for (i, el) in segments.into_iter().enumerate() {
        if let PathEl::CurveTo(c1, c2, p3) = el {
            let p3 = if i == last { end } else { p3 };
            cubic_bezier(&mut out, p0, c1, c2, p3);
            p0 = p3;
        }
    }
    if out.is_empty() {
        push(&mut out, lattice(start));
    }
    into_points(out)
}

/// Point on `arc`'s ellipse at parametric angle `angle`.
pub fn arc_point(arc: &Arc, angle: f64) -> Point {
    let (sin_rot, cos_rot) = arc.x_rotation.sin_cos();
    let u = arc.radii.x * angle.cos();
    let v = arc.radii.y * angle.sin();
    arc.center + Vec2::new(u * cos_rot - v * sin_rot, u * sin_rot + v * cos_rot)
}

fn into_points(points: Vec<Lattice>) -> Vec<PlotPoint> {
    points.into_iter().map(PlotPoint::from).collect()
}

/// Append a lattice point unless it repeats the previous one.
fn push(out: &mut Vec<Lattice>, point: Lattice) {
    if out.last() != Some(&point) {
        out.push(point);
    }
}

fn extend(out: &mut Vec<Lattice>, points: impl IntoIterator<Item = Lattice>) {
    for point in points {
        push(out, point);
    }
}

fn line(out: &mut Vec<Lattice>, (x0, y0): Lattice, (x1, y1): Lattice) {
    extend(out, plot_line(x0, y0, x1, y1).map(|p| p.position()));
}

fn cubic_bezier(out: &mut Vec<Lattice>, p0: Point, p1: Point, p2: Point, p3: Point) {
    let (x0, y0) = lattice(p0);
    let (x1, y1) = lattice(p1);
    let (x2, y2) = lattice(p2);
    let (x3, y3) = lattice(p3);

    // Bezier coefficients in Zingl's t in [-1, 1] parametrization
    let xc = x0 + x1 - x2 - x3;
    let xa = xc - 4 * (x1 - x2);
    let xb = x0 - x1 - x2 + x3;
    let xd = xb + 4 * (x1 + x2);
    let yc = y0 + y1 - y2 - y3;
    let ya = yc - 4 * (y1 - y2);
    let yb = y0 - y1 - y2 + y3;
    let yd = yb + 4 * (y1 + y2);

    let mut cuts = gradient_roots(xa, xb, xc);
    cuts.extend(gradient_roots(ya, yb, yc));
    cuts.sort_by(f64::total_cmp);
    cuts.push(1.0);

    let (xa, xb, xc, xd) = (xa as f64, xb as f64, xc as f64, xd as f64);
    let (ya, yb, yc, yd) = (ya as f64, yb as f64, yc as f64, yd as f64);

    push(out, (x0, y0));
    let (mut x0, mut y0) = (x0, y0);
    let (mut fx0, mut fy0) = (x0 as f64, y0 as f64);
    let mut t1 = -1.0;
    for t2 in cuts {
        let mut fx1 = (t1 * (t1 * xb - 2.0 * xc) - t2 * (t1 * (t1 * xa - 2.0 * xb) + xc) + xd)
            / 8.0
            - fx0;
        let mut fy1 = (t1 * (t1 * yb - 2.0 * yc) - t2 * (t1 * (t1 * ya - 2.0 * yb) + yc) + yd)
            / 8.0
            - fy0;
        let mut fx2 = (t2 * (t2 * xb - 2.0 * xc) - t1 * (t2 * (t2 * xa - 2.0 * xb) + xc) + xd)
            / 8.0
            - fx0;
        let mut fy2 = (t2 * (t2 * yb - 2.0 * yc) - t1 * (t2 * (t2 * ya - 2.0 * yb) + yc) + yd)
            / 8.0
            - fy0;
        let fx3 = (t2 * (t2 * (3.0 * xb - t2 * xa) - 3.0 * xc) + xd) / 8.0;
        let fy3 = (t2 * (t2 * (3.0 * yb - t2 * ya) - 3.0 * yc) + yd) / 8.0;
        fx0 -= fx3;
        fy0 -= fy3;
        let x3 = round_half_up(fx3);
        let y3 = round_half_up(fy3);

        // stretch the control polygon onto the rounded segment ends
        if fx0 != 0.0 {
            let scale = (x0 - x3) as f64 / fx0;
            fx1 *= scale;
            fx2 *= scale;
        }
        if fy0 != 0.0 {
            let scale = (y0 - y3) as f64 / fy0;
            fy1 *= scale;
            fy2 *= scale;
        }
        if x0 != x3 || y0 != y3 {
            cubic_bezier_seg(
                out,
                (x0, y0),
                (x0 as f64 + fx1, y0 as f64 + fy1),
                (x0 as f64 + fx2, y0 as f64 + fy2),
                (x3, y3),
            );
        }
        x0 = x3;
        y0 = y3;
        fx0 = fx3;
        fy0 = fy3;
        t1 = t2;
    }
}

/// Parameters in (-1, 1) where one coordinate's gradient changes sign.
fn gradient_roots(a: i64, b: i64, c: i64) -> Vec<f64> {
    let mut roots = Vec::new();
    if a == 0 {
        if c.abs() < 2 * b.abs() {
            roots.push(c as f64 / (2.0 * b as f64));
        }
        return roots;
    }
    let (a, b, c) = (a as f64, b as f64, c as f64);
    let disc = b * b - a * c;
    if disc > 0.0 {
        let root = disc.sqrt();
        for t in [(b - root) / a, (b + root) / a] {
            if t.abs() < 1.0 {
                roots.push(t);
            }
        }
    }
    roots
}

/// A cubic segment without gradient sign changes.
///
/// Traced from both ends towards the middle. Whatever the error terms cannot
/// resolve (a cusp or a self-intersection) is bridged by a line.
fn cubic_bezier_seg(
    out: &mut Vec<Lattice>,
    (x0, y0): Lattice,
    (x1, y1): (f64, f64),
    (x2, y2): (f64, f64),
    (x3, y3): Lattice,
) {
    const EP: f64 = 0.01;

    let (mut x0, mut y0, mut x3, mut y3) = (x0, y0, x3, y3);
    let mut sx: i64 = if x0 < x3 { 1 } else { -1 };
    let mut sy: i64 = if y0 < y3 { 1 } else { -1 };
    let (fsx, fsy) = (sx as f64, sy as f64);
    let xc = -(x0 as f64 + x1 - x2 - x3 as f64).abs();
    let xa = xc - 4.0 * fsx * (x1 - x2);
    let mut xb = fsx * (x0 as f64 - x1 - x2 + x3 as f64);
    let yc = -(y0 as f64 + y1 - y2 - y3 as f64).abs();
    let ya = yc - 4.0 * fsy * (y1 - y2);
    let mut yb = fsy * (y0 as f64 - y1 - y2 + y3 as f64);

    if xa == 0.0 && ya == 0.0 {
        // degree-elevated quadratic
        let mid = (
            ((3.0 * x1 - x0 as f64 + 1.0) / 2.0).floor() as i64,
            ((3.0 * y1 - y0 as f64 + 1.0) / 2.0).floor() as i64,
        );
        quad_bezier_seg(out, (x0, y0), mid, (x3, y3));
        return;
    }

    let mut near_len = (x1 - x0 as f64).powi(2) + (y1 - y0 as f64).powi(2) + 1.0;
    let far_len = (x2 - x3 as f64).powi(2) + (y2 - y3 as f64).powi(2) + 1.0;
    let mut legs: [Vec<Lattice>; 2] = [Vec::new(), Vec::new()];

    for leg in legs.iter_mut() {
        let mut ab = xa * yb - xb * ya;
        let mut ac = xa * yc - xc * ya;
        let mut bc = xb * yc - xc * yb;
        let mut ex = ab * (ab + ac - 3.0 * bc) + ac * ac;
        // finer sub-steps when the near end may belong to a loop
        let f: i64 = if ex > 0.0 {
            1
        } else {
            (1.0 + 1024.0 / near_len).sqrt() as i64
        };
        let ff = f as f64;
        ab *= ff;
        ac *= ff;
        bc *= ff;
        ex *= ff * ff;

        let mut xy = 9.0 * (ab + ac + bc) / 8.0;
        let mut cb = 8.0 * (xa - ya);
        let mut dx = 27.0 * (8.0 * ab * (yb * yb - ya * yc) + ex * (ya + 2.0 * yb + yc)) / 64.0
            - ya * ya * (xy - ya);
        let mut dy = 27.0 * (8.0 * ab * (xb * xb - xa * xc) - ex * (xa + 2.0 * xb + xc)) / 64.0
            - xa * xa * (xy + xa);
        let mut xx = 3.0
            * (3.0 * ab * (3.0 * yb * yb - ya * ya - 2.0 * ya * yc)
                - ya * (3.0 * ac * (ya + yb) + ya * cb))
            / 4.0;
        let mut yy = 3.0
            * (3.0 * ab * (3.0 * xb * xb - xa * xa - 2.0 * xa * xc)
                - xa * (3.0 * ac * (xa + xb) + xa * cb))
            / 4.0;
        xy = xa * ya * (6.0 * ab + 6.0 * ac - 3.0 * bc + cb);
        ac = ya * ya;
        cb = xa * xa;
        xy = 3.0 * (xy + 9.0 * ff * (cb * yb * yc - xb * xc * ac) - 18.0 * xb * yb * ab) / 8.0;

        if ex < 0.0 {
            // inside the self-intersection loop
            dx = -dx;
            dy = -dy;
            xx = -xx;
            yy = -yy;
            xy = -xy;
            ac = -ac;
            cb = -cb;
        }
        ab = 6.0 * ya * ac;
        ac *= -6.0 * xa;
        bc = 6.0 * ya * cb;
        cb *= -6.0 * xa;
        dx += xy;
        ex = dx + dy;
        dy += xy;

        let (mut fx, mut fy) = (f, f);
        let mut ahead = false;
        'leg: while x0 != x3 && y0 != y3 {
            leg.push((x0, y0));
            loop {
                let limit = if ahead { EP } else { xy };
                // also leaves on NaN
                if !(dx <= limit && dy >= limit) {
                    break 'leg;
                }
                let y_test = 2.0 * ex - dy;
                if 2.0 * ex >= dx {
                    fx -= 1;
                    dx += xx;
                    ex += dx;
                    xy += ac;
                    dy += xy;
                    yy += bc;
                    xx += ab;
                }
                if y_test <= 0.0 {
                    fy -= 1;
                    dy += yy;
                    ex += dy;
                    xy += bc;
                    dx += xy;
                    xx += ac;
                    yy += cb;
                }
                if fx <= 0 || fy <= 0 {
                    break;
                }
            }
            if 2 * fx <= f {
                x0 += sx;
                fx += f;
            }
            if 2 * fy <= f {
                y0 += sy;
                fy += f;
            }
            if !ahead && dx < 0.0 && dy > 0.0 {
                ahead = true;
            }
        }

        // continue from the other end
        std::mem::swap(&mut x0, &mut x3);
        std::mem::swap(&mut y0, &mut y3);
        sx = -sx;
        sy = -sy;
        xb = -xb;
        yb = -yb;
        near_len = far_len;
    }

    let [head, tail] = legs;
    extend(out, head);
    line(out, (x0, y0), (x3, y3));
    extend(out, tail.into_iter().rev());
}

/// Any quadratic Bezier: split at the gradient extrema, then plot each
/// monotone segment.
fn quad_bezier(out: &mut Vec<Lattice>, (x0, y0): Lattice, (x1, y1): Lattice, (x2, y2): Lattice) {
    let (mut x0, mut y0, mut x1, mut y1, mut x2, mut y2) = (x0, y0, x1, y1, x2, y2);
    let mut seg = Vec::new();
    let mut reversed = false;

    let mut x = x0 - x1;
    let mut y = y0 - y1;
    let mut t = (x0 - 2 * x1 + x2) as f64;
    let mut r: f64;

    if x * (x2 - x1) > 0 {
        // horizontal cut; swap ends when the vertical cut comes first
        if y * (y2 - y1) > 0 && ((y0 - 2 * y1 + y2) as f64 / t * x as f64).abs() > y.abs() as f64 {
            x0 = x2;
            x2 = x + x1;
            y0 = y2;
            y2 = y + y1;
            reversed = true;
        }
        t = (x0 - x1) as f64 / t;
        r = (1.0 - t) * ((1.0 - t) * y0 as f64 + 2.0 * t * y1 as f64) + t * t * y2 as f64;
        t = (x0 * x2 - x1 * x1) as f64 * t / (x0 - x1) as f64;
        x = round_half_up(t);
        y = round_half_up(r);
        r = (y1 - y0) as f64 * (t - x0 as f64) / (x1 - x0) as f64 + y0 as f64;
        quad_bezier_seg(&mut seg, (x0, y0), (x, round_half_up(r)), (x, y));
        r = (y1 - y2) as f64 * (t - x2 as f64) / (x1 - x2) as f64 + y2 as f64;
        x0 = x;
        x1 = x;
        y0 = y;
        y1 = round_half_up(r);
    }
    if (y0 - y1) * (y2 - y1) > 0 {
        // vertical cut
        t = (y0 - 2 * y1 + y2) as f64;
        t = (y0 - y1) as f64 / t;
        r = (1.0 - t) * ((1.0 - t) * x0 as f64 + 2.0 * t * x1 as f64) + t * t * x2 as f64;
        t = (y0 * y2 - y1 * y1) as f64 * t / (y0 - y1) as f64;
        x = round_half_up(r);
        y = round_half_up(t);
        r = (x1 - x0) as f64 * (t - y0 as f64) / (y1 - y0) as f64 + x0 as f64;
        quad_bezier_seg(&mut seg, (x0, y0), (round_half_up(r), y), (x, y));
        r = (x1 - x2) as f64 * (t - y2 as f64) / (y1 - y2) as f64 + x2 as f64;
        x0 = x;
        x1 = round_half_up(r);
        y0 = y;
        y1 = y;
    }
    quad_bezier_seg(&mut seg, (x0, y0), (x1, y1), (x2, y2));

    if reversed {
        seg.reverse();
    }
    extend(out, seg);
}

/// A quadratic segment whose gradient does not change sign.
fn quad_bezier_seg(out: &mut Vec<Lattice>, (x0, y0): Lattice, (x1, y1): Lattice, (x2, y2): Lattice) {
    let (mut x0, mut y0, mut x2, mut y2) = (x0, y0, x2, y2);
    let mut seg = Vec::new();

    let mut sx = x2 - x1;
    let mut sy = y2 - y1;
    let mut xx = x0 - x1;
    let mut yy = y0 - y1;
    let mut cur = (xx * sy - yy * sx) as f64;

    // begin with the longer part; the points are put back in order below
    let swapped = sx * sx + sy * sy > xx * xx + yy * yy;
    if swapped {
        x2 = x0;
        x0 = sx + x1;
        y2 = y0;
        y0 = sy + y1;
        cur = -cur;
    }

    if cur != 0.0 {
        xx += sx;
        sx = if x0 < x2 { 1 } else { -1 };
        xx *= sx;
        yy += sy;
        sy = if y0 < y2 { 1 } else { -1 };
        yy *= sy;
        let mut xy = 2 * xx * yy;
        xx *= xx;
        yy *= yy;
        if cur * ((sx * sy) as f64) < 0.0 {
            xx = -xx;
            yy = -yy;
            xy = -xy;
            cur = -cur;
        }
        let mut dx = 4.0 * sy as f64 * cur * (x1 - x0) as f64 + (xx - xy) as f64;
        let mut dy = 4.0 * sx as f64 * cur * (y0 - y1) as f64 + (yy - xy) as f64;
        xx += xx;
        yy += yy;
        let mut err = dx + dy + xy as f64;

        // a monotone segment never needs more steps than its Manhattan length
        let mut budget = (x2 - x0).abs() + (y2 - y0).abs() + 1;
        loop {
            seg.push((x0, y0));
            if x0 == x2 && y0 == y2 {
                finish_segment(out, seg, swapped);
                return;
            }
            let step_y = 2.0 * err < dx;
            if 2.0 * err > dy {
                x0 += sx;
                dx -= xy as f64;
                dy += yy as f64;
                err += dy;
            }
            if step_y {
                y0 += sy;
                dy -= xy as f64;
                dx += xx as f64;
                err += dx;
            }
            budget -= 1;
            if !(dy < 0.0 && dx > 0.0) || budget <= 0 {
                break;
            }
        }
    }
    // remaining part is plotted as a line
    line(&mut seg, (x0, y0), (x2, y2));
    finish_segment(out, seg, swapped);
}

fn finish_segment(out: &mut Vec<Lattice>, mut seg: Vec<Lattice>, swapped: bool) {
    if swapped {
        seg.reverse();
    }
    extend(out, seg);
}

fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}
