//! Planar geometry helpers for contour and hull analysis.

use nalgebra::Point2;

/// A circle in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnclosingCircle {
    pub center: Point2<f64>,
    pub radius: f64,
}

impl EnclosingCircle {
    #[inline]
    fn contains(&self, p: &Point2<f64>, slack: f64) -> bool {
        nalgebra::distance(&self.center, p) <= self.radius + slack
    }
}

/// Perimeter of a closed polyline.
pub fn polygon_perimeter(points: &[Point2<f64>]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let mut total = 0.0;
    for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
        total += nalgebra::distance(a, b);
    }
    total
}

/// Unsigned area of a simple polygon (shoelace formula).
pub fn polygon_area(points: &[Point2<f64>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
        twice_area += a.x * b.y - b.x * a.y;
    }
    twice_area.abs() / 2.0
}

/// Minimal enclosing circle of a point set (Welzl, incremental form).
///
/// Deterministic for a given input order. Returns a zero circle at the origin
/// for an empty input.
pub fn min_enclosing_circle(points: &[Point2<f64>]) -> EnclosingCircle {
    let Some(first) = points.first() else {
        return EnclosingCircle {
            center: Point2::origin(),
            radius: 0.0,
        };
    };

    let mut circle = EnclosingCircle {
        center: *first,
        radius: 0.0,
    };
    let slack = 1e-9;

    for (i, p) in points.iter().enumerate().skip(1) {
        if circle.contains(p, slack) {
            continue;
        }
        // p must be on the boundary of the minimal circle of points[..=i].
        circle = EnclosingCircle {
            center: *p,
            radius: 0.0,
        };
        for (j, q) in points[..i].iter().enumerate() {
            if circle.contains(q, slack) {
                continue;
            }
            circle = circle_from_two(p, q);
            for r in &points[..j] {
                if !circle.contains(r, slack) {
                    circle = circle_from_three(p, q, r);
                }
            }
        }
    }
    circle
}

fn circle_from_two(a: &Point2<f64>, b: &Point2<f64>) -> EnclosingCircle {
    let center = nalgebra::center(a, b);
    EnclosingCircle {
        center,
        radius: nalgebra::distance(a, &center),
    }
}

fn circle_from_three(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> EnclosingCircle {
    let bx = b.x - a.x;
    let by = b.y - a.y;
    let cx = c.x - a.x;
    let cy = c.y - a.y;
    let d = 2.0 * (bx * cy - by * cx);
    if d.abs() < 1e-12 {
        // Degenerate (collinear): widest two-point circle covers all three.
        let ab = circle_from_two(a, b);
        let ac = circle_from_two(a, c);
        let bc = circle_from_two(b, c);
        let mut best = ab;
        for cand in [ac, bc] {
            if cand.radius > best.radius {
                best = cand;
            }
        }
        return best;
    }
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;
    let center = Point2::new(a.x + ux, a.y + uy);
    EnclosingCircle {
        center,
        radius: nalgebra::distance(a, &center),
    }
}
