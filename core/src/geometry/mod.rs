//! 2D geometry helpers shared by the constraint solver and overlays.

use std::f64::consts::PI;

use nalgebra as na;

pub type Point2 = na::Point2<f64>;
pub type Vector2 = na::Vector2<f64>;

pub const EPSILON: f64 = 1e-6;

pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).abs() < EPSILON
    }
}

impl ApproxEq for Point2 {
    fn approx_eq(&self, other: &Self) -> bool {
        na::distance_squared(self, other) < EPSILON * EPSILON
    }
}

impl ApproxEq for Vector2 {
    fn approx_eq(&self, other: &Self) -> bool {
        (self - other).norm_squared() < EPSILON * EPSILON
    }
}

pub fn dist(p1: &Point2, p2: &Point2) -> f64 {
    na::distance(p1, p2)
}

pub fn dist_sq(p1: &Point2, p2: &Point2) -> f64 {
    na::distance_squared(p1, p2)
}

pub fn midpoint(p1: &Point2, p2: &Point2) -> Point2 {
    na::center(p1, p2)
}

/// Direction angle of the segment from `a` to `b`, in radians.
pub fn segment_angle(a: &Point2, b: &Point2) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Rotate `p` about `center` by `angle` radians (counter-clockwise).
pub fn rotate_around_point(p: Point2, center: Point2, angle: f64) -> Point2 {
    let v = p - center;
    let (s, c) = angle.sin_cos();
    center + Vector2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Normalize an angle difference into `(-PI, PI]`, so corrections always
/// take the shortest rotational path.
pub fn wrap_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}
