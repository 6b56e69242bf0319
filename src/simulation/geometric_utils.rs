//! Geometric utility functions for headings and 2D vectors.

use geo::Point;
use ndarray::Array1;

/// Returns the unit vector for a heading in degrees.
///
/// Screen coordinates are used (y grows downwards), so positive angles turn
/// clockwise on screen.
pub fn heading_vector(degrees: f32) -> Array1<f32> {
    let rad = degrees.to_radians();
    Array1::from_vec(vec![rad.cos(), rad.sin()])
}

/// Rotates a 2D vector in place by `degrees`.
pub fn rotate_mut(v: &mut Array1<f32>, degrees: f32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (x, y) = (v[0], v[1]);
    v[0] = x * cos - y * sin;
    v[1] = x * sin + y * cos;
}

/// Wraps an angle into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Converts a position vector into a `geo` point.
pub fn to_point(v: &Array1<f32>) -> Point<f32> {
    Point::new(v[0], v[1])
}
