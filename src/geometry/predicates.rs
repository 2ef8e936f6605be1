//! Small vector helpers and geometric predicates on raw `[f64; 3]` points.

/// Relative tolerance for the coplanarity test, applied to the normalized
/// scalar triple product.
pub const COPLANARITY_TOLERANCE: f64 = 1e-10;

#[inline]
pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

/// Arithmetic mean of a set of points. Returns the origin for an empty set.
pub fn centroid(points: &[[f64; 3]]) -> [f64; 3] {
    if points.is_empty() {
        return [0.0; 3];
    }
    let mut c = [0.0; 3];
    for p in points {
        c[0] += p[0];
        c[1] += p[1];
        c[2] += p[2];
    }
    let n = points.len() as f64;
    [c[0] / n, c[1] / n, c[2] / n]
}

/// Signed volume of the tetrahedron `(a, b, c, d)`; positive when `d` lies on
/// the side of triangle `(a, b, c)` its right-handed normal points to.
pub fn signed_tet_volume(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    dot(sub(b, a), cross(sub(c, a), sub(d, a))) / 6.0
}

/// Unsigned tetrahedron volume.
pub fn tet_volume(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> f64 {
    signed_tet_volume(a, b, c, d).abs()
}

/// Area of the triangle `(a, b, c)`.
pub fn triangle_area(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> f64 {
    0.5 * norm(cross(sub(b, a), sub(c, a)))
}

/// Right-handed (unnormalized) normal of the triangle `(a, b, c)`.
pub fn triangle_normal(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> [f64; 3] {
    cross(sub(b, a), sub(c, a))
}

/// Returns true if the four points lie in a common plane.
///
/// Coincident points are trivially coplanar. Otherwise the scalar triple
/// product is compared relative to the edge lengths, so the test does not
/// depend on the scale of the coordinates.
pub fn is_coplanar(a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) -> bool {
    let ab = sub(b, a);
    let ac = sub(c, a);
    let ad = sub(d, a);
    let (lab, lac, lad) = (norm(ab), norm(ac), norm(ad));
    if lab <= f64::EPSILON || lac <= f64::EPSILON || lad <= f64::EPSILON {
        return true;
    }
    let triple = dot(ab, cross(ac, ad));
    (triple / (lab * lac * lad)).abs() < COPLANARITY_TOLERANCE
}

/// Returns true if `p` and `q` lie strictly on opposite sides of the line
/// through `a` and `b`, all four points being (nearly) coplanar.
pub fn divided_by_line(a: [f64; 3], b: [f64; 3], p: [f64; 3], q: [f64; 3]) -> bool {
    let ab = sub(b, a);
    let np = cross(ab, sub(p, a));
    let nq = cross(ab, sub(q, a));
    dot(np, nq) < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const O: [f64; 3] = [0.0, 0.0, 0.0];
    const X: [f64; 3] = [1.0, 0.0, 0.0];
    const Y: [f64; 3] = [0.0, 1.0, 0.0];
    const Z: [f64; 3] = [0.0, 0.0, 1.0];

    #[test]
    fn unit_tet_volume_and_sign() {
        assert!((signed_tet_volume(O, X, Y, Z) - 1.0 / 6.0).abs() < 1e-15);
        assert!((signed_tet_volume(O, Y, X, Z) + 1.0 / 6.0).abs() < 1e-15);
        assert!((tet_volume(O, Y, X, Z) - 1.0 / 6.0).abs() < 1e-15);
    }

    #[test]
    fn triangle_area_of_right_triangle() {
        assert!((triangle_area(O, X, Y) - 0.5).abs() < 1e-15);
        assert_eq!(triangle_normal(O, X, Y), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn coplanarity() {
        assert!(is_coplanar(O, X, [1.0, 1.0, 0.0], Y));
        assert!(!is_coplanar(O, X, [1.0, 1.0, 0.1], Y));
        // Scale invariance.
        let s = 1e-6;
        assert!(!is_coplanar(O, [s, 0.0, 0.0], [s, s, 0.1 * s], [0.0, s, 0.0]));
        // Coincident points.
        assert!(is_coplanar(O, O, X, Z));
    }

    #[test]
    fn line_division() {
        assert!(divided_by_line(O, [1.0, 1.0, 0.0], X, Y));
        assert!(!divided_by_line(O, X, Y, [1.0, 1.0, 0.0]));
    }

    #[test]
    fn centroid_of_unit_square() {
        let c = centroid(&[O, X, [1.0, 1.0, 0.0], Y]);
        assert_eq!(c, [0.5, 0.5, 0.0]);
        assert_eq!(centroid(&[]), [0.0; 3]);
    }
}
