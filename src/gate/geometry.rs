//! Pure point-membership tests. No shared state, no mutation; callers are
//! expected to validate gate definitions before evaluation.

use super::EllipseGate;

/// Test each point against a (possibly rotated) ellipse.
///
/// Each point is translated into the ellipse's local frame (shift by
/// `-center`, rotate by `-angle`) and tested against
/// `(x / half_width)² + (y / half_height)² <= 1`. The boundary is inclusive:
/// a point with normalized sum exactly 1 is inside (closed region).
pub fn ellipse_contains(gate: &EllipseGate, points: &[(f64, f64)]) -> Vec<bool> {
    let (cx, cy) = gate.center;
    let hw = gate.width / 2.0;
    let hh = gate.height / 2.0;
    let theta = -gate.angle.to_radians();
    let (sin, cos) = theta.sin_cos();

    points
        .iter()
        .map(|&(px, py)| {
            let dx = px - cx;
            let dy = py - cy;
            let x = dx * cos - dy * sin;
            let y = dx * sin + dy * cos;
            let nx = x / hw;
            let ny = y / hh;
            nx * nx + ny * ny <= 1.0
        })
        .collect()
}

/// Test each point against a simple polygon using the even-odd rule.
///
/// The vertex sequence is implicitly closed: an edge runs from the last
/// vertex back to the first, and an explicitly closed input (first == last)
/// evaluates identically because the duplicate edge is degenerate. A point is
/// inside when a horizontal ray to the right crosses an odd number of edges.
///
/// Boundary behavior follows the strict-crossing convention: points exactly
/// on an edge classify deterministically (left/bottom edges generally inside,
/// right/top edges outside), identical across repeated calls. For a
/// self-intersecting polygon the even-odd rule applies: regions enclosed an
/// even number of times count as outside.
pub fn polygon_contains(vertices: &[(f64, f64)], points: &[(f64, f64)]) -> Vec<bool> {
    points
        .iter()
        .map(|&p| point_in_polygon(vertices, p))
        .collect()
}

fn point_in_polygon(vertices: &[(f64, f64)], (px, py): (f64, f64)) -> bool {
    let n = vertices.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
