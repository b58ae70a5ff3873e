/// Gating layer: geometric region definitions, pure membership tests, and
/// the store-bound application step that writes boolean gate columns.
pub mod apply;
pub mod geometry;

use serde::Deserialize;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Gate definitions
// ---------------------------------------------------------------------------

/// An elliptical region in a 2D measurement plane.
///
/// Wire format: `{"center":[x,y],"width":w,"height":h,"angle":deg}` with
/// `angle` optional (degrees, counter-clockwise, default 0).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EllipseGate {
    pub center: (f64, f64),
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub angle: f64,
}

/// A simple polygon region, implicitly closed.
///
/// Wire format: an ordered array of `[x,y]` pairs. The last vertex need not
/// repeat the first; an explicitly closed list evaluates identically.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PolygonGate {
    pub vertices: Vec<(f64, f64)>,
}

/// Either geometric gate primitive.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Gate {
    Ellipse(EllipseGate),
    Polygon(PolygonGate),
}

impl EllipseGate {
    /// Check the gate is well formed: positive, finite dimensions.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::InvalidGate(format!(
                "ellipse width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::InvalidGate(format!(
                "ellipse height must be positive, got {}",
                self.height
            )));
        }
        Ok(())
    }
}

impl PolygonGate {
    /// Check the gate is well formed: at least 3 distinct vertices, not
    /// counting an explicit closing repeat of the first vertex.
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        let closed = n > 1 && self.vertices[0] == self.vertices[n - 1];
        let effective = if closed { n - 1 } else { n };
        if effective < 3 {
            return Err(Error::InvalidGate(format!(
                "polygon needs at least 3 vertices, got {effective}"
            )));
        }
        Ok(())
    }
}

impl Gate {
    /// Validate the underlying gate definition.
    pub fn validate(&self) -> Result<()> {
        match self {
            Gate::Ellipse(e) => e.validate(),
            Gate::Polygon(p) => p.validate(),
        }
    }

    /// Test each point for membership, validating the gate first.
    ///
    /// Returns one boolean per input point; both regions are closed in the
    /// ellipse case and even-odd in the polygon case (see [`geometry`]).
    pub fn contains_points(&self, points: &[(f64, f64)]) -> Result<Vec<bool>> {
        self.validate()?;
        Ok(match self {
            Gate::Ellipse(e) => geometry::ellipse_contains(e, points),
            Gate::Polygon(p) => geometry::polygon_contains(&p.vertices, points),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ellipse_wire_format_with_optional_angle() {
        let gate: Gate =
            serde_json::from_str(r#"{"center":[6.25,5.85],"width":0.5,"height":0.6}"#).unwrap();
        match gate {
            Gate::Ellipse(e) => {
                assert_eq!(e.center, (6.25, 5.85));
                assert_eq!(e.angle, 0.0);
            }
            Gate::Polygon(_) => panic!("expected ellipse"),
        }
    }

    #[test]
    fn polygon_wire_format() {
        let gate: Gate =
            serde_json::from_str("[[4.4,4.7],[4.54,4.9],[5.3,5.7],[4.4,4.7]]").unwrap();
        match gate {
            Gate::Polygon(p) => assert_eq!(p.vertices.len(), 4),
            Gate::Ellipse(_) => panic!("expected polygon"),
        }
    }

    #[test]
    fn zero_width_ellipse_is_rejected() {
        let gate = Gate::Ellipse(EllipseGate {
            center: (0.0, 0.0),
            width: 0.0,
            height: 1.0,
            angle: 0.0,
        });
        assert!(matches!(
            gate.contains_points(&[(0.0, 0.0)]).unwrap_err(),
            Error::InvalidGate(_)
        ));
    }

    #[test]
    fn degenerate_polygon_is_rejected() {
        // Two distinct vertices plus a closing repeat is still degenerate.
        let gate = Gate::Polygon(PolygonGate {
            vertices: vec![(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)],
        });
        assert!(gate.validate().is_err());
    }
}
