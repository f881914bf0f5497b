//! Lattice points emitted by the plotting kernels.

use serde::{Deserialize, Serialize};

/// One integer lattice position the laser head must visit.
///
/// Vector kernels (line, curves, arcs) leave `weight` empty. Raster plans
/// attach the normalized laser power in `[0, 1]` for the travel that ends at
/// this point; a weight of `0.0` means the laser is off for that move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub x: i64,
    pub y: i64,
    pub weight: Option<f64>,
}

impl PlotPoint {
    /// A vector point without power information.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y, weight: None }
    }

    /// A raster point carrying a power weight.
    pub fn weighted(x: i64, y: i64, weight: f64) -> Self {
        Self {
            x,
            y,
            weight: Some(weight),
        }
    }

    /// The `(x, y)` pair without the weight.
    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    /// True when `other` is the same or one of the eight neighbouring cells.
    pub fn is_adjacent(&self, other: &PlotPoint) -> bool {
        (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

impl From<(i64, i64)> for PlotPoint {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let p = PlotPoint::new(3, 3);
        assert!(p.is_adjacent(&PlotPoint::new(4, 4)));
        assert!(p.is_adjacent(&PlotPoint::new(3, 2)));
        assert!(p.is_adjacent(&p));
        assert!(!p.is_adjacent(&PlotPoint::new(5, 3)));
    }

    #[test]
    fn test_weighted_serializes_weight() {
        let json = serde_json::to_string(&PlotPoint::weighted(1, 2, 0.5)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"weight":0.5}"#);

        let json = serde_json::to_string(&PlotPoint::new(1, 2)).unwrap();
        assert_eq!(json, r#"{"x":1,"y":2,"weight":null}"#);
    }
}
