//! 3-D points and distances.

use serde::{Deserialize, Serialize};

/// A joint position in capture space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// A point with every coordinate missing.
    pub const MISSING: Point3 = Point3 {
        x: f64::NAN,
        y: f64::NAN,
        z: f64::NAN,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True when all three coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point3) -> f64 {
        euclidean_distance(self, other)
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// The coordinate along `axis`.
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// A coordinate axis of capture space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Column suffix for this axis (`"x"`, `"y"`, `"z"`).
    pub fn suffix(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// Parse a column suffix.
    pub fn from_suffix(s: &str) -> Option<Axis> {
        match s {
            "x" | "X" => Some(Axis::X),
            "y" | "Y" => Some(Axis::Y),
            "z" | "Z" => Some(Axis::Z),
            _ => None,
        }
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Point3::new(v[0], v[1], v[2])
    }
}

/// Euclidean distance between two points.
pub fn euclidean_distance(a: &Point3, b: &Point3) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn distance_3_4_12_is_13() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 12.0);
        assert!((a.distance(&b) - 13.0).abs() < 1e-12);
    }

    #[test]
    fn missing_point_is_not_finite() {
        assert!(!Point3::MISSING.is_finite());
        assert!(Point3::default().is_finite());
        assert!(!Point3::new(1.0, f64::INFINITY, 0.0).is_finite());
    }

    #[test]
    fn axis_suffix_roundtrip_and_component() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let picked: Vec<f64> = Axis::ALL.iter().map(|a| p.component(*a)).collect();
        assert_eq!(picked, vec![1.0, 2.0, 3.0]);
        assert_eq!(Axis::from_suffix("Z"), Some(Axis::Z));
        assert_eq!(Axis::from_suffix("w"), None);
    }

    proptest! {
        #[test]
        fn distance_is_symmetric_and_non_negative(
            a in prop::array::uniform3(-1e3f64..1e3),
            b in prop::array::uniform3(-1e3f64..1e3),
        ) {
            let (a, b) = (Point3::from(a), Point3::from(b));
            let d = a.distance(&b);
            prop_assert!(d >= 0.0);
            prop_assert!((d - b.distance(&a)).abs() < 1e-9);
            prop_assert_eq!(a.distance(&a), 0.0);
        }
    }
}
