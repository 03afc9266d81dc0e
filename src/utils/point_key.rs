use crate::math::{Point, Real};
use core::hash::{Hash, Hasher};

/// A hashable key identifying a point by the exact bit pattern of its coordinates.
///
/// Two points produce the same key if and only if their coordinates compare equal
/// (`0.0` and `-0.0` are considered equal). Points with NaN coordinates are never
/// equal to anything, including themselves.
#[derive(Copy, Clone, Debug)]
pub struct PointKey(Point<Real>);

impl PointKey {
    /// Creates a new key from a point.
    #[inline]
    pub fn new(pt: &Point<Real>) -> Self {
        // Normalize the signed zeros so they hash the same way.
        PointKey(pt.map(|x| if x == 0.0 { 0.0 } else { x }))
    }
}

impl PartialEq for PointKey {
    #[inline]
    fn eq(&self, other: &PointKey) -> bool {
        self.0 == other.0
    }
}

impl Eq for PointKey {}

impl Hash for PointKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for x in self.0.iter() {
            x.to_bits().hash(state);
        }
    }
}

#[cfg(test)]
mod test {
    use super::PointKey;
    use crate::math::Point;
    use hashbrown::HashSet;

    #[test]
    fn signed_zeros_share_a_key() {
        let mut set = HashSet::new();
        assert!(set.insert(PointKey::new(&Point::new(0.0, 1.0, -0.0))));
        assert!(!set.insert(PointKey::new(&Point::new(-0.0, 1.0, 0.0))));
        assert!(set.insert(PointKey::new(&Point::new(0.0, 1.0, 1.0e-7))));
    }
}
