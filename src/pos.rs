use std::{
    cmp::Ordering,
    ops::{Add, Neg, Sub},
};

/// A cell coordinate on the unbounded board
///
/// Rows grow downwards and columns grow to the right. Both axes are signed
/// 64-bit so long-running patterns can drift far from the origin. Arithmetic
/// wraps at the edges of that range instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: i64,
    pub col: i64,
}
impl Coord {
    /// Offsets of the Moore neighborhood, excluding the center
    const NEIGHBOR_OFFSETS: [Coord; 8] = [
        Coord::new(-1, -1),
        Coord::new(-1, 0),
        Coord::new(-1, 1),
        Coord::new(0, -1),
        Coord::new(0, 1),
        Coord::new(1, -1),
        Coord::new(1, 0),
        Coord::new(1, 1),
    ];

    #[inline]
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
    #[inline]
    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }

    /// The 8 coordinates adjacent to this one
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        Self::NEIGHBOR_OFFSETS.into_iter().map(move |offset| self + offset)
    }
}
impl Default for Coord {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}
impl From<(i64, i64)> for Coord {
    #[inline]
    fn from((row, col): (i64, i64)) -> Self {
        Self { row, col }
    }
}
impl PartialOrd for Coord {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Coord {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        // row-major: compare rows first, then columns
        Ord::cmp(&self.row, &other.row).then(Ord::cmp(&self.col, &other.col))
    }
}
impl Add for Coord {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            row: self.row.wrapping_add(rhs.row),
            col: self.col.wrapping_add(rhs.col),
        }
    }
}
impl Sub for Coord {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            row: self.row.wrapping_sub(rhs.row),
            col: self.col.wrapping_sub(rhs.col),
        }
    }
}
impl Neg for Coord {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            row: self.row.wrapping_neg(),
            col: self.col.wrapping_neg(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_exclude_center() {
        let center = Coord::new(-5, -5);
        let neighbors: Vec<_> = center.neighbors().collect();

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&center));
        assert!(neighbors.contains(&Coord::new(-6, -6)));
        assert!(neighbors.contains(&Coord::new(-4, -4)));
    }

    #[test]
    fn ordering_is_row_major() {
        let mut coords = vec![Coord::new(1, 0), Coord::new(0, 5), Coord::new(0, -1)];
        coords.sort();

        assert_eq!(
            coords,
            vec![Coord::new(0, -1), Coord::new(0, 5), Coord::new(1, 0)]
        );
    }

    #[test]
    fn sub_and_neg_invert_add() {
        let a = Coord::new(3, -7);
        let b = Coord::new(-2, 10);

        assert_eq!(a + b - b, a);
        assert_eq!(a - b, a + -b);
        assert_eq!(-Coord::zero(), Coord::zero());
    }

    #[test]
    fn arithmetic_wraps_at_the_edges() {
        let edge = Coord::new(i64::MAX, i64::MIN);

        assert_eq!(edge + Coord::new(1, 0), Coord::new(i64::MIN, i64::MIN));
        assert_eq!(edge - Coord::new(0, 1), Coord::new(i64::MAX, i64::MAX));
        assert_eq!(-edge, Coord::new(-i64::MAX, i64::MIN));
        assert_eq!(edge.neighbors().count(), 8);
    }
}
