use std::{cmp::Ordering, fmt, ops::Add};

use crate::protocol::constants::MAX_SEQUENCE;

const MODULO: u16 = MAX_SEQUENCE;
const MASK: u16 = MODULO - 1;
const HALF: u16 = MODULO / 2;

/// 10-bit sequence number of a vital chunk.
///
/// Comparison is wrap-aware: `a < b` when `b` is less than half the
/// sequence space ahead of `a`. That relation is not transitive over the
/// whole space, so only `PartialOrd` is provided.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Sequence(u16);

impl Sequence {
    pub fn new(v: u16) -> Sequence {
        Sequence(v & MASK)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn next(&self) -> Sequence {
        Sequence::new(self.0.wrapping_add(1))
    }

    pub fn prev(&self) -> Sequence {
        Sequence(if self.0 == 0 { MASK } else { self.0 - 1 })
    }

    /// Signed distance from `self` to `other`, in `-HALF..HALF`.
    pub fn distance_to(&self, other: Sequence) -> i16 {
        let d = other.0.wrapping_sub(self.0) & MASK;
        if d >= HALF {
            d as i16 - MODULO as i16
        } else {
            d as i16
        }
    }
}

impl PartialOrd for Sequence {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(0.cmp(&self.distance_to(*other)))
    }
}

impl Add<u16> for Sequence {
    type Output = Self;

    fn add(self, rhs: u16) -> Self::Output {
        Sequence::new(self.0.wrapping_add(rhs))
    }
}

impl From<u16> for Sequence {
    fn from(v: u16) -> Self {
        Sequence::new(v)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_next() {
        let max = Sequence::new(MASK);
        assert_eq!(max.next().value(), 0);
        assert_eq!(Sequence::new(0).prev().value(), MASK);
    }

    #[test]
    fn new_masks_high_bits() {
        assert_eq!(Sequence::new(1024 + 42).value(), 42);
        assert_eq!((Sequence::new(1020) + 10).value(), 6);
    }

    #[test]
    fn ordering_handles_wrap() {
        let a = Sequence::new(MASK);
        let b = a.next();
        assert!(b > a);
        assert!(a < b);
        assert_eq!(a.distance_to(b), 1);
        assert_eq!(b.distance_to(a), -1);
    }
}
