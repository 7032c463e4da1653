//! # Fixed-Point Positions
//!
//! 8.8 fixed point: the low 8 bits are the fraction of a tile, so `256`
//! is one whole tile and `value >> 8` is the tile coordinate.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

const FRAC_BITS: u32 = 8;

/// A signed 8.8 fixed-point scalar.
///
/// # Example
///
/// ```rust,ignore
/// let x = Fixed::from_tile(2) + Fixed::HALF;
/// assert_eq!(x.raw(), 640);
/// assert_eq!(x.tile(), 2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Fixed(i32);

impl Fixed {
    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = FRAC_BITS;

    /// Zero.
    pub const ZERO: Self = Self(0);

    /// One whole tile.
    pub const ONE: Self = Self(1 << FRAC_BITS);

    /// Half a tile.
    pub const HALF: Self = Self(1 << (FRAC_BITS - 1));

    /// Creates from the raw 8.8 representation.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Creates a value sitting on the top-left corner of a tile.
    #[inline]
    #[must_use]
    pub const fn from_tile(tile: i32) -> Self {
        Self(tile << FRAC_BITS)
    }

    /// Returns the raw 8.8 representation.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Returns the tile coordinate (floor, arithmetic shift).
    #[inline]
    #[must_use]
    pub const fn tile(self) -> i32 {
        self.0 >> FRAC_BITS
    }

    /// Multiplies by a Q8 factor such as a [`trig`](super::trig) value.
    ///
    /// The product is truncated toward zero, so `scale_q8(-x)` is
    /// always `-scale_q8(x)`.
    #[inline]
    #[must_use]
    pub const fn scale_q8(self, factor: i32) -> Self {
        Self(self.0.saturating_mul(factor) / (1 << FRAC_BITS))
    }
}

impl Add for Fixed {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fixed {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fixed {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed({}+{}/256)", self.tile(), self.0 & 0xFF)
    }
}

/// A 2D point or displacement in 8.8 fixed point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct FixedVec {
    /// X component (east is positive).
    pub x: Fixed,
    /// Y component (south is positive).
    pub y: Fixed,
}

impl FixedVec {
    /// The zero vector.
    pub const ZERO: Self = Self::new(Fixed::ZERO, Fixed::ZERO);

    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }

    /// The top-left corner of tile `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn from_tile(x: i32, y: i32) -> Self {
        Self::new(Fixed::from_tile(x), Fixed::from_tile(y))
    }

    /// Displacement of length `magnitude` along `angle` degrees.
    #[must_use]
    pub fn polar(magnitude: Fixed, angle: i32) -> Self {
        Self::new(
            magnitude.scale_q8(super::trig::cos(angle)),
            magnitude.scale_q8(super::trig::sin(angle)),
        )
    }

    /// The tile this point lies in.
    #[inline]
    #[must_use]
    pub const fn tile(self) -> (i32, i32) {
        (self.x.tile(), self.y.tile())
    }
}

impl Add for FixedVec {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for FixedVec {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for FixedVec {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for FixedVec {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
