//! Points in game space and distances between them.
//!
//! Distances can be restricted to a subset of axes, which is how the detector
//! measures proximity in the horizontal (x+z) plane while ignoring height.

use bitflags::bitflags;
use glam::{BVec3, DVec3};

bitflags! {
    /// Axis selector for [`Point::distance_axes`].
    ///
    /// The bit values match the raw integer masks accepted by
    /// [`Point::distance_masked`]: 1 = x, 2 = y, 4 = z.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Axes: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;

        const XY = Self::X.bits() | Self::Y.bits();
        const XZ = Self::X.bits() | Self::Z.bits();
        const YZ = Self::Y.bits() | Self::Z.bits();
        const ALL = Self::X.bits() | Self::Y.bits() | Self::Z.bits();
    }
}

impl Axes {
    /// Interpret a raw integer mask. Only the low three bits are read, using
    /// two's complement for negative masks (`-1` selects every axis).
    pub fn from_mask(mask: i64) -> Self {
        Self::from_bits_truncate((mask & 0b111) as u8)
    }

    fn as_bvec3(self) -> BVec3 {
        BVec3::new(
            self.contains(Axes::X),
            self.contains(Axes::Y),
            self.contains(Axes::Z),
        )
    }
}

impl Default for Axes {
    fn default() -> Self {
        Self::ALL
    }
}

/// A position in game space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn coords(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Full 3D Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        self.distance_axes(other, Axes::ALL)
    }

    /// Euclidean distance to `other` counting only the selected axes.
    ///
    /// Unselected axes contribute exactly zero, even if their delta is not
    /// finite. An empty selection yields 0.
    pub fn distance_axes(&self, other: &Point, axes: Axes) -> f64 {
        let delta = self.as_dvec3() - other.as_dvec3();
        DVec3::select(axes.as_bvec3(), delta, DVec3::ZERO).length()
    }

    /// Same as [`Point::distance_axes`] with a raw bit mask (1 = x, 2 = y, 4 = z).
    pub fn distance_masked(&self, other: &Point, mask: i64) -> f64 {
        self.distance_axes(other, Axes::from_mask(mask))
    }

    /// Distance from the origin.
    pub fn length(&self) -> f64 {
        self.as_dvec3().length()
    }

    /// Smallest distance from `self` to any of `points` over `axes`.
    /// Returns `f64::INFINITY` when `points` is empty.
    pub fn nearest_distance<'a, I>(&self, points: I, axes: Axes) -> f64
    where
        I: IntoIterator<Item = &'a Point>,
    {
        points
            .into_iter()
            .map(|p| self.distance_axes(p, axes))
            .fold(f64::INFINITY, f64::min)
    }
}

impl From<DVec3> for Point {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Point> for DVec3 {
    fn from(p: Point) -> Self {
        p.as_dvec3()
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}
