//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::TransitError;
use crate::geometry;

/// Geographic position in decimal degrees.
/// x = longitude, y = latitude. Serialized as `[x, y]` (GeoJSON order).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Planar distance in degrees.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        geometry::distance(*self, *other)
    }

    /// Bearing to another coordinate in degrees, [0, 360).
    pub fn bearing_to(&self, other: &Coordinate) -> f64 {
        geometry::bearing(*self, *other)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.x, c.y]
    }
}

impl From<DVec2> for Coordinate {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Coordinate> for DVec2 {
    fn from(c: Coordinate) -> Self {
        DVec2::new(c.x, c.y)
    }
}

/// A route's shape: an ordered, non-empty sequence of coordinates.
///
/// Traversal treats the path as a closed loop: after the last vertex
/// comes the first, whether or not the geometry is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct Path {
    vertices: Vec<Coordinate>,
}

impl Path {
    /// Build a path, rejecting an empty vertex list.
    pub fn new(vertices: Vec<Coordinate>) -> Result<Self, TransitError> {
        if vertices.is_empty() {
            return Err(TransitError::EmptyPath);
        }
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn first(&self) -> Coordinate {
        self.vertices[0]
    }

    pub fn vertex(&self, index: usize) -> Option<Coordinate> {
        self.vertices.get(index).copied()
    }

    /// Index of the vertex following `index`, wrapping to 0 after the last.
    pub fn next_index(&self, index: usize) -> usize {
        if index + 1 < self.vertices.len() {
            index + 1
        } else {
            0
        }
    }
}

impl TryFrom<Vec<Coordinate>> for Path {
    type Error = TransitError;

    fn try_from(vertices: Vec<Coordinate>) -> Result<Self, Self::Error> {
        Path::new(vertices)
    }
}

impl From<Path> for Vec<Coordinate> {
    fn from(path: Path) -> Self {
        path.vertices
    }
}

/// Simulation time tracking for the tick engine.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulated time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
