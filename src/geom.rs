//! Minimal value types shared by the angle, projection and topology modules.
//!
//! A `Point` is either (longitude, latitude) in decimal degrees or
//! (easting, northing) in metres; which one depends on where it came from.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

/// Ordered boundary of a polygon.
///
/// By convention the last point repeats the first. Exterior rings are
/// expected to run clockwise.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Ring(Vec<Point>);

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Build a ring and append the first point if it is not already closed.
    pub fn closed(mut points: Vec<Point>) -> Self {
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if first != last {
                points.push(first);
            }
        }
        Self(points)
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Number of stored points, including the closing duplicate.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => self.0.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Number of distinct positions along the boundary (closing point excluded).
    pub fn vertex_count(&self) -> usize {
        if self.is_closed() {
            self.0.len() - 1
        } else {
            self.0.len()
        }
    }

    pub fn map_points<F>(&self, mut f: F) -> Ring
    where
        F: FnMut(Point) -> Point,
    {
        Ring(self.0.iter().map(|&p| f(p)).collect())
    }

    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

impl<P: Into<Point>> FromIterator<P> for Ring {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Ring(iter.into_iter().map(Into::into).collect())
    }
}

/// An exterior ring with optional holes.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub exterior: Ring,
    pub interiors: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}

impl From<Ring> for Polygon {
    fn from(exterior: Ring) -> Self {
        Self::new(exterior, Vec::new())
    }
}
