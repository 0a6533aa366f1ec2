//! Screen geometry: points, sizes, the viewport and realm anchor positions.

use atlas_corpus::Realm;
use serde::{Deserialize, Serialize};

/// A 2D point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Width and height of a popup or panel, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Realm anchor positions as fractions of the viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealmAnchors {
    pub cosmic: [f64; 2],
    pub human: [f64; 2],
    pub disrupted: [f64; 2],
}

impl Default for RealmAnchors {
    fn default() -> Self {
        Self {
            cosmic: [0.25, 0.3],
            human: [0.5, 0.72],
            disrupted: [0.75, 0.3],
        }
    }
}

impl RealmAnchors {
    pub fn fraction(&self, realm: Realm) -> [f64; 2] {
        match realm {
            Realm::Cosmic => self.cosmic,
            Realm::Human => self.human,
            Realm::Disrupted => self.disrupted,
        }
    }
}

/// The drawable area. Degenerate dimensions are stored as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        let sane = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Screen position of a realm's cluster center.
    pub fn realm_center(&self, realm: Realm, anchors: &RealmAnchors) -> Point {
        let [fx, fy] = anchors.fraction(realm);
        Point::new(fx * self.width, fy * self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clamp a point so a disc of `margin` around it stays inside.
    ///
    /// Non-finite coordinates collapse to the center. An axis narrower than
    /// the disc pins the coordinate to its midpoint.
    pub fn clamp(&self, p: Point, margin: f64) -> Point {
        Point::new(
            clamp_axis(p.x, margin, self.width),
            clamp_axis(p.y, margin, self.height),
        )
    }
}

fn clamp_axis(value: f64, margin: f64, extent: f64) -> f64 {
    let mid = extent / 2.0;
    if !value.is_finite() {
        return mid;
    }
    let (lo, hi) = (margin, extent - margin);
    if hi < lo {
        mid
    } else {
        value.clamp(lo, hi)
    }
}
