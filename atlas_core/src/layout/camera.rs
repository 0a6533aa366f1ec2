//! Pan/zoom transform layered on top of simulated coordinates.
//!
//! The camera never touches simulation state: screen = world * k + (x, y).

use serde::{Deserialize, Serialize};

use super::viewport::{Point, Viewport};

/// A uniform-scale affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    pub fn new(x: f64, y: f64, k: f64) -> Self {
        Self { x, y, k }
    }

    /// World to screen.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    /// Screen to world.
    pub fn invert(&self, p: Point) -> Point {
        Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// Translate by a screen-space delta.
    pub fn pan(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.k)
    }

    /// Scale by `factor` around a fixed screen point, keeping the scale
    /// within `[min_k, max_k]`.
    pub fn zoom_at(&self, anchor: Point, factor: f64, min_k: f64, max_k: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            return *self;
        }
        let k = (self.k * factor).clamp(min_k, max_k);
        let world = self.invert(anchor);
        Self::new(anchor.x - world.x * k, anchor.y - world.y * k, k)
    }

    /// The transform that shows `target` at the viewport center, magnified
    /// by `k`.
    pub fn centered_on(target: Point, k: f64, viewport: &Viewport) -> Self {
        let center = viewport.center();
        Self::new(center.x - target.x * k, center.y - target.y * k, k)
    }

    fn lerp(&self, other: &Transform, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.k + (other.k - self.k) * t,
        )
    }
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// A timed, eased transition between two transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTween {
    from: Transform,
    to: Transform,
    duration: f64,
    elapsed: f64,
}

impl CameraTween {
    pub fn new(from: Transform, to: Transform, duration: f64) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the current transform.
    pub fn advance(&mut self, dt: f64) -> Transform {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        self.current()
    }

    pub fn current(&self) -> Transform {
        if self.is_finished() {
            return self.to;
        }
        let t = ease_cubic_in_out(self.elapsed / self.duration);
        self.from.lerp(&self.to, t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn target(&self) -> Transform {
        self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        a.distance_to(b) < 1e-9
    }

    #[test]
    fn test_apply_invert() {
        let t = Transform::new(30.0, -12.0, 2.5);
        let p = Point::new(7.0, 11.0);
        assert!(close(t.invert(t.apply(p)), p));
        assert_eq!(Transform::IDENTITY.apply(p), p);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let t = Transform::new(10.0, 20.0, 1.0);
        let anchor = Point::new(200.0, 150.0);
        let world = t.invert(anchor);

        let zoomed = t.zoom_at(anchor, 2.0, 0.5, 8.0);
        assert_eq!(zoomed.k, 2.0);
        assert!(close(zoomed.apply(world), anchor));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let t = Transform::IDENTITY.zoom_at(Point::new(0.0, 0.0), 100.0, 0.5, 4.0);
        assert_eq!(t.k, 4.0);

        let unchanged = Transform::IDENTITY.zoom_at(Point::new(0.0, 0.0), f64::NAN, 0.5, 4.0);
        assert_eq!(unchanged, Transform::IDENTITY);
    }

    #[test]
    fn test_centered_on() {
        let viewport = Viewport::new(800.0, 600.0);
        let t = Transform::centered_on(Point::new(200.0, 180.0), 2.0, &viewport);
        assert!(close(t.apply(Point::new(200.0, 180.0)), viewport.center()));
    }

    #[test]
    fn test_tween_reaches_target() {
        let to = Transform::new(100.0, 50.0, 2.0);
        let mut tween = CameraTween::new(Transform::IDENTITY, to, 0.5);

        let mid = tween.advance(0.25);
        assert!(mid.k > 1.0 && mid.k < 2.0);
        assert!(!tween.is_finished());

        assert_eq!(tween.advance(0.3), to);
        assert!(tween.is_finished());
    }

    #[test]
    fn test_zero_duration_tween() {
        let to = Transform::new(1.0, 2.0, 3.0);
        let tween = CameraTween::new(Transform::IDENTITY, to, 0.0);
        assert!(tween.is_finished());
        assert_eq!(tween.current(), to);
    }
}
