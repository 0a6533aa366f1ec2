//! Tunable constants of the layout simulation and camera.

use serde::{Deserialize, Serialize};

use super::viewport::RealmAnchors;
use crate::error::{ConfigError, Result};

/// Configuration for the force-directed realm layout.
///
/// Every field has a default, so a TOML document only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Temperature below which the simulation is settled.
    pub alpha_min: f64,

    /// Fraction of the remaining temperature lost per tick (0.0-1.0].
    pub alpha_decay: f64,

    /// Fraction of velocity lost per tick (0.0-1.0).
    pub velocity_decay: f64,

    /// Many-body repulsion strength with no realm focused.
    pub repulsion: f64,

    /// Many-body repulsion strength while a realm is focused.
    pub focused_repulsion: f64,

    /// Pull toward the realm center with no realm focused.
    pub centering: f64,

    /// Pull toward the realm center while a realm is focused.
    pub focused_centering: f64,

    /// Pairs closer than this are treated as this close for repulsion.
    pub repulsion_distance_min: f64,

    /// Pairs farther apart than this do not repel.
    pub repulsion_distance_max: f64,

    /// Node radius in world pixels.
    pub node_radius: f64,

    /// Radius of bookmarked (pinned) works.
    pub bookmarked_radius: f64,

    /// Extra gap kept around every node when resolving collisions.
    pub collision_padding: f64,

    /// Collision passes per tick.
    pub collision_iterations: u32,

    /// Spacing of the initial spiral around each realm center.
    pub seed_spacing: f64,

    /// Temperature restored when bookmarks change mid-run.
    pub reheat_alpha: f64,

    /// Simulated seconds per tick.
    pub tick_interval: f64,

    /// Upper bound on ticks run in a single frame.
    pub max_ticks_per_frame: u32,

    /// Magnification when a realm is focused.
    pub focus_zoom: f64,

    pub min_zoom: f64,
    pub max_zoom: f64,

    /// Duration of focus camera transitions, in seconds.
    pub camera_tween_secs: f64,

    /// Radius of a realm's clickable zone, as a fraction of the smaller
    /// viewport dimension.
    pub realm_zone_radius: f64,

    pub realm_anchors: RealmAnchors,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            alpha_min: 0.001,
            // 1 - alpha_min^(1/300): settles in about 300 ticks
            alpha_decay: 0.0228,
            velocity_decay: 0.4,
            repulsion: 30.0,
            focused_repulsion: 60.0,
            centering: 0.08,
            focused_centering: 0.03,
            repulsion_distance_min: 1.0,
            repulsion_distance_max: 400.0,
            node_radius: 6.0,
            bookmarked_radius: 10.0,
            collision_padding: 2.0,
            collision_iterations: 3,
            seed_spacing: 10.0,
            reheat_alpha: 0.3,
            tick_interval: 1.0 / 60.0,
            max_ticks_per_frame: 4,
            focus_zoom: 1.8,
            min_zoom: 0.25,
            max_zoom: 8.0,
            camera_tween_secs: 0.75,
            realm_zone_radius: 0.2,
            realm_anchors: RealmAnchors::default(),
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: LayoutConfig = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter is in its accepted range.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if !(self.alpha_decay > 0.0 && self.alpha_decay <= 1.0) {
            return invalid("alpha_decay", "must be in (0, 1]");
        }
        if !(self.alpha_min > 0.0 && self.alpha_min < 1.0) {
            return invalid("alpha_min", "must be in (0, 1)");
        }
        if !(0.0..1.0).contains(&self.velocity_decay) {
            return invalid("velocity_decay", "must be in [0, 1)");
        }
        if !(self.node_radius > 0.0) {
            return invalid("node_radius", "must be positive");
        }
        if !(self.bookmarked_radius > 0.0) {
            return invalid("bookmarked_radius", "must be positive");
        }
        if !(self.collision_padding >= 0.0) {
            return invalid("collision_padding", "must not be negative");
        }
        if !(self.repulsion_distance_min > 0.0
            && self.repulsion_distance_min < self.repulsion_distance_max)
        {
            return invalid("repulsion_distance_min", "must be positive and below the maximum");
        }
        if !(self.tick_interval > 0.0) {
            return invalid("tick_interval", "must be positive");
        }
        if self.max_ticks_per_frame == 0 {
            return invalid("max_ticks_per_frame", "must be at least 1");
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return invalid("min_zoom", "must be positive and not above max_zoom");
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.focus_zoom) {
            return invalid("focus_zoom", "must lie within the zoom bounds");
        }
        Ok(())
    }

    /// Collision radius of a node.
    pub fn radius_for(&self, bookmarked: bool) -> f64 {
        if bookmarked {
            self.bookmarked_radius
        } else {
            self.node_radius
        }
    }
}
