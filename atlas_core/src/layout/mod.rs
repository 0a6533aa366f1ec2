//! Layout Engine - the spatial view's realm-clustered, force-directed layout.
//!
//! The engine owns one `Simulation` at a time. Any change to the visible
//! works, the focused realm or the viewport size discards it and starts a
//! fresh one; there is no merging of old and new positions.
//!
//! Rendering is cooperative. The host asks for a `FrameTicket` before
//! scheduling a frame and hands it back with the frame's elapsed time.
//! Tickets issued for a superseded simulation are ignored, so a late frame
//! callback can never write into a newer node set.

mod camera;
mod config;
mod simulation;
mod viewport;

pub use camera::*;
pub use config::*;
pub use simulation::*;
pub use viewport::*;

use atlas_corpus::{Realm, Work, WorkId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Permission to advance one specific simulation run by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameTicket {
    pub simulation: SimulationId,
}

/// Result of handing a frame to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The simulation advanced. `settled` means no further frames are needed
    /// for physics (the camera may still be moving).
    Advanced { settled: bool, camera_moving: bool },
    /// The ticket belonged to a discarded simulation; nothing changed.
    Stale,
}

/// What a click on the spatial canvas hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    Node(WorkId),
    Realm(Realm),
    Empty,
}

/// Screen-space position of one visible work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodePosition {
    pub id: WorkId,
    pub realm: Realm,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub pinned: bool,
}

/// Everything a renderer needs to draw the current frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    pub simulation: SimulationId,
    pub settled: bool,
    pub focus: Option<Realm>,
    pub transform: Transform,
    pub nodes: Vec<NodePosition>,
}

impl LayoutSnapshot {
    /// Serialize for a renderer on the other side of a bridge.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// The stateful layout engine for the spatial view.
#[derive(Debug)]
pub struct LayoutEngine {
    config: LayoutConfig,
    viewport: Viewport,
    seeds: Vec<NodeSeed>,
    bookmarks: BTreeSet<WorkId>,
    focus: Option<Realm>,
    simulation: Simulation,
    transform: Transform,
    tween: Option<CameraTween>,
}

impl LayoutEngine {
    /// Create an engine showing no works.
    pub fn new(config: LayoutConfig, viewport: Viewport) -> Self {
        let bookmarks = BTreeSet::new();
        let simulation = Simulation::new(&[], &bookmarks, viewport, None, &config);
        Self {
            config,
            viewport,
            seeds: Vec::new(),
            bookmarks,
            focus: None,
            simulation,
            transform: Transform::IDENTITY,
            tween: None,
        }
    }

    /// Create an engine with the default configuration.
    pub fn with_defaults(viewport: Viewport) -> Self {
        Self::new(LayoutConfig::default(), viewport)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn focus(&self) -> Option<Realm> {
        self.focus
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Current pan/zoom transform.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        self.simulation.nodes()
    }

    pub fn is_settled(&self) -> bool {
        self.simulation.is_settled()
    }

    /// Replace the visible subset and restart the simulation.
    pub fn set_works<'a>(&mut self, works: impl IntoIterator<Item = &'a Work>) {
        self.seeds = works
            .into_iter()
            .map(|work| NodeSeed {
                id: work.id.clone(),
                media_type: work.media_type,
                realm: work.realm(),
            })
            .collect();
        self.restart();
    }

    /// Replace the bookmark set. Radii change in place and the simulation
    /// is reheated; positions are kept.
    pub fn set_bookmarks(&mut self, bookmarks: BTreeSet<WorkId>) {
        self.bookmarks = bookmarks;
        if self.simulation.update_pins(&self.bookmarks, &self.config) {
            self.simulation.reheat(self.config.reheat_alpha);
        }
    }

    /// Toggle focus on a realm: focusing the focused realm clears focus.
    pub fn toggle_realm_focus(&mut self, realm: Realm) {
        let next = if self.focus == Some(realm) {
            None
        } else {
            Some(realm)
        };
        self.set_focus(next);
    }

    pub fn clear_focus(&mut self) {
        self.set_focus(None);
    }

    fn set_focus(&mut self, focus: Option<Realm>) {
        if self.focus == focus {
            return;
        }
        self.focus = focus;
        self.restart();

        let target = self.focus_transform();
        self.tween = Some(CameraTween::new(
            self.transform,
            target,
            self.config.camera_tween_secs,
        ));
    }

    fn focus_transform(&self) -> Transform {
        match self.focus {
            Some(realm) => {
                let center = self.viewport.realm_center(realm, &self.config.realm_anchors);
                Transform::centered_on(center, self.config.focus_zoom, &self.viewport)
            }
            None => Transform::IDENTITY,
        }
    }

    /// Adopt new viewport dimensions. Realm centers are recomputed from the
    /// new size and the simulation restarts; the camera jumps to the
    /// transform matching the current focus.
    pub fn resize(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.restart();
        self.tween = None;
        self.transform = self.focus_transform();
    }

    fn restart(&mut self) {
        let previous = self.simulation.id();
        self.simulation = Simulation::new(
            &self.seeds,
            &self.bookmarks,
            self.viewport,
            self.focus,
            &self.config,
        );
        debug!(
            previous = %previous,
            current = %self.simulation.id(),
            nodes = self.seeds.len(),
            "Restarted layout"
        );
    }

    /// Ticket for the next frame of the current simulation.
    pub fn schedule_frame(&self) -> FrameTicket {
        FrameTicket {
            simulation: self.simulation.id(),
        }
    }

    /// Advance physics and camera by `dt` seconds, if the ticket is current.
    pub fn on_frame(&mut self, ticket: FrameTicket, dt: f64) -> FrameOutcome {
        if ticket.simulation != self.simulation.id() {
            trace!(stale = %ticket.simulation, "Discarding frame for superseded simulation");
            return FrameOutcome::Stale;
        }

        self.simulation.step(dt);

        if let Some(tween) = &mut self.tween {
            self.transform = tween.advance(dt);
            if tween.is_finished() {
                self.tween = None;
            }
        }

        FrameOutcome::Advanced {
            settled: self.simulation.is_settled(),
            camera_moving: self.tween.is_some(),
        }
    }

    /// Pan by a screen-space delta. Cancels any camera transition.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.tween = None;
        self.transform = self.transform.pan(dx, dy);
    }

    /// Zoom around a screen point. Cancels any camera transition.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        self.tween = None;
        self.transform =
            self.transform
                .zoom_at(anchor, factor, self.config.min_zoom, self.config.max_zoom);
    }

    /// Screen position of a visible work.
    pub fn screen_position(&self, id: &WorkId) -> Option<Point> {
        self.simulation
            .node(id)
            .map(|node| self.transform.apply(node.position()))
    }

    /// The topmost node under a screen point.
    pub fn node_at(&self, screen: Point) -> Option<&LayoutNode> {
        let world = self.transform.invert(screen);
        self.simulation
            .nodes()
            .iter()
            .rev()
            .find(|node| node.position().distance_to(world) <= node.radius)
    }

    /// The realm whose background zone contains a screen point.
    pub fn realm_at(&self, screen: Point) -> Option<Realm> {
        let world = self.transform.invert(screen);
        let zone = self.config.realm_zone_radius * self.viewport.width.min(self.viewport.height);

        Realm::ALL
            .into_iter()
            .map(|realm| {
                let center = self.viewport.realm_center(realm, &self.config.realm_anchors);
                (realm, center.distance_to(world))
            })
            .filter(|(_, distance)| *distance <= zone)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(realm, _)| realm)
    }

    /// Resolve a primary click. Realm zones toggle focus and empty space
    /// clears it; node clicks leave focus unchanged.
    pub fn click(&mut self, screen: Point) -> ClickTarget {
        if let Some(node) = self.node_at(screen) {
            return ClickTarget::Node(node.id.clone());
        }

        match self.realm_at(screen) {
            Some(realm) => {
                self.toggle_realm_focus(realm);
                ClickTarget::Realm(realm)
            }
            None => {
                self.clear_focus();
                ClickTarget::Empty
            }
        }
    }

    /// Screen-space state of every visible work.
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            simulation: self.simulation.id(),
            settled: self.simulation.is_settled(),
            focus: self.focus,
            transform: self.transform,
            nodes: self
                .simulation
                .nodes()
                .iter()
                .map(|node| {
                    let p = self.transform.apply(node.position());
                    NodePosition {
                        id: node.id.clone(),
                        realm: node.realm,
                        x: p.x,
                        y: p.y,
                        radius: node.radius * self.transform.k,
                        pinned: node.pinned,
                    }
                })
                .collect(),
        }
    }
}
