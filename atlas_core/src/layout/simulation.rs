//! Force simulation clustering works around their realm centers.
//!
//! Each tick:
//! 1. **Cool**: temperature (alpha) decays geometrically
//! 2. **Repel**: every pair of nodes pushes apart with inverse-distance falloff
//! 3. **Center**: every node is pulled toward its realm's center
//! 4. **Integrate**: velocities are damped and added to positions
//! 5. **Collide**: overlapping pairs are separated to their collision radii
//! 6. **Clamp**: positions are forced finite and inside the viewport
//!
//! Forces scale with alpha, so motion dies out as the simulation cools. Once
//! alpha falls below `alpha_min` the simulation is settled and ticks are
//! no-ops.

use atlas_corpus::{MediaType, Realm, WorkId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::f64::consts::PI;
use tracing::debug;
use uuid::Uuid;

use super::config::LayoutConfig;
use super::viewport::{Point, Viewport};

/// Identity of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimulationId(pub Uuid);

impl SimulationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SimulationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SimulationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the simulation needs to know about a visible work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSeed {
    pub id: WorkId,
    pub media_type: MediaType,
    pub realm: Realm,
}

/// A visible work's physical state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: WorkId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub realm: Realm,
    /// Bookmarked works are pinned: drawn highlighted with a larger radius.
    pub pinned: bool,
    pub radius: f64,
}

impl LayoutNode {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Force strengths resolved for the current focus.
#[derive(Debug, Clone, Copy)]
struct Forces {
    repulsion: f64,
    centering: f64,
    distance_min2: f64,
    distance_max2: f64,
    padding: f64,
    collision_iterations: u32,
}

/// One run of the layout simulation over a fixed node set.
#[derive(Debug, Clone)]
pub struct Simulation {
    id: SimulationId,
    nodes: Vec<LayoutNode>,
    centers: [Point; 3],
    viewport: Viewport,
    forces: Forces,
    alpha: f64,
    alpha_min: f64,
    alpha_decay: f64,
    velocity_decay: f64,
    tick_interval: f64,
    max_ticks_per_frame: u32,
    accumulator: f64,
    ticks: u64,
    last_displacement: f64,
}

fn realm_slot(realm: Realm) -> usize {
    match realm {
        Realm::Cosmic => 0,
        Realm::Human => 1,
        Realm::Disrupted => 2,
    }
}

impl Simulation {
    /// Start a simulation at full temperature.
    ///
    /// Nodes are seeded on a phyllotaxis spiral around their realm center,
    /// which is deterministic and never stacks two nodes on one point.
    pub fn new(
        seeds: &[NodeSeed],
        bookmarks: &BTreeSet<WorkId>,
        viewport: Viewport,
        focus: Option<Realm>,
        config: &LayoutConfig,
    ) -> Self {
        let centers = Realm::ALL.map(|realm| viewport.realm_center(realm, &config.realm_anchors));
        let golden_angle = PI * (3.0 - 5f64.sqrt());
        let mut per_realm = [0usize; 3];

        let nodes = seeds
            .iter()
            .map(|seed| {
                let slot = realm_slot(seed.realm);
                let i = per_realm[slot] as f64;
                per_realm[slot] += 1;

                let r = config.seed_spacing * (0.5 + i).sqrt();
                let angle = i * golden_angle;
                let center = centers[slot];
                let pinned = bookmarks.contains(&seed.id);

                LayoutNode {
                    id: seed.id.clone(),
                    x: center.x + r * angle.cos(),
                    y: center.y + r * angle.sin(),
                    vx: 0.0,
                    vy: 0.0,
                    media_type: seed.media_type,
                    realm: seed.realm,
                    pinned,
                    radius: config.radius_for(pinned),
                }
            })
            .collect();

        let (repulsion, centering) = match focus {
            Some(_) => (config.focused_repulsion, config.focused_centering),
            None => (config.repulsion, config.centering),
        };

        let mut simulation = Self {
            id: SimulationId::new(),
            nodes,
            centers,
            viewport,
            forces: Forces {
                repulsion,
                centering,
                distance_min2: config.repulsion_distance_min.powi(2),
                distance_max2: config.repulsion_distance_max.powi(2),
                padding: config.collision_padding,
                collision_iterations: config.collision_iterations,
            },
            alpha: 1.0,
            alpha_min: config.alpha_min,
            alpha_decay: config.alpha_decay,
            velocity_decay: config.velocity_decay,
            tick_interval: config.tick_interval,
            max_ticks_per_frame: config.max_ticks_per_frame.max(1),
            accumulator: 0.0,
            ticks: 0,
            last_displacement: 0.0,
        };
        simulation.clamp_to_viewport();

        debug!(
            simulation = %simulation.id,
            nodes = simulation.nodes.len(),
            focused = ?focus,
            "Started layout simulation"
        );
        simulation
    }

    pub fn id(&self) -> SimulationId {
        self.id
    }

    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn node(&self, id: &WorkId) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Cluster center of a realm for this run.
    pub fn center(&self, realm: Realm) -> Point {
        self.centers[realm_slot(realm)]
    }

    /// Whether the temperature has dropped below the stopping threshold.
    pub fn is_settled(&self) -> bool {
        self.alpha < self.alpha_min
    }

    /// Largest distance any node moved during the last tick.
    pub fn max_displacement(&self) -> f64 {
        self.last_displacement
    }

    /// Advance by `dt` seconds of wall time.
    ///
    /// Whole tick intervals are run, at most `max_ticks_per_frame` of them;
    /// a backlog beyond that is dropped rather than caught up.
    pub fn step(&mut self, dt: f64) -> &[LayoutNode] {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        let due = (self.accumulator / self.tick_interval).floor();
        let cap = f64::from(self.max_ticks_per_frame);
        let ticks = due.min(cap) as u32;

        if due > cap {
            self.accumulator = 0.0;
        } else {
            self.accumulator -= f64::from(ticks) * self.tick_interval;
        }

        for _ in 0..ticks {
            self.tick();
        }
        &self.nodes
    }

    /// Run a single simulation step. Does nothing once settled.
    pub fn tick(&mut self) {
        if self.is_settled() {
            self.last_displacement = 0.0;
            return;
        }

        self.alpha -= self.alpha * self.alpha_decay;
        let before: Vec<Point> = self.nodes.iter().map(LayoutNode::position).collect();

        self.apply_repulsion();
        self.apply_centering();

        let keep = 1.0 - self.velocity_decay;
        for node in &mut self.nodes {
            node.vx *= keep;
            node.vy *= keep;
            node.x += node.vx;
            node.y += node.vy;
        }

        for _ in 0..self.forces.collision_iterations {
            self.resolve_collisions();
        }
        self.clamp_to_viewport();

        self.last_displacement = self
            .nodes
            .iter()
            .zip(&before)
            .map(|(node, prev)| node.position().distance_to(*prev))
            .fold(0.0, f64::max);
        self.ticks += 1;

        if self.is_settled() {
            debug!(simulation = %self.id, ticks = self.ticks, "Layout simulation settled");
        }
    }

    /// Run ticks until settled or `max_ticks` have run.
    pub fn run_to_settle(&mut self, max_ticks: u64) -> bool {
        for _ in 0..max_ticks {
            if self.is_settled() {
                break;
            }
            self.tick();
        }
        self.is_settled()
    }

    /// Restore some temperature without reseeding positions.
    pub fn reheat(&mut self, alpha: f64) {
        if alpha.is_finite() {
            self.alpha = self.alpha.max(alpha.min(1.0));
        }
    }

    /// Update pinned flags and radii from a bookmark set. Returns whether
    /// any node changed.
    pub fn update_pins(&mut self, bookmarks: &BTreeSet<WorkId>, config: &LayoutConfig) -> bool {
        let mut changed = false;
        for node in &mut self.nodes {
            let pinned = bookmarks.contains(&node.id);
            if node.pinned != pinned {
                node.pinned = pinned;
                node.radius = config.radius_for(pinned);
                changed = true;
            }
        }
        changed
    }

    fn apply_repulsion(&mut self) {
        let Forces {
            repulsion,
            distance_min2,
            distance_max2,
            ..
        } = self.forces;
        let n = self.nodes.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.nodes.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);

                let (mut dx, mut dy) = (b.x - a.x, b.y - a.y);
                if dx == 0.0 && dy == 0.0 {
                    (dx, dy) = nudge(i, j);
                }
                let l2 = dx * dx + dy * dy;
                if l2 >= distance_max2 {
                    continue;
                }

                let w = repulsion * self.alpha / l2.max(distance_min2);
                a.vx -= dx * w;
                a.vy -= dy * w;
                b.vx += dx * w;
                b.vy += dy * w;
            }
        }
    }

    fn apply_centering(&mut self) {
        let strength = self.forces.centering * self.alpha;
        for node in &mut self.nodes {
            let center = self.centers[realm_slot(node.realm)];
            node.vx += (center.x - node.x) * strength;
            node.vy += (center.y - node.y) * strength;
        }
    }

    /// Push overlapping pairs apart. The larger node moves less.
    fn resolve_collisions(&mut self) {
        let padding = self.forces.padding;
        let n = self.nodes.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let (head, tail) = self.nodes.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);

                let ra = a.radius + padding;
                let rb = b.radius + padding;
                let min_dist = ra + rb;

                let (mut dx, mut dy) = (b.x - a.x, b.y - a.y);
                if dx == 0.0 && dy == 0.0 {
                    (dx, dy) = nudge(i, j);
                }
                let dist = (dx * dx + dy * dy).sqrt();
                if dist >= min_dist {
                    continue;
                }

                let overlap = (min_dist - dist) / dist;
                let (wa, wb) = {
                    let (a2, b2) = (ra * ra, rb * rb);
                    (b2 / (a2 + b2), a2 / (a2 + b2))
                };
                a.x -= dx * overlap * wa;
                a.y -= dy * overlap * wa;
                b.x += dx * overlap * wb;
                b.y += dy * overlap * wb;
            }
        }
    }

    fn clamp_to_viewport(&mut self) {
        let viewport = self.viewport;
        for node in &mut self.nodes {
            let p = viewport.clamp(node.position(), node.radius);
            node.x = p.x;
            node.y = p.y;
            if !(node.vx.is_finite() && node.vy.is_finite()) {
                node.vx = 0.0;
                node.vy = 0.0;
            }
        }
    }
}

/// Deterministic tiny offset separating two coincident nodes.
fn nudge(i: usize, j: usize) -> (f64, f64) {
    let angle = (i * 31 + j * 17) as f64;
    (1e-3 * angle.cos(), 1e-3 * angle.sin())
}
