//! # Atlas Core
//!
//! The engine behind the Temporal Atlas views. It decides which works are
//! active for a set of facet selections and where each active work is drawn.
//! Views consume its output; it never renders anything itself.
//!
//! ## Core Components
//!
//! - **filter**: Compiles facet selections into a work predicate; journeys and facet tallies
//! - **emotion**: Maps a work's emotions to valence/arousal coordinates
//! - **layout**: Force-directed realm clustering with pan/zoom and focus transitions
//! - **interaction**: Selection, bookmarks and popup anchoring
//!
//! ## Design Philosophy
//!
//! - **Snapshot-Driven**: Every computation reads a complete snapshot of the corpus and filters
//! - **Cooperative**: The simulation advances in bounded per-frame steps driven by the host
//! - **Forgiving**: Degenerate input yields empty selections or clamped positions, never panics

pub mod emotion;
pub mod error;
pub mod filter;
pub mod interaction;
pub mod layout;

pub use emotion::*;
pub use error::*;
pub use filter::*;
pub use interaction::*;
pub use layout::*;
