//! # Atlas Corpus
//!
//! The catalog of cultural works explored by the Temporal Atlas. This crate
//! owns the immutable data model and is the single source of truth for each
//! work's realm. It contains no filtering or layout logic.
//!
//! ## Core Components
//!
//! - **work**: The `Work` record and its identifiers, media types and centuries
//! - **realm**: The realm classifier (cosmic / human / disrupted)
//! - **store**: The read-only `Corpus`, loaded once from the JSON dataset

pub mod realm;
pub mod store;
pub mod work;

pub use realm::*;
pub use store::*;
pub use work::*;
