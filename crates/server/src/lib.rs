//! Server crate for the Narrm Eats recommendation engine.
//!
//! This crate contains the recommender that owns the published catalog
//! snapshot and answers every recommendation query against it.

pub mod recommender;
pub mod snapshot;

pub use recommender::{Recommendation, Recommender};
pub use snapshot::CatalogSnapshot;
