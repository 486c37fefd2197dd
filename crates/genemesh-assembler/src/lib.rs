//! genemesh-assembler — Turns related-genes engine responses into UI-ready results.
//!
//! Each stage is exposed on its own so hosts can reuse pieces; [`assemble`]
//! runs them all in order.

pub mod mediator;
pub mod canonical;
pub mod scoring;
pub mod weights;
pub mod attributes;
pub mod interactions;
pub mod annotations;
pub mod describe;
pub mod ordering;
pub mod assembler;

pub use assembler::{assemble, SearchResult};
pub use describe::{DescribedNetwork, DescriptionFormatter};
pub use weights::{normalize_network_weights, WeightedNetwork};
