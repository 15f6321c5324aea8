//! Pipelines.
//!
//! The preparation run is implemented behind a light [pipeline::Pipeline]
//! trait, so that further recipes and corpus-building flows can slot in
//! next to [prepare::Prepare].
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod prepare;

pub use pipeline::Pipeline;
pub use prepare::Prepare;
