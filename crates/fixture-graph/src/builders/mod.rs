//! Fluent builder APIs for generation runs.
//!
//! The [`DatasetBuilder`] runs every stage in a fixed order against one RNG and
//! returns the complete [`Dataset`].

mod dataset;

pub use dataset::{Dataset, DatasetBuilder, DatasetMetrics, generate};
