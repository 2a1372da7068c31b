//! Fixture sampling for Fixtura: annotation-aware scalar generators, the
//! default resolution function, and the seeded end-to-end engine.

pub mod engine;
pub mod resolver;
pub mod scalars;

pub use engine::FixtureEngine;
pub use resolver::DefaultResolver;
pub use scalars::scalar_arbitrary;
