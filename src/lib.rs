//! # cattery
//!
//! A generational breeding simulation for a closed cattery.
//!
//! Founders are drawn from a random selection pool, and every breeding cycle
//! applies mortality, mates the fittest fertile adults and records statistics
//! for the cohort just born. All randomness flows through an injected
//! [`RandomSource`](random::RandomSource), so a seeded source replays a run
//! exactly.
//!
//! ## Core Concepts
//!
//! - **Traits and fitness**: a cat's genome is a fixed-length vector of real
//!   traits; fitness is the mean of a configured subset of them
//! - **Quotient**: raw fitness is reported on a `100 ± 15` scale
//! - **Pluggable breeding**: the engine depends only on the
//!   [`BreedingStrategy`](breeding::traits::BreedingStrategy) contract; the
//!   elitist policy is the default
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cattery::prelude::*;
//!
//! let config = SimulationConfig {
//!     total_trait_count: 100,
//!     fitness_trait_indices: (0..50).collect(),
//!     ..SimulationConfig::default()
//! };
//!
//! let report = SimulationEngine::elitist(config)?.run(&mut RngSource::seeded(42))?;
//! println!("{}", report.summary());
//! ```

pub mod breeding;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod population;
pub mod random;
pub mod simulation;
pub mod time;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::breeding::prelude::*;
    pub use crate::config::SimulationConfig;
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::random::{RandomSource, RngSource};
    pub use crate::simulation::prelude::*;
    pub use crate::time::SimDuration;
}
