//! Simulation drivers
//!
//! This module provides the generational simulation engine and a runner for
//! batches of independent runs.

pub mod batch;
pub mod engine;

pub mod prelude {
    pub use super::batch::*;
    pub use super::engine::*;
}
