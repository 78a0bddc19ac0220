//! Progress reporting for the CLI
//!
//! The pipeline's events arrive over a channel; [`collect_events`] renders
//! them while the run is live and folds them into a [`crate::output::RunReport`]
//! for final printing.

pub mod renderer;
pub mod utils;

pub use renderer::collect_events;
