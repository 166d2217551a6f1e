//! Rotating picture window over a remote breed catalog.
//!
//! [`scheduler::SlideshowScheduler`] owns the timing: it seeds a small window
//! from an [`sequence::ItemSequence`], appends one item per tick and evicts the
//! oldest one a moment later. [`player::Player`] feeds it from the catalog.

pub mod catalog;
pub mod command;
pub mod config;
pub mod constants;
pub mod error;
pub mod player;
pub mod render;
pub mod scheduler;
pub mod sequence;
pub mod state;
pub mod window;

pub use error::{Error, Result};
