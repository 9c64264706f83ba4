//! Vector drawing core for evacuation plans.
//!
//! Exposes the plan model, the editor session state machine, the Cairo
//! renderer and the PDF export compositor so that front ends and tools
//! share one implementation.

pub mod config;
pub mod draw;
pub mod export;
pub mod geometry;
pub mod input;
pub mod project;
pub mod viewport;

pub use config::Config;
