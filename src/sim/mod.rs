//! Memory, the image loader, and the top-level run loop built on top of
//! the pipeline controller.

pub mod loader;
pub mod memory;
pub mod simulator;

pub use memory::Memory;
pub use simulator::{Simulator, Termination};
