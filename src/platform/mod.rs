//! Platform abstraction layer
//!
//! Turns raw key state from the host into per-tick simulation input.

pub mod input;

pub use input::{InputState, KeyLatch};
