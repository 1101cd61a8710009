//! # Utilities Module
//!
//! Encoding helpers shared by the builder, the relay and the state decoder.

pub mod serialization;

pub use serialization::*;
