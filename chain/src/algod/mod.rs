//! # Algod Module
//!
//! REST access to an algod node:
//! - suggested params for transaction headers
//! - account, asset and pending-transaction lookups
//! - raw transaction submission and round waiting

pub mod client;
pub mod types;

pub use client::{AlgodClient, AlgodConfig};
pub use types::*;
