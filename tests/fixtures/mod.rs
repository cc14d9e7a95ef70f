//! Test fixtures for route-progress.
//!
//! Provides:
//! - Synthetic trips with encoded shapes and maneuvers
//! - Mock routing services for driving the navigator
//! - Real Andorra locations for the Valhalla integration test

#![allow(dead_code)]

pub mod andorra_locations;
pub mod routers;
pub mod trips;

pub use trips::*;
