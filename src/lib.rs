//! Procedural cave map generation library
//!
//! Seeded noise, cellular-automaton smoothing, region pruning, room
//! connectivity and marching-squares triangulation. Re-exports modules
//! for use by the CLI binary and downstream tools.

pub mod cave;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod mesh;
pub mod noise;
pub mod regions;
pub mod rooms;
pub mod seeds;
pub mod smoothing;
