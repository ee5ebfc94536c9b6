//! Rikishi Engine: procedural generation of sumo wrestlers.
//!
//! Produces plausible competitors from nothing but a seed: a native-script
//! ring name with its romanized reading, a historically weighted place of
//! origin, and a coherent set of ability attributes, assembled into draft
//! pools for a player to choose from.

pub mod config;
pub mod core;
pub mod schema;
