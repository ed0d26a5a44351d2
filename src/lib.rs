//! BioSync: daily travel plans with per-day energy tracking.
//!
//! A trip's dates are mapped onto a cycle of day templates; completing or
//! skipping activities moves a per-date energy balance that never leaves
//! `0..=100`. State lives in a small key-value store.

pub mod cli;
pub mod config;
pub mod model;
pub mod plan;
pub mod storage;
