//! Topological sorters.

pub mod functions;
pub mod kahn;
pub mod tables;
pub mod types;
