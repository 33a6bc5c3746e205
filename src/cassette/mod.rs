//! Record/replay infrastructure for deterministic runs against recorded upstreams.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;
