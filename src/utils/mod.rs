//! Small helpers shared across the pipeline.

pub mod date;
pub mod exec;
pub mod log;
pub mod slug;
