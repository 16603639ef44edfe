//! Business logic for Aspex
//!
//! The core is the concurrent batch-export engine:
//!
//! - [`export::worklist`] - builds and partitions the run's worklist
//! - [`export::worker`] - the per-shard export pipeline
//! - [`export::coordinator`] - fan-out/fan-in orchestration
//! - [`export::report`] - outcome classification and run reporting
//! - [`layout`] - the on-disk export directory tree

pub mod export;
pub mod layout;
