//! Domain models and types for Aspex.
//!
//! This module contains the core domain models shared by the export engine:
//!
//! - **Work items** ([`WorkItem`]) - one exportable (repository, resource) pair
//! - **Resource metadata** ([`Resource`], [`Repository`]) - what the archival
//!   API tells us about a described collection
//! - **Outcomes** ([`ExportOutcome`], [`OutcomeStatus`]) - the per-item result
//!   classification produced by export workers
//! - **Error types** ([`AspexError`], [`ArchivesApiError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, AspexError>`]:
//!
//! ```rust
//! use aspex::domain::{AspexError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(AspexError::Configuration("missing environment".to_string()))
//! }
//! ```

pub mod errors;
pub mod outcome;
pub mod resource;
pub mod result;
pub mod work_item;

// Re-export commonly used types for convenience
pub use errors::{ArchivesApiError, AspexError};
pub use outcome::{ExportOutcome, OutcomeStatus};
pub use resource::{Repository, Resource};
pub use result::Result;
pub use work_item::WorkItem;
