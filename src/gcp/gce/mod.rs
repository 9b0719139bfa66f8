//! # Google Compute Engine (GCE) Instance Control
//!
//! This module provides a small facade over the Google Compute Engine API for
//! managing existing VM instances: status lookup, start, stop, and a lazy
//! listing of every instance in a project/zone.
//!
//! ## Submodules
//! - `client`: The `ComputeService` seam, its HTTP implementation, and the
//!   paginated listing iterator.
//! - `defaults`: Default project / zone / credentials-file settings.
//! - `error`: The error taxonomy for compute calls.
//! - `format`: Pure formatters turning API responses into one-line summaries.
//! - `types`: Data structures deserialized from the GCE API.

/// The compute-service seam and its HTTP implementation.
pub mod client;
/// Default project / zone / credentials settings.
pub mod defaults;
/// Error taxonomy for compute calls.
pub mod error;
/// One-line summary formatters.
pub mod format;
/// Data structures for the GCE API.
pub mod types;

// Re-export key components to provide a convenient public API for this module.
pub use crate::gcp::gce::client::{ComputeService, HttpComputeService, list_instances};
pub use crate::gcp::gce::error::GceError;
pub use crate::gcp::gce::format::{format_operation, format_status};
pub use crate::gcp::gce::types::*;
