// # gcebot: Google Compute Engine chatops toolkit
//
// This crate contains the core logic for operating GCE virtual machine
// instances from command tooling: looking up an instance's status, starting
// and stopping instances, and listing everything in a project/zone.
//
// The compute facade lives in `gcp::gce`; the command binaries under
// `src/bin/` are thin wrappers around it.

/// Shared HTTP client statics.
pub mod client;

/// Google Cloud Platform utilities (auth + the GCE compute facade).
pub mod gcp;
